mod cli;

use flavy::config;
use flavy_av::{CodecPartition, Flavy, Timestamp};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "flavy=trace,flavy_av=trace".to_string()
        } else {
            "flavy=info,flavy_av=info".to_string()
        }
    });

    // Logs go to stderr so listings on stdout stay pipeable.
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone();
    let flavy = || -> Result<Flavy> {
        let config = config::load_config_or_default(config_path.as_deref())?;
        tracing::debug!("Engine: {:?}", config.tools.ffmpeg_path);
        Ok(Flavy::new(config.tools))
    };

    match cli.command {
        Commands::Formats { json } => list_formats(&flavy()?, json),
        Commands::Encoders { json } => {
            let encoders = flavy()?.encoders()?;
            print_partition("encoders", &encoders, json)
        }
        Commands::Decoders { json } => {
            let decoders = flavy()?.decoders()?;
            print_partition("decoders", &decoders, json)
        }
        Commands::CanEncode { name } => {
            let supported = flavy()?.can_encode(&name)?;
            report_support("encoder", &name, supported)
        }
        Commands::CanDecode { name } => {
            let supported = flavy()?.can_decode(&name)?;
            report_support("decoder", &name, supported)
        }
        Commands::Info { file, format } => {
            let report = flavy()?.info(&file, format)?;
            print!("{}", report);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Timestamp { value } => convert_timestamp(&value),
        Commands::CheckTools => check_tools(&flavy()?),
        Commands::Validate { file } => {
            let path = file.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("flavy {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list_formats(flavy: &Flavy, json: bool) -> Result<ExitCode> {
    let formats = flavy.formats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&*formats)?);
    } else {
        println!("Formats: {}", formats.len());
        for (name, description) in formats.iter() {
            println!("  {:<24} {}", name, description);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_partition(label: &str, codecs: &CodecPartition, json: bool) -> Result<ExitCode> {
    if json {
        println!("{}", serde_json::to_string_pretty(codecs)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("Audio {}: {}", label, codecs.audio.len());
    for name in &codecs.audio {
        println!("  {}", name);
    }

    println!("\nVideo {}: {}", label, codecs.video.len());
    for name in &codecs.video {
        println!("  {}", name);
    }

    Ok(ExitCode::SUCCESS)
}

fn report_support(kind: &str, name: &str, supported: bool) -> Result<ExitCode> {
    if supported {
        println!("✓ {} {} is available", kind, name);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("✗ {} {} is not available", kind, name);
        Ok(ExitCode::FAILURE)
    }
}

fn convert_timestamp(value: &str) -> Result<ExitCode> {
    if value.contains(':') {
        let timestamp: Timestamp = value.parse()?;
        println!("{}", timestamp.as_secs());
    } else {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("Not a clock string or a number of seconds: {:?}", value))?;
        println!("{}", Timestamp::from_secs(secs));
    }

    Ok(ExitCode::SUCCESS)
}

fn check_tools(flavy: &Flavy) -> Result<ExitCode> {
    println!("Checking external tools...\n");

    let tools = flavy.check_tools();
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version);
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them or point [tools] at them in the config.");
    }

    Ok(ExitCode::SUCCESS)
}

fn validate_config(path: Option<&std::path::Path>) -> Result<ExitCode> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  ffmpeg: {}", config.tools.ffmpeg_path.display());
    println!("  ffprobe: {}", config.tools.ffprobe_path.display());
    println!("  Timeout: {}s", config.tools.timeout.as_secs());

    Ok(ExitCode::SUCCESS)
}
