use clap::{Parser, Subcommand};
use flavy_av::InfoFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flavy")]
#[command(author, version, about = "Inspect what an ffmpeg build can do")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List supported container formats
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available encoders, split into audio and video
    Encoders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available decoders, split into audio and video
    Decoders {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether an encoder is available (exit status 1 if not)
    CanEncode {
        /// Exact encoder name, e.g. libx264
        #[arg(required = true)]
        name: String,
    },

    /// Check whether a decoder is available (exit status 1 if not)
    CanDecode {
        /// Exact decoder name, e.g. h264
        #[arg(required = true)]
        name: String,
    },

    /// Print the ffprobe report for a media file
    Info {
        /// File to inspect
        #[arg(required = true)]
        file: PathBuf,

        /// Report format: default, compact, csv, flat, ini, json or xml
        #[arg(short, long, default_value = "json")]
        format: InfoFormat,
    },

    /// Convert between HH:MM:SS and a number of seconds
    Timestamp {
        /// Either a clock string (01:02:03) or whole seconds (3723)
        #[arg(required = true)]
        value: String,
    },

    /// Check that the configured ffmpeg and ffprobe are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        #[arg(value_name = "CONFIG")]
        file: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
