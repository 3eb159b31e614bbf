//! FFprobe-based media inspection.

use crate::command::ToolCommand;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// ffprobe output writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InfoFormat {
    Default,
    Compact,
    Csv,
    Flat,
    Ini,
    #[default]
    Json,
    Xml,
}

impl InfoFormat {
    /// Writer name as ffprobe's `-print_format` expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoFormat::Default => "default",
            InfoFormat::Compact => "compact",
            InfoFormat::Csv => "csv",
            InfoFormat::Flat => "flat",
            InfoFormat::Ini => "ini",
            InfoFormat::Json => "json",
            InfoFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for InfoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InfoFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(InfoFormat::Default),
            "compact" => Ok(InfoFormat::Compact),
            "csv" => Ok(InfoFormat::Csv),
            "flat" => Ok(InfoFormat::Flat),
            "ini" => Ok(InfoFormat::Ini),
            "json" => Ok(InfoFormat::Json),
            "xml" => Ok(InfoFormat::Xml),
            other => Err(Error::InvalidInput(format!(
                "unknown info format `{other}` (expected default, compact, csv, flat, ini, json or xml)"
            ))),
        }
    }
}

/// Run ffprobe on `input` and return its format and stream report verbatim.
pub fn probe_info(
    ffprobe: &Path,
    input: &Path,
    format: InfoFormat,
    timeout: Duration,
) -> Result<String> {
    match std::fs::metadata(input) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::file_not_found(input));
        }
        Err(e) => return Err(e.into()),
    }

    let output = ToolCommand::new(ffprobe)
        .args(["-v", "quiet", "-print_format", format.as_str()])
        .args(["-show_format", "-show_streams"])
        .arg(input)
        .timeout(timeout)
        .execute()?;

    Ok(output.stdout)
}

/// Run ffprobe on `input` and decode the JSON report.
pub fn probe_info_json(ffprobe: &Path, input: &Path, timeout: Duration) -> Result<serde_json::Value> {
    let report = probe_info(ffprobe, input, InfoFormat::Json, timeout)?;
    Ok(serde_json::from_str(&report)?)
}
