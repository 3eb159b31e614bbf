//! External tool detection.

use crate::command::ToolCommand;
use crate::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Version probes should answer almost immediately.
const VERSION_TIMEOUT: Duration = Duration::from_secs(10);

/// Information about an external tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    /// Name of the tool.
    pub name: String,
    /// Whether the tool is available.
    pub available: bool,
    /// Version string if available.
    pub version: Option<String>,
    /// Path to the tool executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available and get its information.
///
/// `program` may be a bare name looked up on `PATH` or a path to the binary.
/// ffmpeg and ffprobe answer to `-version` rather than `--version`.
///
/// # Example
///
/// ```no_run
/// use flavy_av::check_tool;
///
/// let info = check_tool("ffprobe", "-version");
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool(program: impl AsRef<Path>, version_arg: &str) -> ToolInfo {
    let program = program.as_ref();
    let name = program
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string_lossy().to_string());

    let result = ToolCommand::new(program)
        .arg(version_arg)
        .timeout(VERSION_TIMEOUT)
        .execute();

    match result {
        Ok(output) => {
            let version = output.stdout.lines().next().map(|s| s.to_string());
            let path = get_tool_path(&name, Some(program)).ok();

            ToolInfo {
                name,
                available: true,
                version,
                path,
            }
        }
        Err(e) => {
            tracing::debug!(tool = %name, error = %e, "tool check failed");
            ToolInfo {
                name,
                available: false,
                version: None,
                path: None,
            }
        }
    }
}

/// Require that a tool is available, returning its path.
///
/// # Errors
///
/// Returns an error if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| Error::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
pub fn get_tool_path(name: &str, config_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = config_path {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }

    require_tool(name)
}
