//! Tool configuration consumed by [`Flavy`](crate::Flavy).

use crate::command::DEFAULT_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where the engine binaries live and how long a single invocation may take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlavyConfig {
    /// ffmpeg binary, a bare name is looked up on `PATH`.
    pub ffmpeg_path: PathBuf,
    /// ffprobe binary, a bare name is looked up on `PATH`.
    pub ffprobe_path: PathBuf,
    /// Maximum execution time before a tool is killed.
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for FlavyConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Serde helpers to (de)serialize `Duration` as whole seconds.
mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
