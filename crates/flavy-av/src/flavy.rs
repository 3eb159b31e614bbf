//! The [`Flavy`] facade.

use crate::capabilities::{CapabilityCache, CodecPartition, FormatTable};
use crate::config::FlavyConfig;
use crate::info::{self, InfoFormat};
use crate::query::{FfmpegQueryRunner, QueryRunner};
use crate::tools::{check_tool, ToolInfo};
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// Entry point tying a [`FlavyConfig`] to one [`CapabilityCache`].
///
/// Capability answers are memoized per instance: two `Flavy` values query the
/// engine independently.
#[derive(Debug)]
pub struct Flavy<R = FfmpegQueryRunner> {
    config: FlavyConfig,
    capabilities: CapabilityCache<R>,
}

impl Flavy {
    /// Create a facade that shells out to the configured ffmpeg.
    pub fn new(config: FlavyConfig) -> Self {
        let runner = FfmpegQueryRunner::with_timeout(config.timeout);
        Self::with_runner(config, runner)
    }
}

impl Default for Flavy {
    fn default() -> Self {
        Self::new(FlavyConfig::default())
    }
}

impl<R: QueryRunner> Flavy<R> {
    /// Create a facade that answers capability queries through `runner`.
    pub fn with_runner(config: FlavyConfig, runner: R) -> Self {
        let capabilities = CapabilityCache::new(runner, config.ffmpeg_path.clone());
        Self {
            config,
            capabilities,
        }
    }

    pub fn config(&self) -> &FlavyConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &CapabilityCache<R> {
        &self.capabilities
    }

    /// See [`CapabilityCache::formats`].
    pub fn formats(&self) -> Result<Arc<FormatTable>> {
        self.capabilities.formats()
    }

    /// See [`CapabilityCache::encoders`].
    pub fn encoders(&self) -> Result<Arc<CodecPartition>> {
        self.capabilities.encoders()
    }

    /// See [`CapabilityCache::decoders`].
    pub fn decoders(&self) -> Result<Arc<CodecPartition>> {
        self.capabilities.decoders()
    }

    pub fn can_encode(&self, name: &str) -> Result<bool> {
        self.capabilities.can_encode(name)
    }

    pub fn can_decode(&self, name: &str) -> Result<bool> {
        self.capabilities.can_decode(name)
    }

    /// ffprobe report for `input` in the requested writer format.
    pub fn info(&self, input: impl AsRef<Path>, format: InfoFormat) -> Result<String> {
        info::probe_info(
            &self.config.ffprobe_path,
            input.as_ref(),
            format,
            self.config.timeout,
        )
    }

    /// ffprobe report for `input`, decoded from JSON.
    pub fn info_json(&self, input: impl AsRef<Path>) -> Result<serde_json::Value> {
        info::probe_info_json(&self.config.ffprobe_path, input.as_ref(), self.config.timeout)
    }

    /// Availability of the configured ffmpeg and ffprobe binaries.
    pub fn check_tools(&self) -> Vec<ToolInfo> {
        vec![
            check_tool(&self.config.ffmpeg_path, "-version"),
            check_tool(&self.config.ffprobe_path, "-version"),
        ]
    }
}
