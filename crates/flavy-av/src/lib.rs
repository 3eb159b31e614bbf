//! # flavy-av
//!
//! Capability discovery and media inspection on top of the `ffmpeg` and
//! `ffprobe` command-line tools.
//!
//! This crate provides:
//!
//! - **Capability cache** ([`CapabilityCache`]) -- supported formats, encoders
//!   and decoders, queried once per category and memoized.
//! - **Query runners** ([`QueryRunner`], [`FfmpegQueryRunner`]) -- the seam
//!   between the cache and the engine binary.
//! - **Command execution** ([`ToolCommand`]) -- blocking builder with timeout
//!   support for running external processes.
//! - **Timestamps** ([`Timestamp`]) -- `HH:MM:SS` <-> seconds.
//! - **Media info** ([`InfoFormat`]) -- raw or JSON ffprobe reports.
//!
//! ## Example
//!
//! ```no_run
//! use flavy_av::{Flavy, FlavyConfig};
//!
//! let flavy = Flavy::new(FlavyConfig::default());
//! if flavy.can_encode("libx264")? {
//!     println!("{} audio encoders", flavy.encoders()?.audio.len());
//! }
//! # Ok::<(), flavy_av::Error>(())
//! ```

pub mod capabilities;
pub mod command;
mod config;
mod error;
mod flavy;
pub mod info;
pub mod query;
pub mod timestamp;
pub mod tools;

// Re-exports
pub use capabilities::{CapabilityCache, CodecPartition, FormatTable};
pub use command::{ToolCommand, ToolOutput};
pub use config::FlavyConfig;
pub use error::{Error, Result};
pub use flavy::Flavy;
pub use info::InfoFormat;
pub use query::{FfmpegQueryRunner, QueryKind, QueryResult, QueryRunner};
pub use timestamp::{format as format_timestamp, parse as parse_timestamp, Timestamp};
pub use tools::{check_tool, get_tool_path, require_tool, ToolInfo};
