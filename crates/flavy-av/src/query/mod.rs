//! Capability queries against the engine binary.
//!
//! A [`QueryRunner`] turns a [`QueryKind`] into a [`QueryResult`]: a small set
//! of named, ordered string columns. The production runner
//! ([`FfmpegQueryRunner`]) shells out to `ffmpeg` and parses its listings; tests
//! inject their own runners that return canned results.

mod ffmpeg;
pub mod listing;

pub use ffmpeg::FfmpegQueryRunner;
pub use listing::{parse_listing, parse_query_output, ListingEntry};

use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Column holding format or codec short-names.
pub const FORMAT_COLUMN: &str = "format";
/// Column holding human-readable descriptions.
pub const MUX_COLUMN: &str = "mux";
/// Column holding single-character codec type tags (`A`, `V`, `S`, ...).
pub const TYPE_COLUMN: &str = "type";

/// The introspection requests the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Formats,
    Encoders,
    Decoders,
}

impl QueryKind {
    /// Stable query name, used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Formats => "get_formats",
            QueryKind::Encoders => "get_encoders",
            QueryKind::Decoders => "get_decoders",
        }
    }

    /// The ffmpeg flag that prints the corresponding listing.
    pub fn flag(&self) -> &'static str {
        match self {
            QueryKind::Formats => "-formats",
            QueryKind::Encoders => "-encoders",
            QueryKind::Decoders => "-decoders",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw tabular answer to a capability query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    columns: BTreeMap<String, Vec<String>>,
}

impl QueryResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`QueryResult::insert_column`].
    pub fn with_column<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert_column(name, values);
        self
    }

    /// Set a column, replacing any previous values under the same name.
    pub fn insert_column<I, S>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns
            .insert(name.into(), values.into_iter().map(Into::into).collect());
    }

    pub fn column(&self, name: &str) -> Option<&[String]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Look up a column the caller cannot do without.
    ///
    /// A missing column means the runner produced output of the wrong shape,
    /// which is reported as a parse error for `kind`.
    pub fn require_column(&self, kind: QueryKind, name: &str) -> Result<&[String]> {
        self.column(name)
            .ok_or_else(|| Error::parse_error(kind.as_str(), format!("missing `{name}` column")))
    }
}

/// Executes capability queries against an engine binary.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait QueryRunner: Send + Sync {
    /// Run `kind` against the engine at `engine_path`.
    fn run(&self, kind: QueryKind, engine_path: &Path) -> Result<QueryResult>;
}

impl<R: QueryRunner + ?Sized> QueryRunner for Arc<R> {
    fn run(&self, kind: QueryKind, engine_path: &Path) -> Result<QueryResult> {
        (**self).run(kind, engine_path)
    }
}

impl<R: QueryRunner + ?Sized> QueryRunner for Box<R> {
    fn run(&self, kind: QueryKind, engine_path: &Path) -> Result<QueryResult> {
        (**self).run(kind, engine_path)
    }
}
