//! Memoized knowledge of what the engine can do.
//!
//! [`CapabilityCache`] answers format, encoder and decoder questions by asking
//! its [`QueryRunner`] once per category and keeping the parsed answer for its
//! whole lifetime. A slot is only filled after the query and the parse both
//! succeed, so a failed attempt leaves nothing behind and the next call asks
//! again.

use crate::query::{QueryKind, QueryRunner, FORMAT_COLUMN, MUX_COLUMN, TYPE_COLUMN};
use crate::{Error, Result};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Type tag marking an audio codec; every other tag counts as video.
const AUDIO_TAG: &str = "A";

/// Container format short-name -> description.
pub type FormatTable = BTreeMap<String, String>;

/// Codec names split by media type, in the order the engine listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodecPartition {
    pub audio: Vec<String>,
    pub video: Vec<String>,
}

impl CodecPartition {
    /// Partition `names` by the parallel `types` column.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Integrity`] if the columns differ in length.
    pub fn from_columns(kind: QueryKind, names: &[String], types: &[String]) -> Result<Self> {
        if names.len() != types.len() {
            return Err(Error::integrity(
                kind.as_str(),
                format!(
                    "{} codec names but {} type tags",
                    names.len(),
                    types.len()
                ),
            ));
        }

        let mut partition = Self::default();
        for (name, tag) in names.iter().zip(types) {
            if tag == AUDIO_TAG {
                partition.audio.push(name.clone());
            } else {
                partition.video.push(name.clone());
            }
        }
        Ok(partition)
    }

    /// Exact, case-sensitive membership on either side.
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|codec| codec == name)
    }

    /// All codec names, audio first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.audio.iter().chain(&self.video).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.audio.len() + self.video.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.video.is_empty()
    }
}

#[derive(Debug)]
enum Slot<T> {
    Unpopulated,
    Populated(Arc<T>),
}

/// Lazily populated, never invalidated capability store.
///
/// Each category has its own lock, held while that category is being
/// populated: concurrent callers for the same category wait for the first one
/// instead of spawning their own query.
#[derive(Debug)]
pub struct CapabilityCache<R> {
    runner: R,
    engine_path: PathBuf,
    formats: Mutex<Slot<FormatTable>>,
    encoders: Mutex<Slot<CodecPartition>>,
    decoders: Mutex<Slot<CodecPartition>>,
}

impl<R: QueryRunner> CapabilityCache<R> {
    pub fn new(runner: R, engine_path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            engine_path: engine_path.into(),
            formats: Mutex::new(Slot::Unpopulated),
            encoders: Mutex::new(Slot::Unpopulated),
            decoders: Mutex::new(Slot::Unpopulated),
        }
    }

    /// Engine binary every query is run against.
    pub fn engine_path(&self) -> &Path {
        &self.engine_path
    }

    /// Supported container formats.
    pub fn formats(&self) -> Result<Arc<FormatTable>> {
        populate(&self.formats, QueryKind::Formats, || self.query_formats())
    }

    /// Available encoders, split into audio and video.
    pub fn encoders(&self) -> Result<Arc<CodecPartition>> {
        populate(&self.encoders, QueryKind::Encoders, || {
            self.query_codecs(QueryKind::Encoders)
        })
    }

    /// Available decoders, split into audio and video.
    pub fn decoders(&self) -> Result<Arc<CodecPartition>> {
        populate(&self.decoders, QueryKind::Decoders, || {
            self.query_codecs(QueryKind::Decoders)
        })
    }

    /// Whether an encoder named exactly `name` exists.
    pub fn can_encode(&self, name: &str) -> Result<bool> {
        Ok(self.encoders()?.contains(name))
    }

    /// Whether a decoder named exactly `name` exists.
    pub fn can_decode(&self, name: &str) -> Result<bool> {
        Ok(self.decoders()?.contains(name))
    }

    /// Whether the slot for `kind` has been filled.
    pub fn is_populated(&self, kind: QueryKind) -> bool {
        match kind {
            QueryKind::Formats => matches!(*self.formats.lock(), Slot::Populated(_)),
            QueryKind::Encoders => matches!(*self.encoders.lock(), Slot::Populated(_)),
            QueryKind::Decoders => matches!(*self.decoders.lock(), Slot::Populated(_)),
        }
    }

    fn query_formats(&self) -> Result<FormatTable> {
        let kind = QueryKind::Formats;
        let result = self.runner.run(kind, &self.engine_path)?;
        let names = result.require_column(kind, FORMAT_COLUMN)?;
        let descriptions = result.require_column(kind, MUX_COLUMN)?;

        if names.len() != descriptions.len() {
            return Err(Error::integrity(
                kind.as_str(),
                format!(
                    "{} format names but {} descriptions",
                    names.len(),
                    descriptions.len()
                ),
            ));
        }

        let mut table = FormatTable::new();
        for (name, description) in names.iter().zip(descriptions) {
            if table.insert(name.clone(), description.clone()).is_some() {
                tracing::debug!(format = %name, "duplicate format name, keeping the later entry");
            }
        }
        Ok(table)
    }

    fn query_codecs(&self, kind: QueryKind) -> Result<CodecPartition> {
        let result = self.runner.run(kind, &self.engine_path)?;
        let names = result.require_column(kind, FORMAT_COLUMN)?;
        let types = result.require_column(kind, TYPE_COLUMN)?;
        CodecPartition::from_columns(kind, names, types)
    }
}

fn populate<T>(
    slot: &Mutex<Slot<T>>,
    kind: QueryKind,
    fill: impl FnOnce() -> Result<T>,
) -> Result<Arc<T>> {
    let mut guard = slot.lock();
    if let Slot::Populated(value) = &*guard {
        return Ok(Arc::clone(value));
    }

    tracing::debug!(query = %kind, "populating capability cache");
    match fill() {
        Ok(value) => {
            let value = Arc::new(value);
            *guard = Slot::Populated(Arc::clone(&value));
            Ok(value)
        }
        Err(e) => {
            tracing::warn!(query = %kind, error = %e, "capability query failed");
            Err(e)
        }
    }
}
