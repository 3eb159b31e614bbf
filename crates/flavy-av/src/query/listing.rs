//! Parsing of the `-formats`, `-encoders` and `-decoders` listings.
//!
//! Every listing opens with a legend explaining the flag columns, closed by a
//! line of dashes as wide as the flag block, followed by one entry per line:
//!
//! ```text
//! Encoders:
//!  V..... = Video
//!  A..... = Audio
//!  ------
//!  V....D libx264              libx264 H.264 / AVC / MPEG-4 AVC (codec h264)
//!  A....D aac                  AAC (Advanced Audio Coding)
//! ```
//!
//! Flags are positional and may contain blanks (`" E "`, `"D d"`), so the flag
//! block is cut by the column span of the separator rather than split on
//! whitespace.

use super::{QueryKind, QueryResult, FORMAT_COLUMN, MUX_COLUMN, TYPE_COLUMN};
use crate::{Error, Result};

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub flags: String,
    pub name: String,
    pub description: String,
}

impl ListingEntry {
    /// Codec type tag: the first flag column (`V`, `A`, `S`, `D`, `T`).
    pub fn type_tag(&self) -> String {
        self.flags.chars().next().map(String::from).unwrap_or_default()
    }
}

/// Parse a listing into its entries, in the order the tool printed them.
pub fn parse_listing(tool: &str, text: &str) -> Result<Vec<ListingEntry>> {
    let mut lines = text.lines().enumerate();

    let (flags_start, flags_width) = lines
        .by_ref()
        .find_map(|(_, line)| separator_span(line))
        .ok_or_else(|| Error::parse_error(tool, "listing has no separator line"))?;
    let flags_end = flags_start + flags_width;

    let mut entries = Vec::new();
    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let (flags, rest) = match (line.get(flags_start..flags_end), line.get(flags_end..)) {
            (Some(flags), Some(rest)) => (flags, rest.trim()),
            _ => {
                return Err(Error::parse_error(
                    tool,
                    format!("line {}: too short for the flag columns: {line:?}", idx + 1),
                ))
            }
        };

        let (name, description) = match rest.split_once(char::is_whitespace) {
            Some((name, description)) => (name, description.trim()),
            None => (rest, ""),
        };
        if name.is_empty() {
            return Err(Error::parse_error(
                tool,
                format!("line {}: entry has no name: {line:?}", idx + 1),
            ));
        }

        entries.push(ListingEntry {
            flags: flags.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        });
    }

    Ok(entries)
}

/// Parse the listing printed for `kind` into the columns a
/// [`QueryRunner`](super::QueryRunner) returns.
///
/// Formats yield `format` and `mux`; encoders and decoders additionally carry
/// the `type` tag of every codec.
pub fn parse_query_output(kind: QueryKind, text: &str) -> Result<QueryResult> {
    let entries = parse_listing(kind.as_str(), text)?;

    let names = entries.iter().map(|e| e.name.clone());
    let descriptions = entries.iter().map(|e| e.description.clone());
    let mut result = QueryResult::new()
        .with_column(FORMAT_COLUMN, names)
        .with_column(MUX_COLUMN, descriptions);

    if matches!(kind, QueryKind::Encoders | QueryKind::Decoders) {
        result.insert_column(TYPE_COLUMN, entries.iter().map(ListingEntry::type_tag));
    }

    Ok(result)
}

/// Column span of a separator line (`" ------"`), if `line` is one.
fn separator_span(line: &str) -> Option<(usize, usize)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b == b'-') {
        return None;
    }
    let start = line.len() - line.trim_start().len();
    Some((start, trimmed.len()))
}
