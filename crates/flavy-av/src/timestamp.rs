//! Conversion between `HH:MM:SS` clock strings and whole seconds.
//!
//! Rendering is elapsed time, not time of day: 25 hours is `25:00:00`.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// A whole number of elapsed seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let secs = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{secs:02}")
    }
}

impl From<Timestamp> for Duration {
    fn from(ts: Timestamp) -> Self {
        Duration::from_secs(ts.0)
    }
}

/// Parse `HH:MM:SS` into seconds.
///
/// Each part must be a non-empty run of ASCII digits. Parts are not range
/// checked, so `00:90:00` is 5400 seconds.
///
/// # Errors
///
/// Returns [`Error::InvalidTimestamp`] for a wrong number of parts, a part that
/// is not a whole number, or a total that does not fit in `u64`.
pub fn parse(clock: &str) -> Result<u64> {
    let parts: Vec<&str> = clock.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(Error::invalid_timestamp(
            clock,
            format!("expected HH:MM:SS, found {} part(s)", parts.len()),
        ));
    };

    let hours = parse_part(clock, hours)?;
    let minutes = parse_part(clock, minutes)?;
    let seconds = parse_part(clock, seconds)?;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| Error::invalid_timestamp(clock, "value out of range"))
}

/// Render seconds as `HH:MM:SS`; hours grow past 23 instead of wrapping.
pub fn format(seconds: u64) -> String {
    Timestamp(seconds).to_string()
}

fn parse_part(clock: &str, part: &str) -> Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::invalid_timestamp(
            clock,
            format!("`{part}` is not a whole number"),
        ));
    }
    part.parse::<u64>()
        .map_err(|_| Error::invalid_timestamp(clock, "value out of range"))
}
