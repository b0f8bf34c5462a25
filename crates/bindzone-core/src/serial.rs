//! Zone serial progression.
//!
//! Two conventions are supported:
//!
//! - **counter**: `YYYYMMDDnn` with a daily two-digit counter. The serial
//!   line must look like `2024010101 ; serial`. Each edit yields
//!   `max(current + 1, today's YYYYMMDD01)`.
//! - **timestamp**: `YYYYMMDDHH`. The first line with a ten-digit number (or
//!   the word `Serial`) has that number replaced by the current hour.
//!
//! A document without a recognizable serial line is left as is.

use chrono::{NaiveDateTime, Timelike};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::document::ZoneDocument;
use crate::error::ZoneError;

fn counter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\s*)(\d+)\s*;\s*serial").expect("valid counter serial pattern")
    })
}

fn ten_digits() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\b\d{10}\b").expect("valid timestamp serial pattern"))
}

/// Rule used to compute the next serial
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerialPolicy {
    /// `YYYYMMDDnn`, incremented on every edit
    #[default]
    Counter,
    /// `YYYYMMDDHH` of the edit time
    Timestamp,
}

/// A serial rewrite applied to a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialChange {
    /// Line holding the serial
    pub line_index: usize,
    /// Serial before the edit
    pub previous: u64,
    /// Serial written
    pub next: u64,
}

impl SerialPolicy {
    /// Compute the serial that follows `current` at time `now`.
    #[must_use]
    pub fn next_serial(self, current: u64, now: NaiveDateTime) -> u64 {
        match self {
            Self::Counter => {
                let first_of_day = date_number(now) * 100 + 1;
                current.saturating_add(1).max(first_of_day)
            }
            Self::Timestamp => date_number(now) * 100 + u64::from(now.hour()),
        }
    }

    /// Find the serial line and its current value.
    #[must_use]
    pub fn locate(self, document: &ZoneDocument) -> Option<(usize, u64)> {
        match self {
            Self::Counter => {
                // First matching line only; an oversized number is a no-op.
                let (i, caps) = document
                    .lines()
                    .iter()
                    .enumerate()
                    .find_map(|(i, line)| counter_pattern().captures(line).map(|c| (i, c)))?;
                caps[2].parse().ok().map(|serial| (i, serial))
            }
            Self::Timestamp => {
                let (i, line) = document
                    .lines()
                    .iter()
                    .enumerate()
                    .find(|(_, l)| ten_digits().is_match(l) || l.contains("Serial"))?;
                let found = ten_digits().find(line)?;
                found.as_str().parse().ok().map(|serial| (i, serial))
            }
        }
    }

    /// Rewrite the serial line of `document` for an edit made at `now`.
    ///
    /// Returns `None` when the document has no serial line.
    pub fn apply(self, document: &mut ZoneDocument, now: NaiveDateTime) -> Option<SerialChange> {
        let Some((line_index, previous)) = self.locate(document) else {
            debug!(policy = %self, "no serial line found, leaving serial untouched");
            return None;
        };
        let next = self.next_serial(previous, now);
        let line = &document.lines()[line_index];

        let rewritten = match self {
            Self::Counter => {
                let indent = counter_pattern()
                    .captures(line)
                    .and_then(|c| c.get(1))
                    .map_or("", |m| m.as_str());
                format!("{indent}{next}\t; serial")
            }
            Self::Timestamp => {
                if next <= previous {
                    warn!(previous, next, "timestamp serial does not increase");
                }
                ten_digits()
                    .replace(line, next.to_string().as_str())
                    .into_owned()
            }
        };

        document.rewrite_serial_line(line_index, rewritten);
        Some(SerialChange {
            line_index,
            previous,
            next,
        })
    }
}

fn date_number(now: NaiveDateTime) -> u64 {
    now.format("%Y%m%d")
        .to_string()
        .parse()
        .unwrap_or_default()
}

impl FromStr for SerialPolicy {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "counter" | "date-counter" => Ok(Self::Counter),
            "timestamp" | "date-hour" => Ok(Self::Timestamp),
            _ => Err(ZoneError::Config(format!(
                "unknown serial policy: {s} (expected counter or timestamp)"
            ))),
        }
    }
}

impl fmt::Display for SerialPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Counter => write!(f, "counter"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}
