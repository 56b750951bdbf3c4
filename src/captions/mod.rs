//! Caption parsing for SRT subtitle tracks.
//!
//! Decodes blank-line separated, sequence-numbered blocks into ordered
//! `(start time, text)` entries, dropping noise such as `[Music]` markers,
//! bare numbers and fragments too short to carry meaning.

mod parser;
pub mod timecode;

pub use parser::{parse, parse_with_stats, ParseStats};

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single caption decoded from one subtitle block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Start time of the caption (millisecond precision).
    pub start_time: Duration,
    /// Cleaned caption text.
    pub text: String,
}

impl CaptionEntry {
    /// Create a new caption entry.
    pub fn new(start_time: Duration, text: impl Into<String>) -> Self {
        Self {
            start_time,
            text: text.into(),
        }
    }

    /// Start time in seconds.
    pub fn start_seconds(&self) -> f64 {
        self.start_time.as_secs_f64()
    }
}

impl std::fmt::Display for CaptionEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", timecode::format_srt_timestamp(self.start_time), self.text)
    }
}
