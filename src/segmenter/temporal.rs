//! Gap- and length-based paragraph merging.
//!
//! Single pass over the entries with no lookahead. The length check runs
//! before the current entry is appended, so a paragraph can overshoot
//! `max_paragraph_length` by up to one caption.

use super::{Paragraph, SegmenterConfig};
use crate::captions::timecode::gap_seconds;
use crate::captions::CaptionEntry;
use std::time::Duration;

/// Fold state for one segmentation pass.
#[derive(Debug, Default)]
struct Accumulator {
    buffer: String,
    buffer_start: Duration,
    last_start_time: Option<Duration>,
    paragraphs: Vec<Paragraph>,
}

impl Accumulator {
    fn push(mut self, entry: &CaptionEntry, config: &SegmenterConfig) -> Self {
        let gap = self
            .last_start_time
            .map(|last| gap_seconds(last, entry.start_time))
            .unwrap_or(0);

        let paused = gap as f64 >= config.max_gap_seconds();
        let full = self.buffer.chars().count() >= config.max_paragraph_length();

        if paused || full {
            self.flush();
            self.start(entry);
        } else if self.buffer.is_empty() {
            self.start(entry);
        } else {
            self.buffer.push(' ');
            self.buffer.push_str(&entry.text);
        }

        self.last_start_time = Some(entry.start_time);
        self
    }

    fn start(&mut self, entry: &CaptionEntry) {
        self.buffer = entry.text.clone();
        self.buffer_start = entry.start_time;
    }

    fn flush(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            self.paragraphs.push(Paragraph::new(text, self.buffer_start));
        }
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        self.paragraphs
    }
}

/// Merge caption entries into paragraphs.
///
/// Paragraphs no longer than `min_paragraph_length` characters are dropped.
pub fn segment(entries: &[CaptionEntry], config: &SegmenterConfig) -> Vec<Paragraph> {
    entries
        .iter()
        .fold(Accumulator::default(), |acc, entry| acc.push(entry, config))
        .finish()
        .into_iter()
        .filter(|p| p.len() > config.min_paragraph_length())
        .collect()
}
