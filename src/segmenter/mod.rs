//! Paragraph segmentation for caption entries.
//!
//! Merges short caption fragments into prose paragraphs. A new paragraph
//! starts when the speaker pauses (a gap between start times) or when the
//! current paragraph has grown long enough.

mod temporal;

pub use temporal::segment;

use crate::captions::CaptionEntry;
use crate::error::{Result, TransdocError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};

/// A paragraph of merged caption text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Caption texts joined by single spaces.
    pub text: String,
    /// Start time of the first caption in the paragraph.
    pub start_time: Duration,
}

impl Paragraph {
    /// Create a new paragraph.
    pub fn new(text: impl Into<String>, start_time: Duration) -> Self {
        Self {
            text: text.into(),
            start_time,
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Validated thresholds for segmentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmenterConfig {
    max_gap_seconds: f64,
    max_paragraph_length: usize,
    min_paragraph_length: usize,
}

impl SegmenterConfig {
    /// Default pause, in seconds, that starts a new paragraph.
    pub const DEFAULT_MAX_GAP_SECONDS: f64 = 3.0;
    /// Default paragraph length after which a new paragraph starts.
    pub const DEFAULT_MAX_PARAGRAPH_LENGTH: i64 = 500;
    /// Default length a paragraph must exceed to be kept.
    pub const DEFAULT_MIN_PARAGRAPH_LENGTH: i64 = 30;

    /// Build a configuration from raw thresholds.
    ///
    /// Rejects a non-positive gap or maximum length and a negative minimum length.
    pub fn new(
        max_gap_seconds: f64,
        max_paragraph_length: i64,
        min_paragraph_length: i64,
    ) -> Result<Self> {
        if !max_gap_seconds.is_finite() || max_gap_seconds <= 0.0 {
            return Err(TransdocError::InvalidConfiguration(format!(
                "max_gap_seconds must be positive, got {}",
                max_gap_seconds
            )));
        }
        if max_paragraph_length <= 0 {
            return Err(TransdocError::InvalidConfiguration(format!(
                "max_paragraph_length must be positive, got {}",
                max_paragraph_length
            )));
        }
        if min_paragraph_length < 0 {
            return Err(TransdocError::InvalidConfiguration(format!(
                "min_paragraph_length must not be negative, got {}",
                min_paragraph_length
            )));
        }

        Ok(Self {
            max_gap_seconds,
            max_paragraph_length: max_paragraph_length as usize,
            min_paragraph_length: min_paragraph_length as usize,
        })
    }

    pub fn max_gap_seconds(&self) -> f64 {
        self.max_gap_seconds
    }

    pub fn max_paragraph_length(&self) -> usize {
        self.max_paragraph_length
    }

    pub fn min_paragraph_length(&self) -> usize {
        self.min_paragraph_length
    }
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_gap_seconds: Self::DEFAULT_MAX_GAP_SECONDS,
            max_paragraph_length: Self::DEFAULT_MAX_PARAGRAPH_LENGTH as usize,
            min_paragraph_length: Self::DEFAULT_MIN_PARAGRAPH_LENGTH as usize,
        }
    }
}

/// Splits caption entries into paragraphs with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Segment entries into paragraphs, in source order.
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn segment(&self, entries: &[CaptionEntry]) -> Vec<Paragraph> {
        let paragraphs = segment(entries, &self.config);
        info!("Segmented {} entries into {} paragraphs", entries.len(), paragraphs.len());
        paragraphs
    }
}
