//! Transcript document rendering.
//!
//! Turns segmented paragraphs plus metadata into a titled document and
//! derives a filesystem-safe file name from the title.

mod format;

pub use format::{DocumentExport, OutputFormat, ParagraphExport, DISCLAIMER};

use crate::error::Result;
use crate::segmenter::Paragraph;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

/// Characters that are not word characters, whitespace or hyphens.
static UNSAFE_TITLE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s-]").expect("Invalid regex"));

/// Maximum length of a sanitized title, in characters.
const MAX_TITLE_CHARS: usize = 50;

/// A rendered-once transcript with its metadata.
#[derive(Debug, Clone)]
pub struct Document {
    pub title: String,
    pub source_locator: String,
    pub generated_at: DateTime<Local>,
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        source_locator: impl Into<String>,
        paragraphs: Vec<Paragraph>,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            title: title.into(),
            source_locator: source_locator.into(),
            generated_at,
            paragraphs,
        }
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Render the document in the given format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Markdown => Ok(format::format_markdown(self)),
            OutputFormat::Json => format::format_json(self),
        }
    }

    /// Default file name for this document.
    pub fn filename(&self, format: OutputFormat) -> String {
        output_filename(&self.title, format)
    }
}

/// Render paragraphs and metadata as a Markdown document.
pub fn render(
    title: &str,
    source_locator: &str,
    paragraphs: &[Paragraph],
    generated_at: DateTime<Local>,
) -> String {
    let document = Document::new(title, source_locator, paragraphs.to_vec(), generated_at);
    format::format_markdown(&document)
}

/// Make a title safe for use in a file name.
///
/// Keeps word characters, whitespace and hyphens, joins whitespace runs
/// with a single underscore and truncates to 50 characters.
pub fn sanitize_title(title: &str) -> String {
    let kept = UNSAFE_TITLE_CHARS.replace_all(title, "");
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_TITLE_CHARS)
        .collect()
}

/// File name for a transcript of the given title.
pub fn output_filename(title: &str, format: OutputFormat) -> String {
    let safe = sanitize_title(title);
    let stem = if safe.is_empty() { "transcript".to_string() } else { format!("{}_transcript", safe) };
    format!("{}.{}", stem, format.extension())
}
