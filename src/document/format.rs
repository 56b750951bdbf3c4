//! Document output formatting (Markdown, JSON).

use super::Document;
use crate::error::{Result, TransdocError};
use serde::Serialize;

/// Closing line appended to every Markdown transcript.
pub const DISCLAIMER: &str =
    "*This transcript was generated automatically. Please refer to the original video for context.*";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use markdown or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// JSON-serializable document for export.
#[derive(Debug, Serialize)]
pub struct DocumentExport<'a> {
    pub title: &'a str,
    pub source: &'a str,
    pub generated_at: String,
    pub paragraph_count: usize,
    pub paragraphs: Vec<ParagraphExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ParagraphExport<'a> {
    pub text: &'a str,
    pub start_seconds: f64,
}

impl<'a> From<&'a Document> for DocumentExport<'a> {
    fn from(document: &'a Document) -> Self {
        Self {
            title: &document.title,
            source: &document.source_locator,
            generated_at: document.generated_at.to_rfc3339(),
            paragraph_count: document.paragraph_count(),
            paragraphs: document
                .paragraphs
                .iter()
                .map(|p| ParagraphExport {
                    text: &p.text,
                    start_seconds: p.start_time.as_secs_f64(),
                })
                .collect(),
        }
    }
}

/// Format as Markdown.
pub(super) fn format_markdown(document: &Document) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", document.title));
    output.push_str("> Video transcript\n\n");
    output.push_str(&format!("**Source**: {}\n", document.source_locator));
    output.push_str(&format!(
        "**Generated**: {}\n",
        document.generated_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("**Paragraphs**: {}\n\n", document.paragraph_count()));
    output.push_str("---\n\n");

    output.push_str("## Full Text\n\n");
    for paragraph in &document.paragraphs {
        output.push_str(&paragraph.text);
        output.push_str("\n\n");
    }

    output.push_str("---\n\n");
    output.push_str(DISCLAIMER);
    output.push('\n');

    output
}

/// Format as pretty-printed JSON.
pub(super) fn format_json(document: &Document) -> Result<String> {
    let export = DocumentExport::from(document);
    serde_json::to_string_pretty(&export).map_err(|e| TransdocError::Render(e.to_string()))
}
