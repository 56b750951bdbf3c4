//! Subtitle source abstraction for transdoc.
//!
//! Provides a trait-based interface for the places a subtitle track can come
//! from (YouTube via yt-dlp, local SRT files). The conversion core never
//! talks to these directly; the pipeline hands it the raw text they return.

mod local;
mod youtube;

pub use local::LocalSource;
pub use youtube::YoutubeSource;

use crate::config::Settings;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Title used when a source cannot provide one.
pub const UNTITLED: &str = "Untitled";

/// Type of subtitle source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    YouTube,
    Local,
}

impl SourceKind {
    /// External tool this source shells out to, if any.
    pub fn required_tool(&self) -> Option<&'static str> {
        match self {
            SourceKind::YouTube => Some("yt-dlp"),
            SourceKind::Local => None,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::YouTube => write!(f, "youtube"),
            SourceKind::Local => write!(f, "local"),
        }
    }
}

/// Trait for subtitle source providers.
#[async_trait]
pub trait SubtitleSource: Send + Sync {
    /// Get the source kind.
    fn kind(&self) -> SourceKind;

    /// Check if this source can handle the given input.
    fn can_handle(&self, input: &str) -> bool;

    /// Canonical locator (URL or path) recorded in the document.
    fn locator(&self, input: &str) -> Result<String>;

    /// Fetch a display title for the input.
    async fn fetch_title(&self, input: &str) -> Result<String>;

    /// Fetch the raw SRT text of the subtitle track.
    async fn fetch_subtitles(&self, input: &str, language: &str) -> Result<String>;
}

/// Detect the appropriate subtitle source for the given input.
///
/// Existing local files win over YouTube IDs, since an 11-character file
/// name would otherwise look like a video ID.
pub fn detect_source(input: &str, settings: &Settings) -> Option<Box<dyn SubtitleSource>> {
    let local = LocalSource::new();
    if local.can_handle(input) {
        return Some(Box::new(local));
    }

    let youtube = YoutubeSource::new(settings.youtube.clone(), settings.temp_dir());
    if youtube.can_handle(input) {
        return Some(Box::new(youtube));
    }

    None
}

/// Fetch a title, falling back to a placeholder when the source fails.
pub async fn resolve_title(source: &dyn SubtitleSource, input: &str) -> String {
    match source.fetch_title(input).await {
        Ok(title) if !title.trim().is_empty() => title.trim().to_string(),
        Ok(_) => {
            warn!("Source returned an empty title, using placeholder");
            UNTITLED.to_string()
        }
        Err(e) => {
            warn!("Could not fetch title: {}", e);
            UNTITLED.to_string()
        }
    }
}
