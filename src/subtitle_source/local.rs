//! Local SRT file source.

use super::{SourceKind, SubtitleSource};
use crate::error::{Result, TransdocError};
use async_trait::async_trait;
use std::path::Path;

/// Local subtitle files (`.srt`).
pub struct LocalSource;

impl LocalSource {
    pub fn new() -> Self {
        Self
    }

    /// Check if path has an SRT extension.
    fn is_srt_file(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("srt"))
            .unwrap_or(false)
    }

    fn existing_srt(input: &str) -> Result<&Path> {
        let path = Path::new(input);

        if !path.is_file() {
            return Err(TransdocError::InvalidInput(format!("File not found: {}", input)));
        }

        if !Self::is_srt_file(path) {
            return Err(TransdocError::InvalidInput(format!(
                "Not an SRT subtitle file: {}",
                input
            )));
        }

        Ok(path)
    }
}

impl Default for LocalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubtitleSource for LocalSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Local
    }

    fn can_handle(&self, input: &str) -> bool {
        let path = Path::new(input);
        path.is_file() && Self::is_srt_file(path)
    }

    fn locator(&self, input: &str) -> Result<String> {
        let path = Self::existing_srt(input)?;
        Ok(path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf())
            .to_string_lossy()
            .to_string())
    }

    async fn fetch_title(&self, input: &str) -> Result<String> {
        let path = Self::existing_srt(input)?;
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
            .ok_or_else(|| TransdocError::InvalidInput(format!("No file name in {}", input)))
    }

    async fn fetch_subtitles(&self, input: &str, _language: &str) -> Result<String> {
        let path = Self::existing_srt(input)?;
        Ok(tokio::fs::read_to_string(path).await?)
    }
}
