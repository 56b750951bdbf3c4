//! Pipeline for transdoc.
//!
//! Coordinates the process from subtitle acquisition to the written
//! document. The conversion itself (`Pipeline::convert`) is synchronous and
//! touches no I/O; `Pipeline::process` wraps it with a subtitle source and
//! file output.

use crate::captions::{self, ParseStats};
use crate::config::Settings;
use crate::document::{Document, OutputFormat};
use crate::error::{Result, TransdocError};
use crate::segmenter::{Segmenter, SegmenterConfig};
use crate::subtitle_source::{detect_source, resolve_title, SubtitleSource};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Output path meaning "write to stdout".
pub const STDOUT: &str = "-";

/// Result of converting one subtitle track.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub stats: ParseStats,
    pub document: Document,
}

impl Conversion {
    /// Number of caption entries that survived parsing.
    pub fn entry_count(&self) -> usize {
        self.stats.accepted
    }
}

/// What to convert and where to put it.
#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    /// YouTube URL/ID or local SRT path.
    pub input: String,
    /// Output file, `-` for stdout, or `None` for a name derived from the title.
    pub output: Option<String>,
    pub format: OutputFormat,
    /// Subtitle language; falls back to the configured language.
    pub language: Option<String>,
    /// Title override; skips the title lookup.
    pub title: Option<String>,
}

/// Outcome of a processed request.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub title: String,
    pub entry_count: usize,
    pub paragraph_count: usize,
    /// Written file, or `None` when the document went to stdout.
    pub output_path: Option<PathBuf>,
    /// Rendered document text.
    pub rendered: String,
}

/// The main pipeline.
pub struct Pipeline {
    settings: Settings,
    segmenter: Segmenter,
}

impl Pipeline {
    /// Create a pipeline, validating the segmentation thresholds up front.
    pub fn new(settings: Settings) -> Result<Self> {
        let config = settings.segmenter_config()?;
        Ok(Self::with_config(settings, config))
    }

    /// Create a pipeline with explicit segmenter thresholds.
    pub fn with_config(settings: Settings, config: SegmenterConfig) -> Self {
        Self {
            settings,
            segmenter: Segmenter::new(config),
        }
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convert raw SRT text into a document.
    ///
    /// Zero paragraphs after filtering is not an error; zero parsed entries is.
    #[instrument(skip(self, raw, generated_at), fields(bytes = raw.len()))]
    pub fn convert(
        &self,
        raw: &str,
        title: &str,
        source_locator: &str,
        generated_at: DateTime<Local>,
    ) -> Result<Conversion> {
        let (entries, stats) = captions::parse_with_stats(raw);
        stats.ensure_entries()?;

        let paragraphs = self.segmenter.segment(&entries);
        if paragraphs.is_empty() {
            warn!(
                "{} entries parsed but no paragraph exceeded {} characters",
                entries.len(),
                self.segmenter.config().min_paragraph_length()
            );
        }

        let document = Document::new(title, source_locator, paragraphs, generated_at);
        Ok(Conversion { stats, document })
    }

    /// Acquire subtitles for the request, convert them and write the result.
    #[instrument(skip(self, request), fields(input = %request.input))]
    pub async fn process(&self, request: &ProcessRequest) -> Result<ProcessResult> {
        let source = detect_source(&request.input, &self.settings).ok_or_else(|| {
            TransdocError::InvalidInput(format!(
                "Not a YouTube URL/ID or an existing .srt file: {}",
                request.input
            ))
        })?;

        self.process_with_source(source.as_ref(), request).await
    }

    /// Like [`Pipeline::process`], with an explicit subtitle source.
    pub async fn process_with_source(
        &self,
        source: &dyn SubtitleSource,
        request: &ProcessRequest,
    ) -> Result<ProcessResult> {
        let locator = source.locator(&request.input)?;

        let title = match &request.title {
            Some(title) => title.clone(),
            None => resolve_title(source, &request.input).await,
        };
        info!("Title: {}", title);

        let language = request
            .language
            .as_deref()
            .unwrap_or(&self.settings.youtube.language);
        let raw = source.fetch_subtitles(&request.input, language).await?;

        let conversion = self.convert(&raw, &title, &locator, Local::now())?;
        let rendered = conversion.document.render(request.format)?;

        let output_path = match request.output.as_deref() {
            Some(STDOUT) => None,
            Some(path) => Some(PathBuf::from(path)),
            None => Some(
                self.settings
                    .output_dir()
                    .join(conversion.document.filename(request.format)),
            ),
        };

        if let Some(path) = &output_path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &rendered)?;
            info!("Wrote {:?}", path);
        }

        Ok(ProcessResult {
            title,
            entry_count: conversion.entry_count(),
            paragraph_count: conversion.document.paragraph_count(),
            output_path,
            rendered,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmptyReason;
    use crate::subtitle_source::SourceKind;
    use async_trait::async_trait;
    use chrono::TimeZone;

    const TRACK: &str = "1\n00:00:01,000 --> 00:00:02,000\n[Music]\n\n\
        2\n00:00:02,000 --> 00:00:04,000\nWelcome back to the channel everyone\n\n\
        3\n00:00:04,500 --> 00:00:06,000\ntoday we are looking at parsers\n\n\
        4\n00:00:12,000 --> 00:00:14,000\nAfter the break we write the segmenter itself\n\n\
        5\n00:00:20,000 --> 00:00:21,000\nbye\n";

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(Settings::default()).unwrap()
    }

    struct StaticSource {
        raw: &'static str,
    }

    #[async_trait]
    impl SubtitleSource for StaticSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Local
        }

        fn can_handle(&self, _input: &str) -> bool {
            true
        }

        fn locator(&self, input: &str) -> Result<String> {
            Ok(format!("memory://{}", input))
        }

        async fn fetch_title(&self, _input: &str) -> Result<String> {
            Ok("Parser Livestream".to_string())
        }

        async fn fetch_subtitles(&self, _input: &str, _language: &str) -> Result<String> {
            Ok(self.raw.to_string())
        }
    }

    #[test]
    fn test_convert_track() {
        let conversion = pipeline()
            .convert(TRACK, "Parser Livestream", "memory://track", fixed_time())
            .unwrap();

        assert_eq!(conversion.entry_count(), 4);
        assert_eq!(conversion.stats.blocks, 5);

        let paragraphs = &conversion.document.paragraphs;
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(
            paragraphs[0].text,
            "Welcome back to the channel everyone today we are looking at parsers"
        );
        assert_eq!(paragraphs[1].text, "After the break we write the segmenter itself");
    }

    #[test]
    fn test_convert_short_track_is_empty_document() {
        let raw = "1\n00:00:01,000 --> 00:00:02,000\nHello there\n\n\
                   2\n00:00:03,500 --> 00:00:04,000\nworld today\n";
        let conversion = pipeline()
            .convert(raw, "Short", "memory://short", fixed_time())
            .unwrap();

        assert_eq!(conversion.entry_count(), 2);
        assert_eq!(conversion.document.paragraph_count(), 0);

        let rendered = conversion.document.render(OutputFormat::Markdown).unwrap();
        assert!(rendered.contains("**Paragraphs**: 0"));
    }

    #[test]
    fn test_convert_empty_track_fails_in_parse_stage() {
        let err = pipeline()
            .convert("", "Nothing", "memory://none", fixed_time())
            .unwrap_err();

        assert_eq!(err.stage(), Some(crate::error::Stage::Parse));
        assert!(matches!(
            err,
            TransdocError::EmptyTranscript {
                reason: EmptyReason::NoCaptionBlocks
            }
        ));
    }

    #[test]
    fn test_invalid_settings_are_rejected_before_segmentation() {
        let mut settings = Settings::default();
        settings.segmentation.max_gap_seconds = 0.0;

        let err = Pipeline::new(settings).err().unwrap();
        assert_eq!(err.stage(), Some(crate::error::Stage::Segment));
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let pipeline = pipeline();
        let render = || {
            pipeline
                .convert(TRACK, "Parser Livestream", "memory://track", fixed_time())
                .unwrap()
                .document
                .render(OutputFormat::Markdown)
                .unwrap()
        };
        assert_eq!(render(), render());
    }

    #[tokio::test]
    async fn test_process_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.general.output_dir = dir.path().to_string_lossy().to_string();
        let pipeline = Pipeline::new(settings).unwrap();

        let request = ProcessRequest {
            input: "track".to_string(),
            ..Default::default()
        };
        let result = pipeline
            .process_with_source(&StaticSource { raw: TRACK }, &request)
            .await
            .unwrap();

        let path = result.output_path.unwrap();
        assert_eq!(path, dir.path().join("Parser_Livestream_transcript.md"));
        assert_eq!(result.paragraph_count, 2);
        assert_eq!(result.entry_count, 4);

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, result.rendered);
        assert!(written.contains("**Source**: memory://track"));
    }

    #[tokio::test]
    async fn test_process_to_stdout_with_title_override() {
        let request = ProcessRequest {
            input: "track".to_string(),
            output: Some(STDOUT.to_string()),
            format: OutputFormat::Json,
            title: Some("Custom".to_string()),
            ..Default::default()
        };
        let result = pipeline()
            .process_with_source(&StaticSource { raw: TRACK }, &request)
            .await
            .unwrap();

        assert!(result.output_path.is_none());
        assert_eq!(result.title, "Custom");
        let value: serde_json::Value = serde_json::from_str(&result.rendered).unwrap();
        assert_eq!(value["paragraph_count"], 2);
    }

    #[tokio::test]
    async fn test_process_rejects_unknown_input() {
        let request = ProcessRequest {
            input: "definitely not a locator".to_string(),
            ..Default::default()
        };
        let err = pipeline().process(&request).await.unwrap_err();
        assert!(matches!(err, TransdocError::InvalidInput(_)));
    }
}
