//! Configuration settings for transdoc.

use crate::document::OutputFormat;
use crate::error::{Result, TransdocError};
use crate::segmenter::SegmenterConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub segmentation: SegmentationSettings,
    pub youtube: YoutubeSettings,
    pub document: DocumentSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory for temporary subtitle downloads.
    pub temp_dir: String,
    /// Directory transcripts are written to when no output path is given.
    pub output_dir: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            temp_dir: "/tmp/transdoc".to_string(),
            output_dir: ".".to_string(),
        }
    }
}

/// Paragraph segmentation thresholds.
///
/// Stored as raw numbers so that out-of-range values in the config file are
/// reported as configuration errors rather than TOML type errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationSettings {
    /// Pause between caption start times, in seconds, that starts a new paragraph.
    pub max_gap_seconds: f64,
    /// Paragraph length, in characters, after which a new paragraph starts.
    pub max_paragraph_length: i64,
    /// Paragraphs this short or shorter are dropped.
    pub min_paragraph_length: i64,
}

impl Default for SegmentationSettings {
    fn default() -> Self {
        Self {
            max_gap_seconds: SegmenterConfig::DEFAULT_MAX_GAP_SECONDS,
            max_paragraph_length: SegmenterConfig::DEFAULT_MAX_PARAGRAPH_LENGTH,
            min_paragraph_length: SegmenterConfig::DEFAULT_MIN_PARAGRAPH_LENGTH,
        }
    }
}

/// YouTube subtitle download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Subtitle language code passed to yt-dlp.
    pub language: String,
    /// Try auto-generated subtitles before manual ones.
    pub prefer_auto_subs: bool,
    /// Timeout for title lookups.
    pub metadata_timeout_seconds: u64,
    /// Timeout for each subtitle download attempt.
    pub subtitle_timeout_seconds: u64,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            prefer_auto_subs: true,
            metadata_timeout_seconds: 30,
            subtitle_timeout_seconds: 60,
        }
    }
}

/// Output document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Output format (markdown, json).
    pub format: String,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            format: "markdown".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TransdocError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("transdoc")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Validated segmenter thresholds.
    pub fn segmenter_config(&self) -> Result<SegmenterConfig> {
        SegmenterConfig::new(
            self.segmentation.max_gap_seconds,
            self.segmentation.max_paragraph_length,
            self.segmentation.min_paragraph_length,
        )
    }

    /// Configured output format.
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.document.format.parse().map_err(TransdocError::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        let config = settings.segmenter_config().unwrap();

        assert_eq!(config, SegmenterConfig::default());
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Markdown);
        assert_eq!(settings.youtube.language, "en");
        assert!(settings.youtube.prefer_auto_subs);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [segmentation]
            max_gap_seconds = 5.0

            [document]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(settings.segmentation.max_gap_seconds, 5.0);
        assert_eq!(settings.segmentation.max_paragraph_length, 500);
        assert_eq!(settings.output_format().unwrap(), OutputFormat::Json);
        assert_eq!(settings.general.output_dir, ".");
    }

    #[test]
    fn test_negative_threshold_is_configuration_error() {
        let settings: Settings = toml::from_str(
            r#"
            [segmentation]
            min_paragraph_length = -5
            "#,
        )
        .unwrap();

        assert!(matches!(
            settings.segmenter_config(),
            Err(TransdocError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.youtube.language = "de".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.youtube.language, "de");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.general.temp_dir, "/tmp/transdoc");
    }

    #[test]
    fn test_expand_path() {
        let path = Settings::expand_path("/absolute/path");
        assert_eq!(path, PathBuf::from("/absolute/path"));
    }
}
