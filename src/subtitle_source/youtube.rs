//! YouTube source implementation.
//!
//! Titles and subtitle tracks are fetched with yt-dlp. Subtitles are
//! downloaded as SRT into a temporary directory that is removed afterwards.

use super::{SourceKind, SubtitleSource};
use crate::config::YoutubeSettings;
use crate::error::{Result, TransdocError};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Which kind of subtitle track to ask yt-dlp for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubtitleKind {
    AutoGenerated,
    Manual,
}

impl SubtitleKind {
    fn flag(&self) -> &'static str {
        match self {
            SubtitleKind::AutoGenerated => "--write-auto-subs",
            SubtitleKind::Manual => "--write-subs",
        }
    }
}

impl std::fmt::Display for SubtitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubtitleKind::AutoGenerated => write!(f, "auto-generated"),
            SubtitleKind::Manual => write!(f, "manual"),
        }
    }
}

/// YouTube subtitle source.
pub struct YoutubeSource {
    bare_id_regex: Regex,
    settings: YoutubeSettings,
    temp_root: PathBuf,
}

impl YoutubeSource {
    pub fn new(settings: YoutubeSettings, temp_root: PathBuf) -> Self {
        let bare_id_regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("Invalid regex");

        Self {
            bare_id_regex,
            settings,
            temp_root,
        }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let input = input.trim();

        if self.bare_id_regex.is_match(input) {
            return Some(input.to_string());
        }

        let url = Url::parse(input)
            .or_else(|_| Url::parse(&format!("https://{}", input)))
            .ok()?;
        let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");

        let candidate = match host {
            "youtu.be" => url.path_segments()?.next().map(|s| s.to_string()),
            "youtube.com" | "music.youtube.com" => {
                let mut segments = url.path_segments()?;
                match segments.next() {
                    Some("watch") => url
                        .query_pairs()
                        .find(|(key, _)| key == "v")
                        .map(|(_, value)| value.into_owned()),
                    Some("embed") | Some("shorts") | Some("v") | Some("live") => {
                        segments.next().map(|s| s.to_string())
                    }
                    _ => None,
                }
            }
            _ => None,
        }?;

        self.bare_id_regex
            .is_match(&candidate)
            .then_some(candidate)
    }

    fn video_id(&self, input: &str) -> Result<String> {
        self.extract_video_id(input).ok_or_else(|| {
            TransdocError::InvalidInput(format!("Invalid YouTube video ID or URL: {}", input))
        })
    }

    fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={}", video_id)
    }

    /// Attempt order for subtitle kinds.
    fn attempt_order(&self) -> [SubtitleKind; 2] {
        if self.settings.prefer_auto_subs {
            [SubtitleKind::AutoGenerated, SubtitleKind::Manual]
        } else {
            [SubtitleKind::Manual, SubtitleKind::AutoGenerated]
        }
    }

    /// Download one kind of subtitle track into `dir`.
    ///
    /// Returns the SRT path, or `None` when yt-dlp produced no file.
    #[instrument(skip(self, dir))]
    async fn download_track(
        &self,
        video_id: &str,
        language: &str,
        kind: SubtitleKind,
        dir: &Path,
    ) -> Result<Option<PathBuf>> {
        let template = dir.join(format!("{}.%(ext)s", video_id));

        let mut command = Command::new("yt-dlp");
        command
            .arg(kind.flag())
            .arg("--sub-langs").arg(language)
            .arg("--skip-download")
            .arg("--sub-format").arg("srt/best")
            .arg("--convert-subs").arg("srt")
            .arg("--no-playlist")
            .arg("--no-warnings")
            .arg("--output").arg(&template)
            .arg(Self::watch_url(video_id));

        let output = run_with_timeout(
            command,
            &format!("{} subtitle download", kind),
            self.settings.subtitle_timeout_seconds,
        )
        .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("yt-dlp exited with {}: {}", output.status, stderr.trim());
        }

        find_srt_file(dir, video_id)
    }
}

/// Locates a downloaded SRT file by video ID.
fn find_srt_file(dir: &Path, video_id: &str) -> Result<Option<PathBuf>> {
    for entry in std::fs::read_dir(dir)?.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        let is_srt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("srt"));

        if is_srt && name.to_string_lossy().starts_with(video_id) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

/// Runs a command, killing it if it outlives `seconds`.
async fn run_with_timeout(mut command: Command, operation: &str, seconds: u64) -> Result<Output> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let result = tokio::time::timeout(Duration::from_secs(seconds), command.output())
        .await
        .map_err(|_| TransdocError::Timeout {
            operation: operation.to_string(),
            seconds,
        })?;

    match result {
        Ok(output) => Ok(output),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TransdocError::ToolNotFound("yt-dlp".into()))
        }
        Err(e) => Err(TransdocError::ToolFailed(format!("yt-dlp execution failed: {e}"))),
    }
}

#[async_trait]
impl SubtitleSource for YoutubeSource {
    fn kind(&self) -> SourceKind {
        SourceKind::YouTube
    }

    fn can_handle(&self, input: &str) -> bool {
        self.extract_video_id(input).is_some()
    }

    fn locator(&self, input: &str) -> Result<String> {
        Ok(Self::watch_url(&self.video_id(input)?))
    }

    #[instrument(skip(self))]
    async fn fetch_title(&self, input: &str) -> Result<String> {
        let video_id = self.video_id(input)?;

        let mut command = Command::new("yt-dlp");
        command
            .args(["--print", "%(title)s", "--skip-download", "--no-warnings", "--no-playlist"])
            .arg(Self::watch_url(&video_id));

        let output = run_with_timeout(
            command,
            "title lookup",
            self.settings.metadata_timeout_seconds,
        )
        .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TransdocError::ToolFailed(format!(
                "yt-dlp title lookup failed: {}",
                stderr.trim()
            )));
        }

        let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Fetched title: {}", title);
        Ok(title)
    }

    #[instrument(skip(self))]
    async fn fetch_subtitles(&self, input: &str, language: &str) -> Result<String> {
        let video_id = self.video_id(input)?;

        std::fs::create_dir_all(&self.temp_root)?;
        let dir = tempfile::Builder::new()
            .prefix("subs-")
            .tempdir_in(&self.temp_root)?;

        for kind in self.attempt_order() {
            info!("Downloading {} subtitles ({})", kind, language);

            if let Some(path) = self.download_track(&video_id, language, kind, dir.path()).await? {
                info!("Subtitles downloaded: {:?}", path);
                let raw = tokio::fs::read_to_string(&path).await?;
                return Ok(raw);
            }

            warn!("No {} subtitles available", kind);
        }

        Err(TransdocError::SubtitlesUnavailable(format!(
            "video {} has no '{}' subtitles",
            video_id, language
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> YoutubeSource {
        YoutubeSource::new(YoutubeSettings::default(), std::env::temp_dir())
    }

    #[test]
    fn test_extract_video_id() {
        let source = source();

        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("https://m.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            source.extract_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );

        assert_eq!(source.extract_video_id("not-a-video-id"), None);
        assert_eq!(source.extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(source.extract_video_id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(source.extract_video_id(""), None);
    }

    #[test]
    fn test_locator_is_canonical() {
        let source = source();
        assert_eq!(
            source.locator("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert!(source.locator("/tmp/file.srt").is_err());
    }

    #[test]
    fn test_attempt_order() {
        let mut settings = YoutubeSettings::default();
        let auto_first = YoutubeSource::new(settings.clone(), std::env::temp_dir());
        assert_eq!(auto_first.attempt_order()[0], SubtitleKind::AutoGenerated);

        settings.prefer_auto_subs = false;
        let manual_first = YoutubeSource::new(settings, std::env::temp_dir());
        assert_eq!(manual_first.attempt_order()[0], SubtitleKind::Manual);
    }

    #[test]
    fn test_find_srt_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_srt_file(dir.path(), "dQw4w9WgXcQ").unwrap().is_none());

        std::fs::write(dir.path().join("dQw4w9WgXcQ.en.vtt"), "WEBVTT").unwrap();
        assert!(find_srt_file(dir.path(), "dQw4w9WgXcQ").unwrap().is_none());

        std::fs::write(dir.path().join("dQw4w9WgXcQ.en.srt"), "1").unwrap();
        let found = find_srt_file(dir.path(), "dQw4w9WgXcQ").unwrap().unwrap();
        assert!(found.ends_with("dQw4w9WgXcQ.en.srt"));
    }
}
