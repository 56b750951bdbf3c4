//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckStatus {
    fn icon(&self) -> console::StyledObject<&'static str> {
        match self {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        }
    }
}

/// A named check with its status and an optional fix hint.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

impl CheckResult {
    fn new(status: CheckStatus, name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            hint: None,
        }
    }

    fn ok(name: &str, message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Ok, name, message)
    }

    fn warning(name: &str, message: impl Into<String>, hint: &str) -> Self {
        Self::new(CheckStatus::Warning, name, message).with_hint(hint)
    }

    fn error(name: &str, message: impl Into<String>, hint: &str) -> Self {
        Self::new(CheckStatus::Error, name, message).with_hint(hint)
    }

    fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    fn print(&self) {
        eprintln!("  {} {} - {}", self.status.icon(), style(&self.name).bold(), self.message);
        if let Some(hint) = &self.hint {
            eprintln!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_config_path);

    Output::header("transdoc doctor");
    eprintln!();

    let sections = [
        ("External Tools", vec![check_ytdlp()]),
        ("Directories", check_directories(settings)),
        ("Configuration", vec![check_config_file(&config_path), check_segmentation(settings)]),
    ];

    let mut errors = 0;
    let mut warnings = 0;

    for (title, checks) in &sections {
        eprintln!("{}", style(title).bold());
        for check in checks {
            check.print();
            match check.status {
                CheckStatus::Error => errors += 1,
                CheckStatus::Warning => warnings += 1,
                CheckStatus::Ok => {}
            }
        }
        eprintln!();
    }

    if errors > 0 {
        Output::error(&format!("{} error(s) found.", errors));
        anyhow::bail!("doctor found {} error(s)", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! transdoc is ready to use.");
    }

    Ok(())
}

/// yt-dlp is only needed for YouTube input, so its absence is a warning.
fn check_ytdlp() -> CheckResult {
    match Command::new("yt-dlp").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();
            CheckResult::ok("yt-dlp", version)
        }
        Ok(_) => CheckResult::error("yt-dlp", "installed but not working", install_hint_ytdlp()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::warning(
            "yt-dlp",
            "not found (local .srt files still work)",
            install_hint_ytdlp(),
        ),
        Err(e) => CheckResult::error("yt-dlp", format!("error: {}", e), install_hint_ytdlp()),
    }
}

fn check_directories(settings: &Settings) -> Vec<CheckResult> {
    vec![
        check_directory("Temp directory", &settings.temp_dir()),
        check_directory("Output directory", &settings.output_dir()),
    ]
}

fn check_directory(name: &str, path: &Path) -> CheckResult {
    if path.is_dir() {
        CheckResult::ok(name, path.display().to_string())
    } else if path.exists() {
        CheckResult::error(
            name,
            format!("{} is not a directory", path.display()),
            "Point the setting at a directory",
        )
    } else {
        CheckResult::warning(
            name,
            format!("{} (will be created)", path.display()),
            "Directory will be created on first use",
        )
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &PathBuf) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", config_path.display().to_string())
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: transdoc config edit",
        )
    }
}

fn check_segmentation(settings: &Settings) -> CheckResult {
    match settings.segmenter_config() {
        Ok(config) => CheckResult::ok(
            "Segmentation",
            format!(
                "gap {}s, max {} chars, min {} chars",
                config.max_gap_seconds(),
                config.max_paragraph_length(),
                config.min_paragraph_length()
            ),
        ),
        Err(e) => CheckResult::error("Segmentation", e.to_string(), "Fix the [segmentation] section"),
    }
}

/// Platform-specific install hint for yt-dlp.
fn install_hint_ytdlp() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install yt-dlp"
    } else if cfg!(target_os = "linux") {
        "Install with: pip install yt-dlp (or your package manager)"
    } else {
        "Install from: https://github.com/yt-dlp/yt-dlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_check_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(check_directory("tmp", dir.path()).status, CheckStatus::Ok);
        assert_eq!(
            check_directory("tmp", &dir.path().join("missing")).status,
            CheckStatus::Warning
        );

        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        assert_eq!(check_directory("tmp", &file).status, CheckStatus::Error);
    }

    #[test]
    fn test_check_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        Settings::default().save_to(&path).unwrap();
        assert_eq!(check_config_file(&path).status, CheckStatus::Ok);
    }

    #[test]
    fn test_check_segmentation() {
        let mut settings = Settings::default();
        assert_eq!(check_segmentation(&settings).status, CheckStatus::Ok);

        settings.segmentation.max_paragraph_length = 0;
        assert_eq!(check_segmentation(&settings).status, CheckStatus::Error);
    }
}
