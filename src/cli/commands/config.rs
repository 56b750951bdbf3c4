//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the config command against `path`, or the default location.
pub fn run_config(action: &ConfigAction, settings: Settings, path: Option<&Path>) -> Result<()> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let toml_str =
                toml::to_string_pretty(&settings).context("Failed to serialize config")?;
            println!("{}", toml_str);

            for problem in problems(&settings) {
                Output::warning(&problem);
            }
        }

        ConfigAction::Edit => edit(&config_path, &settings)?,

        ConfigAction::Path => {
            println!("{}", config_path.display());
            if !config_path.exists() {
                Output::info("File does not exist yet; defaults are in effect.");
            }
        }
    }

    Ok(())
}

/// Open the config file in `$EDITOR` and re-check it afterwards.
fn edit(config_path: &PathBuf, settings: &Settings) -> Result<()> {
    if !config_path.exists() {
        settings.save_to(config_path)?;
        Output::info(&format!("Created default config at {}", config_path.display()));
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());
    Output::info(&format!("Opening config in {}...", editor));

    match std::process::Command::new(&editor).arg(config_path).status() {
        Ok(s) if s.success() => {}
        Ok(_) => {
            Output::warning("Editor exited with non-zero status.");
            return Ok(());
        }
        Err(e) => {
            Output::error(&format!("Failed to open editor: {}", e));
            Output::info(&format!("Config file is at: {}", config_path.display()));
            return Ok(());
        }
    }

    let edited = match Settings::load_from(Some(config_path)) {
        Ok(edited) => edited,
        Err(e) => {
            Output::error(&format!("Config no longer parses: {}", e));
            return Err(e.into());
        }
    };

    let problems = problems(&edited);
    if problems.is_empty() {
        Output::success("Config saved.");
    } else {
        for problem in &problems {
            Output::warning(problem);
        }
    }

    Ok(())
}

/// Values that parse but would be rejected when extracting.
fn problems(settings: &Settings) -> Vec<String> {
    let mut problems = Vec::new();
    if let Err(e) = settings.segmenter_config() {
        problems.push(e.to_string());
    }
    if let Err(e) = settings.output_format() {
        problems.push(e.to_string());
    }
    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_have_no_problems() {
        assert!(problems(&Settings::default()).is_empty());
    }

    #[test]
    fn test_problems_are_reported() {
        let mut settings = Settings::default();
        settings.segmentation.max_gap_seconds = -2.0;
        settings.document.format = "docx".to_string();

        let problems = problems(&settings);
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("max_gap_seconds"));
        assert!(problems[1].contains("docx"));
    }

    #[test]
    fn test_path_with_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        run_config(&ConfigAction::Path, Settings::default(), Some(&path)).unwrap();
        assert!(!path.exists());
    }
}
