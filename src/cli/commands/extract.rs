//! Extract command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::document::OutputFormat;
use crate::pipeline::{Pipeline, ProcessRequest};
use crate::subtitle_source::detect_source;
use anyhow::Result;

/// Threshold overrides given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdOverrides {
    pub max_gap: Option<f64>,
    pub max_length: Option<i64>,
    pub min_length: Option<i64>,
}

impl ThresholdOverrides {
    /// Apply the overrides on top of the file settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(gap) = self.max_gap {
            settings.segmentation.max_gap_seconds = gap;
        }
        if let Some(len) = self.max_length {
            settings.segmentation.max_paragraph_length = len;
        }
        if let Some(len) = self.min_length {
            settings.segmentation.min_paragraph_length = len;
        }
    }
}

/// Run the extract command.
pub async fn run_extract(
    input: &str,
    output: Option<String>,
    format: Option<&str>,
    language: Option<String>,
    title: Option<String>,
    overrides: ThresholdOverrides,
    mut settings: Settings,
) -> Result<()> {
    overrides.apply(&mut settings);

    let format: OutputFormat = match format {
        Some(f) => f.parse().map_err(|e: String| anyhow::anyhow!(e))?,
        None => settings.output_format()?,
    };

    let pipeline = match Pipeline::new(settings) {
        Ok(p) => p,
        Err(e) => {
            Output::error(&format!("{}", e));
            return Err(e.into());
        }
    };

    let Some(source) = detect_source(input, pipeline.settings()) else {
        Output::error(&format!("Not a YouTube URL/ID or an existing .srt file: {}", input));
        return Err(anyhow::anyhow!("Unrecognized input: {}", input));
    };

    if let Err(e) = preflight::check(source.kind()) {
        Output::error(&format!("{}", e));
        Output::info("Run 'transdoc doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    Output::info(&format!("Processing ({}): {}", source.kind(), input));

    let request = ProcessRequest {
        input: input.to_string(),
        output,
        format,
        language,
        title,
    };

    let spinner = Output::spinner("Fetching subtitles and building transcript...");
    let result = pipeline.process_with_source(source.as_ref(), &request).await;
    spinner.finish_and_clear();

    let result = match result {
        Ok(r) => r,
        Err(e) => {
            Output::error(&format!("Failed to process: {}", e));
            return Err(e.into());
        }
    };

    Output::kv("Title", &result.title);
    Output::kv("Caption entries", &result.entry_count.to_string());
    Output::kv("Paragraphs", &result.paragraph_count.to_string());

    if result.paragraph_count == 0 {
        Output::warning("No paragraph was long enough to keep; the document body is empty.");
    }

    match &result.output_path {
        Some(path) => Output::success(&format!("Transcript saved to {}", path.display())),
        None => Output::document(&result.rendered),
    }

    Ok(())
}
