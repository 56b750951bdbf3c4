//! transdoc CLI entry point.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transdoc::cli::commands::{self, ThresholdOverrides};
use transdoc::cli::{Cli, Commands};
use transdoc::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("transdoc={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    let config_path = cli.config.as_deref().map(std::path::Path::new);

    // Execute command
    match &cli.command {
        Commands::Extract {
            input,
            output,
            format,
            lang,
            title,
            max_gap,
            max_length,
            min_length,
        } => {
            std::fs::create_dir_all(settings.temp_dir())?;

            let overrides = ThresholdOverrides {
                max_gap: *max_gap,
                max_length: *max_length,
                min_length: *min_length,
            };
            commands::run_extract(
                input,
                output.clone(),
                format.as_deref(),
                lang.clone(),
                title.clone(),
                overrides,
                settings,
            )
            .await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, config_path)?;
        }
    }

    Ok(())
}
