//! CLI module for transdoc.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// transdoc - Subtitle tracks to readable transcripts
///
/// Downloads or reads an SRT subtitle track, merges its captions into
/// paragraphs and writes a Markdown (or JSON) transcript.
#[derive(Parser, Debug)]
#[command(name = "transdoc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a subtitle track into a transcript document
    Extract {
        /// YouTube URL/ID, or local .srt file path
        input: String,

        /// Output file ("-" for stdout; default derived from the title)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (markdown, json)
        #[arg(long)]
        format: Option<String>,

        /// Subtitle language to download
        #[arg(short, long)]
        lang: Option<String>,

        /// Document title (skips the title lookup)
        #[arg(short, long)]
        title: Option<String>,

        /// Pause in seconds that starts a new paragraph
        #[arg(long, allow_negative_numbers = true)]
        max_gap: Option<f64>,

        /// Paragraph length after which a new paragraph starts
        #[arg(long, allow_negative_numbers = true)]
        max_length: Option<i64>,

        /// Paragraphs this short or shorter are dropped
        #[arg(long, allow_negative_numbers = true)]
        min_length: Option<i64>,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
