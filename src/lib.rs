//! transdoc - Subtitle tracks to readable transcripts
//!
//! Turns an SRT subtitle track into a document of paragraphs. Caption
//! entries are merged into paragraphs wherever the speaker keeps talking,
//! and a new paragraph starts at a long pause or once the current one grows
//! too long.
//!
//! # Architecture
//!
//! - `captions` - SRT parsing into timed caption entries
//! - `segmenter` - Temporal grouping of entries into paragraphs
//! - `document` - Markdown and JSON rendering
//! - `subtitle_source` - Subtitle sources (YouTube via yt-dlp, local files)
//! - `pipeline` - Fetch, parse, segment, render and write
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use transdoc::captions;
//! use transdoc::segmenter::{Segmenter, SegmenterConfig};
//!
//! let srt = "1\n00:00:01,000 --> 00:00:02,000\nHello there, and welcome back\n\n\
//!            2\n00:00:02,000 --> 00:00:04,000\nto another long episode of the show\n";
//!
//! let entries = captions::parse(srt)?;
//! assert_eq!(entries[0].start_time, Duration::from_secs(1));
//!
//! let segmenter = Segmenter::new(SegmenterConfig::default());
//! let paragraphs = segmenter.segment(&entries);
//! assert_eq!(paragraphs.len(), 1);
//! # Ok::<(), transdoc::TransdocError>(())
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod segmenter;
pub mod subtitle_source;

pub use error::{Result, TransdocError};
