//! SRT block parser.

use super::timecode::parse_leading_timestamp;
use super::CaptionEntry;
use crate::error::{EmptyReason, Result, TransdocError};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

/// Non-speech annotations such as `[Music]` or `[Applause]`.
static BRACKETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").expect("Invalid regex"));

/// Minimum number of characters a cleaned caption must exceed.
const MIN_CAPTION_CHARS: usize = 2;

/// Counters collected while parsing a subtitle track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Blank-line separated blocks in the input.
    pub blocks: usize,
    /// Blocks with an index line, a valid timestamp line and text.
    pub recognized: usize,
    /// Entries emitted after text validation.
    pub accepted: usize,
}

impl ParseStats {
    /// Blocks dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.blocks - self.accepted
    }

    /// Fail with [`TransdocError::EmptyTranscript`] when nothing was accepted.
    pub fn ensure_entries(&self) -> Result<()> {
        if self.accepted > 0 {
            return Ok(());
        }

        let reason = if self.recognized == 0 {
            EmptyReason::NoCaptionBlocks
        } else {
            EmptyReason::AllBlocksRejected {
                blocks: self.recognized,
            }
        };
        Err(TransdocError::EmptyTranscript { reason })
    }
}

/// Raw lines of one block, borrowed from the input.
struct CaptionBlock<'a> {
    index_line: &'a str,
    time_range_line: &'a str,
    text_lines: Vec<&'a str>,
}

impl<'a> CaptionBlock<'a> {
    /// Split a block's lines into index, time range and text.
    ///
    /// Returns `None` for blocks with fewer than three lines.
    fn from_lines(lines: &[&'a str]) -> Option<Self> {
        match lines {
            [index_line, time_range_line, text @ ..] if !text.is_empty() => Some(Self {
                index_line: (*index_line).trim(),
                time_range_line: *time_range_line,
                text_lines: text.to_vec(),
            }),
            _ => None,
        }
    }
}

/// Parse a subtitle track into caption entries.
///
/// Fails with [`TransdocError::EmptyTranscript`] when no entry survives.
pub fn parse(raw: &str) -> Result<Vec<CaptionEntry>> {
    let (entries, stats) = parse_with_stats(raw);
    stats.ensure_entries()?;
    Ok(entries)
}

/// Parse a subtitle track, reporting block counters instead of failing.
///
/// Malformed blocks are skipped. Output order follows block order.
pub fn parse_with_stats(raw: &str) -> (Vec<CaptionEntry>, ParseStats) {
    let mut stats = ParseStats::default();
    let mut entries = Vec::new();

    for lines in split_blocks(raw) {
        stats.blocks += 1;

        let Some(block) = CaptionBlock::from_lines(&lines) else {
            debug!("Skipping block {} with {} lines", stats.blocks, lines.len());
            continue;
        };

        let Some(start_time) = parse_leading_timestamp(block.time_range_line) else {
            debug!(
                "Skipping block {:?} with malformed time range: {}",
                block.index_line, block.time_range_line
            );
            continue;
        };
        stats.recognized += 1;

        let text = clean_text(&block.text_lines.join(" "));
        if !is_meaningful(&text) {
            debug!("Skipping block {:?} with text {:?}", block.index_line, text);
            continue;
        }

        entries.push(CaptionEntry::new(start_time, text));
    }

    stats.accepted = entries.len();
    info!(
        "Parsed {} caption entries from {} blocks ({} dropped)",
        stats.accepted,
        stats.blocks,
        stats.dropped()
    );

    (entries, stats)
}

/// Group lines into blocks separated by one or more blank lines.
fn split_blocks(raw: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    // `lines()` also strips the `\r` of CRLF endings
    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Strip bracketed annotations and normalize whitespace.
fn clean_text(text: &str) -> String {
    let stripped = BRACKETED.replace_all(text, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_meaningful(text: &str) -> bool {
    !text.is_empty()
        && !text.chars().all(char::is_numeric)
        && text.chars().count() > MIN_CAPTION_CHARS
}
