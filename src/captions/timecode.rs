//! SRT timecode arithmetic.

use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Matches an `HH:MM:SS,mmm` timestamp at the start of a line.
static LEADING_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})").expect("Invalid regex"));

/// Parse the timestamp a time-range line starts with.
///
/// Only the start of `HH:MM:SS,mmm --> HH:MM:SS,mmm` is read; whatever
/// follows it is ignored. Leading whitespace is skipped.
pub fn parse_leading_timestamp(line: &str) -> Option<Duration> {
    let caps = LEADING_TIMESTAMP.captures(line.trim_start())?;

    let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u64>().ok());
    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    Some(Duration::from_millis(
        (hours * 3600 + minutes * 60 + seconds) * 1000 + millis,
    ))
}

/// Whole seconds of a timestamp, with the millisecond fraction dropped.
pub fn whole_seconds(time: Duration) -> i64 {
    time.as_secs() as i64
}

/// Gap in whole seconds between two start times.
///
/// Negative when the track is not monotonic.
pub fn gap_seconds(previous: Duration, current: Duration) -> i64 {
    whole_seconds(current) - whole_seconds(previous)
}

/// Format a duration as an SRT timestamp (00:00:00,000).
pub fn format_srt_timestamp(time: Duration) -> String {
    let total_ms = time.as_millis() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_timestamp() {
        assert_eq!(
            parse_leading_timestamp("00:00:01,000 --> 00:00:02,000"),
            Some(Duration::from_millis(1000))
        );
        assert_eq!(
            parse_leading_timestamp("01:02:03,456 --> 01:02:05,000"),
            Some(Duration::from_millis(3_723_456))
        );
        assert_eq!(
            parse_leading_timestamp("  00:10:00,500 --> 00:10:01,000"),
            Some(Duration::from_millis(600_500))
        );
    }

    #[test]
    fn test_rejects_malformed_timestamps() {
        assert_eq!(parse_leading_timestamp("00:00:01 --> 00:00:02"), None);
        assert_eq!(parse_leading_timestamp("00:00:01.000 --> 00:00:02.000"), None);
        assert_eq!(parse_leading_timestamp("0:00:01,000 --> 0:00:02,000"), None);
        assert_eq!(parse_leading_timestamp("Hello there"), None);
        assert_eq!(parse_leading_timestamp(""), None);
    }

    #[test]
    fn test_gap_discards_milliseconds() {
        let a = Duration::from_millis(1_999);
        let b = Duration::from_millis(4_000);
        assert_eq!(gap_seconds(a, b), 3);

        let c = Duration::from_millis(1_000);
        let d = Duration::from_millis(3_999);
        assert_eq!(gap_seconds(c, d), 2);
    }

    #[test]
    fn test_gap_handles_hour_boundaries() {
        let a = parse_leading_timestamp("00:59:59,000").unwrap();
        let b = parse_leading_timestamp("01:00:02,000").unwrap();
        assert_eq!(gap_seconds(a, b), 3);
        assert_eq!(gap_seconds(b, a), -3);
    }

    #[test]
    fn test_srt_timestamp() {
        assert_eq!(format_srt_timestamp(Duration::ZERO), "00:00:00,000");
        assert_eq!(format_srt_timestamp(Duration::from_millis(61_500)), "00:01:01,500");
        assert_eq!(format_srt_timestamp(Duration::from_millis(3_661_123)), "01:01:01,123");
    }
}
