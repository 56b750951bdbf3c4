//! Error types for transdoc.

use thiserror::Error;

/// Pipeline stage a core error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Segment,
    Render,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Parse => write!(f, "parse"),
            Stage::Segment => write!(f, "segment"),
            Stage::Render => write!(f, "render"),
        }
    }
}

/// Why a subtitle track produced no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// Nothing in the input looked like a caption block.
    NoCaptionBlocks,
    /// Caption blocks were found but every one failed text validation.
    AllBlocksRejected { blocks: usize },
}

impl std::fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyReason::NoCaptionBlocks => write!(f, "no recognizable caption blocks"),
            EmptyReason::AllBlocksRejected { blocks } => {
                write!(f, "{} caption blocks found, none survived validation", blocks)
            }
        }
    }
}

/// Library-level error type for transdoc operations.
#[derive(Error, Debug)]
pub enum TransdocError {
    #[error("[parse] Empty transcript: {reason}")]
    EmptyTranscript { reason: EmptyReason },

    #[error("[segment] Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("[render] Document serialization failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No subtitles available: {0}")]
    SubtitlesUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("External tool not found: {0}. Please install it and ensure it's in your PATH.")]
    ToolNotFound(String),

    #[error("External tool failed: {0}")]
    ToolFailed(String),

    #[error("Timed out after {seconds}s: {operation}")]
    Timeout { operation: String, seconds: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl TransdocError {
    /// The core stage this error belongs to, if it came from the core.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            TransdocError::EmptyTranscript { .. } => Some(Stage::Parse),
            TransdocError::InvalidConfiguration(_) => Some(Stage::Segment),
            TransdocError::Render(_) => Some(Stage::Render),
            _ => None,
        }
    }
}

/// Result type alias for transdoc operations.
pub type Result<T> = std::result::Result<T, TransdocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_report_stage() {
        let empty = TransdocError::EmptyTranscript {
            reason: EmptyReason::NoCaptionBlocks,
        };
        assert_eq!(empty.stage(), Some(Stage::Parse));
        assert!(empty.to_string().starts_with("[parse]"));

        let config = TransdocError::InvalidConfiguration("max_gap_seconds must be positive".into());
        assert_eq!(config.stage(), Some(Stage::Segment));
        assert!(config.to_string().contains("[segment]"));

        assert_eq!(TransdocError::InvalidInput("x".into()).stage(), None);
    }

    #[test]
    fn test_empty_reason_message() {
        let err = TransdocError::EmptyTranscript {
            reason: EmptyReason::AllBlocksRejected { blocks: 4 },
        };
        assert!(err.to_string().contains("4 caption blocks found"));
    }
}
