//! Pre-flight checks before running the pipeline.
//!
//! Validates that required tools are available before starting operations
//! that would otherwise fail midway.

use crate::error::{Result, TransdocError};
use crate::subtitle_source::SourceKind;
use std::process::Command;

/// Run pre-flight checks for the given source kind.
pub fn check(kind: SourceKind) -> Result<()> {
    match kind.required_tool() {
        Some(tool) => check_tool(tool),
        None => Ok(()),
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TransdocError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TransdocError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TransdocError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_local_no_requirements() {
        assert!(check(SourceKind::Local).is_ok());
    }

    #[test]
    fn test_missing_tool() {
        let err = check_tool("transdoc-no-such-tool").unwrap_err();
        assert!(matches!(err, TransdocError::ToolNotFound(_)));
    }
}
