//! Line source: read the input document into an ordered line sequence.
//!
//! Every downstream pass works on `Vec<String>`, so the only jobs here are
//! path validation with a useful error and right-trimming each raw line.
//! Trailing whitespace is dropped at the door because several passes match
//! end-of-line anchors (`%$`, `}$`) that stray spaces would defeat.

use crate::error::Tex2RstError;
use std::path::Path;
use tracing::debug;

/// Split an in-memory source into right-trimmed lines.
pub fn lines_from_str(source: &str) -> Vec<String> {
    source.lines().map(|l| l.trim_end().to_string()).collect()
}

/// Read a source file into right-trimmed lines, validating the path.
pub fn read_lines(path: &Path) -> Result<Vec<String>, Tex2RstError> {
    if !path.exists() {
        return Err(Tex2RstError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = match std::fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Tex2RstError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(Tex2RstError::ReadFailed {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let lines = lines_from_str(&text);
    debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_whitespace_only() {
        let lines = lines_from_str("  keep leading   \nplain\n\ttabbed\t\n");
        assert_eq!(lines, vec!["  keep leading", "plain", "\ttabbed"]);
    }

    #[test]
    fn empty_source_yields_no_lines() {
        assert!(lines_from_str("").is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = read_lines(Path::new("/definitely/not/a/real/manual.tex"));
        assert!(matches!(err, Err(Tex2RstError::FileNotFound { .. })));
    }
}
