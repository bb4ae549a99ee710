use std::fmt;
use std::path::PathBuf;

/// A declaration file that is not valid JSON or does not have the expected
/// shape.
#[derive(Debug)]
pub struct ParseError {
    pub filename: PathBuf,
    pub source: serde_json::Error,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse {}: {}", self.filename.display(), self.source)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
