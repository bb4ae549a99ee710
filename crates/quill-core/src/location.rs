use serde::{Deserialize, Serialize};

use crate::ast::SourceLocation;

/// Row and column of a diagnostic, both 1-based, as printed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub row: usize,
    pub column: usize,
}

impl Location {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl From<SourceLocation> for Location {
    // ESTree columns are 0-based.
    fn from(loc: SourceLocation) -> Self {
        Self::new(loc.start.line as usize, loc.start.column as usize + 1)
    }
}
