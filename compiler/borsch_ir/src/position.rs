//! Source positions.

use std::fmt;
use std::sync::Arc;

/// Location of a syntax node: file name, 1-based line and column.
///
/// The file name is shared between all nodes of one compilation unit.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Create a new position.
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Position {
            file: file.into(),
            line,
            column,
        }
    }

    /// Position for nodes built by the host rather than parsed from source.
    pub fn synthetic() -> Self {
        Position::new("<вбудований>", 0, 0)
    }

    /// Same file, different line and column.
    #[must_use]
    pub fn at(&self, line: u32, column: u32) -> Self {
        Position {
            file: Arc::clone(&self.file),
            line,
            column,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
