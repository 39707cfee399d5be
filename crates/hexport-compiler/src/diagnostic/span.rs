//! Source location tracking.

use std::path::PathBuf;

use serde::Serialize;

/// A span in the source code.
///
/// Lines and columns are zero-based, as reported by tree-sitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub file: PathBuf,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(file: PathBuf, start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            file,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Human-facing (1-based) line of the span start.
    pub fn line(&self) -> usize {
        self.start_line + 1
    }

    /// Human-facing (1-based) column of the span start.
    pub fn column(&self) -> usize {
        self.start_col + 1
    }
}
