//! Errors raised while building or loading a program grid.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from grid construction and cell access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Cell access outside the grid extents.
    #[error("cell ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// The source text contains no lines.
    #[error("program source is empty")]
    EmptySource,
}

/// Errors from reading a program file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot read '{}': {reason}", path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error(transparent)]
    Grid(#[from] GridError),
}
