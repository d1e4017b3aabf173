//! The program grid.
//!
//! A program is a rectangle of characters. Source lines shorter than the
//! longest line are padded with spaces at construction, so every row has the
//! same width and wrap-around never has to look at a per-row length. The grid
//! is never resized afterwards; the `p` instruction overwrites cells in place.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{GridError, LoadError};

/// A signed grid coordinate. The cursor may step one cell outside the grid
/// before it is wrapped back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A rectangular, mutable character grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    cols: usize,
}

impl Grid {
    /// Build a grid from program text.
    ///
    /// Lines are separated by `\n` or `\r\n`; a trailing line break does not
    /// add an empty row.
    pub fn parse(source: &str) -> Result<Self, GridError> {
        Self::from_rows(source.lines())
    }

    /// Build a grid from individual rows, padding them to equal width.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cells: Vec<Vec<char>> = rows
            .into_iter()
            .map(|row| row.as_ref().chars().collect())
            .collect();

        if cells.is_empty() {
            return Err(GridError::EmptySource);
        }

        // All-empty sources still get one column so wrap-around has a cell to land on.
        let cols = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for row in &mut cells {
            row.resize(cols, ' ');
        }

        Ok(Self { cells, cols })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns (same for every row).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Read a cell.
    pub fn get(&self, row: usize, col: usize) -> Result<char, GridError> {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols,
            })
    }

    /// Overwrite a cell. Returns `false` and leaves the grid untouched when
    /// the coordinates are outside the grid.
    pub fn set(&mut self, row: usize, col: usize, value: char) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// True if the signed coordinates address a cell.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as u64) < self.rows() as u64 && (col as u64) < self.cols as u64
    }

    /// Wrap a position back into the grid.
    pub fn wrap(&self, pos: Position) -> Position {
        Position {
            row: pos.row.rem_euclid(self.rows() as i64),
            col: pos.col.rem_euclid(self.cols as i64),
        }
    }

    /// Iterate over the rows as character slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Read a program file and build its grid.
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;
    Ok(Grid::parse(&source)?)
}
