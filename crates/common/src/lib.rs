//! Befunge-93 common types.
//!
//! This crate provides the data side of the interpreter:
//!
//! - [`Direction`] — the four cursor directions
//! - [`Instruction`] — the instruction set, decoded from grid characters
//! - [`Grid`] — the rectangular, self-modifying program buffer
//! - [`Position`] — signed grid coordinates
//! - [`GridError`] / [`LoadError`] — construction and loading failures

pub mod direction;
pub mod error;
pub mod grid;
pub mod instruction;

// Re-export commonly used types at the crate root.
pub use direction::{Direction, ALL_DIRECTIONS};
pub use error::{GridError, LoadError};
pub use grid::{load_grid, Grid, Position};
pub use instruction::{ArithOp, Instruction, INSTRUCTION_SYMBOLS};
