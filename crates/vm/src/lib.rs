//! Befunge-93 execution engine.
//!
//! The engine is a cursor moving over a self-modifying character grid with:
//! - An operand stack of `i64` values that yields 0 when popped empty
//! - A direction, an ASCII (string) mode flag and a one-shot bridge flag
//! - Injectable collaborators for input, output and the `?` instruction
//!
//! # Usage
//!
//! ```
//! use befunge_common::Grid;
//! use befunge_vm::{run, NoInput};
//!
//! let grid = Grid::parse("64+.@").unwrap();
//! let mut out: Vec<u8> = Vec::new();
//! run(grid, NoInput, &mut out).unwrap();
//! assert_eq!(out, b"10");
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod io;
pub mod machine;
pub mod random;
pub mod stack;

pub use config::EngineConfig;
pub use error::{InputError, RuntimeError};
pub use io::{Input, LineInput, NoInput, Output, PromptedInput};
pub use machine::{Cursor, Engine, RunSummary, Step};
pub use random::{DirectionSource, FixedDirections, RandomDirections};
pub use stack::Stack;

use befunge_common::Grid;

/// Run a program to completion with entropy-seeded random directions.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (division by zero, bad
/// input, unprintable character, failed write).
pub fn run<I: Input, O: Output>(
    grid: Grid,
    input: I,
    output: O,
) -> Result<RunSummary, RuntimeError> {
    Engine::new(grid, input, output, RandomDirections::new()).run()
}
