//! Runtime errors for the Befunge engine.
//!
//! Out-of-grid `g`/`p` and unknown characters are not errors. What remains
//! is the handful of conditions that stop a run: a zero divisor, bad input,
//! an unprintable character, a failed write, and the optional step limit.
//! Every runtime error carries the cursor position it was raised at.

use befunge_common::Position;
use thiserror::Error;

/// Failures from the input collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The input stream has no more data.
    #[error("input exhausted")]
    Exhausted,

    /// Text supplied for `&` does not parse as an integer.
    #[error("invalid integer input '{0}'")]
    InvalidInteger(String),

    /// The underlying reader failed.
    #[error("input read failed: {0}")]
    Io(String),
}

/// Errors that stop a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `/` with a zero divisor.
    #[error("division by zero at {at}")]
    DivisionByZero { at: Position },

    /// `%` with a zero divisor.
    #[error("modulo by zero at {at}")]
    ModuloByZero { at: Position },

    /// `&` or `~` could not obtain a value.
    #[error("{source} at {at}")]
    InvalidInput { at: Position, source: InputError },

    /// `,` or `p` with a value that is not a Unicode scalar value.
    #[error("value {value} is not a valid character at {at}")]
    InvalidCharacter { at: Position, value: i64 },

    /// The output collaborator failed.
    #[error("output failed at {at}: {reason}")]
    OutputFailed { at: Position, reason: String },

    /// The configured step limit was reached before `@`.
    #[error("step limit of {limit} reached at {at}")]
    StepLimitExceeded { at: Position, limit: u64 },
}

impl RuntimeError {
    /// Cursor position the error was raised at.
    pub fn position(&self) -> Position {
        match self {
            RuntimeError::DivisionByZero { at }
            | RuntimeError::ModuloByZero { at }
            | RuntimeError::InvalidInput { at, .. }
            | RuntimeError::InvalidCharacter { at, .. }
            | RuntimeError::OutputFailed { at, .. }
            | RuntimeError::StepLimitExceeded { at, .. } => *at,
        }
    }
}
