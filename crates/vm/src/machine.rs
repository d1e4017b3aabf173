//! Engine state: grid, stack, cursor, mode flags and collaborators.

use befunge_common::{Direction, Grid, Position};

use crate::config::EngineConfig;
use crate::error::RuntimeError;
use crate::io::{Input, Output};
use crate::random::DirectionSource;
use crate::stack::Stack;

/// Where the cursor is and which way it is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: Position,
    pub direction: Direction,
}

/// Result of a single [`Engine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The program is still running.
    Continue,
    /// `@` has executed.
    Halted,
}

/// Statistics for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps taken, including bridged (skipped) ones.
    pub steps: u64,
}

/// The Befunge execution engine.
///
/// Owns the grid for the whole run; `p` rewrites it in place and later
/// fetches see the new characters.
pub struct Engine<I, O, D> {
    pub(crate) grid: Grid,
    pub(crate) stack: Stack,
    pub(crate) cursor: Cursor,
    /// Inside a `"` string: every character is pushed as its code point.
    pub(crate) ascii_mode: bool,
    /// Set by `#`; the next step fetches nothing.
    pub(crate) skip_next: bool,
    pub(crate) halted: bool,
    pub(crate) steps: u64,
    pub(crate) config: EngineConfig,
    pub(crate) input: I,
    pub(crate) output: O,
    pub(crate) directions: D,
}

impl<I: Input, O: Output, D: DirectionSource> Engine<I, O, D> {
    /// Create an engine at `(0, 0)` heading right, with an empty stack.
    pub fn new(grid: Grid, input: I, output: O, directions: D) -> Self {
        Self {
            grid,
            stack: Stack::new(),
            cursor: Cursor::default(),
            ascii_mode: false,
            skip_next: false,
            halted: false,
            steps: 0,
            config: EngineConfig::default(),
            input,
            output,
            directions,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn is_ascii_mode(&self) -> bool {
        self.ascii_mode
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Wrap the cursor back into the grid.
    pub(crate) fn normalize(&mut self) {
        self.cursor.position = self.grid.wrap(self.cursor.position);
    }

    /// Move one cell in the current direction, wrapping at the edges.
    pub(crate) fn advance(&mut self) {
        let (dr, dc) = self.cursor.direction.delta();
        let pos = self.cursor.position;
        self.cursor.position = self.grid.wrap(Position::new(pos.row + dr, pos.col + dc));
    }

    pub(crate) fn at(&self) -> Position {
        self.cursor.position
    }

    /// Convert a stack value to a character, or fail at the current cell.
    pub(crate) fn char_from_value(&self, value: i64) -> Result<char, RuntimeError> {
        u32::try_from(value)
            .ok()
            .and_then(char::from_u32)
            .ok_or(RuntimeError::InvalidCharacter {
                at: self.at(),
                value,
            })
    }
}
