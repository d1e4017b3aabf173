//! Fetch-decode-execute loop and instruction handlers.

use befunge_common::{ArithOp, Direction, Instruction};
use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::io::{Input, Output};
use crate::machine::{Engine, RunSummary, Step};
use crate::random::DirectionSource;

impl<I: Input, O: Output, D: DirectionSource> Engine<I, O, D> {
    /// Run until `@` or a runtime error, then flush the output.
    ///
    /// Output written before an error is still flushed; the runtime error
    /// takes precedence over a flush failure.
    pub fn run(&mut self) -> Result<RunSummary, RuntimeError> {
        let outcome = self.run_until_halted();
        let flushed = self.flush();
        outcome.and(flushed)?;
        debug!(steps = self.steps, "program halted");
        Ok(RunSummary { steps: self.steps })
    }

    fn run_until_halted(&mut self) -> Result<(), RuntimeError> {
        while self.step()? == Step::Continue {}
        Ok(())
    }

    /// Flush buffered output. [`Engine::run`] does this itself; callers
    /// driving [`Engine::step`] by hand call it when they are done.
    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.output
            .flush_text()
            .map_err(|e| RuntimeError::OutputFailed {
                at: self.cursor.position,
                reason: e.to_string(),
            })
    }

    /// Execute one step: wrap, fetch (unless bridged), dispatch, advance.
    ///
    /// A halted engine stays halted; further calls do nothing.
    pub fn step(&mut self) -> Result<Step, RuntimeError> {
        if self.halted {
            return Ok(Step::Halted);
        }
        if let Some(limit) = self.config.max_steps {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded {
                    at: self.at(),
                    limit,
                });
            }
        }
        self.steps += 1;
        self.normalize();

        if self.skip_next {
            self.skip_next = false;
            trace!(at = %self.at(), "bridged");
        } else {
            let symbol = self.fetch();
            if let Err(e) = self.dispatch(symbol) {
                debug!(error = %e, at = %e.position(), steps = self.steps, "run aborted");
                return Err(e);
            }
        }

        self.advance();
        Ok(if self.halted {
            Step::Halted
        } else {
            Step::Continue
        })
    }

    fn fetch(&self) -> char {
        let pos = self.at();
        // Positions are wrapped before every fetch.
        self.grid
            .get(pos.row as usize, pos.col as usize)
            .unwrap_or(' ')
    }

    fn dispatch(&mut self, symbol: char) -> Result<(), RuntimeError> {
        if self.ascii_mode && symbol != '"' {
            self.stack.push(i64::from(u32::from(symbol)));
            return Ok(());
        }

        let instr = Instruction::decode(symbol);
        trace!(at = %self.at(), ?instr, depth = self.stack.len(), "execute");
        self.execute(instr)
    }

    fn execute(&mut self, instr: Instruction) -> Result<(), RuntimeError> {
        match instr {
            Instruction::ToggleAsciiMode => self.ascii_mode = !self.ascii_mode,
            Instruction::Move(dir) => self.cursor.direction = dir,
            Instruction::Digit(d) => self.stack.push(i64::from(d)),
            Instruction::Arithmetic(op) => self.exec_arith(op)?,
            Instruction::Bridge => self.skip_next = true,
            Instruction::Duplicate => self.stack.duplicate(),
            Instruction::Not => {
                let value = self.stack.pop();
                self.stack.push(i64::from(value == 0));
            }
            Instruction::Greater => {
                let a = self.stack.pop();
                let b = self.stack.pop();
                self.stack.push(i64::from(b > a));
            }
            Instruction::RandomDirection => {
                self.cursor.direction = self.directions.next_direction();
            }
            Instruction::HorizontalIf => {
                self.cursor.direction = if self.stack.pop() == 0 {
                    Direction::Right
                } else {
                    Direction::Left
                };
            }
            Instruction::VerticalIf => {
                self.cursor.direction = if self.stack.pop() == 0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
            }
            Instruction::OutputInteger => {
                let value = self.stack.pop();
                self.emit(&value.to_string())?;
            }
            Instruction::OutputChar => {
                let value = self.stack.pop();
                let c = self.char_from_value(value)?;
                self.emit(c.encode_utf8(&mut [0; 4]))?;
            }
            Instruction::Swap => self.stack.swap_top(),
            Instruction::Discard => {
                self.stack.pop();
            }
            Instruction::ReadInteger => {
                let value = self
                    .input
                    .read_integer()
                    .map_err(|source| RuntimeError::InvalidInput {
                        at: self.cursor.position,
                        source,
                    })?;
                self.stack.push(value);
            }
            Instruction::ReadChar => {
                let c = self
                    .input
                    .read_char()
                    .map_err(|source| RuntimeError::InvalidInput {
                        at: self.cursor.position,
                        source,
                    })?;
                self.stack.push(i64::from(u32::from(c)));
            }
            Instruction::Get => self.exec_get(),
            Instruction::Put => self.exec_put()?,
            Instruction::End => self.halted = true,
            Instruction::Nop => {}
        }
        Ok(())
    }

    /// Pop `a`, pop `b`, push `b op a`.
    fn exec_arith(&mut self, op: ArithOp) -> Result<(), RuntimeError> {
        let a = self.stack.pop();
        let b = self.stack.pop();
        let result = match op {
            ArithOp::Add => b.wrapping_add(a),
            ArithOp::Sub => b.wrapping_sub(a),
            ArithOp::Mul => b.wrapping_mul(a),
            ArithOp::Div => {
                if a == 0 {
                    return Err(RuntimeError::DivisionByZero { at: self.at() });
                }
                b.wrapping_div(a)
            }
            ArithOp::Mod => {
                if a == 0 {
                    return Err(RuntimeError::ModuloByZero { at: self.at() });
                }
                floored_rem(b, a)
            }
        };
        self.stack.push(result);
        Ok(())
    }

    /// Pop `y`, pop `x`; push the code point at row `y`, column `x`, or 0.
    fn exec_get(&mut self) {
        let y = self.stack.pop();
        let x = self.stack.pop();
        let value = if self.grid.contains(y, x) {
            self.grid
                .get(y as usize, x as usize)
                .map(|c| i64::from(u32::from(c)))
                .unwrap_or(0)
        } else {
            0
        };
        self.stack.push(value);
    }

    /// Pop `y`, pop `x`, pop `v`; write `v` at row `y`, column `x` if in the grid.
    fn exec_put(&mut self) -> Result<(), RuntimeError> {
        let y = self.stack.pop();
        let x = self.stack.pop();
        let v = self.stack.pop();
        if !self.grid.contains(y, x) {
            trace!(row = y, col = x, "put outside grid ignored");
            return Ok(());
        }
        let c = self.char_from_value(v)?;
        self.grid.set(y as usize, x as usize, c);
        Ok(())
    }

    fn emit(&mut self, text: &str) -> Result<(), RuntimeError> {
        self.output
            .write_text(text)
            .map_err(|e| RuntimeError::OutputFailed {
                at: self.cursor.position,
                reason: e.to_string(),
            })
    }
}

/// Remainder with the sign of the divisor.
fn floored_rem(b: i64, a: i64) -> i64 {
    let r = b.wrapping_rem(a);
    if r != 0 && (r < 0) != (a < 0) {
        r + a
    } else {
        r
    }
}
