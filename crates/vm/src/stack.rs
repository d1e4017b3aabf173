//! The operand stack.
//!
//! Popping or peeking an empty stack yields 0 instead of failing. Programs
//! rely on this, so it is not an error condition.

use std::fmt;

/// A growable stack of signed integers. Top is the last element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stack {
    values: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    /// Remove and return the top value, or 0 if the stack is empty.
    pub fn pop(&mut self) -> i64 {
        self.values.pop().unwrap_or(0)
    }

    /// Return the top value without removing it, or 0 if empty.
    pub fn peek(&self) -> i64 {
        self.values.last().copied().unwrap_or(0)
    }

    /// Push a copy of the top value (0 on an empty stack).
    pub fn duplicate(&mut self) {
        self.push(self.peek());
    }

    /// Pop `a`, pop `b`, push `a`, push `b`.
    ///
    /// Missing values are filled in with 0 the same way [`Stack::pop`] does,
    /// so `[x]` becomes `[x, 0]` and an empty stack becomes `[0, 0]`.
    pub fn swap_top(&mut self) {
        let a = self.pop();
        let b = self.pop();
        self.push(a);
        self.push(b);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom-to-top view of the contents.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }
}

impl From<Vec<i64>> for Stack {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}

impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.values)
    }
}
