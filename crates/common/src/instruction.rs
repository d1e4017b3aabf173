//! The Befunge-93 instruction set.
//!
//! Every grid cell holds one character. [`Instruction::decode`] maps it to
//! the operation it performs outside of ASCII mode. Characters that are not
//! part of the instruction set decode to [`Instruction::Nop`].

use crate::direction::Direction;

/// Binary arithmetic operators. Operands are popped `a` then `b` and the
/// result is `b op a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    /// Truncating division. A zero divisor is a runtime error.
    Div,
    /// Floored remainder. A zero divisor is a runtime error.
    Mod,
}

impl ArithOp {
    pub fn symbol(&self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
            ArithOp::Mul => '*',
            ArithOp::Div => '/',
            ArithOp::Mod => '%',
        }
    }
}

/// A decoded grid instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `"` — enter or leave ASCII mode.
    ToggleAsciiMode,
    /// `> < ^ v` — change direction.
    Move(Direction),
    /// `0`-`9` — push the digit value.
    Digit(u8),
    /// `+ - * / %` — pop two, push the result.
    Arithmetic(ArithOp),
    /// `#` — skip the next cell.
    Bridge,
    /// `:` — duplicate the top of the stack.
    Duplicate,
    /// `!` — pop; push 1 if zero, else 0.
    Not,
    /// `` ` `` — pop `a`, pop `b`; push 1 if `b > a`, else 0.
    Greater,
    /// `?` — move in a random direction.
    RandomDirection,
    /// `_` — pop; right if zero, else left.
    HorizontalIf,
    /// `|` — pop; down if zero, else up.
    VerticalIf,
    /// `.` — pop and print as a decimal integer.
    OutputInteger,
    /// `,` — pop and print as a character.
    OutputChar,
    /// `\` — swap the top two values.
    Swap,
    /// `$` — pop and discard.
    Discard,
    /// `&` — read an integer from input.
    ReadInteger,
    /// `~` — read a character from input.
    ReadChar,
    /// `g` — pop `y`, pop `x`; push the cell at `(y, x)`.
    Get,
    /// `p` — pop `y`, pop `x`, pop `v`; store `v` at `(y, x)`.
    Put,
    /// `@` — end the program.
    End,
    /// Any other character, including space.
    Nop,
}

impl Instruction {
    /// Decode a grid character.
    pub fn decode(symbol: char) -> Self {
        if let Some(dir) = Direction::from_symbol(symbol) {
            return Instruction::Move(dir);
        }
        // ASCII `0`-`9` only.
        if let Some(digit) = symbol.to_digit(10) {
            return Instruction::Digit(digit as u8);
        }

        match symbol {
            '"' => Instruction::ToggleAsciiMode,
            '+' => Instruction::Arithmetic(ArithOp::Add),
            '-' => Instruction::Arithmetic(ArithOp::Sub),
            '*' => Instruction::Arithmetic(ArithOp::Mul),
            '/' => Instruction::Arithmetic(ArithOp::Div),
            '%' => Instruction::Arithmetic(ArithOp::Mod),
            '#' => Instruction::Bridge,
            ':' => Instruction::Duplicate,
            '!' => Instruction::Not,
            '`' => Instruction::Greater,
            '?' => Instruction::RandomDirection,
            '_' => Instruction::HorizontalIf,
            '|' => Instruction::VerticalIf,
            '.' => Instruction::OutputInteger,
            ',' => Instruction::OutputChar,
            '\\' => Instruction::Swap,
            '$' => Instruction::Discard,
            '&' => Instruction::ReadInteger,
            '~' => Instruction::ReadChar,
            'g' => Instruction::Get,
            'p' => Instruction::Put,
            '@' => Instruction::End,
            _ => Instruction::Nop,
        }
    }

    /// The canonical character for this instruction. `Nop` maps to space.
    pub fn symbol(&self) -> char {
        match self {
            Instruction::ToggleAsciiMode => '"',
            Instruction::Move(dir) => dir.symbol(),
            Instruction::Digit(d) => char::from(b'0' + d),
            Instruction::Arithmetic(op) => op.symbol(),
            Instruction::Bridge => '#',
            Instruction::Duplicate => ':',
            Instruction::Not => '!',
            Instruction::Greater => '`',
            Instruction::RandomDirection => '?',
            Instruction::HorizontalIf => '_',
            Instruction::VerticalIf => '|',
            Instruction::OutputInteger => '.',
            Instruction::OutputChar => ',',
            Instruction::Swap => '\\',
            Instruction::Discard => '$',
            Instruction::ReadInteger => '&',
            Instruction::ReadChar => '~',
            Instruction::Get => 'g',
            Instruction::Put => 'p',
            Instruction::End => '@',
            Instruction::Nop => ' ',
        }
    }
}

impl From<char> for Instruction {
    fn from(symbol: char) -> Self {
        Instruction::decode(symbol)
    }
}

/// Every character with a meaning in the instruction set.
pub const INSTRUCTION_SYMBOLS: &str = "\"><^v0123456789+-*/%#:!`?_|.,\\$&~gp@";
