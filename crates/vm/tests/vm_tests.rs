//! Integration tests for the Befunge engine.
//!
//! Organized by instruction group. Every program runs under a step limit so
//! a broken control-flow instruction fails the test instead of hanging it.

use std::io::{self, Write};

use befunge_common::{Direction, Grid, Position};
use befunge_vm::{
    Engine, EngineConfig, FixedDirections, InputError, LineInput, NoInput, PromptedInput,
    RuntimeError, Step,
};

// ============================================================
// Helper functions
// ============================================================

const STEP_LIMIT: u64 = 10_000;

type TestEngine<'a> = Engine<LineInput<&'a [u8]>, Vec<u8>, FixedDirections>;

/// Build an engine over `source` reading `input`, with `?` always going right.
fn engine<'a>(source: &str, input: &'a str) -> TestEngine<'a> {
    engine_with_directions(source, input, vec![Direction::Right])
}

fn engine_with_directions<'a>(
    source: &str,
    input: &'a str,
    directions: Vec<Direction>,
) -> TestEngine<'a> {
    let grid = Grid::parse(source).unwrap();
    Engine::new(
        grid,
        LineInput::new(input.as_bytes()),
        Vec::new(),
        FixedDirections::new(directions),
    )
    .with_config(EngineConfig::default().with_max_steps(STEP_LIMIT))
}

/// Run a program with the given input and return its output.
fn run_with_input(source: &str, input: &str) -> Result<String, RuntimeError> {
    let mut engine = engine(source, input);
    engine.run()?;
    Ok(String::from_utf8(engine.into_output()).unwrap())
}

/// Writer that records how often it was flushed.
#[derive(Default)]
struct FlushCounter {
    bytes: Vec<u8>,
    flushes: usize,
}

impl Write for FlushCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Run a program without input and return its output.
fn run_source(source: &str) -> Result<String, RuntimeError> {
    run_with_input(source, "")
}

// ============================================================
// End-to-end scenarios
// ============================================================

#[test]
fn add_and_print() {
    assert_eq!(run_source("64+.@"), Ok("10".into()));
}

#[test]
fn countdown_loop_with_horizontal_if() {
    // Prints 5..1, looping back through `^` while the counter is nonzero.
    let source = "5>:.1-:v\n ^     _@";
    assert_eq!(run_source(source), Ok("54321".into()));
}

#[test]
fn hello_world() {
    let source = "\"!dlroW ,olleH\">:#,_@";
    assert_eq!(run_source(source), Ok("Hello, World!".into()));
}

#[test]
fn empty_row_padding_is_a_nop() {
    // Row 1 is shorter; its padding must behave like spaces.
    let source = "v\n>  9.@\n";
    assert_eq!(run_source(source), Ok("9".into()));
}

#[test]
fn run_reports_steps() {
    let mut engine = engine("64+.@", "");
    let summary = engine.run().unwrap();
    assert_eq!(summary.steps, 5);
    assert_eq!(engine.steps(), 5);
    assert!(engine.is_halted());
}

// ============================================================
// Cursor movement and wrap-around
// ============================================================

#[test]
fn wrap_right_edge_to_column_zero() {
    let source = "  v\n.@>5";
    assert_eq!(run_source(source), Ok("5".into()));
}

#[test]
fn wrap_left_edge_to_last_column() {
    assert_eq!(run_source("<@.5"), Ok("5".into()));
}

#[test]
fn wrap_top_edge_to_last_row() {
    assert_eq!(run_source("^\n@\n.\n5"), Ok("5".into()));
}

#[test]
fn wrap_bottom_edge_to_row_zero() {
    // Down column 1: 7, print, then off the bottom and back onto `@` in row 0.
    let source = "v@\n>v\n 7\n .";
    assert_eq!(run_source(source), Ok("7".into()));
}

#[test]
fn cursor_wraps_after_each_step() {
    let mut engine = engine("   ", "");
    for _ in 0..3 {
        assert_eq!(engine.step(), Ok(Step::Continue));
    }
    assert_eq!(engine.cursor().position, Position::new(0, 0));
    assert_eq!(engine.cursor().direction, Direction::Right);
}

#[test]
fn cursor_wraps_downward_through_last_row() {
    let mut engine = engine("v\n \n ", "");
    // v, space, space: after three steps the cursor is back on row 0.
    for _ in 0..3 {
        engine.step().unwrap();
    }
    assert_eq!(engine.cursor().position, Position::new(0, 0));
    assert_eq!(engine.cursor().direction, Direction::Down);
}

#[test]
fn direction_changers() {
    // > v
    // @ <
    let source = ">v\n@<";
    let mut engine = engine(source, "");
    engine.run().unwrap();
    assert!(engine.is_halted());
}

// ============================================================
// Digits and arithmetic
// ============================================================

#[test]
fn digits_push_values() {
    let mut engine = engine("0123456789@", "");
    engine.run().unwrap();
    assert_eq!(engine.stack().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn subtraction_uses_second_popped_as_left_operand() {
    assert_eq!(run_source("93-.@"), Ok("6".into()));
}

#[test]
fn multiplication() {
    assert_eq!(run_source("78*.@"), Ok("56".into()));
}

#[test]
fn division_truncates_toward_zero() {
    assert_eq!(run_source("72/.@"), Ok("3".into()));
    assert_eq!(run_source("07-2/.@"), Ok("-3".into()));
}

#[test]
fn modulo_takes_divisor_sign() {
    assert_eq!(run_source("73%.@"), Ok("1".into()));
    assert_eq!(run_source("07-2%.@"), Ok("1".into()));
}

#[test]
fn division_by_zero_is_fatal() {
    assert_eq!(
        run_source("10/@"),
        Err(RuntimeError::DivisionByZero {
            at: Position::new(0, 2)
        })
    );
}

#[test]
fn modulo_by_zero_is_fatal() {
    assert_eq!(
        run_source("10%@"),
        Err(RuntimeError::ModuloByZero {
            at: Position::new(0, 2)
        })
    );
}

#[test]
fn only_ascii_digits_push_values() {
    // U+0663 ARABIC-INDIC DIGIT THREE is a no-op, so `.` prints an empty pop.
    assert_eq!(run_source("\u{0663}.@"), Ok("0".into()));
}

#[test]
fn arithmetic_on_empty_stack_uses_zero() {
    assert_eq!(run_source("+.@"), Ok("0".into()));
    assert_eq!(run_source("5-.@"), Ok("-5".into()));
}

// ============================================================
// Logic
// ============================================================

#[test]
fn greater_than() {
    // a = 5 (top), b = 3: 3 > 5 is false.
    assert_eq!(run_source("35`.@"), Ok("0".into()));
    assert_eq!(run_source("53`.@"), Ok("1".into()));
    assert_eq!(run_source("55`.@"), Ok("0".into()));
}

#[test]
fn logical_not() {
    assert_eq!(run_source("0!.@"), Ok("1".into()));
    assert_eq!(run_source("7!.@"), Ok("0".into()));
    assert_eq!(run_source("!.@"), Ok("1".into()));
}

// ============================================================
// Stack manipulation
// ============================================================

#[test]
fn duplicate() {
    assert_eq!(run_source("5:..@"), Ok("55".into()));
}

#[test]
fn swap() {
    assert_eq!(run_source("12\\..@"), Ok("12".into()));
}

#[test]
fn discard() {
    assert_eq!(run_source("12$.@"), Ok("1".into()));
}

#[test]
fn stack_state_after_run() {
    let mut engine = engine("12\\:@", "");
    engine.run().unwrap();
    assert_eq!(engine.stack().as_slice(), &[2, 1, 1]);
}

// ============================================================
// Branching
// ============================================================

#[test]
fn horizontal_if_zero_goes_right() {
    assert_eq!(run_source("0_ 1.@"), Ok("1".into()));
}

#[test]
fn horizontal_if_nonzero_goes_left() {
    // `_` sends the cursor left, wrapping to `@` at the end of the row.
    let mut engine = engine("1_ 9.@", "");
    engine.run().unwrap();
    assert_eq!(String::from_utf8(engine.into_output()).unwrap(), "");
}

#[test]
fn vertical_if_zero_goes_down() {
    let source = "v @\n>0|\n  .\n  @";
    assert_eq!(run_source(source), Ok("0".into()));
}

#[test]
fn vertical_if_nonzero_goes_up() {
    let source = "v @\n>1|\n  .\n  @";
    assert_eq!(run_source(source), Ok(String::new()));
}

#[test]
fn random_direction_uses_source() {
    let mut right = engine_with_directions("?1.@", "", vec![Direction::Right]);
    right.run().unwrap();
    assert_eq!(right.into_output(), b"1");

    // Left from column 0 wraps straight onto `@`.
    let mut left = engine_with_directions("?1.@", "", vec![Direction::Left]);
    left.run().unwrap();
    assert!(left.into_output().is_empty());
}

// ============================================================
// Bridge
// ============================================================

#[test]
fn bridge_skips_one_cell() {
    assert_eq!(run_source("#1.@"), Ok("0".into()));
}

#[test]
fn bridge_step_still_advances() {
    let mut engine = engine("#12@", "");
    engine.step().unwrap();
    assert_eq!(engine.cursor().position, Position::new(0, 1));
    engine.step().unwrap();
    // The skipped step moved on without pushing.
    assert_eq!(engine.cursor().position, Position::new(0, 2));
    assert!(engine.stack().is_empty());
    engine.run().unwrap();
    assert_eq!(engine.stack().as_slice(), &[2]);
}

#[test]
fn bridge_across_edge() {
    // `#` on the last column skips the `.` in column 0 after wrapping.
    assert_eq!(run_source("  v\n.@>#"), Ok(String::new()));
}

// ============================================================
// ASCII mode
// ============================================================

#[test]
fn ascii_mode_pushes_code_points() {
    let mut engine = engine("\"5\"@", "");
    engine.run().unwrap();
    assert_eq!(engine.stack().as_slice(), &[53]);
}

#[test]
fn ascii_mode_toggles_back_to_digits() {
    let mut engine = engine("\"5\"5@", "");
    engine.run().unwrap();
    assert_eq!(engine.stack().as_slice(), &[53, 5]);
    assert!(!engine.is_ascii_mode());
}

#[test]
fn ascii_mode_pushes_spaces_and_instructions() {
    let mut engine = engine("\" @>\"@", "");
    engine.run().unwrap();
    assert_eq!(engine.stack().as_slice(), &[32, 64, 62]);
}

#[test]
fn ascii_mode_flag_visible_mid_string() {
    let mut engine = engine("\"ab\"@", "");
    engine.step().unwrap();
    assert!(engine.is_ascii_mode());
}

// ============================================================
// Output
// ============================================================

#[test]
fn integer_output_has_no_separator() {
    assert_eq!(run_source("12..@"), Ok("21".into()));
}

#[test]
fn negative_integer_output() {
    assert_eq!(run_source("09-.@"), Ok("-9".into()));
}

#[test]
fn char_output() {
    assert_eq!(run_source("\"a\",@"), Ok("a".into()));
    assert_eq!(run_source("55+,@"), Ok("\n".into()));
}

#[test]
fn char_output_rejects_negative_values() {
    assert_eq!(
        run_source("01-,@"),
        Err(RuntimeError::InvalidCharacter {
            at: Position::new(0, 3),
            value: -1
        })
    );
}

#[test]
fn output_is_flushed_once_when_run_halts() {
    let grid = Grid::parse("\"cba\",,,@").unwrap();
    let mut engine = Engine::new(
        grid,
        NoInput,
        FlushCounter::default(),
        FixedDirections::new(vec![]),
    );
    engine.run().unwrap();
    let out = engine.into_output();
    assert_eq!(out.bytes, b"abc");
    assert_eq!(out.flushes, 1);
}

#[test]
fn output_is_flushed_when_run_fails() {
    let grid = Grid::parse("7.0/@").unwrap();
    let mut engine = Engine::new(
        grid,
        NoInput,
        FlushCounter::default(),
        FixedDirections::new(vec![]),
    );
    assert_eq!(
        engine.run(),
        Err(RuntimeError::DivisionByZero {
            at: Position::new(0, 3)
        })
    );
    let out = engine.into_output();
    assert_eq!(out.bytes, b"7");
    assert_eq!(out.flushes, 1);
}

// ============================================================
// Input
// ============================================================

#[test]
fn read_integer() {
    assert_eq!(run_with_input("&.@", "42\n"), Ok("42".into()));
    assert_eq!(run_with_input("&&+.@", "3\n4\n"), Ok("7".into()));
}

#[test]
fn read_integer_malformed() {
    assert_eq!(
        run_with_input("&.@", "abc\n"),
        Err(RuntimeError::InvalidInput {
            at: Position::new(0, 0),
            source: InputError::InvalidInteger("abc".into()),
        })
    );
}

#[test]
fn read_integer_end_of_input() {
    assert_eq!(
        run_source("&.@"),
        Err(RuntimeError::InvalidInput {
            at: Position::new(0, 0),
            source: InputError::Exhausted,
        })
    );
}

#[test]
fn read_char() {
    assert_eq!(run_with_input("~.@", "A"), Ok("65".into()));
    assert_eq!(run_with_input("~~..@", "hi"), Ok("105104".into()));
}

#[test]
fn prompts_go_to_their_own_writer() {
    let grid = Grid::parse("&~..@").unwrap();
    let mut prompts: Vec<u8> = Vec::new();
    let input = PromptedInput::new(LineInput::new("4\nx".as_bytes()), &mut prompts);
    let mut engine = Engine::new(grid, input, Vec::<u8>::new(), FixedDirections::new(vec![]));
    engine.run().unwrap();
    assert_eq!(String::from_utf8(engine.into_output()).unwrap(), "1204");
    assert_eq!(
        String::from_utf8(prompts).unwrap(),
        "Enter a number: Enter a single character: "
    );
}

#[test]
fn no_input_adapter() {
    let grid = Grid::parse("~@").unwrap();
    let mut engine = Engine::new(
        grid,
        NoInput,
        Vec::<u8>::new(),
        FixedDirections::new(vec![]),
    );
    assert_eq!(
        engine.run(),
        Err(RuntimeError::InvalidInput {
            at: Position::new(0, 0),
            source: InputError::Exhausted,
        })
    );
}

// ============================================================
// Self-modification: g and p
// ============================================================

#[test]
fn get_reads_cell() {
    // x = 2, y = 0: the `g` itself, code point 103.
    assert_eq!(run_source("20g.@"), Ok("103".into()));
}

#[test]
fn get_outside_grid_pushes_zero() {
    assert_eq!(run_source("90g.@"), Ok("0".into()));
    assert_eq!(run_source("01-0g.@"), Ok("0".into()));
    assert_eq!(run_source("09g.@"), Ok("0".into()));
}

#[test]
fn put_writes_cell_the_cursor_later_runs() {
    // Stores '@' (64) at column 7; without the write the program would print 9 forever.
    let mut engine = engine("88*70p 9.", "");
    engine.run().unwrap();
    assert_eq!(engine.grid().get(0, 7), Ok('@'));
    assert!(engine.into_output().is_empty());
}

#[test]
fn put_outside_grid_is_noop() {
    let source = "199p@";
    let mut engine = engine(source, "");
    engine.run().unwrap();
    assert_eq!(engine.grid(), &Grid::parse(source).unwrap());
    assert!(engine.stack().is_empty());
}

#[test]
fn put_negative_coordinates_is_noop() {
    let source = "101-0p@";
    let mut engine = engine(source, "");
    engine.run().unwrap();
    assert_eq!(engine.grid(), &Grid::parse(source).unwrap());
}

#[test]
fn put_then_get_roundtrip() {
    // Write 'A' (65) into row 1, column 0, then read it back.
    let source = "88*1+01p01g.@\n ";
    assert_eq!(run_source(source), Ok("65".into()));
}

#[test]
fn put_invalid_character_in_grid_is_fatal() {
    assert_eq!(
        run_source("01-00p@"),
        Err(RuntimeError::InvalidCharacter {
            at: Position::new(0, 5),
            value: -1
        })
    );
}

// ============================================================
// Termination and limits
// ============================================================

#[test]
fn step_after_halt_is_inert() {
    let mut engine = engine("@", "");
    assert_eq!(engine.step(), Ok(Step::Halted));
    let steps = engine.steps();
    assert_eq!(engine.step(), Ok(Step::Halted));
    assert_eq!(engine.steps(), steps);
}

#[test]
fn step_limit_stops_infinite_loop() {
    let grid = Grid::parse(" ").unwrap();
    let mut engine = Engine::new(grid, NoInput, Vec::<u8>::new(), FixedDirections::new(vec![]))
        .with_config(EngineConfig::default().with_max_steps(10));
    assert_eq!(
        engine.run(),
        Err(RuntimeError::StepLimitExceeded {
            at: Position::new(0, 0),
            limit: 10
        })
    );
    assert_eq!(engine.steps(), 10);
}

#[test]
fn unknown_characters_are_nops() {
    assert_eq!(run_source("abc 5 xyz.@"), Ok("5".into()));
}
