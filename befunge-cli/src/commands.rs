//! CLI command implementations.

use std::io::{self, BufRead};

use befunge_common::{load_grid, Grid, LoadError};
use befunge_vm::{Engine, EngineConfig, Input, LineInput, PromptedInput, RandomDirections};
use tracing::info;

/// Parsed arguments for `run`.
#[derive(Debug, Default, PartialEq, Eq)]
struct RunOptions {
    path: Option<String>,
    max_steps: Option<u64>,
    seed: Option<u64>,
    prompt: bool,
}

/// Load and execute a program.
///
/// Without a file argument the user is prompted for one on stderr, and
/// asked again until the path names an existing file.
pub fn run(args: &[String]) -> Result<(), i32> {
    let opts = parse_run_args(args)?;

    let stdin = io::stdin();
    let mut input = LineInput::new(stdin.lock());

    let grid = match &opts.path {
        Some(path) => load(path)?,
        None => prompt_for_grid(&mut input)?,
    };
    info!(rows = grid.rows(), cols = grid.cols(), "program loaded");

    let directions = match opts.seed {
        Some(seed) => RandomDirections::seeded(seed),
        None => RandomDirections::new(),
    };
    let config = EngineConfig {
        max_steps: opts.max_steps,
    };

    if opts.prompt {
        execute(grid, PromptedInput::new(&mut input, io::stderr()), directions, config)
    } else {
        execute(grid, &mut input, directions, config)
    }
}

/// Print the grid dimensions and the padded grid.
pub fn show(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: show requires an input file");
        eprintln!("Usage: befunge show <file>");
        return Err(1);
    }

    let grid = load(&args[0])?;
    println!("{}x{}", grid.rows(), grid.cols());
    for row in grid.iter_rows() {
        println!("{}", row.iter().collect::<String>());
    }
    Ok(())
}

// --- Helpers ---

fn execute<I: Input>(
    grid: Grid,
    input: I,
    directions: RandomDirections,
    config: EngineConfig,
) -> Result<(), i32> {
    let stdout = io::stdout();
    let mut engine = Engine::new(grid, input, stdout.lock(), directions).with_config(config);

    match engine.run() {
        Ok(summary) => {
            info!(steps = summary.steps, "run complete");
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            Err(2)
        }
    }
}

fn load(path: &str) -> Result<Grid, i32> {
    load_grid(path).map_err(|e| {
        eprintln!("error: {e}");
        1
    })
}

/// Ask for a source path until one exists.
fn prompt_for_grid<R: BufRead>(input: &mut LineInput<R>) -> Result<Grid, i32> {
    loop {
        eprint!("Source file to process : ");
        let line = input.read_line().map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;
        let Some(line) = line else {
            eprintln!();
            eprintln!("error: no source file given");
            return Err(1);
        };

        let path = line.trim();
        if path.is_empty() {
            continue;
        }
        match load_grid(path) {
            Ok(grid) => return Ok(grid),
            Err(e @ LoadError::NotFound(_)) => eprintln!("error: {e}"),
            Err(e) => {
                eprintln!("error: {e}");
                return Err(1);
            }
        }
    }
}

/// Parse `[<file>] [--max-steps N] [--seed N] [--prompt]`.
fn parse_run_args(args: &[String]) -> Result<RunOptions, i32> {
    let mut opts = RunOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--max-steps" => {
                opts.max_steps = Some(parse_number("--max-steps", args.get(i + 1))?);
                i += 2;
            }
            "--seed" => {
                opts.seed = Some(parse_number("--seed", args.get(i + 1))?);
                i += 2;
            }
            "--prompt" => {
                opts.prompt = true;
                i += 1;
            }
            flag if flag.starts_with("--") => {
                eprintln!("error: unknown option '{flag}'");
                eprintln!("Usage: befunge run [<file>] [--max-steps N] [--seed N] [--prompt]");
                return Err(1);
            }
            path => {
                if opts.path.is_some() {
                    eprintln!("error: run takes a single input file");
                    return Err(1);
                }
                opts.path = Some(path.to_string());
                i += 1;
            }
        }
    }
    Ok(opts)
}

fn parse_number(flag: &str, value: Option<&String>) -> Result<u64, i32> {
    let Some(value) = value else {
        eprintln!("error: {flag} requires a value");
        return Err(1);
    };
    value.parse().map_err(|_| {
        eprintln!("error: {flag} expects a non-negative integer, got '{value}'");
        1
    })
}
