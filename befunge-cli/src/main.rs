//! Befunge CLI — load and run Befunge-93 programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage or load error
//! - 2: Runtime error

mod commands;

use std::process;

use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "show" => commands::show(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

/// Log to stderr so program output on stdout stays untouched.
/// `RUST_LOG` overrides the default `warn` filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_usage() {
    eprintln!("Usage: befunge <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run [<file>] [--max-steps N] [--seed N] [--prompt]");
    eprintln!("                        Run a program (prompts for a file if omitted)");
    eprintln!("                        --prompt announces each & and ~ read on stderr");
    eprintln!("  show <file>           Print the padded program grid");
}
