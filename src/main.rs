//! # two-sat-solver
//!
//! A command-line front end for the 2-SAT solver. Formulas are read in DIMACS
//! CNF format, where every clause holds exactly two literals:
//!
//! ```text
//! c exactly one of x1, x2
//! p cnf 2 2
//! 1 2 0
//! -1 -2 0
//! ```
//!
//! ## Usage
//!
//! ```sh
//! # Solve a file, or every .cnf file under a directory
//! two-sat-solver problem.cnf
//! two-sat-solver benchmarks/
//!
//! # Explicit subcommands
//! two-sat-solver file --path problem.cnf --stats false
//! two-sat-solver text --input $'1 2 0\n-1 -2 0'
//! cat problem.cnf | two-sat-solver stdin
//!
//! # Shell completions
//! two-sat-solver completions bash
//! ```
//!
//! The verdict is printed as `SATISFIABLE` followed by one `1`/`0` token per
//! variable, or as `UNSATISFIABLE`. Logging goes through `env_logger`: the
//! default level is `warn`, `--debug` raises it to `debug`, and `RUST_LOG`
//! overrides both.

use crate::command_line::cli::{
    Cli, Commands, Outcome, print_completions, solve_file, solve_path, solve_stdin, solve_text,
};
use clap::Parser;
use log::error;
use std::process::ExitCode;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// figures in the statistics table.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.debug() { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let outcomes = match (cli.command, cli.path) {
        (Some(Commands::File { path, common }), _) => solve_file(&path, &common).map(|o| vec![o]),
        (Some(Commands::Text { input, common }), _) => solve_text(&input, &common).map(|o| vec![o]),
        (Some(Commands::Stdin { common }), _) => solve_stdin(&common).map(|o| vec![o]),
        (Some(Commands::Completions { shell }), _) => {
            print_completions(shell);
            return ExitCode::SUCCESS;
        }
        (None, Some(path)) => solve_path(&path, &cli.common),
        (None, None) => {
            eprintln!("No command provided. Use --help for more information.");
            return ExitCode::FAILURE;
        }
    };

    match outcomes {
        Ok(outcomes) if outcomes.contains(&Outcome::VerificationFailed) => {
            error!("a model failed verification");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
