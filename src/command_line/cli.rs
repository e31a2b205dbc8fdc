#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use log::{error, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use two_sat_solver::sat::cnf::Cnf;
use two_sat_solver::sat::dimacs::{parse_file, parse_str};
use two_sat_solver::sat::error::Result;
use two_sat_solver::sat::solver::{SatResult, SolutionStats, Solver, TwoSatSolver};

const MIB: f64 = 1024.0 * 1024.0;

/// Defines the command-line interface for the 2-SAT solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "two-sat-solver", version, about = "A linear-time 2-SAT solver")]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it is
    /// solved as a DIMACS file, or as every `.cnf` file below it if it is a directory.
    pub path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `stdin`).
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

impl Cli {
    /// Whether debug output was requested at any level of the command line.
    pub(crate) fn debug(&self) -> bool {
        let nested = match &self.command {
            Some(
                Commands::File { common, .. }
                | Commands::Text { common, .. }
                | Commands::Stdin { common },
            ) => common.debug,
            Some(Commands::Completions { .. }) | None => false,
        };
        self.common.debug || nested
    }
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a 2-CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a 2-CNF formula provided as plain text.
    Text {
        /// DIMACS clauses as a string, one or more per line (e.g. "1 -2 0 2 3 0").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a 2-CNF formula read from standard input.
    Stdin {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging of graph and component sizes.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check a found model against every clause of the formula.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and solver statistics after solving.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the model as one `1`/`0` token per variable.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) print_solution: bool,
}

/// Outcome of one solved formula, as seen by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Satisfiable,
    Unsatisfiable,
    /// The model did not satisfy the formula.
    VerificationFailed,
}

/// Prints shell completions for `shell` to standard output.
pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
}

/// Solves a DIMACS file, or every `.cnf` file under a directory.
///
/// # Errors
///
/// If a file cannot be read or parsed.
pub(crate) fn solve_path(path: &Path, common: &CommonOptions) -> Result<Vec<Outcome>> {
    if path.is_dir() {
        solve_dir(path, common)
    } else {
        solve_file(path, common).map(|outcome| vec![outcome])
    }
}

/// Solves every `.cnf` file found below `path`.
///
/// # Errors
///
/// On the first file that cannot be read or parsed.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::new();

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "cnf") {
            info!("Skipping non-CNF file: {}", file_path.display());
            continue;
        }

        outcomes.push(solve_file(file_path, common)?);
    }

    Ok(outcomes)
}

/// Parses and solves a single DIMACS file.
///
/// # Errors
///
/// If the file cannot be read or parsed.
pub(crate) fn solve_file(path: &Path, common: &CommonOptions) -> Result<Outcome> {
    let time = Instant::now();
    let cnf = parse_file(path)?;
    let parse_time = time.elapsed();

    Ok(solve_and_report(&cnf, common, Some(path), parse_time))
}

/// Parses and solves DIMACS text given on the command line.
///
/// # Errors
///
/// If the text is not a valid 2-CNF.
pub(crate) fn solve_text(input: &str, common: &CommonOptions) -> Result<Outcome> {
    let time = Instant::now();
    let cnf = parse_str(input)?;
    let parse_time = time.elapsed();

    Ok(solve_and_report(&cnf, common, None, parse_time))
}

/// Reads DIMACS text from standard input and solves it.
///
/// # Errors
///
/// If standard input cannot be read or is not a valid 2-CNF.
pub(crate) fn solve_stdin(common: &CommonOptions) -> Result<Outcome> {
    let time = Instant::now();
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let cnf = parse_str(&input)?;
    let parse_time = time.elapsed();

    Ok(solve_and_report(&cnf, common, None, parse_time))
}

/// Solves `cnf` and returns the verdict with solve time and statistics.
pub(crate) fn solve(cnf: &Cnf, label: Option<&Path>) -> (SatResult, Duration, SolutionStats) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let time = Instant::now();
    let mut solver = TwoSatSolver::new(cnf.clone());
    let result = solver.solve();
    let elapsed = time.elapsed();

    info!("{} in {elapsed:?}", if result.is_sat() { "SAT" } else { "UNSAT" });

    (result, elapsed, solver.stats())
}

/// Checks a model against the formula. An unsatisfiable verdict has nothing
/// to check.
pub(crate) fn verify_solution(cnf: &Cnf, result: &SatResult) -> bool {
    let Some(model) = result.model() else {
        return true;
    };

    let falsified: Vec<String> = cnf.falsified_by(model).map(ToString::to_string).collect();
    if falsified.is_empty() {
        println!("Verified: true");
        true
    } else {
        error!("model falsifies {} clause(s): {}", falsified.len(), falsified.join(", "));
        println!("Verified: false");
        false
    }
}

/// Solves, verifies and reports on a parsed formula.
pub(crate) fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
) -> Outcome {
    let (result, elapsed, solver_stats) = solve(cnf, label);

    let verified = !common.verify || verify_solution(cnf, &result);

    if common.stats {
        print_stats(parse_time, elapsed, cnf, &solver_stats, memory_usage());
    }

    print_result(&result, common.print_solution);

    match (&result, verified) {
        (_, false) => Outcome::VerificationFailed,
        (SatResult::Satisfiable(_), true) => Outcome::Satisfiable,
        (SatResult::Unsatisfiable, true) => Outcome::Unsatisfiable,
    }
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
pub(crate) fn memory_usage() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Prints the verdict line and, when asked, the model tokens.
pub(crate) fn print_result(result: &SatResult, print_solution: bool) {
    match result {
        SatResult::Satisfiable(_) => {
            println!("\nSATISFIABLE");
            if print_solution {
                println!("{result}");
            }
        }
        SatResult::Unsatisfiable => println!("\n{result}"),
    }
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary of problem and solver statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    s: &SolutionStats,
    memory: Option<(f64, f64)>,
) {
    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Variables (used)", cnf.num_used_vars());
    stat_line("Clauses", cnf.len());

    println!("========================[ Solver Statistics ]========================");
    stat_line("Graph vertices", s.vertices);
    stat_line("Graph edges", s.edges);
    stat_line("Components", s.components);
    stat_line("Largest component", s.largest_component);
    if let Some(var) = s.contradiction {
        stat_line("Contradictory variable", var);
    }
    if let Some((allocated, resident)) = memory {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> CommonOptions {
        CommonOptions {
            debug: false,
            verify: true,
            stats: false,
            print_solution: false,
        }
    }

    #[test]
    fn test_cli_parses_global_path() {
        let cli = Cli::try_parse_from(["two-sat-solver", "formula.cnf"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("formula.cnf")));
        assert!(cli.command.is_none());
        assert!(cli.common.verify);
        assert!(!cli.debug());
    }

    #[test]
    fn test_cli_parses_text_subcommand() {
        let cli = Cli::try_parse_from([
            "two-sat-solver",
            "text",
            "--input",
            "1 2 0",
            "--debug",
            "--verify",
            "false",
        ])
        .unwrap();
        assert!(cli.debug());
        match cli.command {
            Some(Commands::Text { input, common }) => {
                assert_eq!(input, "1 2 0");
                assert!(!common.verify);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_text_input_from_shell() {
        // $'1 2 0\n-1 -2 0' reaches the program with a real newline.
        for input in ["1 2 0\n-1 -2 0", "1 2 0 -1 -2 0"] {
            let cli = Cli::try_parse_from(["two-sat-solver", "text", "--input", input]).unwrap();
            let Some(Commands::Text { input, .. }) = cli.command else {
                panic!("expected the text subcommand");
            };
            assert_eq!(solve_text(&input, &quiet()).unwrap(), Outcome::Satisfiable);
        }

        // Without $'…' the shell passes a literal backslash.
        assert!(solve_text(r"1 2 0\n-1 -2 0", &quiet()).is_err());
    }

    #[test]
    fn test_solve_text_outcomes() {
        assert_eq!(
            solve_text("1 2 0\n-1 -2 0\n", &quiet()).unwrap(),
            Outcome::Satisfiable
        );
        assert_eq!(
            solve_text("1 1 0\n-1 -1 0\n", &quiet()).unwrap(),
            Outcome::Unsatisfiable
        );
        assert!(solve_text("1 2 3 0\n", &quiet()).is_err());
    }

    #[test]
    fn test_verify_solution() {
        let cnf = Cnf::new([(1, 2)]).unwrap();
        let mut model = two_sat_solver::sat::assignment::Assignment::new(2);
        model.set(1, false);
        model.set(2, false);
        assert!(!verify_solution(&cnf, &SatResult::Satisfiable(model)));
        assert!(verify_solution(&cnf, &SatResult::Unsatisfiable));
    }

    #[test]
    fn test_solve_dir_skips_other_files() {
        let dir = std::env::temp_dir().join(format!("two-sat-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("a.cnf"), "p cnf 2 2\n1 2 0\n-1 -2 0\n").unwrap();
        std::fs::write(dir.join("b.cnf"), "p cnf 1 2\n1 1 0\n-1 -1 0\n").unwrap();
        std::fs::write(dir.join("notes.txt"), "not a formula").unwrap();

        let outcomes = solve_path(&dir, &quiet()).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(outcomes, vec![Outcome::Satisfiable, Outcome::Unsatisfiable]);
    }
}
