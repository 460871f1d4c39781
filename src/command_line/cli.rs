#![allow(clippy::struct_excessive_bools)]

//! Defines the command-line interface for the solver binary.
//!
//! Uses `clap` for parsing arguments. A subcommand selects plain SAT
//! solving (from a file, inline text, or standard input) or one of the
//! graph reductions; common options pick the engine, toggle verification,
//! and control the statistics report.

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use parsat::graphs::coloring::ThreeColoring;
use parsat::graphs::graph;
use parsat::graphs::hamiltonian::HamiltonianPath;
use parsat::graphs::independent_set::IndependentSet;
use parsat::sat::cnf::Cnf;
use parsat::sat::dimacs;
use parsat::sat::dpll::{Dpll, SearchStats};
use parsat::sat::model::Model;
use parsat::sat::parallel;
use std::fmt::{self, Display};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::debug;

/// Defines the command-line interface for the solver.
#[derive(Parser, Debug)]
#[command(name = "parsat", version, about = "A parallel DPLL SAT solver")]
pub(crate) struct Cli {
    /// An optional path argument. If provided without a subcommand, it's
    /// treated as a DIMACS .cnf file to solve, or a directory to sweep for
    /// .cnf files.
    pub path: Option<PathBuf>,

    /// The subcommand to execute.
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as plain text.
    Text {
        /// Literal CNF input as a string (e.g. "p cnf 2 2\n1 -2 0\n2 0").
        #[arg(short, long)]
        input: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula read from standard input.
    Stdin {
        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Decide whether a graph has an independent set of a given size.
    IndependentSet {
        /// Path to the graph file.
        #[arg(long)]
        path: PathBuf,

        /// The size of the independent set to look for.
        #[arg(short, long)]
        k: u32,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Decide whether a graph is 3-colorable.
    Coloring {
        /// Path to the graph file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Decide whether a graph has a Hamiltonian path.
    Hamiltonian {
        /// Path to the graph file.
        #[arg(long)]
        path: PathBuf,

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

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable verification of any model found against the input formula.
    #[arg(short, long, default_value_t = true)]
    pub(crate) verify: bool,

    /// Enable printing of performance and problem statistics after solving.
    #[arg(short, long, default_value_t = true)]
    pub(crate) stats: bool,

    /// Enable printing of the satisfying assignment when one exists.
    #[arg(short, long, default_value_t = true)]
    pub(crate) print_solution: bool,

    /// Which engine explores the search space.
    #[arg(long, default_value_t = EngineType::Parallel)]
    pub(crate) engine: EngineType,

    /// Worker threads for the parallel engine. Defaults to the number of
    /// logical processors.
    #[arg(long)]
    pub(crate) workers: Option<usize>,
}

/// The two search engines the binary can run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum EngineType {
    /// Single-threaded DPLL.
    Sequential,
    /// The worker-pool coordinator.
    #[default]
    Parallel,
}

impl Display for EngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Parallel => write!(f, "parallel"),
        }
    }
}

/// Dispatches a parsed command line.
pub(crate) fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Text { input, common }) => {
            let time = Instant::now();
            let cnf = dimacs::parse_text(&input).map_err(|e| e.to_string())?;
            solve_and_report(&cnf, &common, None, time.elapsed());
            Ok(())
        }
        Some(Commands::Stdin { common }) => solve_stdin(&common),
        Some(Commands::IndependentSet { path, k, common }) => {
            solve_independent_set(&path, k, &common)
        }
        Some(Commands::Coloring { path, common }) => solve_coloring(&path, &common),
        Some(Commands::Hamiltonian { path, common }) => solve_hamiltonian(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "parsat", &mut io::stdout());
            Ok(())
        }
        None => match cli.path {
            Some(path) if path.is_dir() => solve_dir(&path, &cli.common),
            Some(path) => solve_file(&path, &cli.common),
            None => solve_stdin(&cli.common),
        },
    }
}

/// Solves a single DIMACS file.
fn solve_file(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let cnf = dimacs::parse_path(path).map_err(|e| e.to_string())?;
    solve_and_report(&cnf, common, Some(path), time.elapsed());
    Ok(())
}

/// Solves a formula read from standard input.
fn solve_stdin(common: &CommonOptions) -> Result<(), String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| e.to_string())?;

    let time = Instant::now();
    let cnf = dimacs::parse_text(&input).map_err(|e| e.to_string())?;
    solve_and_report(&cnf, common, None, time.elapsed());
    Ok(())
}

/// Solves every `.cnf` file under a directory.
fn solve_dir(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path().to_path_buf();
        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }
        solve_file(&file_path, common)?;
        println!();
    }
    Ok(())
}

/// Runs the selected engine on `cnf`.
fn solve(cnf: &Cnf, common: &CommonOptions) -> (Option<Model>, Duration, SearchStats) {
    debug!(engine = %common.engine, "solving");
    let time = Instant::now();

    let (model, stats) = match common.engine {
        EngineType::Sequential => {
            let mut engine = Dpll::new(cnf.clone());
            let model = engine.solve();
            (model, engine.stats())
        }
        EngineType::Parallel => {
            let workers = common.workers.unwrap_or_else(parallel::default_workers);
            parallel::solve_with_stats(cnf.clone(), workers)
        }
    };

    (model, time.elapsed(), stats)
}

/// Solves `cnf` and prints the result, optional verification, and the
/// statistics report.
fn solve_and_report(
    cnf: &Cnf,
    common: &CommonOptions,
    label: Option<&PathBuf>,
    parse_time: Duration,
) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    let (model, elapsed, stats) = solve(cnf, common);

    if common.verify {
        verify_solution(cnf, model.as_ref());
    }

    if common.stats {
        print_stats(parse_time, elapsed, cnf, &stats, model.is_some());
    }

    match &model {
        Some(model) if common.print_solution => print!("{model}"),
        Some(_) => {}
        None => println!("Unsatisfiable."),
    }
}

/// Verifies a model against the formula it came from.
///
/// # Panics
///
/// Panics if the model fails verification, which would be a solver bug.
fn verify_solution(cnf: &Cnf, model: Option<&Model>) {
    if let Some(model) = model {
        let ok = cnf.verify(model);
        println!("Verified: {ok}");
        assert!(ok, "model failed verification");
    }
}

/// Helper to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper to print a statistic line that includes a rate (value/second).
fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    #[allow(clippy::cast_precision_loss)]
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    cnf: &Cnf,
    stats: &SearchStats,
    satisfiable: bool,
) {
    let elapsed_secs = elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars());
    stat_line("Clauses", cnf.clauses().len());

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", stats.decisions, elapsed_secs);
    stat_line_with_rate("Propagations", stats.propagations, elapsed_secs);
    stat_line_with_rate("Pure eliminations", stats.eliminations, elapsed_secs);
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");

    if satisfiable {
        println!("\nSATISFIABLE");
    } else {
        println!("\nUNSATISFIABLE");
    }
}

/// Decides k-independent-set for a graph file.
fn solve_independent_set(path: &PathBuf, k: u32, common: &CommonOptions) -> Result<(), String> {
    let graph = graph::parse_path(path).map_err(|e| e.to_string())?;
    let instance = IndependentSet::new(graph, k);

    let time = Instant::now();
    let cnf = instance.to_cnf();
    let encode_time = time.elapsed();

    let (model, elapsed, stats) = solve(&cnf, common);
    if common.verify {
        verify_solution(&cnf, model.as_ref());
    }
    if common.stats {
        print_stats(encode_time, elapsed, &cnf, &stats, model.is_some());
    }

    match model {
        Some(model) => {
            let chosen = instance.decode(&model);
            println!(
                "Independent set of size {k}: {{{}}}",
                join_display(&chosen)
            );
        }
        None => println!("No independent set of size {k}."),
    }
    Ok(())
}

/// Decides 3-colorability for a graph file.
fn solve_coloring(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let graph = graph::parse_path(path).map_err(|e| e.to_string())?;
    let instance = ThreeColoring::new(graph);

    let time = Instant::now();
    let cnf = instance.to_cnf();
    let encode_time = time.elapsed();

    let (model, elapsed, stats) = solve(&cnf, common);
    if common.verify {
        verify_solution(&cnf, model.as_ref());
    }
    if common.stats {
        print_stats(encode_time, elapsed, &cnf, &stats, model.is_some());
    }

    match model {
        Some(model) => {
            println!("3-coloring:");
            for (vertex, color) in instance.decode(&model) {
                println!("{vertex}: {color}");
            }
        }
        None => println!("Not 3-colorable."),
    }
    Ok(())
}

/// Decides Hamiltonian path for a graph file.
fn solve_hamiltonian(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let graph = graph::parse_path(path).map_err(|e| e.to_string())?;
    let instance = HamiltonianPath::new(graph);

    let time = Instant::now();
    let cnf = instance.to_cnf();
    let encode_time = time.elapsed();

    let (model, elapsed, stats) = solve(&cnf, common);
    if common.verify {
        verify_solution(&cnf, model.as_ref());
    }
    if common.stats {
        print_stats(encode_time, elapsed, &cnf, &stats, model.is_some());
    }

    match model {
        Some(model) => println!("Hamiltonian path: {}", join_display(&instance.decode(&model))),
        None => println!("No Hamiltonian path."),
    }
    Ok(())
}

/// Joins displayable items with spaces.
fn join_display<T: Display>(items: &[T]) -> String {
    use itertools::Itertools;
    items.iter().map(ToString::to_string).join(" ")
}
