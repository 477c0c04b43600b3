use clap::Parser;
use roverplan::search::{
    heuristics::TaskAssignment,
    search_engines::{SearchEngineName, SearchResult, TerminationCondition},
    Task, Verbosity,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(version)]
/// Solve a Rover problem and write the plan to a solution file.
struct Cli {
    #[arg(value_enum, help = "The search method")]
    method: SearchEngineName,
    #[arg(help = "The Rover problem file")]
    problem: PathBuf,
    #[arg(help = "The output solution file")]
    solution: PathBuf,
    #[arg(
        help = "Wall-clock limit for the search, in seconds",
        long = "timeout",
        default_value_t = 600
    )]
    timeout: u64,
    #[arg(help = "Memory limit for the search, in MiB", long = "memory-limit")]
    memory_limit_mb: Option<usize>,
    #[arg(
        value_enum,
        help = "The verbosity level",
        short = 'v',
        long = "verbosity",
        default_value_t = Verbosity::Normal
    )]
    verbosity: Verbosity,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.level())
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let task = match Task::from_path(&cli.problem) {
        Ok(task) => task,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = task.validate() {
        eprintln!("invalid problem: {e}");
        return ExitCode::FAILURE;
    }

    info!(problem = %cli.problem.display(), "solving");
    let termination = TerminationCondition::new(
        Some(Duration::from_secs(cli.timeout)),
        cli.memory_limit_mb,
    );
    let heuristic = TaskAssignment::new(&task);
    let mut engine = cli.method.create();
    let (result, _statistics) = engine.search(&task, Box::new(heuristic), termination);

    match result {
        SearchResult::Success(plan) => {
            println!(
                "Solution found! ({} steps) (Total recharges: {})",
                plan.len(),
                plan.total_recharges
            );
            println!("(Total energy spent: {})", plan.total_energy);
            if let Err(e) = std::fs::write(&cli.solution, plan.to_file_string()) {
                eprintln!("cannot write solution file {}: {e}", cli.solution.display());
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        SearchResult::ProvablyUnsolvable => {
            eprintln!("No solution found.");
            ExitCode::FAILURE
        }
        SearchResult::TimeLimitExceeded => {
            eprintln!("Timeout reached. Aborting...");
            ExitCode::FAILURE
        }
        SearchResult::MemoryLimitExceeded => {
            eprintln!("Memory exhausted. Aborting...");
            ExitCode::FAILURE
        }
    }
}
