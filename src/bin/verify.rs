use clap::Parser;
use roverplan::search::{verify_plan, Task};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version)]
/// Check a saved solution against a Rover problem by re-simulating it.
struct Cli {
    #[arg(help = "The Rover problem file")]
    problem: PathBuf,
    #[arg(help = "The solution file to verify")]
    solution: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
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

    let solution = match std::fs::read_to_string(&cli.solution) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("cannot read solution file {}: {e}", cli.solution.display());
            return ExitCode::FAILURE;
        }
    };

    match verify_plan(&task, &cli.solution.display().to_string(), &solution) {
        Ok(report) => {
            println!("Solution is valid!");
            println!("Total actions: {}", report.actions);
            println!("Total recharges: {}", report.total_recharges);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
