use anyhow::Result;

use race_result_reconciler::cli::Command;
use race_result_reconciler::{handle_match, handle_reconcile, handle_validate, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Reconcile {
            primary,
            secondary,
            threshold,
            output,
        } => handle_reconcile(&primary, &secondary, threshold, output),
        Command::Validate {
            results,
            distance,
            output,
        } => handle_validate(&results, &distance, output),
        Command::Match {
            results,
            roster,
            event,
            threshold,
            auto,
        } => handle_match(&results, &roster, event.as_deref(), threshold, auto),
    }
}
