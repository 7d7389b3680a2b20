pub mod athlete;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod reconcile;
pub mod services;
pub mod text;
pub mod timeparse;
pub mod validation;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::matching::MatchingService;
use crate::services::reconciliation::ReconciliationService;
use crate::services::validation::ValidationService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_reconcile(
    primary: &Path,
    secondary: &Path,
    threshold: Option<u8>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::new();
    let service = ReconciliationService::new(config);
    service.run(primary, secondary, threshold, output)
}

pub fn handle_validate(results: &Path, distance: &str, output: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::new();
    let service = ValidationService::new(config);
    service.run(results, distance, output)
}

pub fn handle_match(
    results: &Path,
    roster: &Path,
    event: Option<&str>,
    threshold: Option<u8>,
    auto: bool,
) -> Result<()> {
    let config = AppConfig::new();
    let service = MatchingService::new(config);
    service.run(results, roster, event, threshold, auto)
}
