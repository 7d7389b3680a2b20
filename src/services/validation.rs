use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::config::AppConfig;
use crate::domain::ResultRecord;
use crate::validation::{validate, Severity};

/// Runs one validation pass over a scraped result set and presents the
/// findings.
pub struct ValidationService {
    config: AppConfig,
}

impl ValidationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, file: &Path, distance: &str, output: Option<PathBuf>) -> Result<()> {
        let results: Vec<ResultRecord> = super::load_json(file)?;
        info!("Loaded {} results for distance '{}'", results.len(), distance);

        let report = validate(&results, distance, &self.config.validation);

        for finding in &report.errors {
            let tag = match finding.severity {
                Severity::Critical => "CRITICAL".red().bold(),
                Severity::Error => "ERROR".red(),
            };
            println!(
                "{} [#{} {}] {}",
                tag, finding.result_index, finding.field, finding.message
            );
        }
        for warning in &report.warnings {
            println!(
                "{} [{}] {} (affects {})",
                "WARN".yellow(),
                warning.field,
                warning.message,
                warning.affected_count
            );
        }

        let verdict = if report.is_valid {
            "valid".green()
        } else {
            "invalid".red()
        };
        println!(
            "\nResult set is {} with completeness score {}/100",
            verdict, report.completeness_score
        );

        if let Some(path) = output {
            super::write_json(&path, &report)?;
            info!("Wrote validation result to {}", path.display());
        }

        Ok(())
    }
}
