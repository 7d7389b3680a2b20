use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::config::{AppConfig, ReconcileSettings};
use crate::domain::ResultRecord;
use crate::reconcile::{reconcile, render_report};

/// Runs one reconciliation of two scraped result sets and presents the
/// outcome. All matching logic lives in the reconcile engine.
pub struct ReconciliationService {
    config: AppConfig,
}

impl ReconciliationService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        primary: &Path,
        secondary: &Path,
        threshold: Option<u8>,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let results_a: Vec<ResultRecord> = super::load_json(primary)?;
        let results_b: Vec<ResultRecord> = super::load_json(secondary)?;
        info!(
            "Loaded {} primary and {} secondary results",
            results_a.len(),
            results_b.len()
        );

        let settings = ReconcileSettings {
            auto_merge_threshold: threshold.unwrap_or(self.config.reconcile.auto_merge_threshold),
            ..ReconcileSettings::default()
        };

        let result = reconcile(&results_a, &results_b, &settings);

        println!("{}", render_report(&result));
        println!(
            "{} matched, {} need review",
            result.matched_count.to_string().green(),
            result
                .conflicts
                .iter()
                .filter(|c| c.resolution == crate::reconcile::Resolution::Manual)
                .count()
                .to_string()
                .yellow()
        );

        if let Some(path) = output {
            super::write_json(&path, &result)?;
            info!("Wrote reconciliation result to {}", path.display());
        }

        Ok(())
    }
}
