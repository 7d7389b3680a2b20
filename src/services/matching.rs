use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::athlete::{auto_match, match_candidates};
use crate::config::AppConfig;
use crate::domain::{AthleteIdentity, ResultRecord};

/// Candidates shown per result in suggestion mode.
const SUGGESTIONS_PER_RESULT: usize = 5;

/// Resolves unlinked results against the athlete roster, either by
/// printing ranked suggestions or by linking automatically above a
/// confidence threshold.
pub struct MatchingService {
    config: AppConfig,
}

impl MatchingService {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        results_path: &Path,
        roster_path: &Path,
        event_id: Option<&str>,
        threshold: Option<u8>,
        auto: bool,
    ) -> Result<()> {
        let results: Vec<ResultRecord> = super::load_json(results_path)?;
        let roster: Vec<AthleteIdentity> = super::load_json(roster_path)?;
        info!(
            "Matching {} unlinked results against {} roster entries",
            results.len(),
            roster.len()
        );

        if auto {
            self.run_auto(&results, &roster, event_id, threshold)
        } else {
            self.run_suggest(&results, &roster, event_id);
            Ok(())
        }
    }

    fn run_auto(
        &self,
        results: &[ResultRecord],
        roster: &[AthleteIdentity],
        event_id: Option<&str>,
        threshold: Option<u8>,
    ) -> Result<()> {
        let threshold = threshold.unwrap_or(self.config.matcher.auto_link_threshold);
        let outcome = auto_match(results, event_id, roster, threshold, &self.config.matcher);

        for (result_idx, identity_idx) in &outcome.links {
            println!(
                "{} '{}' -> '{}'",
                "LINK".green(),
                results[*result_idx].name,
                roster[*identity_idx].name
            );
        }
        println!(
            "\n{} linked, {} ambiguous (skipped), {} unmatched",
            outcome.matched.to_string().green(),
            outcome.skipped_ambiguous.to_string().yellow(),
            outcome.unmatched
        );
        Ok(())
    }

    fn run_suggest(
        &self,
        results: &[ResultRecord],
        roster: &[AthleteIdentity],
        event_id: Option<&str>,
    ) {
        for result in results {
            let candidates = match_candidates(result, event_id, roster, &self.config.matcher);
            println!("{}", result.name.bold());
            for candidate in candidates.iter().take(SUGGESTIONS_PER_RESULT) {
                println!(
                    "  {:>3}% {} (distance {})",
                    candidate.confidence, candidate.identity_name, candidate.score
                );
            }
            if candidates.is_empty() {
                println!("  no roster candidates");
            }
        }
    }
}
