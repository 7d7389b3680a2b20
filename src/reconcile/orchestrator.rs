use log::info;

use crate::config::ReconcileSettings;
use crate::domain::ResultRecord;

use super::matcher::match_records;
use super::merge::merge_records;
use super::types::{
    FieldConflict, MatchResult, ReconciliationResult, ReconciliationStatistics, Resolution,
};

/// Records without a position sort after everything else.
const POSITION_SORT_SENTINEL: i32 = 9999;

/// Merge two independently scraped result sets for the same event into
/// one authoritative set.
///
/// Each primary record greedily claims its best-scoring unclaimed
/// secondary record; processing order is the given order of `results_a`
/// and is part of the contract. Best candidates below the auto-merge
/// threshold are still merged but flagged for manual review. Secondary
/// records nobody claimed pass through unchanged, as do primary records
/// with no candidate at all.
pub fn reconcile(
    results_a: &[ResultRecord],
    results_b: &[ResultRecord],
    settings: &ReconcileSettings,
) -> ReconciliationResult {
    info!(
        "Reconciling {} primary against {} secondary results",
        results_a.len(),
        results_b.len()
    );

    let mut claimed = vec![false; results_b.len()];
    let mut merged_results: Vec<ResultRecord> = Vec::with_capacity(results_a.len());
    let mut conflicts: Vec<FieldConflict> = Vec::new();
    let mut enriched_fields = std::collections::BTreeSet::new();
    let mut matched_count = 0usize;

    for record_a in results_a {
        let best = find_best_candidate(record_a, results_b, &claimed, settings);

        let Some((idx, match_result)) = best else {
            merged_results.push(record_a.clone());
            continue;
        };

        claimed[idx] = true;
        let outcome = merge_records(record_a, &results_b[idx], &match_result);
        conflicts.extend(outcome.conflicts);

        if match_result.confidence >= settings.auto_merge_threshold {
            matched_count += 1;
            for field in outcome.enriched_fields {
                enriched_fields.insert(field.to_string());
            }
        } else {
            conflicts.push(low_confidence_conflict(match_result.confidence, settings));
        }

        merged_results.push(outcome.record);
    }

    let claimed_count = claimed.iter().filter(|c| **c).count();
    for (idx, record_b) in results_b.iter().enumerate() {
        if !claimed[idx] {
            merged_results.push(record_b.clone());
        }
    }

    merged_results.sort_by_key(|r| r.position.unwrap_or(POSITION_SORT_SENTINEL));

    let match_rate = if results_a.is_empty() {
        0.0
    } else {
        matched_count as f64 / results_a.len() as f64 * 100.0
    };

    info!(
        "Matched {}/{} primary records ({:.1}%), {} conflicts",
        matched_count,
        results_a.len(),
        match_rate,
        conflicts.len()
    );

    ReconciliationResult {
        merged_results,
        matched_count,
        unmatched_from_a: results_a.len() - matched_count,
        unmatched_from_b: results_b.len() - claimed_count,
        conflicts,
        statistics: ReconciliationStatistics {
            total_primary: results_a.len(),
            total_secondary: results_b.len(),
            match_rate,
            enriched_fields,
        },
    }
}

// O(|B|) scan per primary record; per-event result sets are bounded, so
// the quadratic total stays acceptable. Ties keep the earliest secondary
// record, which makes the claim order deterministic.
fn find_best_candidate(
    record_a: &ResultRecord,
    results_b: &[ResultRecord],
    claimed: &[bool],
    settings: &ReconcileSettings,
) -> Option<(usize, MatchResult)> {
    let mut best: Option<(usize, MatchResult)> = None;

    for (idx, record_b) in results_b.iter().enumerate() {
        if claimed[idx] {
            continue;
        }
        let candidate = match_records(record_a, record_b, settings);
        if !candidate.is_match {
            continue;
        }
        let better = match &best {
            Some((_, current)) => candidate.confidence > current.confidence,
            None => true,
        };
        if better {
            best = Some((idx, candidate));
        }
    }

    best
}

fn low_confidence_conflict(confidence: u8, settings: &ReconcileSettings) -> FieldConflict {
    FieldConflict {
        field: "_matchConfidence".to_string(),
        value_a: Some(confidence.to_string()),
        value_b: None,
        resolution: Resolution::Manual,
        reason: format!(
            "match confidence {} is below the auto-merge threshold {}; merged pair needs review",
            confidence, settings.auto_merge_threshold
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, position: i32, finish: &str) -> ResultRecord {
        ResultRecord {
            name: name.to_string(),
            position: Some(position),
            finish_time: Some(finish.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_secondary_passes_primary_through() {
        let a = vec![
            record("Jane Doe", 1, "41:02"),
            record("Piotr Kowalski", 2, "41:30"),
        ];

        let result = reconcile(&a, &[], &ReconcileSettings::default());

        assert_eq!(result.merged_results, a);
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.unmatched_from_a, 2);
        assert_eq!(result.unmatched_from_b, 0);
        assert_eq!(result.statistics.match_rate, 0.0);
    }

    #[test]
    fn test_empty_primary_appends_secondary() {
        let b = vec![record("Jane Doe", 1, "41:02")];
        let result = reconcile(&[], &b, &ReconcileSettings::default());

        assert_eq!(result.merged_results, b);
        assert_eq!(result.unmatched_from_b, 1);
        assert_eq!(result.statistics.match_rate, 0.0);
    }

    #[test]
    fn test_confident_match_merges_and_enriches() {
        let a = vec![record("Jane Doe", 1, "41:02")];
        let b = vec![ResultRecord {
            club: Some("Warsaw Runners".to_string()),
            ..record("Jane Doe", 1, "41:05")
        }];

        let result = reconcile(&a, &b, &ReconcileSettings::default());

        assert_eq!(result.matched_count, 1);
        assert_eq!(result.unmatched_from_a, 0);
        assert_eq!(result.unmatched_from_b, 0);
        assert_eq!(result.merged_results.len(), 1);
        assert_eq!(
            result.merged_results[0].club.as_deref(),
            Some("Warsaw Runners")
        );
        assert!(result.statistics.enriched_fields.contains("club"));
        assert_eq!(result.statistics.match_rate, 100.0);
    }

    #[test]
    fn test_low_confidence_match_is_merged_but_flagged() {
        // equal positions, name similarity in the weak band ->
        // confidence ~71, below the default threshold of 85
        let a = vec![record("Katarzyna W", 3, "44:00")];
        let b = vec![record("Katarina Wo", 3, "51:00")];

        let result = reconcile(&a, &b, &ReconcileSettings::default());

        // merged as a pair, but counted as needing review
        assert_eq!(result.merged_results.len(), 1);
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.unmatched_from_a, 1);
        assert_eq!(result.unmatched_from_b, 0);
        let flag = result
            .conflicts
            .iter()
            .find(|c| c.field == "_matchConfidence")
            .expect("low-confidence flag present");
        assert_eq!(flag.resolution, Resolution::Manual);
    }

    #[test]
    fn test_unclaimed_secondary_records_are_appended() {
        let a = vec![record("Jane Doe", 1, "41:02")];
        let b = vec![
            record("Jane Doe", 1, "41:03"),
            record("Maria Garcia", 2, "42:10"),
        ];

        let result = reconcile(&a, &b, &ReconcileSettings::default());

        assert_eq!(result.merged_results.len(), 2);
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.unmatched_from_b, 1);
        assert_eq!(result.merged_results[1].name, "Maria Garcia");
    }

    #[test]
    fn test_claimed_records_are_unavailable_to_later_primaries() {
        // Both primary records would match B's only record; the first
        // one in A-order claims it, the second passes through.
        let a = vec![
            ResultRecord {
                bib_number: Some("55".to_string()),
                ..record("Jane Doe", 1, "41:02")
            },
            ResultRecord {
                bib_number: Some("55".to_string()),
                ..record("Jane Doe", 4, "41:02")
            },
        ];
        let b = vec![ResultRecord {
            bib_number: Some("55".to_string()),
            ..record("Jane Doe", 1, "41:03")
        }];

        let result = reconcile(&a, &b, &ReconcileSettings::default());

        assert_eq!(result.matched_count, 1);
        assert_eq!(result.merged_results.len(), 2);
        assert_eq!(result.unmatched_from_a, 1);
    }

    #[test]
    fn test_best_candidate_wins_over_first_candidate() {
        // The exact-name record must win even though a fuzzier candidate
        // appears earlier in B.
        let a = vec![record("Maria Garcia", 5, "42:10")];
        let b = vec![
            record("Mario Garcia", 5, "42:12"),
            record("Maria Garcia", 5, "42:11"),
        ];

        let result = reconcile(&a, &b, &ReconcileSettings::default());

        assert_eq!(result.matched_count, 1);
        // the fuzzier record stays unclaimed and is appended
        assert_eq!(result.unmatched_from_b, 1);
        assert!(result
            .merged_results
            .iter()
            .any(|r| r.name == "Mario Garcia"));
    }

    #[test]
    fn test_merged_output_sorted_by_position_with_missing_last() {
        let a = vec![
            record("Piotr Kowalski", 2, "41:30"),
            ResultRecord {
                position: None,
                ..record("No Position", 0, "59:00")
            },
            record("Jane Doe", 1, "41:02"),
        ];

        let result = reconcile(&a, &[], &ReconcileSettings::default());

        let names: Vec<&str> = result
            .merged_results
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["Jane Doe", "Piotr Kowalski", "No Position"]);
    }
}
