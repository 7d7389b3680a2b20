//! Fuzzy resolution of unmatched results against the known-athlete
//! roster, with weighted multi-factor confidence.

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::MatcherSettings;
use crate::domain::{AthleteIdentity, ResultRecord};
use crate::text::{edit_distance, normalize, similarity};

/// Pairing of one unmatched result with one roster identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// Index of the identity within the supplied roster.
    pub identity_index: usize,
    pub identity_name: String,
    /// Raw edit distance between normalized names; lower is better.
    pub score: usize,
    /// Weighted 0-100 confidence; higher is better.
    pub confidence: u8,
}

/// Outcome of one automatic linking pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoMatchOutcome {
    /// (result index, roster index) pairs safe to link.
    pub links: Vec<(usize, usize)>,
    pub matched: usize,
    /// Results with several qualifying candidates, left for a human.
    pub skipped_ambiguous: usize,
    pub unmatched: usize,
}

/// Score one unmatched result against every roster candidate, sorted by
/// descending confidence.
///
/// The roster is expected to be pre-filtered by the caller (name index
/// or substring lookup); this scan is linear over what it is given.
/// `event_id` names the event the result came from and enables the
/// position-proximity component against prior results in that event.
pub fn match_candidates(
    result: &ResultRecord,
    event_id: Option<&str>,
    roster: &[AthleteIdentity],
    settings: &MatcherSettings,
) -> Vec<MatchCandidate> {
    let normalized_result_name = normalize(&result.name);

    let mut candidates: Vec<MatchCandidate> = roster
        .iter()
        .enumerate()
        .map(|(idx, identity)| {
            let name_score = similarity(&result.name, &identity.name) * 100.0;
            let position_score = position_proximity_score(result, event_id, identity, settings);
            let club_score = club_score();
            let geography_score = geography_score(result, identity, settings);

            let weighted = name_score * settings.name_weight
                + position_score * settings.position_weight
                + club_score * settings.club_weight
                + geography_score * settings.geography_weight;

            MatchCandidate {
                identity_index: idx,
                identity_name: identity.name.clone(),
                score: edit_distance(&normalized_result_name, &identity.normalized_name),
                confidence: weighted.round().min(100.0) as u8,
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    candidates
}

/// Link each result to a roster identity when exactly one candidate
/// clears the confidence threshold. Ties are skipped, never guessed.
pub fn auto_match(
    results: &[ResultRecord],
    event_id: Option<&str>,
    roster: &[AthleteIdentity],
    threshold: u8,
    settings: &MatcherSettings,
) -> AutoMatchOutcome {
    let mut outcome = AutoMatchOutcome::default();

    for (result_idx, result) in results.iter().enumerate() {
        let candidates = match_candidates(result, event_id, roster, settings);
        let qualifying: Vec<&MatchCandidate> = candidates
            .iter()
            .filter(|c| c.confidence >= threshold)
            .collect();

        match qualifying.as_slice() {
            [only] => {
                outcome.links.push((result_idx, only.identity_index));
                outcome.matched += 1;
            }
            [] => outcome.unmatched += 1,
            _ => outcome.skipped_ambiguous += 1,
        }
    }

    info!(
        "Auto-match: {} linked, {} ambiguous, {} unmatched (threshold {})",
        outcome.matched, outcome.skipped_ambiguous, outcome.unmatched, threshold
    );
    outcome
}

// Flat component when the identity finished a prior result in the same
// event within the configured position window.
fn position_proximity_score(
    result: &ResultRecord,
    event_id: Option<&str>,
    identity: &AthleteIdentity,
    settings: &MatcherSettings,
) -> f64 {
    let (Some(event_id), Some(position)) = (event_id, result.position) else {
        return 0.0;
    };

    let nearby = identity.prior_performances.iter().any(|prior| {
        prior.event_id == event_id
            && (prior.position - position).abs() <= settings.position_window
    });

    if nearby { settings.position_component } else { 0.0 }
}

// Extension point: club data is not yet available upstream, so this
// component currently contributes 0 while keeping its 0.1 weight
// reserved in the scheme.
fn club_score() -> f64 {
    0.0
}

fn geography_score(
    result: &ResultRecord,
    identity: &AthleteIdentity,
    settings: &MatcherSettings,
) -> f64 {
    match (result.country.as_deref(), identity.country.as_deref()) {
        (Some(a), Some(b)) if a.eq_ignore_ascii_case(b) => settings.geography_component,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriorPerformance;

    fn identity(name: &str, country: Option<&str>) -> AthleteIdentity {
        AthleteIdentity {
            name: name.to_string(),
            normalized_name: normalize(name),
            country: country.map(str::to_string),
            prior_performances: Vec::new(),
        }
    }

    fn result(name: &str) -> ResultRecord {
        ResultRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_name_scores_name_weight() {
        let roster = vec![identity("Jane Doe", None)];
        let candidates =
            match_candidates(&result("Jane Doe"), None, &roster, &MatcherSettings::default());

        assert_eq!(candidates.len(), 1);
        // name 100 * 0.6, all other components 0
        assert_eq!(candidates[0].confidence, 60);
        assert_eq!(candidates[0].score, 0);
    }

    #[test]
    fn test_country_match_adds_geography_component() {
        let roster = vec![identity("Jane Doe", Some("POL"))];
        let record = ResultRecord {
            country: Some("pol".to_string()),
            ..result("Jane Doe")
        };
        let candidates =
            match_candidates(&record, None, &roster, &MatcherSettings::default());

        // 60 + 30 * 0.1
        assert_eq!(candidates[0].confidence, 63);
    }

    #[test]
    fn test_prior_position_in_same_event_counts() {
        let mut athlete = identity("Jane Doe", None);
        athlete.prior_performances = vec![PriorPerformance {
            event_id: "warsaw-10k".to_string(),
            position: 14,
        }];
        let record = ResultRecord {
            position: Some(9),
            ..result("Jane Doe")
        };

        let near = match_candidates(
            &record,
            Some("warsaw-10k"),
            &[athlete.clone()],
            &MatcherSettings::default(),
        );
        // 60 + 50 * 0.2
        assert_eq!(near[0].confidence, 70);

        // different event: component stays off
        let far = match_candidates(
            &record,
            Some("berlin-5k"),
            &[athlete],
            &MatcherSettings::default(),
        );
        assert_eq!(far[0].confidence, 60);
    }

    #[test]
    fn test_candidates_sorted_by_descending_confidence() {
        let roster = vec![
            identity("John Smith", None),
            identity("Jane Doe", None),
            identity("Jane Roe", None),
        ];
        let candidates =
            match_candidates(&result("Jane Doe"), None, &roster, &MatcherSettings::default());

        assert_eq!(candidates[0].identity_name, "Jane Doe");
        assert_eq!(candidates[1].identity_name, "Jane Roe");
        assert!(candidates[0].confidence > candidates[1].confidence);
        assert!(candidates[1].confidence > candidates[2].confidence);
    }

    #[test]
    fn test_auto_match_links_unique_qualifier() {
        let roster = vec![identity("Jane Doe", None), identity("Piotr Kowalski", None)];
        let results = vec![result("Jane Doe")];

        let outcome = auto_match(&results, None, &roster, 55, &MatcherSettings::default());

        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.links, vec![(0, 0)]);
        assert_eq!(outcome.skipped_ambiguous, 0);
        assert_eq!(outcome.unmatched, 0);
    }

    #[test]
    fn test_auto_match_skips_ambiguous_candidates() {
        // two identical roster entries both clear the threshold
        let roster = vec![identity("Jane Doe", None), identity("Jane Doe", None)];
        let results = vec![result("Jane Doe")];

        let outcome = auto_match(&results, None, &roster, 55, &MatcherSettings::default());

        assert_eq!(outcome.matched, 0);
        assert_eq!(outcome.skipped_ambiguous, 1);
        assert!(outcome.links.is_empty());
    }

    #[test]
    fn test_auto_match_counts_unmatched() {
        let roster = vec![identity("Piotr Kowalski", None)];
        let results = vec![result("Jane Doe")];

        let outcome = auto_match(&results, None, &roster, 90, &MatcherSettings::default());

        assert_eq!(outcome.matched, 0);
        assert_eq!(outcome.unmatched, 1);
    }

    #[test]
    fn test_default_threshold_requires_more_than_name_alone() {
        // an exact name with no supporting signals tops out at 60,
        // below the default auto-link threshold of 90
        let settings = MatcherSettings::default();
        let roster = vec![identity("Jane Doe", None)];
        let outcome = auto_match(
            &[result("Jane Doe")],
            None,
            &roster,
            settings.auto_link_threshold,
            &settings,
        );

        assert_eq!(outcome.matched, 0);
        assert_eq!(outcome.unmatched, 1);
    }
}
