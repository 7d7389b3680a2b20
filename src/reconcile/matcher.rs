use crate::config::ReconcileSettings;
use crate::domain::ResultRecord;
use crate::text::similarity;
use crate::timeparse::parse_time;

use super::types::{FieldConflict, MatchMethod, MatchResult, Resolution};

/// Name similarity below which equal bibs get flagged for review rather
/// than trusted blindly.
const BIB_NAME_SANITY_SIMILARITY: f64 = 0.5;

/// Decide whether two records from different sources describe the same
/// athlete performance.
///
/// Signals are tried in priority order; the first satisfied rule wins:
/// bib equality, name+time proximity, name+position, weak position+name.
pub fn match_records(a: &ResultRecord, b: &ResultRecord, settings: &ReconcileSettings) -> MatchResult {
    if let (Some(bib_a), Some(bib_b)) = (a.bib(), b.bib()) {
        if bib_a == bib_b {
            return match_by_bib(a, b);
        }
    }

    let name_similarity = similarity(&a.name, &b.name);

    if name_similarity >= settings.min_name_similarity {
        if let Some(result) = match_by_name_and_time(a, b, name_similarity, settings) {
            return result;
        }
        if positions_equal(a, b) {
            return MatchResult {
                is_match: true,
                confidence: (70.0 + name_similarity * 10.0).round() as u8,
                method: Some(MatchMethod::PositionName),
                conflicts: Vec::new(),
            };
        }
    } else if positions_equal(a, b) && name_similarity >= settings.weak_name_similarity {
        return MatchResult {
            is_match: true,
            confidence: (60.0 + name_similarity * 15.0).round() as u8,
            method: Some(MatchMethod::PositionName),
            conflicts: Vec::new(),
        };
    }

    MatchResult::no_match()
}

// Bib numbers are race-issued and the strongest cross-source key; equal
// bibs match even when the names disagree, but badly differing names are
// surfaced for manual review at reduced confidence.
fn match_by_bib(a: &ResultRecord, b: &ResultRecord) -> MatchResult {
    let name_similarity = similarity(&a.name, &b.name);

    if name_similarity < BIB_NAME_SANITY_SIMILARITY {
        return MatchResult {
            is_match: true,
            confidence: 75,
            method: Some(MatchMethod::Bib),
            conflicts: vec![FieldConflict {
                field: "name".to_string(),
                value_a: Some(a.name.clone()),
                value_b: Some(b.name.clone()),
                resolution: Resolution::Manual,
                reason: "bib numbers match but names are different".to_string(),
            }],
        };
    }

    MatchResult {
        is_match: true,
        confidence: 100,
        method: Some(MatchMethod::Bib),
        conflicts: Vec::new(),
    }
}

fn match_by_name_and_time(
    a: &ResultRecord,
    b: &ResultRecord,
    name_similarity: f64,
    settings: &ReconcileSettings,
) -> Option<MatchResult> {
    let time_a = a.finish_time.as_deref().and_then(parse_time)?;
    let time_b = b.finish_time.as_deref().and_then(parse_time)?;

    let diff = time_a.abs_diff(time_b);
    if diff > settings.max_time_difference_seconds {
        return None;
    }

    let raw = 80.0 + name_similarity * 15.0 - (diff as f64 / 60.0) * 5.0;
    let confidence = raw.round().clamp(80.0, 98.0) as u8;

    Some(MatchResult {
        is_match: true,
        confidence,
        method: Some(MatchMethod::NameTime),
        conflicts: Vec::new(),
    })
}

fn positions_equal(a: &ResultRecord, b: &ResultRecord) -> bool {
    matches!((a.position, b.position), (Some(pa), Some(pb)) if pa == pb)
}
