use std::collections::HashMap;

use crate::domain::{ResultRecord, TimingCheckpoint};

use super::types::{FieldConflict, MatchResult, Resolution};

/// Merged record plus everything the merge surfaced.
#[derive(Debug)]
pub struct MergeOutcome {
    pub record: ResultRecord,
    pub conflicts: Vec<FieldConflict>,
    /// Fields that were empty on the primary record and filled from the
    /// secondary one.
    pub enriched_fields: Vec<&'static str>,
}

/// Static merge policy per field, keyed by wire-format name.
///
/// Chip times and paces come from the chip provider the primary scrape
/// prefers; gun times are usually better on the secondary feed. Club,
/// country and checkpoints are additive. A disputed finish time is never
/// auto-picked.
fn resolution_for(field: &str) -> Resolution {
    match field {
        "chipTime" | "pace" => Resolution::UseA,
        "gunTime" => Resolution::UseB,
        "club" | "country" | "checkpoints" => Resolution::Merge,
        _ => Resolution::Manual,
    }
}

/// Build the merged record for a confirmed match, starting from `a` and
/// filling gaps from `b`. Disagreements are recorded as conflicts with
/// the static per-field policy; match-level conflicts are appended last.
pub fn merge_records(a: &ResultRecord, b: &ResultRecord, match_result: &MatchResult) -> MergeOutcome {
    let mut merged = a.clone();
    let mut conflicts = Vec::new();
    let mut enriched = Vec::new();

    // Compile-time field list; adding a field to the record means adding
    // a line here.
    let c = &mut conflicts;
    let e = &mut enriched;
    merge_optional("position", &mut merged.position, &b.position, c, e, |v| v.to_string());
    merge_optional("bibNumber", &mut merged.bib_number, &b.bib_number, c, e, |v| v.clone());
    merge_optional("gender", &mut merged.gender, &b.gender, c, e, |v| v.clone());
    merge_optional("category", &mut merged.category, &b.category, c, e, |v| v.clone());
    merge_optional("finishTime", &mut merged.finish_time, &b.finish_time, c, e, |v| v.clone());
    merge_optional("gunTime", &mut merged.gun_time, &b.gun_time, c, e, |v| v.clone());
    merge_optional("chipTime", &mut merged.chip_time, &b.chip_time, c, e, |v| v.clone());
    merge_optional("pace", &mut merged.pace, &b.pace, c, e, |v| v.clone());
    merge_optional("genderPosition", &mut merged.gender_position, &b.gender_position, c, e, |v| {
        v.to_string()
    });
    merge_optional("categoryPosition", &mut merged.category_position, &b.category_position, c, e, |v| {
        v.to_string()
    });
    merge_optional("country", &mut merged.country, &b.country, c, e, |v| v.clone());
    merge_optional("club", &mut merged.club, &b.club, c, e, |v| v.clone());
    merge_optional("age", &mut merged.age, &b.age, c, e, |v| v.to_string());
    merge_optional("timeBehind", &mut merged.time_behind, &b.time_behind, c, e, |v| v.clone());

    // name and status are always present; only inequality matters
    if a.name != b.name {
        conflicts.push(differing_values(
            "name",
            Some(a.name.clone()),
            Some(b.name.clone()),
        ));
    }
    if a.status != b.status {
        conflicts.push(differing_values(
            "status",
            Some(a.status.as_str().to_string()),
            Some(b.status.as_str().to_string()),
        ));
    }

    if !b.checkpoints.is_empty() {
        if merged.checkpoints.is_empty() {
            enriched.push("checkpoints");
        }
        merged.checkpoints = merge_checkpoints(&a.checkpoints, &b.checkpoints);
    }

    conflicts.extend(match_result.conflicts.iter().cloned());

    MergeOutcome {
        record: merged,
        conflicts,
        enriched_fields: enriched,
    }
}

fn merge_optional<T: PartialEq + Clone>(
    field: &'static str,
    slot: &mut Option<T>,
    value_b: &Option<T>,
    conflicts: &mut Vec<FieldConflict>,
    enriched: &mut Vec<&'static str>,
    display: fn(&T) -> String,
) {
    match (slot.as_ref(), value_b) {
        (None, None) => {}
        (Some(_), None) => {}
        (None, Some(vb)) => {
            *slot = Some(vb.clone());
            enriched.push(field);
        }
        (Some(va), Some(vb)) => {
            if va == vb {
                return;
            }
            let conflict = differing_values(field, Some(display(va)), Some(display(vb)));
            if conflict.resolution == Resolution::UseB {
                *slot = Some(vb.clone());
            }
            conflicts.push(conflict);
        }
    }
}

fn differing_values(
    field: &'static str,
    value_a: Option<String>,
    value_b: Option<String>,
) -> FieldConflict {
    let resolution = resolution_for(field);
    let reason = match resolution {
        Resolution::UseA => format!("{field} differs between sources; primary source kept"),
        Resolution::UseB => format!("{field} differs between sources; secondary source kept"),
        Resolution::Merge => format!("{field} differs between sources; values retained for merge"),
        Resolution::Manual => format!("{field} differs between sources; manual review required"),
    };
    FieldConflict {
        field: field.to_string(),
        value_a,
        value_b,
        resolution,
        reason,
    }
}

/// Merge two ordered checkpoint lists into one deduplicated list, keyed
/// by lower-cased checkpoint name. Existing entries only have their gaps
/// filled; the result is sorted by checkpoint order.
pub fn merge_checkpoints(
    a: &[TimingCheckpoint],
    b: &[TimingCheckpoint],
) -> Vec<TimingCheckpoint> {
    let mut merged: Vec<TimingCheckpoint> = a.to_vec();
    let mut by_name: HashMap<String, usize> = merged
        .iter()
        .enumerate()
        .map(|(idx, cp)| (cp.checkpoint_name.to_lowercase(), idx))
        .collect();

    for cp_b in b {
        let key = cp_b.checkpoint_name.to_lowercase();
        match by_name.get(&key) {
            Some(&idx) => {
                let existing = &mut merged[idx];
                if existing.split_time.is_none() {
                    existing.split_time = cp_b.split_time.clone();
                }
                if existing.cumulative_time.is_none() {
                    existing.cumulative_time = cp_b.cumulative_time.clone();
                }
                if existing.pace.is_none() {
                    existing.pace = cp_b.pace.clone();
                }
                if existing.segment_distance_meters.is_none() {
                    existing.segment_distance_meters = cp_b.segment_distance_meters;
                }
            }
            None => {
                by_name.insert(key, merged.len());
                merged.push(cp_b.clone());
            }
        }
    }

    merged.sort_by_key(|cp| cp.checkpoint_order);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CheckpointType;

    fn checkpoint(name: &str, order: i32, cumulative: Option<&str>) -> TimingCheckpoint {
        TimingCheckpoint {
            checkpoint_type: CheckpointType::Distance,
            checkpoint_name: name.to_string(),
            checkpoint_order: order,
            split_time: None,
            cumulative_time: cumulative.map(str::to_string),
            pace: None,
            segment_distance_meters: None,
        }
    }

    fn no_conflicts() -> MatchResult {
        MatchResult {
            is_match: true,
            confidence: 100,
            method: None,
            conflicts: Vec::new(),
        }
    }

    #[test]
    fn test_gap_fill_from_secondary_without_conflict() {
        let a = ResultRecord {
            name: "Jane Doe".to_string(),
            finish_time: Some("42:10".to_string()),
            ..Default::default()
        };
        let b = ResultRecord {
            name: "Jane Doe".to_string(),
            finish_time: Some("42:10".to_string()),
            club: Some("Warsaw Runners".to_string()),
            country: Some("POL".to_string()),
            ..Default::default()
        };

        let outcome = merge_records(&a, &b, &no_conflicts());

        assert!(outcome.conflicts.is_empty());
        assert_eq!(outcome.record.club.as_deref(), Some("Warsaw Runners"));
        assert_eq!(outcome.record.country.as_deref(), Some("POL"));
        assert!(outcome.enriched_fields.contains(&"club"));
        assert!(outcome.enriched_fields.contains(&"country"));
    }

    #[test]
    fn test_disputed_finish_time_is_manual_and_keeps_primary() {
        let a = ResultRecord {
            name: "Jane Doe".to_string(),
            finish_time: Some("42:10".to_string()),
            ..Default::default()
        };
        let b = ResultRecord {
            name: "Jane Doe".to_string(),
            finish_time: Some("43:05".to_string()),
            ..Default::default()
        };

        let outcome = merge_records(&a, &b, &no_conflicts());

        assert_eq!(outcome.record.finish_time.as_deref(), Some("42:10"));
        assert_eq!(outcome.conflicts.len(), 1);
        let conflict = &outcome.conflicts[0];
        assert_eq!(conflict.field, "finishTime");
        assert_eq!(conflict.resolution, Resolution::Manual);
        assert_eq!(conflict.value_a.as_deref(), Some("42:10"));
        assert_eq!(conflict.value_b.as_deref(), Some("43:05"));
    }

    #[test]
    fn test_gun_time_prefers_secondary() {
        let a = ResultRecord {
            name: "Jane Doe".to_string(),
            gun_time: Some("42:20".to_string()),
            chip_time: Some("42:10".to_string()),
            ..Default::default()
        };
        let b = ResultRecord {
            name: "Jane Doe".to_string(),
            gun_time: Some("42:22".to_string()),
            chip_time: Some("42:12".to_string()),
            ..Default::default()
        };

        let outcome = merge_records(&a, &b, &no_conflicts());

        assert_eq!(outcome.record.gun_time.as_deref(), Some("42:22"));
        assert_eq!(outcome.record.chip_time.as_deref(), Some("42:10"));
        let resolutions: Vec<_> = outcome
            .conflicts
            .iter()
            .map(|c| (c.field.as_str(), c.resolution))
            .collect();
        assert!(resolutions.contains(&("gunTime", Resolution::UseB)));
        assert!(resolutions.contains(&("chipTime", Resolution::UseA)));
    }

    #[test]
    fn test_match_level_conflicts_are_appended() {
        let a = ResultRecord {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        let b = a.clone();
        let match_result = MatchResult {
            conflicts: vec![FieldConflict {
                field: "name".to_string(),
                value_a: Some("Jane Doe".to_string()),
                value_b: Some("John Smith".to_string()),
                resolution: Resolution::Manual,
                reason: "bib numbers match but names are different".to_string(),
            }],
            ..no_conflicts()
        };

        let outcome = merge_records(&a, &b, &match_result);
        assert_eq!(outcome.conflicts.len(), 1);
        assert_eq!(outcome.conflicts[0].field, "name");
    }

    #[test]
    fn test_checkpoint_merge_dedupes_and_fills_gaps() {
        let a = vec![
            checkpoint("5K", 1, Some("21:00")),
            checkpoint("10K", 2, None),
        ];
        let b = vec![
            checkpoint("10k", 2, Some("42:30")),
            checkpoint("15K", 3, Some("1:04:10")),
        ];

        let merged = merge_checkpoints(&a, &b);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].checkpoint_name, "5K");
        // existing entry kept, gap filled from B (case-insensitive key)
        assert_eq!(merged[1].checkpoint_name, "10K");
        assert_eq!(merged[1].cumulative_time.as_deref(), Some("42:30"));
        assert_eq!(merged[2].checkpoint_name, "15K");
    }

    #[test]
    fn test_checkpoint_merge_sorts_by_order() {
        let a = vec![checkpoint("15K", 3, None)];
        let b = vec![checkpoint("5K", 1, None), checkpoint("10K", 2, None)];

        let merged = merge_checkpoints(&a, &b);
        let orders: Vec<i32> = merged.iter().map(|cp| cp.checkpoint_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_existing_checkpoint_values_win_over_secondary() {
        let a = vec![checkpoint("5K", 1, Some("21:00"))];
        let b = vec![checkpoint("5K", 1, Some("21:05"))];

        let merged = merge_checkpoints(&a, &b);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].cumulative_time.as_deref(), Some("21:00"));
    }
}
