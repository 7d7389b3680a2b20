use std::collections::BTreeMap;

use log::info;

use crate::config::ValidationSettings;
use crate::domain::{ResultRecord, ResultStatus};
use crate::timeparse::parse_time;

use super::bounds::{bounds_for, DistanceBounds};
use super::types::{
    Severity, ValidationError, ValidationResult, ValidationStatistics, ValidationWarning,
};

/// Gender values providers are allowed to report. Single source of
/// truth for the recognized set; comparison is case-insensitive.
const RECOGNIZED_GENDERS: [&str; 6] = ["m", "f", "x", "male", "female", "other"];

/// Fields tracked by the population statistics, with their presence
/// predicates. Compile-time list; no reflection.
const TRACKED_FIELDS: &[(&str, fn(&ResultRecord) -> bool)] = &[
    ("position", |r| r.position.is_some()),
    ("bibNumber", |r| r.bib().is_some()),
    ("name", |r| !r.name.trim().is_empty()),
    ("gender", |r| r.gender.is_some()),
    ("category", |r| r.category.is_some()),
    ("finishTime", |r| r.finish_time.is_some()),
    ("gunTime", |r| r.gun_time.is_some()),
    ("chipTime", |r| r.chip_time.is_some()),
    ("pace", |r| r.pace.is_some()),
    ("genderPosition", |r| r.gender_position.is_some()),
    ("categoryPosition", |r| r.category_position.is_some()),
    ("country", |r| r.country.is_some()),
    ("club", |r| r.club.is_some()),
    ("age", |r| r.age.is_some()),
    ("timeBehind", |r| r.time_behind.is_some()),
];

/// Judge whether a scraped result set is physically plausible and
/// complete for the given distance.
///
/// Per-result findings accumulate as errors and never abort the run;
/// aggregate findings (duplicate bibs, position gaps, checkpoint
/// coverage) become warnings. Unknown distances skip the time-bound and
/// coverage checks but still get the structural ones.
pub fn validate(
    results: &[ResultRecord],
    distance_name: &str,
    settings: &ValidationSettings,
) -> ValidationResult {
    let bounds = bounds_for(distance_name);
    if bounds.is_none() {
        info!("Distance '{}' not recognized; skipping time bounds", distance_name);
    }

    let mut errors = Vec::new();
    for (idx, record) in results.iter().enumerate() {
        check_record(idx, record, bounds, settings, &mut errors);
    }

    let mut warnings = Vec::new();
    check_duplicate_bibs(results, &mut warnings);
    check_position_gaps(results, &mut warnings);
    if let Some(bounds) = bounds {
        check_expected_checkpoints(results, bounds, settings, &mut warnings);
    }

    let statistics = compute_statistics(results);
    let critical = errors.iter().filter(|e| e.severity == Severity::Critical).count();
    let regular = errors.len() - critical;

    let completeness_score = completeness(&statistics, warnings.len(), critical, regular);
    let is_valid =
        critical == 0 && (regular as f64) < 0.1 * results.len() as f64;

    info!(
        "Validated {} results: {} errors, {} warnings, completeness {}",
        results.len(),
        errors.len(),
        warnings.len(),
        completeness_score
    );

    ValidationResult {
        is_valid,
        completeness_score,
        errors,
        warnings,
        statistics,
    }
}

fn check_record(
    idx: usize,
    record: &ResultRecord,
    bounds: Option<&DistanceBounds>,
    settings: &ValidationSettings,
    errors: &mut Vec<ValidationError>,
) {
    if record.name.trim().is_empty() {
        errors.push(error(idx, "name", Severity::Critical, "result has no athlete name"));
    }

    if let Some(position) = record.position {
        if position < 0 {
            errors.push(error(
                idx,
                "position",
                Severity::Error,
                &format!("invalid position {position}"),
            ));
        }
    }

    check_finish_time(idx, record, bounds, errors);
    check_checkpoints(idx, record, settings, errors);

    if let Some(gender) = record.gender.as_deref() {
        let recognized = RECOGNIZED_GENDERS
            .iter()
            .any(|g| g.eq_ignore_ascii_case(gender.trim()));
        if !recognized {
            errors.push(error(
                idx,
                "gender",
                Severity::Error,
                &format!("unrecognized gender value '{gender}'"),
            ));
        }
    }

    if let Some(bib) = record.bib() {
        if bib.len() > settings.max_bib_length {
            errors.push(error(
                idx,
                "bibNumber",
                Severity::Error,
                &format!("bib number '{bib}' is implausibly long"),
            ));
        }
    }
}

fn check_finish_time(
    idx: usize,
    record: &ResultRecord,
    bounds: Option<&DistanceBounds>,
    errors: &mut Vec<ValidationError>,
) {
    let Some(finish_time) = record.finish_time.as_deref() else {
        if record.status == ResultStatus::Finished {
            errors.push(error(
                idx,
                "finishTime",
                Severity::Error,
                "finished result has no finish time",
            ));
        }
        return;
    };

    let Some(seconds) = parse_time(finish_time) else {
        // A single bad time must not invalidate the set, so this is
        // never critical.
        errors.push(error(
            idx,
            "finishTime",
            Severity::Error,
            &format!("unparsable finish time '{finish_time}'"),
        ));
        return;
    };

    if let Some(bounds) = bounds {
        if seconds < bounds.min_time_seconds {
            errors.push(error(
                idx,
                "finishTime",
                Severity::Error,
                &format!(
                    "finish time {finish_time} is below the plausible minimum for {}",
                    bounds.distance
                ),
            ));
        } else if seconds > bounds.max_time_seconds {
            errors.push(error(
                idx,
                "finishTime",
                Severity::Error,
                &format!(
                    "finish time {finish_time} is above the plausible maximum for {}",
                    bounds.distance
                ),
            ));
        }
    }
}

fn check_checkpoints(
    idx: usize,
    record: &ResultRecord,
    settings: &ValidationSettings,
    errors: &mut Vec<ValidationError>,
) {
    if record.checkpoints.is_empty() {
        return;
    }

    let mut checkpoints: Vec<_> = record.checkpoints.iter().collect();
    checkpoints.sort_by_key(|cp| cp.checkpoint_order);

    let mut previous: Option<u32> = None;
    let mut last_cumulative = None;

    for cp in &checkpoints {
        let Some(cumulative) = cp.cumulative_time.as_deref().and_then(parse_time) else {
            continue;
        };
        if let Some(prev_seconds) = previous {
            if cumulative < prev_seconds {
                errors.push(error(
                    idx,
                    "checkpoints",
                    Severity::Error,
                    &format!(
                        "checkpoint '{}' goes backwards in time ({} after {})",
                        cp.checkpoint_name,
                        cumulative,
                        prev_seconds
                    ),
                ));
            }
        }
        previous = Some(cumulative);
        last_cumulative = Some(cumulative);
    }

    let finish = record.finish_time.as_deref().and_then(parse_time);
    if let (Some(last), Some(finish)) = (last_cumulative, finish) {
        if last.abs_diff(finish) > settings.checkpoint_finish_tolerance_seconds {
            errors.push(error(
                idx,
                "checkpoints",
                Severity::Error,
                "last checkpoint does not line up with the finish time",
            ));
        }
    }
}

// One warning per duplicated bib value, with the per-bib count.
fn check_duplicate_bibs(results: &[ResultRecord], warnings: &mut Vec<ValidationWarning>) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in results {
        if let Some(bib) = record.bib() {
            *counts.entry(bib).or_insert(0) += 1;
        }
    }

    for (bib, count) in counts {
        if count > 1 {
            warnings.push(ValidationWarning {
                field: "bibNumber".to_string(),
                message: format!("bib number '{bib}' appears on {count} results"),
                affected_count: count,
                percentage: percentage(count, results.len()),
            });
        }
    }
}

fn check_position_gaps(results: &[ResultRecord], warnings: &mut Vec<ValidationWarning>) {
    let mut positions: Vec<i32> = results
        .iter()
        .filter(|r| r.status == ResultStatus::Finished)
        .filter_map(|r| r.position)
        .filter(|p| *p >= 0)
        .collect();
    positions.sort_unstable();
    positions.dedup();

    let Some((&min, &max)) = positions.first().zip(positions.last()) else {
        return;
    };

    let expected = (max - min + 1) as usize;
    if positions.len() < expected {
        let gaps = expected - positions.len();
        warnings.push(ValidationWarning {
            field: "position".to_string(),
            message: format!("{gaps} positions missing between {min} and {max}"),
            affected_count: gaps,
            percentage: percentage(gaps, results.len()),
        });
    }
}

fn check_expected_checkpoints(
    results: &[ResultRecord],
    bounds: &DistanceBounds,
    settings: &ValidationSettings,
    warnings: &mut Vec<ValidationWarning>,
) {
    let bearing = results.iter().filter(|r| !r.checkpoints.is_empty()).count();

    for expected in bounds.expected_checkpoints {
        let carriers = results
            .iter()
            .filter(|r| {
                r.checkpoints
                    .iter()
                    .any(|cp| cp.checkpoint_name.eq_ignore_ascii_case(expected))
            })
            .count();

        if carriers == 0 {
            warnings.push(ValidationWarning {
                field: "checkpoints".to_string(),
                message: format!("no results carry expected checkpoint '{expected}'"),
                affected_count: 0,
                percentage: 0.0,
            });
        } else if bearing > 0 && (carriers as f64) < settings.min_checkpoint_coverage * bearing as f64 {
            warnings.push(ValidationWarning {
                field: "checkpoints".to_string(),
                message: format!(
                    "expected checkpoint '{expected}' present on only {carriers} of {bearing} checkpoint-bearing results"
                ),
                affected_count: carriers,
                percentage: percentage(carriers, bearing),
            });
        }
    }
}

fn compute_statistics(results: &[ResultRecord]) -> ValidationStatistics {
    let total = results.len();
    let mut field_population = BTreeMap::new();

    for (field, present) in TRACKED_FIELDS {
        let count = results.iter().filter(|r| present(r)).count();
        field_population.insert((*field).to_string(), percentage(count, total));
    }

    let bearing = results.iter().filter(|r| !r.checkpoints.is_empty()).count();
    let total_checkpoints: usize = results.iter().map(|r| r.checkpoints.len()).sum();

    ValidationStatistics {
        total_results: total,
        field_population,
        checkpoint_coverage: percentage(bearing, total),
        avg_checkpoints_per_result: if total == 0 {
            0.0
        } else {
            total_checkpoints as f64 / total as f64
        },
    }
}

fn completeness(
    statistics: &ValidationStatistics,
    warning_count: usize,
    critical: usize,
    regular: usize,
) -> u8 {
    let avg_population = if statistics.field_population.is_empty() {
        0.0
    } else {
        statistics.field_population.values().sum::<f64>()
            / statistics.field_population.len() as f64
    };

    let warning_penalty = 20.0 - (warning_count.min(20) as f64);
    let error_penalty = ((critical * 5 + regular * 2) as f64).min(50.0);

    let score = avg_population * 0.5 + statistics.checkpoint_coverage * 0.3 + warning_penalty
        - error_penalty;
    score.round().clamp(0.0, 100.0) as u8
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn error(idx: usize, field: &str, severity: Severity, message: &str) -> ValidationError {
    ValidationError {
        result_index: idx,
        field: field.to_string(),
        severity,
        message: message.to_string(),
    }
}
