use std::collections::BTreeMap;
use std::fmt::Write;

use chrono::Utc;

use super::types::{ReconciliationResult, Resolution};

/// Manual-review conflicts listed in full before truncating.
const MAX_REVIEW_CONFLICTS: usize = 10;

/// Render a human-readable summary of one reconciliation run: totals,
/// match rate, enriched fields, per-field conflict counts and the first
/// manual-review conflicts with their reasons.
pub fn render_report(result: &ReconciliationResult) -> String {
    let stats = &result.statistics;
    let mut out = String::new();

    let _ = writeln!(out, "=== Reconciliation Report ===");
    let _ = writeln!(out, "Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
    let _ = writeln!(out);
    let _ = writeln!(out, "Primary results:    {}", stats.total_primary);
    let _ = writeln!(out, "Secondary results:  {}", stats.total_secondary);
    let _ = writeln!(out, "Merged output:      {}", result.merged_results.len());
    let _ = writeln!(
        out,
        "Matched:            {} ({:.1}%)",
        result.matched_count, stats.match_rate
    );
    let _ = writeln!(out, "Unmatched primary:  {}", result.unmatched_from_a);
    let _ = writeln!(out, "Unmatched secondary: {}", result.unmatched_from_b);

    if !stats.enriched_fields.is_empty() {
        let fields: Vec<&str> = stats.enriched_fields.iter().map(String::as_str).collect();
        let _ = writeln!(out, "Fields enriched from secondary: {}", fields.join(", "));
    }

    let mut by_field: BTreeMap<&str, usize> = BTreeMap::new();
    for conflict in &result.conflicts {
        *by_field.entry(conflict.field.as_str()).or_insert(0) += 1;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Conflicts: {}", result.conflicts.len());
    for (field, count) in &by_field {
        let _ = writeln!(out, "  {field}: {count}");
    }

    let manual: Vec<_> = result
        .conflicts
        .iter()
        .filter(|c| c.resolution == Resolution::Manual)
        .collect();

    if !manual.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Manual review needed ({}):", manual.len());
        for conflict in manual.iter().take(MAX_REVIEW_CONFLICTS) {
            let _ = writeln!(
                out,
                "  [{}] {:?} vs {:?} - {}",
                conflict.field, conflict.value_a, conflict.value_b, conflict.reason
            );
        }
        if manual.len() > MAX_REVIEW_CONFLICTS {
            let _ = writeln!(out, "  ... and {} more", manual.len() - MAX_REVIEW_CONFLICTS);
        }
    }

    out
}
