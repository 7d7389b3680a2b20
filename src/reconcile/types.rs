use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::ResultRecord;

/// How two records were decided to be the same performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Bib,
    NameTime,
    PositionName,
}

/// Outcome of comparing one primary record against one secondary record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub is_match: bool,
    /// 0-100, higher means more certain.
    pub confidence: u8,
    pub method: Option<MatchMethod>,
    /// Conflicts surfaced during matching itself, e.g. equal bibs with
    /// badly differing names.
    pub conflicts: Vec<FieldConflict>,
}

impl MatchResult {
    pub fn no_match() -> Self {
        Self {
            is_match: false,
            confidence: 0,
            method: None,
            conflicts: Vec::new(),
        }
    }
}

/// Merge policy applied to one disagreeing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    UseA,
    UseB,
    Merge,
    Manual,
}

/// One per-field disagreement between two matched records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConflict {
    /// Wire-format field name, e.g. `finishTime`.
    pub field: String,
    pub value_a: Option<String>,
    pub value_b: Option<String>,
    pub resolution: Resolution,
    pub reason: String,
}

/// Aggregate numbers for one reconciliation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationStatistics {
    pub total_primary: usize,
    pub total_secondary: usize,
    /// Percentage of primary records confidently matched.
    pub match_rate: f64,
    /// Field names newly populated from the secondary source.
    pub enriched_fields: BTreeSet<String>,
}

/// Output of one reconciliation run over two result sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    /// Merged records ordered by position (missing position sorts last).
    pub merged_results: Vec<ResultRecord>,
    pub matched_count: usize,
    pub unmatched_from_a: usize,
    pub unmatched_from_b: usize,
    pub conflicts: Vec<FieldConflict>,
    pub statistics: ReconciliationStatistics,
}
