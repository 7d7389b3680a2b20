use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity of a per-result finding. Only `Critical` findings can make a
/// result set invalid outright regardless of count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Error,
}

/// One per-result finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Index of the offending result within the scraped set.
    pub result_index: usize,
    /// Wire-format field name the finding refers to.
    pub field: String,
    pub severity: Severity,
    pub message: String,
}

/// One aggregate finding across the whole result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub affected_count: usize,
    pub percentage: f64,
}

/// Field-population and checkpoint statistics for one result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStatistics {
    pub total_results: usize,
    /// Percentage of results carrying a value, per tracked field.
    pub field_population: BTreeMap<String, f64>,
    /// Percentage of results carrying at least one checkpoint.
    pub checkpoint_coverage: f64,
    pub avg_checkpoints_per_result: f64,
}

/// Output of validating one scraped result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    /// 0-100 summary of how well-populated and internally consistent
    /// the set is.
    pub completeness_score: u8,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub statistics: ValidationStatistics,
}

impl ValidationResult {
    pub fn critical_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Critical)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.errors
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }
}
