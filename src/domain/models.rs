use serde::{Deserialize, Serialize};

/// One athlete's performance in one distance of one event, as scraped
/// from a timing provider. Records are never mutated in place; merging
/// produces a new record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Finishing position. May be provisional or absent for live scrapes.
    #[serde(default)]
    pub position: Option<i32>,
    #[serde(default)]
    pub bib_number: Option<String>,
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub finish_time: Option<String>,
    #[serde(default)]
    pub gun_time: Option<String>,
    #[serde(default)]
    pub chip_time: Option<String>,
    #[serde(default)]
    pub pace: Option<String>,
    #[serde(default)]
    pub gender_position: Option<i32>,
    #[serde(default)]
    pub category_position: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub club: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub status: ResultStatus,
    #[serde(default)]
    pub time_behind: Option<String>,
    #[serde(default)]
    pub checkpoints: Vec<TimingCheckpoint>,
}

impl Default for ResultRecord {
    fn default() -> Self {
        Self {
            position: None,
            bib_number: None,
            name: String::new(),
            gender: None,
            category: None,
            finish_time: None,
            gun_time: None,
            chip_time: None,
            pace: None,
            gender_position: None,
            category_position: None,
            country: None,
            club: None,
            age: None,
            status: ResultStatus::Finished,
            time_behind: None,
            checkpoints: Vec::new(),
        }
    }
}

impl ResultRecord {
    /// Non-empty bib number, if the record carries one.
    pub fn bib(&self) -> Option<&str> {
        self.bib_number.as_deref().filter(|b| !b.trim().is_empty())
    }
}

/// Result status as reported by the timing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    #[default]
    Finished,
    Dnf,
    Dns,
    Dq,
}

impl ResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Finished => "finished",
            ResultStatus::Dnf => "dnf",
            ResultStatus::Dns => "dns",
            ResultStatus::Dq => "dq",
        }
    }
}

/// One intermediate split captured by a timing mat or manual entry.
///
/// Within one result, `cumulative_time` must be non-decreasing in
/// `checkpoint_order`, and the last checkpoint must land within 60s of
/// the finish time. The validation engine enforces both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingCheckpoint {
    #[serde(default)]
    pub checkpoint_type: CheckpointType,
    pub checkpoint_name: String,
    /// Defines the sequence of checkpoints within one result.
    pub checkpoint_order: i32,
    #[serde(default)]
    pub split_time: Option<String>,
    #[serde(default)]
    pub cumulative_time: Option<String>,
    #[serde(default)]
    pub pace: Option<String>,
    #[serde(default)]
    pub segment_distance_meters: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointType {
    #[default]
    Distance,
    Transition,
    Discipline,
}

/// A known person in the external athlete roster. Immutable from this
/// subsystem's view; the persistence layer owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteIdentity {
    pub name: String,
    pub normalized_name: String,
    #[serde(default)]
    pub country: Option<String>,
    /// Positions this athlete took in past events, used for
    /// position-proximity scoring when re-matching within the same event.
    #[serde(default)]
    pub prior_performances: Vec<PriorPerformance>,
}

/// One past finishing position of a known athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorPerformance {
    pub event_id: String,
    pub position: i32,
}
