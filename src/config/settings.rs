/// Thresholds for cross-source result matching and merging.
pub struct ReconcileSettings {
    /// Name similarity required for a name-based match.
    pub min_name_similarity: f64,
    /// Weaker similarity accepted when positions also agree.
    pub weak_name_similarity: f64,
    /// Maximum finish-time gap for a name+time match.
    pub max_time_difference_seconds: u32,
    /// Matches at or above this confidence merge without review.
    pub auto_merge_threshold: u8,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            min_name_similarity: 0.75,
            weak_name_similarity: 0.6,
            max_time_difference_seconds: 60,
            auto_merge_threshold: 85,
        }
    }
}

/// Tolerances for result-set validation.
pub struct ValidationSettings {
    /// Allowed gap between the last checkpoint and the finish time.
    pub checkpoint_finish_tolerance_seconds: u32,
    pub max_bib_length: usize,
    /// Expected checkpoints present in fewer results than this share of
    /// checkpoint-bearing results raise a coverage warning.
    pub min_checkpoint_coverage: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            checkpoint_finish_tolerance_seconds: 60,
            max_bib_length: 20,
            min_checkpoint_coverage: 0.5,
        }
    }
}

/// Weights and components of athlete identity matching. The weights sum
/// to 1.0; each component score is expressed 0-100.
pub struct MatcherSettings {
    pub name_weight: f64,
    pub position_weight: f64,
    pub club_weight: f64,
    pub geography_weight: f64,
    /// Positions of a prior same-event result counted as "nearby".
    pub position_window: i32,
    /// Component score granted for a nearby prior position.
    pub position_component: f64,
    /// Component score granted for a country match.
    pub geography_component: f64,
    /// Minimum confidence for automatic linking.
    pub auto_link_threshold: u8,
}

impl Default for MatcherSettings {
    fn default() -> Self {
        Self {
            name_weight: 0.6,
            position_weight: 0.2,
            club_weight: 0.1,
            geography_weight: 0.1,
            position_window: 10,
            position_component: 50.0,
            geography_component: 30.0,
            auto_link_threshold: 90,
        }
    }
}

pub struct AppConfig {
    pub reconcile: ReconcileSettings,
    pub validation: ValidationSettings,
    pub matcher: MatcherSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            reconcile: ReconcileSettings::default(),
            validation: ValidationSettings::default(),
            matcher: MatcherSettings::default(),
        }
    }
}
