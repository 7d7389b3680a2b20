/// Plausibility bounds for one recognized race distance. Floors sit just
/// under the relevant world records; ceilings are generous cutoffs.
pub struct DistanceBounds {
    pub distance: &'static str,
    pub min_time_seconds: u32,
    pub max_time_seconds: u32,
    /// Checkpoint names a well-instrumented event at this distance
    /// usually records.
    pub expected_checkpoints: &'static [&'static str],
}

/// Fixed plausibility table keyed by canonical distance strings.
const DISTANCE_BOUNDS: &[DistanceBounds] = &[
    DistanceBounds {
        distance: "5K",
        min_time_seconds: 720, // 12:00, WR ~12:35
        max_time_seconds: 7_200,
        expected_checkpoints: &["2.5K"],
    },
    DistanceBounds {
        distance: "10K",
        min_time_seconds: 1_571, // 26:11, the track WR
        max_time_seconds: 10_800,
        expected_checkpoints: &["5K"],
    },
    DistanceBounds {
        distance: "Half Marathon",
        min_time_seconds: 3_420, // 57:00, WR ~57:30
        max_time_seconds: 18_000,
        expected_checkpoints: &["5K", "10K", "15K", "20K"],
    },
    DistanceBounds {
        distance: "Marathon",
        min_time_seconds: 7_200, // 2:00:00, WR ~2:00:35
        max_time_seconds: 28_800,
        expected_checkpoints: &["10K", "Half", "30K", "40K"],
    },
    DistanceBounds {
        distance: "50K",
        min_time_seconds: 9_540, // 2:39:00
        max_time_seconds: 36_000,
        expected_checkpoints: &["10K", "25K", "40K"],
    },
    DistanceBounds {
        distance: "100K",
        min_time_seconds: 21_600, // 6:00:00
        max_time_seconds: 86_400,
        expected_checkpoints: &["25K", "50K", "75K"],
    },
    DistanceBounds {
        distance: "100 Mile",
        min_time_seconds: 39_600, // 11:00:00
        max_time_seconds: 172_800,
        expected_checkpoints: &["25 Mile", "50 Mile", "75 Mile"],
    },
    DistanceBounds {
        distance: "Sprint Triathlon",
        min_time_seconds: 3_000, // 50:00
        max_time_seconds: 10_800,
        expected_checkpoints: &["Swim", "T1", "Bike", "T2", "Run"],
    },
    DistanceBounds {
        distance: "Olympic Triathlon",
        min_time_seconds: 5_700, // 1:35:00
        max_time_seconds: 16_200,
        expected_checkpoints: &["Swim", "T1", "Bike", "T2", "Run"],
    },
    DistanceBounds {
        distance: "Half Ironman",
        min_time_seconds: 12_600, // 3:30:00
        max_time_seconds: 30_600,
        expected_checkpoints: &["Swim", "T1", "Bike", "T2", "Run"],
    },
    DistanceBounds {
        distance: "Ironman",
        min_time_seconds: 26_100, // 7:15:00
        max_time_seconds: 61_200,
        expected_checkpoints: &["Swim", "T1", "Bike", "T2", "Run"],
    },
];

/// Look up plausibility bounds for a canonical distance name. Unknown
/// distances yield `None` and skip time-bound and checkpoint-coverage
/// checks.
pub fn bounds_for(distance: &str) -> Option<&'static DistanceBounds> {
    let trimmed = distance.trim();
    DISTANCE_BOUNDS
        .iter()
        .find(|b| b.distance.eq_ignore_ascii_case(trimmed))
}
