//! Clock-time parsing and formatting shared by the reconciliation and
//! validation engines.

/// Status markers providers print in the time column instead of a time.
/// Single source of truth for the recognized set.
const NO_TIME_SENTINELS: [&str; 3] = ["dnf", "dns", "dq"];

/// Parse a clock-time string into total seconds.
///
/// Accepts `H:MM:SS`, `M:SS` and bare seconds. Returns `None` for empty
/// input, DNF/DNS/DQ sentinels (case-insensitive) and anything
/// non-numeric; parse failures never raise.
pub fn parse_time(s: &str) -> Option<u32> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    if NO_TIME_SENTINELS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    let numbers: Vec<u32> = parts
        .iter()
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .ok()?;

    match numbers.as_slice() {
        [hours, minutes, seconds] => hours
            .checked_mul(3600)?
            .checked_add(minutes.checked_mul(60)?)?
            .checked_add(*seconds),
        [minutes, seconds] => minutes.checked_mul(60)?.checked_add(*seconds),
        [seconds] => Some(*seconds),
        _ => None,
    }
}

/// Format total seconds as the shortest canonical clock string:
/// `H:MM:SS` from one hour up, `M:SS` below.
pub fn format_time(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
