//! Formatting helpers for presenting statistics.

/// Shown wherever a value is missing or not representable.
pub const PLACEHOLDER: &str = "—";

pub fn format_count(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Ratio in `0..=1` as a whole percentage (`0.456` → `"46%"`).
pub fn format_percent(ratio: f64) -> String {
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.0}%", (ratio * 100.0).round())
}

/// Ratio as a percentage with a fixed number of decimals (`0.4567`, 1 → `"45.7%"`).
pub fn format_percent_precise(ratio: f64, decimals: usize) -> String {
    if !ratio.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.*}%", decimals, ratio * 100.0)
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{value:.decimals$}")
}

/// Compact duration for reply delays: `45s`, `12m`, `3.4h`, `2.1d`.
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return PLACEHOLDER.to_string();
    }
    if seconds < 60.0 {
        format!("{seconds:.0}s")
    } else if seconds < 3_600.0 {
        format!("{:.0}m", seconds / 60.0)
    } else if seconds < 86_400.0 {
        format!("{:.1}h", seconds / 3_600.0)
    } else {
        format!("{:.1}d", seconds / 86_400.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_whole_number() {
        assert_eq!(format_percent(0.456), "46%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn seconds_pick_a_readable_unit() {
        assert_eq!(format_seconds(42.0), "42s");
        assert_eq!(format_seconds(600.0), "10m");
        assert_eq!(format_seconds(5_400.0), "1.5h");
        assert_eq!(format_seconds(-1.0), PLACEHOLDER);
    }
}
