//! Dashboard configuration: backend location and the tunable display thresholds.

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::warn;

use super::emotion::SampleThresholds;
use super::series::parse_day;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "PULSEBOARD_API_URL";

/// Topics with fewer events than this are flagged as a low sample.
pub const DEFAULT_LOW_SAMPLE_THRESHOLD: u64 = 20;
/// Topics with at least this many events are considered stable.
pub const DEFAULT_STABLE_SAMPLE_THRESHOLD: u64 = 50;
pub const DEFAULT_TOP_USERS_LIMIT: usize = 100;
pub const DEFAULT_WORD_CLOUD_LIMIT: usize = 100;
/// Sources listed by name on the summary card before the rest collapse into `…`.
pub const DEFAULT_SOURCE_PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub low_sample_threshold: u64,
    pub stable_sample_threshold: u64,
    /// Events-per-day points before this `YYYY-MM-DD` date are hidden from the chart.
    pub events_since: Option<String>,
    pub top_users_limit: usize,
    pub word_cloud_limit: usize,
    pub source_preview_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: api::DEFAULT_BASE_URL.to_string(),
            low_sample_threshold: DEFAULT_LOW_SAMPLE_THRESHOLD,
            stable_sample_threshold: DEFAULT_STABLE_SAMPLE_THRESHOLD,
            events_since: None,
            top_users_limit: DEFAULT_TOP_USERS_LIMIT,
            word_cloud_limit: DEFAULT_WORD_CLOUD_LIMIT,
            source_preview_limit: DEFAULT_SOURCE_PREVIEW_LIMIT,
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the backend URL taken from `PULSEBOARD_API_URL` when set.
    ///
    /// Web builds can only see the variable at compile time; native builds also check the
    /// process environment at startup.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(url) = option_env!("PULSEBOARD_API_URL") {
            config.api_base_url = url.to_string();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Ok(url) = std::env::var(API_URL_ENV) {
                if !url.trim().is_empty() {
                    config.api_base_url = url;
                }
            }
        }

        config
    }

    /// Parse a JSON override document; absent keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn sample_thresholds(&self) -> SampleThresholds {
        if self.stable_sample_threshold < self.low_sample_threshold {
            warn!(
                low = self.low_sample_threshold,
                stable = self.stable_sample_threshold,
                "stable sample threshold below low threshold; clamping"
            );
        }
        SampleThresholds {
            low: self.low_sample_threshold,
            stable: self.stable_sample_threshold.max(self.low_sample_threshold),
        }
    }

    pub fn events_since_date(&self) -> Option<Date> {
        let raw = self.events_since.as_deref()?;
        let parsed = parse_day(raw);
        if parsed.is_none() {
            warn!(value = raw, "ignoring unparseable events_since date");
        }
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn partial_override_keeps_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"api_base_url": "https://stats.example", "events_since": "2026-01-10"}"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://stats.example");
        assert_eq!(config.low_sample_threshold, DEFAULT_LOW_SAMPLE_THRESHOLD);
        assert_eq!(config.events_since_date(), Some(date!(2026 - 01 - 10)));
    }

    #[test]
    fn inverted_thresholds_are_clamped() {
        let config = DashboardConfig {
            low_sample_threshold: 40,
            stable_sample_threshold: 10,
            ..DashboardConfig::default()
        };

        let thresholds = config.sample_thresholds();
        assert_eq!(thresholds.low, 40);
        assert_eq!(thresholds.stable, 40);
    }
}
