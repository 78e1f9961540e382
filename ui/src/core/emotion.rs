//! Per-topic emotion summary.
//!
//! The backend reports, per topic, the mean of every `emotion_*` score plus the number of
//! events (`n`) behind those means. This module picks each topic's dominant emotion and
//! labels how far the sample size can be trusted.

use api::{TopicEmotionRow, EMOTION_PREFIX};

pub const UNKNOWN_EMOTION: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleThresholds {
    /// Below this many events a topic is a low sample.
    pub low: u64,
    /// From this many events on a topic is stable.
    pub stable: u64,
}

impl SampleThresholds {
    pub fn classify(&self, n: u64) -> SampleReliability {
        if n < self.low {
            SampleReliability::Low
        } else if n >= self.stable {
            SampleReliability::Stable
        } else {
            SampleReliability::Moderate
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleReliability {
    Low,
    Moderate,
    Stable,
}

impl SampleReliability {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low sample",
            Self::Moderate => "Moderate",
            Self::Stable => "Stable",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Low => "topic-reliability--low",
            Self::Moderate => "topic-reliability--moderate",
            Self::Stable => "topic-reliability--stable",
        }
    }
}

/// Highest scoring emotion of a topic. `confidence` is the raw mean score, not a probability.
#[derive(Debug, Clone, PartialEq)]
pub struct DominantEmotion {
    pub emotion: String,
    pub confidence: f64,
}

impl DominantEmotion {
    pub fn unknown() -> Self {
        Self {
            emotion: UNKNOWN_EMOTION.to_string(),
            confidence: 0.0,
        }
    }

    pub fn is_known(&self) -> bool {
        self.emotion != UNKNOWN_EMOTION
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub topic: String,
    pub n: u64,
    pub dominant: DominantEmotion,
    pub reliability: SampleReliability,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicReport {
    pub topics: Vec<TopicSummary>,
    /// Emotion names of the first row, used as table columns.
    pub emotions: Vec<String>,
    pub median_sample: Option<u64>,
    pub low_sample_topics: usize,
    pub stable_topics: usize,
}

impl TopicReport {
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// `emotion_joy` → `joy`.
pub fn emotion_label(key: &str) -> &str {
    key.strip_prefix(EMOTION_PREFIX).unwrap_or(key)
}

/// Maximum finite `emotion_*` score of the row. On equal scores the column that came first in
/// the payload wins.
pub fn dominant_emotion(row: &TopicEmotionRow) -> DominantEmotion {
    let mut best: Option<(&str, f64)> = None;

    for (key, score) in &row.emotions {
        if !key.starts_with(EMOTION_PREFIX) || !score.is_finite() {
            continue;
        }
        let beats_best = best.map_or(true, |(_, top)| *score > top);
        if beats_best {
            best = Some((key.as_str(), *score));
        }
    }

    match best {
        Some((key, score)) => DominantEmotion {
            emotion: emotion_label(key).to_string(),
            confidence: score,
        },
        None => DominantEmotion::unknown(),
    }
}

/// Middle sample size after an ascending sort; for an even count the upper of the two middle
/// elements (index `len / 2`), never an average.
pub fn median_sample_size(sizes: &[u64]) -> Option<u64> {
    if sizes.is_empty() {
        return None;
    }
    let mut sorted = sizes.to_vec();
    sorted.sort_unstable();
    Some(sorted[sorted.len() / 2])
}

pub fn analyze(rows: &[TopicEmotionRow], thresholds: SampleThresholds) -> TopicReport {
    let topics: Vec<TopicSummary> = rows
        .iter()
        .map(|row| TopicSummary {
            topic: row.topic.clone(),
            n: row.n,
            dominant: dominant_emotion(row),
            reliability: thresholds.classify(row.n),
        })
        .collect();

    let emotions = rows
        .first()
        .map(|row| {
            row.emotions
                .iter()
                .map(|(key, _)| emotion_label(key).to_string())
                .collect()
        })
        .unwrap_or_default();

    let sizes: Vec<u64> = rows.iter().map(|row| row.n).collect();
    let low_sample_topics = topics
        .iter()
        .filter(|t| t.reliability == SampleReliability::Low)
        .count();
    let stable_topics = topics
        .iter()
        .filter(|t| t.reliability == SampleReliability::Stable)
        .count();

    TopicReport {
        topics,
        emotions,
        median_sample: median_sample_size(&sizes),
        low_sample_topics,
        stable_topics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLDS: SampleThresholds = SampleThresholds { low: 20, stable: 50 };

    fn row(topic: &str, n: u64, scores: &[(&str, f64)]) -> TopicEmotionRow {
        TopicEmotionRow::new(topic, n, scores.iter().copied())
    }

    #[test]
    fn dominant_is_the_maximum_score() {
        let r = row(
            "Housing",
            40,
            &[("emotion_joy", 0.1), ("emotion_anger", 0.6), ("emotion_fear", 0.3)],
        );
        let dominant = dominant_emotion(&r);
        assert_eq!(dominant.emotion, "anger");
        assert_eq!(dominant.confidence, 0.6);
    }

    #[test]
    fn ties_go_to_the_first_column() {
        let r = row(
            "Transport",
            40,
            &[("emotion_sadness", 0.4), ("emotion_anger", 0.4), ("emotion_joy", 0.1)],
        );
        assert_eq!(dominant_emotion(&r).emotion, "sadness");

        let swapped = row(
            "Transport",
            40,
            &[("emotion_anger", 0.4), ("emotion_sadness", 0.4)],
        );
        assert_eq!(dominant_emotion(&swapped).emotion, "anger");
    }

    #[test]
    fn row_without_emotions_is_unknown() {
        let dominant = dominant_emotion(&row("Misc", 3, &[]));
        assert_eq!(dominant.emotion, UNKNOWN_EMOTION);
        assert_eq!(dominant.confidence, 0.0);
        assert!(!dominant.is_known());
    }

    #[test]
    fn non_finite_scores_are_skipped() {
        let all_nan = row("Rent", 5, &[("emotion_joy", f64::NAN), ("emotion_fear", f64::INFINITY)]);
        assert_eq!(dominant_emotion(&all_nan), DominantEmotion::unknown());

        let mixed = row("Rent", 5, &[("emotion_joy", f64::NAN), ("emotion_fear", 0.2)]);
        assert_eq!(dominant_emotion(&mixed).emotion, "fear");
    }

    #[test]
    fn median_uses_the_upper_middle_element() {
        assert_eq!(median_sample_size(&[5, 20, 45]), Some(20));
        assert_eq!(median_sample_size(&[100, 5, 45, 20]), Some(45));
        assert_eq!(median_sample_size(&[]), None);
    }

    #[test]
    fn report_counts_reliability_bands() {
        let rows = vec![
            row("a", 5, &[("emotion_joy", 0.2)]),
            row("b", 20, &[("emotion_joy", 0.2)]),
            row("c", 50, &[("emotion_joy", 0.2)]),
            row("d", 100, &[("emotion_joy", 0.2)]),
        ];

        let report = analyze(&rows, THRESHOLDS);
        assert_eq!(report.median_sample, Some(50));
        assert_eq!(report.low_sample_topics, 1);
        assert_eq!(report.stable_topics, 2);
        assert_eq!(report.topics[1].reliability, SampleReliability::Moderate);
        assert_eq!(report.emotions, ["joy"]);
    }
}
