//! Wire shapes returned by (and sent to) the statistics backend.
//!
//! Optional fields default rather than fail so a partially populated payload still decodes;
//! deciding what to show for a gap is left to the UI crate.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Prefix shared by every emotion score column of a topic row.
pub const EMOTION_PREFIX: &str = "emotion_";

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    pub total_events: Option<u64>,
    pub total_posts: Option<u64>,
    pub total_comments: Option<u64>,
    pub unique_users: Option<u64>,
    pub comments_per_post: Option<f64>,
    /// Fraction of authors with exactly one event.
    pub lurker_ratio: Option<f64>,
    pub time_range: Option<TimeRange>,
    pub sources: Option<Vec<String>>,
}

/// Unix-second bounds of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCount {
    pub date: String,
    pub count: u64,
}

impl EventCount {
    pub fn new(date: impl Into<String>, count: u64) -> Self {
        Self {
            date: date.into(),
            count,
        }
    }
}

/// One weekday of the activity heatmap: hour key (`"0"`..`"23"`) → event count.
pub type HeatmapRow = BTreeMap<String, u64>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeStats {
    pub events_per_day: Vec<EventCount>,
    /// Seven rows in Monday..Sunday order; the weekday is implied by position.
    pub weekday_hour_heatmap: Vec<HeatmapRow>,
    pub burstiness: Option<f64>,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopUser {
    pub author: String,
    pub source: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocab {
    pub author: String,
    pub events: u64,
    pub total_words: u64,
    pub unique_words: u64,
    pub vocab_richness: f64,
    pub avg_words_per_event: f64,
    pub top_words: Vec<WordFrequency>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub author: String,
    #[serde(default)]
    pub post: u64,
    #[serde(default)]
    pub comment: u64,
    #[serde(default)]
    pub comment_post_ratio: f64,
    #[serde(default)]
    pub comment_share: f64,
    #[serde(default)]
    pub vocab: Option<Vocab>,
}

/// Source author → target author → number of replies.
pub type InteractionAdjacency = IndexMap<String, IndexMap<String, u64>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub top_users: Vec<TopUser>,
    pub users: Vec<User>,
    pub interaction_graph: InteractionAdjacency,
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseFrequency {
    #[serde(alias = "ngram")]
    pub phrase: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyTimeByEmotion {
    pub dominant_emotion: String,
    /// Mean reply delay in seconds; absent when no reply could be matched to its parent.
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentStats {
    pub word_frequencies: Vec<WordFrequency>,
    pub common_two_phrases: Vec<PhraseFrequency>,
    pub common_three_phrases: Vec<PhraseFrequency>,
    pub average_emotion_by_topic: Vec<TopicEmotionRow>,
    pub reply_time_by_emotion: Vec<ReplyTimeByEmotion>,
}

/// Average emotion scores of one topic.
///
/// The set of `emotion_*` columns is open-ended, so they are kept as an ordered list in the
/// order the backend wrote them. Non-numeric scores decode as `NaN`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicEmotionRow {
    pub topic: String,
    pub n: u64,
    pub emotions: Vec<(String, f64)>,
}

impl TopicEmotionRow {
    pub fn new<K: Into<String>>(
        topic: impl Into<String>,
        n: u64,
        emotions: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            topic: topic.into(),
            n,
            emotions: emotions
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

impl<'de> Deserialize<'de> for TopicEmotionRow {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TopicEmotionRowVisitor)
    }
}

struct TopicEmotionRowVisitor;

impl<'de> Visitor<'de> for TopicEmotionRowVisitor {
    type Value = TopicEmotionRow;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a topic record with `topic`, `n` and `emotion_*` columns")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut row = TopicEmotionRow::default();

        while let Some(key) = map.next_key::<String>()? {
            if key == "topic" {
                row.topic = match map.next_value::<Value>()? {
                    Value::String(topic) => topic,
                    Value::Null => String::new(),
                    other => other.to_string(),
                };
            } else if key == "n" {
                let value = map.next_value::<Value>()?;
                row.n = value
                    .as_u64()
                    .or_else(|| {
                        value
                            .as_f64()
                            .filter(|n| n.is_finite() && *n >= 0.0)
                            .map(|n| n as u64)
                    })
                    .unwrap_or(0);
            } else if key.starts_with(EMOTION_PREFIX) {
                let value = map.next_value::<Value>()?;
                row.emotions.push((key, value.as_f64().unwrap_or(f64::NAN)));
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(row)
    }
}

impl Serialize for TopicEmotionRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.emotions.len() + 2))?;
        map.serialize_entry("topic", &self.topic)?;
        for (key, value) in &self.emotions {
            if value.is_finite() {
                map.serialize_entry(key, value)?;
            } else {
                map.serialize_entry(key, &Value::Null)?;
            }
        }
        map.serialize_entry("n", &self.n)?;
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Mutations & upload
// ---------------------------------------------------------------------------

/// Body of the search call. Dates are `YYYY-MM-DD` and inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// Source name → enabled.
pub type SourceSelection = BTreeMap<String, bool>;

/// Acknowledgement of a filter mutation. The backend may answer with an empty body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterAck {
    /// Events left in scope after the mutation, when reported.
    pub rows: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub posts_count: u64,
    pub comments_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn topic_row_keeps_emotion_columns_in_payload_order() {
        let raw = r#"{"topic":"Housing","emotion_sadness":0.2,"n":12,"emotion_anger":0.4,"emotion_joy":0.1,"extra":"x"}"#;
        let row: TopicEmotionRow = serde_json::from_str(raw).unwrap();

        assert_eq!(row.topic, "Housing");
        assert_eq!(row.n, 12);
        let keys: Vec<&str> = row.emotions.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["emotion_sadness", "emotion_anger", "emotion_joy"]);
    }

    #[test]
    fn topic_row_tolerates_null_scores_and_float_counts() {
        let row: TopicEmotionRow =
            serde_json::from_value(json!({"topic": "Rent", "n": 7.0, "emotion_fear": null}))
                .unwrap();

        assert_eq!(row.n, 7);
        assert!(row.emotions[0].1.is_nan());
    }

    #[test]
    fn summary_with_missing_fields_decodes() {
        let summary: SummaryStats =
            serde_json::from_value(json!({"total_events": 10, "sources": ["boards.ie"]})).unwrap();

        assert_eq!(summary.total_events, Some(10));
        assert_eq!(summary.unique_users, None);
        assert!(summary.time_range.is_none());
    }

    #[test]
    fn user_payload_keeps_adjacency_order() {
        let raw = r#"{
            "top_users": [{"author": "ann", "source": "reddit", "count": 4}],
            "users": [{"author": "ann", "post": 1, "comment": 3,
                       "comment_post_ratio": 3.0, "comment_share": 0.75, "vocab": null}],
            "interaction_graph": {"zed": {"ann": 1}, "ann": {}}
        }"#;
        let stats: UserStats = serde_json::from_str(raw).unwrap();

        let sources: Vec<&String> = stats.interaction_graph.keys().collect();
        assert_eq!(sources, ["zed", "ann"]);
        assert!(stats.users[0].vocab.is_none());
    }

    #[test]
    fn search_request_omits_open_bounds() {
        let body = serde_json::to_value(SearchRequest {
            query: "rent".into(),
            start: Some("2026-01-01".into()),
            end: None,
        })
        .unwrap();

        assert_eq!(body, json!({"query": "rent", "start": "2026-01-01"}));
    }
}
