//! Word cloud weights and the reply-delay table.

use api::{ReplyTimeByEmotion, WordFrequency};

use super::emotion::emotion_label;

/// Font size range of the word cloud, in px.
pub const WORD_FONT_MIN: f64 = 14.0;
pub const WORD_FONT_MAX: f64 = 60.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WordWeight {
    pub text: String,
    pub value: u64,
    /// `value` relative to the most frequent word, `0.0..=1.0`.
    pub scale: f64,
}

impl WordWeight {
    pub fn font_size(&self) -> f64 {
        WORD_FONT_MIN + (WORD_FONT_MAX - WORD_FONT_MIN) * self.scale
    }
}

pub fn word_cloud(words: &[WordFrequency], limit: usize) -> Vec<WordWeight> {
    let words = &words[..words.len().min(limit)];
    let max = words.iter().map(|w| w.count).max().unwrap_or(0);

    words
        .iter()
        .map(|w| WordWeight {
            text: w.word.clone(),
            value: w.count,
            scale: if max == 0 {
                0.0
            } else {
                w.count as f64 / max as f64
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTiming {
    pub emotion: String,
    pub mean_seconds: Option<f64>,
    pub replies: u64,
}

pub fn reply_timings(rows: &[ReplyTimeByEmotion]) -> Vec<ReplyTiming> {
    rows.iter()
        .map(|row| ReplyTiming {
            emotion: emotion_label(&row.dominant_emotion).to_string(),
            mean_seconds: row.mean.filter(|m| m.is_finite()),
            replies: row.count,
        })
        .collect()
}
