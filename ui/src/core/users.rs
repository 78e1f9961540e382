//! Leaderboard shaping and the per-user drill-down.

use api::{TopUser, User};

use super::format::{format_number, format_percent_precise};

/// Detailed record of `username`, if the backend sent one. Matches the author id exactly.
pub fn resolve<'a>(username: &str, users: &'a [User]) -> Option<&'a User> {
    users.iter().find(|user| user.author == username)
}

/// First `limit` entries of the backend ranking (already sorted by activity).
pub fn leaderboard(top_users: &[TopUser], limit: usize) -> Vec<TopUser> {
    top_users.iter().take(limit).cloned().collect()
}

/// The same author may rank once per source.
pub fn leaderboard_key(entry: &TopUser) -> String {
    format!("{}-{}", entry.author, entry.source)
}

/// Display strings for the user detail panel.
#[derive(Debug, Clone, PartialEq)]
pub struct UserDetail {
    pub author: String,
    pub posts: u64,
    pub comments: u64,
    pub comment_post_ratio: String,
    pub comment_share: String,
    pub vocabulary: Option<String>,
}

impl UserDetail {
    pub fn from_user(user: &User) -> Self {
        Self {
            author: user.author.clone(),
            posts: user.post,
            comments: user.comment,
            comment_post_ratio: format_number(user.comment_post_ratio, 2),
            comment_share: format_percent_precise(user.comment_share, 1),
            vocabulary: user.vocab.as_ref().map(|vocab| {
                format!(
                    "{} (avg {} words/event)",
                    format_number(vocab.vocab_richness, 3),
                    format_number(vocab.avg_words_per_event, 2)
                )
            }),
        }
    }
}
