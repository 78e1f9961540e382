//! Dataset summary → card values.

use api::{SummaryStats, TimeRange};
use time::macros::format_description;
use time::OffsetDateTime;

use super::config::DEFAULT_SOURCE_PREVIEW_LIMIT;
use super::format::{format_count, format_number, format_percent, PLACEHOLDER};

/// Every summary card value as a ready-to-render string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySummary {
    pub total_events: String,
    pub unique_users: String,
    pub posts_comments: String,
    pub comments_per_post: String,
    pub time_range: String,
    pub lurker_ratio: String,
    pub source_count: String,
    pub source_preview: String,
}

impl DisplaySummary {
    /// All cards showing the placeholder.
    pub fn placeholder() -> Self {
        Self {
            total_events: PLACEHOLDER.to_string(),
            unique_users: PLACEHOLDER.to_string(),
            posts_comments: PLACEHOLDER.to_string(),
            comments_per_post: PLACEHOLDER.to_string(),
            time_range: PLACEHOLDER.to_string(),
            lurker_ratio: PLACEHOLDER.to_string(),
            source_count: PLACEHOLDER.to_string(),
            source_preview: PLACEHOLDER.to_string(),
        }
    }
}

impl Default for DisplaySummary {
    fn default() -> Self {
        Self::placeholder()
    }
}

pub fn project(summary: Option<&SummaryStats>) -> DisplaySummary {
    project_with_limit(summary, DEFAULT_SOURCE_PREVIEW_LIMIT)
}

pub fn project_with_limit(summary: Option<&SummaryStats>, preview_limit: usize) -> DisplaySummary {
    let Some(summary) = summary else {
        return DisplaySummary::placeholder();
    };

    let posts_comments = match (summary.total_posts, summary.total_comments) {
        (Some(posts), Some(comments)) => format!("{posts} / {comments}"),
        _ => PLACEHOLDER.to_string(),
    };

    DisplaySummary {
        total_events: format_count(summary.total_events),
        unique_users: format_count(summary.unique_users),
        posts_comments,
        comments_per_post: summary
            .comments_per_post
            .map(|ratio| format_number(ratio, 2))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        time_range: summary
            .time_range
            .and_then(format_date_range)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        lurker_ratio: summary
            .lurker_ratio
            .map(format_percent)
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        source_count: summary
            .sources
            .as_ref()
            .map(|sources| sources.len().to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        source_preview: summary
            .sources
            .as_deref()
            .map(|sources| preview_list(sources, preview_limit))
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
    }
}

/// `"a, b, c…"` once the list runs past `limit`; the placeholder for an empty list.
pub fn preview_list(items: &[String], limit: usize) -> String {
    if items.is_empty() {
        return PLACEHOLDER.to_string();
    }
    let mut label = items
        .iter()
        .take(limit)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > limit {
        label.push('…');
    }
    label
}

/// `Jan 09, 2026 → Jan 10, 2026` (UTC calendar days).
pub fn format_date_range(range: TimeRange) -> Option<String> {
    let format = format_description!("[month repr:short] [day], [year]");
    let start = OffsetDateTime::from_unix_timestamp(range.start).ok()?;
    let end = OffsetDateTime::from_unix_timestamp(range.end).ok()?;
    Some(format!(
        "{} → {}",
        start.format(&format).ok()?,
        end.format(&format).ok()?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> SummaryStats {
        SummaryStats {
            total_events: Some(1_204),
            total_posts: Some(200),
            total_comments: Some(1_004),
            unique_users: Some(311),
            comments_per_post: Some(5.02),
            lurker_ratio: Some(0.456),
            time_range: Some(TimeRange {
                start: 1_767_916_800,
                end: 1_768_003_200,
            }),
            sources: Some(vec![
                "boards.ie".into(),
                "reddit".into(),
                "youtube".into(),
                "forum".into(),
            ]),
        }
    }

    #[test]
    fn projects_every_card() {
        let display = project(Some(&summary()));

        assert_eq!(display.total_events, "1204");
        assert_eq!(display.posts_comments, "200 / 1004");
        assert_eq!(display.comments_per_post, "5.02");
        assert_eq!(display.lurker_ratio, "46%");
        assert_eq!(display.time_range, "Jan 09, 2026 → Jan 10, 2026");
        assert_eq!(display.source_count, "4");
        assert_eq!(display.source_preview, "boards.ie, reddit, youtube…");
    }

    #[test]
    fn missing_fields_fall_back_to_placeholder() {
        let partial = SummaryStats {
            total_events: Some(3),
            total_posts: Some(1),
            ..SummaryStats::default()
        };
        let display = project(Some(&partial));

        assert_eq!(display.total_events, "3");
        assert_eq!(display.posts_comments, PLACEHOLDER);
        assert_eq!(display.lurker_ratio, PLACEHOLDER);
        assert_eq!(display.time_range, PLACEHOLDER);
        assert_eq!(project(None), DisplaySummary::placeholder());
    }

    #[test]
    fn short_source_lists_have_no_ellipsis() {
        let sources = vec!["reddit".to_string(), "youtube".to_string()];
        assert_eq!(preview_list(&sources, 3), "reddit, youtube");
        assert_eq!(preview_list(&[], 3), PLACEHOLDER);
    }

    #[test]
    fn projection_is_idempotent() {
        let input = summary();
        assert_eq!(project(Some(&input)), project(Some(&input)));
    }
}
