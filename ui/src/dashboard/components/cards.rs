use dioxus::prelude::*;

use crate::core::summary::DisplaySummary;

pub const NO_EVENTS: &str = "No events in this dataset. Upload files or widen the filter.";

#[component]
pub fn SummaryCards(summary: DisplaySummary, empty: bool) -> Element {
    let cards = [
        ("Total events", summary.total_events.clone(), None),
        ("Unique users", summary.unique_users.clone(), None),
        ("Posts / comments", summary.posts_comments.clone(), None),
        ("Comments per post", summary.comments_per_post.clone(), None),
        (
            "Lurker ratio",
            summary.lurker_ratio.clone(),
            Some("Users with a single event"),
        ),
        ("Time range", summary.time_range.clone(), None),
        (
            "Sources",
            summary.source_count.clone(),
            Some(summary.source_preview.as_str()),
        ),
    ];

    rsx! {
        section { class: "stats-card stats-summary",
            if empty {
                p { class: "stats-card__placeholder", "{NO_EVENTS}" }
            }
            div { class: "stats-summary__grid",
                for (label, value, meta) in cards.into_iter() {
                    div { key: "{label}", class: "stats-highlight",
                        span { class: "stats-highlight__label", "{label}" }
                        strong { class: "stats-highlight__value", "{value}" }
                        if let Some(meta) = meta {
                            span { class: "stats-highlight__meta", "{meta}" }
                        }
                    }
                }
            }
        }
    }
}
