use api::PhraseFrequency;
use dioxus::prelude::*;

use crate::core::content::{ReplyTiming, WordWeight};
use crate::core::emotion::TopicReport;
use crate::core::format::{format_number, format_seconds, PLACEHOLDER};

#[component]
pub fn WordCloud(words: Vec<WordWeight>) -> Element {
    rsx! {
        section { class: "stats-card stats-words",
            div { class: "stats-card__header",
                h2 { "Most common words" }
            }
            if words.is_empty() {
                p { class: "stats-card__placeholder", "No words to show." }
            } else {
                div { class: "stats-words__cloud",
                    for word in words.iter() {
                        span {
                            key: "{word.text}",
                            class: "stats-words__word",
                            style: format!("font-size: {:.0}px", word.font_size()),
                            title: "{word.value}",
                            "{word.text}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn PhraseLists(two_word: Vec<PhraseFrequency>, three_word: Vec<PhraseFrequency>) -> Element {
    rsx! {
        section { class: "stats-card stats-phrases",
            div { class: "stats-card__header",
                h2 { "Common phrases" }
            }
            div { class: "stats-phrases__columns",
                {phrase_column("Two-word phrases", &two_word)}
                {phrase_column("Three-word phrases", &three_word)}
            }
        }
    }
}

fn phrase_column(title: &str, phrases: &[PhraseFrequency]) -> Element {
    rsx! {
        div { class: "stats-phrases__column",
            h3 { "{title}" }
            if phrases.is_empty() {
                p { class: "stats-card__placeholder", "{PLACEHOLDER}" }
            } else {
                ol { class: "stats-phrases__list",
                    for phrase in phrases.iter() {
                        li { key: "{phrase.phrase}",
                            span { class: "stats-phrases__text", "{phrase.phrase}" }
                            span { class: "stats-phrases__count", "{phrase.count}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn TopicTable(report: TopicReport) -> Element {
    let median = report
        .median_sample
        .map(|n| n.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());

    rsx! {
        section { class: "stats-card stats-topics",
            div { class: "stats-card__header",
                h2 { "Emotion by topic" }
                if !report.is_empty() {
                    span { class: "stats-card__meta",
                        "{report.topics.len()} topics · median sample {median} · "
                        "{report.low_sample_topics} low · {report.stable_topics} stable"
                    }
                }
            }

            if report.is_empty() {
                p { class: "stats-card__placeholder", "No topic data available." }
            } else {
                table { class: "stats-table",
                    thead {
                        tr {
                            th { "Topic" }
                            th { "Events" }
                            th { "Dominant emotion" }
                            th { "Score" }
                            th { "Sample" }
                        }
                    }
                    tbody {
                        for topic in report.topics.iter() {
                            tr { key: "{topic.topic}",
                                td { "{topic.topic}" }
                                td { "{topic.n}" }
                                td { class: "stats-topics__emotion", "{topic.dominant.emotion}" }
                                td { "{format_number(topic.dominant.confidence, 2)}" }
                                td {
                                    span { class: "topic-reliability {topic.reliability.css_class()}",
                                        "{topic.reliability.label()}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ReplyTimingTable(rows: Vec<ReplyTiming>) -> Element {
    rsx! {
        section { class: "stats-card stats-replies",
            div { class: "stats-card__header",
                h2 { "Reply time by emotion" }
            }
            if rows.is_empty() {
                p { class: "stats-card__placeholder", "No replies could be timed." }
            } else {
                table { class: "stats-table",
                    thead {
                        tr {
                            th { "Emotion" }
                            th { "Mean reply time" }
                            th { "Replies" }
                        }
                    }
                    tbody {
                        for row in rows.iter() {
                            tr { key: "{row.emotion}",
                                td { "{row.emotion}" }
                                td { {row.mean_seconds.map(format_seconds).unwrap_or_else(|| PLACEHOLDER.to_string())} }
                                td { "{row.replies}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
