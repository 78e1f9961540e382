use api::{TopUser, User};
use dioxus::prelude::*;

use crate::core::users::{leaderboard_key, resolve, UserDetail};

#[component]
pub fn Leaderboard(entries: Vec<TopUser>, selected_user: Signal<Option<String>>) -> Element {
    let active = selected_user();

    rsx! {
        section { class: "stats-card stats-leaderboard",
            div { class: "stats-card__header",
                h2 { "Most active users" }
                if !entries.is_empty() {
                    span { class: "stats-card__meta", "Top {entries.len()}" }
                }
            }

            if entries.is_empty() {
                p { class: "stats-card__placeholder", "No user activity recorded." }
            } else {
                ol { class: "stats-leaderboard__items",
                    for entry in entries.into_iter() {
                        {render_entry(entry, active.as_deref(), selected_user)}
                    }
                }
            }
        }
    }
}

fn render_entry(
    entry: TopUser,
    active: Option<&str>,
    mut selected_user: Signal<Option<String>>,
) -> Element {
    let key = leaderboard_key(&entry);
    let is_active = active == Some(entry.author.as_str());
    let author = entry.author.clone();

    rsx! {
        li { key: "{key}",
            class: format!(
                "stats-leaderboard__item {}",
                if is_active { "stats-leaderboard__item--active" } else { "" }
            ),
            button {
                r#type: "button",
                class: "stats-leaderboard__button",
                onclick: move |_| selected_user.set(Some(author.clone())),
                span { class: "stats-leaderboard__author", "{entry.author}" }
                span { class: "stats-leaderboard__source", "{entry.source}" }
                span { class: "stats-leaderboard__count", "{entry.count}" }
            }
        }
    }
}

#[component]
pub fn UserDetailPanel(users: Vec<User>, selected_user: Signal<Option<String>>) -> Element {
    let selected = selected_user();

    rsx! {
        section { class: "stats-card stats-user-detail",
            div { class: "stats-card__header",
                h2 { "User details" }
            }

            match selected {
                None => rsx! {
                    p { class: "stats-card__placeholder", "Select a user to see their activity." }
                },
                Some(username) => match resolve(&username, &users) {
                    Some(user) => render_detail(&UserDetail::from_user(user)),
                    None => rsx! {
                        p { class: "stats-card__placeholder", "No details available for {username}." }
                    },
                },
            }
        }
    }
}

fn render_detail(detail: &UserDetail) -> Element {
    rsx! {
        div { class: "stats-user-detail__summary",
            h3 { "{detail.author}" }
        }
        ul { class: "stats-user-detail__facts",
            li { "Posts: {detail.posts}" }
            li { "Comments: {detail.comments}" }
            li { "Comments per post: {detail.comment_post_ratio}" }
            li { "Share of activity as comments: {detail.comment_share}" }
            if let Some(vocabulary) = detail.vocabulary.as_ref() {
                li { "Vocabulary richness: {vocabulary}" }
            }
        }
    }
}
