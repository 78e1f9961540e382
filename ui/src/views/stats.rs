use dioxus::prelude::*;

use crate::dashboard::components::{
    ActivityHeatmap, EventsChart, FilterBar, InteractionGraphPanel, Leaderboard, PhraseLists,
    ReplyTimingTable, SummaryCards, TopicTable, UserDetailPanel, WordCloud,
};
use crate::dashboard::{use_dashboard, Category, DashboardData, DashboardViewState};

#[component]
pub fn Stats() -> Element {
    let dashboard = use_dashboard();
    let (view, active) = {
        let store = dashboard.store.read();
        (store.view().clone(), store.active_filter().clone())
    };

    let busy = view.is_busy();
    let sources = view.data().map(|data| data.sources.clone()).unwrap_or_default();
    let notice = (dashboard.notice)();

    let apply_handle = dashboard.clone();
    let retry_handle = dashboard.clone();
    let selected_user = dashboard.selected_user;

    rsx! {
        article { class: "page page-stats",
            h1 { {crate::t!("stats-title")} }

            FilterBar {
                active,
                sources,
                busy,
                notice,
                on_action: move |action| apply_handle.apply(action),
            }

            match view {
                DashboardViewState::Idle | DashboardViewState::Loading => rsx! {
                    {busy_panel(crate::t!("stats-loading"))}
                },
                DashboardViewState::Mutating { .. } => rsx! {
                    {busy_panel(crate::t!("stats-applying-filter"))}
                },
                DashboardViewState::Refetching => rsx! {
                    {busy_panel(crate::t!("stats-refreshing"))}
                },
                DashboardViewState::Failed(err) => rsx! {
                    section { class: "stats-card stats-error", role: "alert",
                        h2 { {crate::t!("stats-error-title")} }
                        p { "{err}" }
                        button {
                            r#type: "button",
                            class: "button stats-error__retry",
                            onclick: move |_| retry_handle.reload(),
                            {crate::t!("stats-retry")}
                        }
                    }
                },
                DashboardViewState::Ready(data) => render_ready(*data, selected_user),
            }
        }
    }
}

fn busy_panel(label: String) -> Element {
    rsx! {
        section { class: "stats-card stats-busy", aria_busy: "true",
            p { class: "stats-card__placeholder", "{label}" }
        }
    }
}

fn render_ready(data: DashboardData, selected_user: Signal<Option<String>>) -> Element {
    let no_events = data.is_empty(Category::Summary);
    let DashboardData {
        summary,
        events_per_day,
        heatmap,
        burstiness,
        leaderboard,
        users,
        graph,
        word_cloud,
        two_word_phrases,
        three_word_phrases,
        topics,
        reply_timings,
        ..
    } = data;

    rsx! {
        SummaryCards { summary, empty: no_events }
        div { class: "stats-grid",
            EventsChart { points: events_per_day, burstiness }
            ActivityHeatmap { matrix: heatmap }
        }
        div { class: "stats-grid",
            Leaderboard { entries: leaderboard, selected_user }
            UserDetailPanel { users, selected_user }
        }
        InteractionGraphPanel { graph }
        div { class: "stats-grid",
            WordCloud { words: word_cloud }
            PhraseLists { two_word: two_word_phrases, three_word: three_word_phrases }
        }
        TopicTable { report: topics }
        ReplyTimingTable { rows: reply_timings }
    }
}
