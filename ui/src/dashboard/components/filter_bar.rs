use api::SourceSelection;
use dioxus::prelude::*;

use crate::core::series::parse_day;
use crate::dashboard::{FilterAction, FilterQuery};

/// Search box, date range, source toggles and reset. Emits actions; never talks to the backend.
#[component]
pub fn FilterBar(
    active: FilterQuery,
    sources: Vec<String>,
    busy: bool,
    #[props(!optional)] notice: Option<String>,
    on_action: EventHandler<FilterAction>,
) -> Element {
    let mut text = use_signal(String::new);
    let mut since = use_signal(String::new);
    let mut until = use_signal(String::new);
    // Sources missing from the map count as enabled.
    let mut disabled_sources = use_signal(SourceSelection::new);

    let on_search = move |evt: FormEvent| {
        evt.prevent_default();
        on_action.call(FilterAction::Search(FilterQuery {
            text: text(),
            since: parse_day(&since()),
            until: parse_day(&until()),
        }));
    };

    let sources_for_apply = sources.clone();
    let on_apply_sources = move |_: MouseEvent| {
        let disabled = disabled_sources();
        let selection: SourceSelection = sources_for_apply
            .iter()
            .map(|name| (name.clone(), !disabled.get(name).copied().unwrap_or(false)))
            .collect();
        on_action.call(FilterAction::Sources(selection));
    };

    let on_reset = move |_: MouseEvent| {
        text.set(String::new());
        since.set(String::new());
        until.set(String::new());
        disabled_sources.set(SourceSelection::new());
        on_action.call(FilterAction::Reset);
    };

    let active_label = active.describe();

    rsx! {
        section { class: "stats-card stats-filter",
            form { class: "stats-filter__search", onsubmit: on_search,
                input {
                    r#type: "search",
                    class: "stats-filter__text",
                    placeholder: "Search posts and comments",
                    value: "{text}",
                    oninput: move |evt| text.set(evt.value()),
                }
                label { class: "stats-filter__date",
                    "From"
                    input {
                        r#type: "date",
                        value: "{since}",
                        oninput: move |evt| since.set(evt.value()),
                    }
                }
                label { class: "stats-filter__date",
                    "To"
                    input {
                        r#type: "date",
                        value: "{until}",
                        oninput: move |evt| until.set(evt.value()),
                    }
                }
                button {
                    r#type: "submit",
                    class: "button button--primary stats-filter__submit",
                    disabled: busy,
                    "Search"
                }
                button {
                    r#type: "button",
                    class: "button button--ghost stats-filter__reset",
                    disabled: busy,
                    onclick: on_reset,
                    "Reset"
                }
            }

            if !sources.is_empty() {
                div { class: "stats-filter__sources",
                    for name in sources.iter().cloned() {
                        {source_toggle(name, disabled_sources)}
                    }
                    button {
                        r#type: "button",
                        class: "button stats-filter__apply",
                        disabled: busy,
                        onclick: on_apply_sources,
                        "Apply sources"
                    }
                }
            }

            div { class: "stats-filter__status",
                span { class: "stats-filter__active", "Showing: {active_label}" }
                if let Some(message) = notice {
                    span { class: "stats-filter__notice", role: "alert", "{message}" }
                }
            }
        }
    }
}

fn source_toggle(name: String, mut disabled_sources: Signal<SourceSelection>) -> Element {
    let enabled = !disabled_sources().get(&name).copied().unwrap_or(false);
    let toggled = name.clone();

    rsx! {
        label { key: "{name}", class: "stats-filter__source",
            input {
                r#type: "checkbox",
                checked: enabled,
                onchange: move |evt: FormEvent| {
                    let checked = evt.checked();
                    disabled_sources.with_mut(|map| {
                        map.insert(toggled.clone(), !checked);
                    });
                },
            }
            "{name}"
        }
    }
}
