use dioxus::prelude::*;
use tracing::debug;

#[component]
pub fn Home() -> Element {
    // Subscribe to global language code (if provided) so we re-render on change.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_current = lang_code
        .as_ref()
        .map(|s| s())
        .unwrap_or_else(|| "en-US".to_string());
    debug!(lang = %lang_current, "home render");

    rsx! {
        section { class: "page page-home",
            h1 { {crate::t!("home-title")} }
            p { {crate::t!("home-tagline-short")} }
            p { {crate::t!("home-intro-1")} }

            ul { class: "page-home__features",
                li { {crate::t!("home-feature-upload")} }
                li { {crate::t!("home-feature-stats")} }
                li { {crate::t!("home-feature-filter")} }
            }
            p { class: "page-home__cta",
                {crate::t!("home-cta")}
            }
        }
    }
}
