use dioxus::logger::tracing::{info, Level};
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::config::DashboardConfig;
use ui::core::platform::Platform;
use ui::views::{Home, Stats, Upload};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/upload")]
    UploadPage {},
    #[route("/stats")]
    Stats {},
}

// Shared theme (ui/assets/theme/main.css); the web crate ships no stylesheet of its own.
const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_upload(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::UploadPage {},
        "{label}"
    })
}
fn nav_stats(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Stats {},
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger already initialised: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        home: nav_home,
        upload: nav_upload,
        stats: nav_stats,
    });

    let config = use_context_provider(DashboardConfig::load);
    use_hook(|| {
        info!(
            platform = Platform::current().label(),
            api = %config.api_base_url,
            "pulseboard starting"
        )
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        Router::<Route> {}
    }
}

/// Upload page; moves on to the stats page once the backend accepted the dataset.
#[component]
fn UploadPage() -> Element {
    let navigator = use_navigator();

    rsx! {
        Upload {
            on_uploaded: move |_| {
                navigator.push(Route::Stats {});
            },
        }
    }
}

/// A web-specific Router around the shared `Navbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
