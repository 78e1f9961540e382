//! Shared UI crate for Pulseboard. Data shaping, the stats dashboard and the views live here;
//! the `web` and `desktop` crates only add routing and a launcher.

pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod upload;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
