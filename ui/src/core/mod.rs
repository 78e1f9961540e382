//! Data shaping shared by every dashboard view. Nothing in here touches Dioxus state.

pub mod config;
pub mod content;
pub mod emotion;
pub mod format;
pub mod graph;
pub mod platform;
pub mod series;
pub mod summary;
pub mod users;
