//! Client-side contract with the Pulseboard statistics backend.
//!
//! The backend owns every aggregate (frequency counts, emotion scores, interaction volume);
//! this crate only describes what comes over the wire and how to ask for it:
//! - [`types`] – serde shapes of each read endpoint plus the filter/upload requests.
//! - [`client`] – the [`StatsBackend`] seam and its reqwest-backed [`HttpBackend`].
//! - [`error`] – transport level failures ([`ApiError`]).

pub mod client;
pub mod error;
pub mod types;

pub use client::{Endpoint, HttpBackend, StatsBackend, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use indexmap::IndexMap;
pub use types::*;
