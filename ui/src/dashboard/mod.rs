//! Stats page: fetch cycles, their view state and the panels that render it.

mod controller;
mod error;
mod filter;
mod orchestrator;
mod state;

pub mod components;

pub use controller::{use_dashboard, DashboardEvent, DashboardHandle};
pub use error::{Category, CategoryFailure, DashboardError};
pub use filter::{FilterAction, FilterQuery, INVERTED_RANGE, NO_SOURCE_SELECTED};
pub use orchestrator::FetchOrchestrator;
pub use state::{CycleId, CyclePayload, DashboardData, DashboardStore, DashboardViewState};
