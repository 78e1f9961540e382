//! The active query and the actions that change it.

use api::{SearchRequest, SourceSelection};
use time::Date;

use super::error::DashboardError;
use crate::core::series::format_day;

pub const NO_SOURCE_SELECTED: &str = "Please choose at least one data source";
pub const INVERTED_RANGE: &str = "Start date must be on or before the end date";

/// Free text plus an optional inclusive date range. `Default` is the unfiltered dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub text: String,
    pub since: Option<Date>,
    pub until: Option<Date>,
}

impl FilterQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn is_default(&self) -> bool {
        self.text.trim().is_empty() && self.since.is_none() && self.until.is_none()
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        match (self.since, self.until) {
            (Some(since), Some(until)) if since > until => {
                Err(DashboardError::InvalidFilter(INVERTED_RANGE.to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.text.trim().to_string(),
            start: self.since.map(format_day),
            end: self.until.map(format_day),
        }
    }

    /// Short label for the active filter chip.
    pub fn describe(&self) -> String {
        if self.is_default() {
            return "All events".to_string();
        }

        let mut parts = Vec::new();
        let text = self.text.trim();
        if !text.is_empty() {
            parts.push(format!("\"{text}\""));
        }
        match (self.since, self.until) {
            (Some(since), Some(until)) => {
                parts.push(format!("{} → {}", format_day(since), format_day(until)))
            }
            (Some(since), None) => parts.push(format!("from {}", format_day(since))),
            (None, Some(until)) => parts.push(format!("until {}", format_day(until))),
            (None, None) => {}
        }
        parts.join(" · ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    Search(FilterQuery),
    Sources(SourceSelection),
    Reset,
}

impl FilterAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::Sources(_) => "source selection",
            Self::Reset => "reset",
        }
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        match self {
            Self::Search(query) => query.validate(),
            Self::Sources(selection) if !selection.values().any(|enabled| *enabled) => Err(
                DashboardError::InvalidFilter(NO_SOURCE_SELECTED.to_string()),
            ),
            Self::Sources(_) | Self::Reset => Ok(()),
        }
    }

    /// Filter in force once the backend has acknowledged this action.
    pub fn resulting_filter(&self, current: &FilterQuery) -> FilterQuery {
        match self {
            Self::Search(query) => query.clone(),
            Self::Sources(_) => current.clone(),
            Self::Reset => FilterQuery::default(),
        }
    }
}
