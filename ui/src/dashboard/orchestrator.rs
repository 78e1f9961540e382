//! One fetch cycle: four concurrent category reads, joined all-or-nothing.

use api::{ApiError, FilterAck, StatsBackend};
use futures::future::join4;
use tracing::{info, warn};

use super::error::{Category, CategoryFailure, DashboardError};
use super::filter::{FilterAction, FilterQuery};
use super::state::{CyclePayload, DashboardData, DashboardViewState};
use crate::core::config::DashboardConfig;

#[derive(Debug, Clone)]
pub struct FetchOrchestrator<B> {
    backend: B,
    config: DashboardConfig,
}

impl<B: StatsBackend> FetchOrchestrator<B> {
    pub fn new(backend: B, config: DashboardConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Read summary, time, users and content concurrently.
    ///
    /// Succeeds only when all four reads do. Otherwise the error names every failed category
    /// and whatever did arrive is dropped.
    pub async fn fetch(&self, filter: &FilterQuery) -> Result<DashboardData, DashboardError> {
        let (summary, time, users, content) = join4(
            self.backend.summary(),
            self.backend.time_stats(),
            self.backend.user_stats(),
            self.backend.content_stats(),
        )
        .await;

        let mut failures = Vec::new();
        let summary = settle(Category::Summary, summary, &mut failures);
        let time = settle(Category::Time, time, &mut failures);
        let users = settle(Category::Users, users, &mut failures);
        let content = settle(Category::Content, content, &mut failures);

        match (summary, time, users, content) {
            (Some(summary), Some(time), Some(users), Some(content)) => {
                let payload = CyclePayload {
                    summary,
                    time,
                    users,
                    content,
                };
                Ok(DashboardData::assemble(
                    filter.clone(),
                    payload,
                    &self.config,
                ))
            }
            _ => Err(DashboardError::Aggregate { failures }),
        }
    }

    pub async fn run(&self, filter: &FilterQuery) -> DashboardViewState {
        DashboardViewState::from_result(self.fetch(filter).await)
    }

    /// Ask the backend to apply `action`. Invalid actions never reach the network.
    pub async fn mutate(&self, action: &FilterAction) -> Result<FilterAck, DashboardError> {
        action.validate()?;

        let result = match action {
            FilterAction::Search(query) => self.backend.search(&query.to_request()).await,
            FilterAction::Sources(selection) => self.backend.select_sources(selection).await,
            FilterAction::Reset => self.backend.reset().await,
        };

        match result {
            Ok(ack) => {
                info!(action = action.label(), rows = ?ack.rows, "filter applied");
                Ok(ack)
            }
            Err(source) => {
                warn!(action = action.label(), error = %source, "filter mutation failed");
                Err(DashboardError::FilterMutation {
                    action: action.label(),
                    source,
                })
            }
        }
    }

    /// Mutate, then refetch under the resulting filter. A failed mutation is final.
    pub async fn apply_filter(
        &self,
        current: &FilterQuery,
        action: &FilterAction,
    ) -> DashboardViewState {
        match self.mutate(action).await {
            Ok(_) => self.run(&action.resulting_filter(current)).await,
            Err(err) => DashboardViewState::Failed(err),
        }
    }
}

fn settle<T>(
    category: Category,
    result: Result<T, ApiError>,
    failures: &mut Vec<CategoryFailure>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(category = category.label(), error = %error, "category read failed");
            failures.push(CategoryFailure { category, error });
            None
        }
    }
}
