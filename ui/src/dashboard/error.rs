use api::ApiError;
use thiserror::Error;

/// Statistic categories read in one fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Summary,
    Time,
    Users,
    Content,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Summary, Self::Time, Self::Users, Self::Content];

    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Time => "time",
            Self::Users => "users",
            Self::Content => "content",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFailure {
    pub category: Category,
    pub error: ApiError,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// At least one category read failed; the whole cycle is void.
    #[error("couldn't load {}", failed_labels(.failures))]
    Aggregate { failures: Vec<CategoryFailure> },
    /// The backend rejected a filter change. No refetch follows.
    #[error("{action} failed: {source}")]
    FilterMutation {
        action: &'static str,
        source: ApiError,
    },
    /// Rejected before any request was made.
    #[error("{0}")]
    InvalidFilter(String),
    #[error("statistics backend unavailable: {0}")]
    Unavailable(ApiError),
}

impl DashboardError {
    pub fn failed_categories(&self) -> Vec<Category> {
        match self {
            Self::Aggregate { failures } => failures.iter().map(|f| f.category).collect(),
            _ => Vec::new(),
        }
    }
}

fn failed_labels(failures: &[CategoryFailure]) -> String {
    failures
        .iter()
        .map(|failure| failure.category.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_message_lists_every_failed_category() {
        let error = DashboardError::Aggregate {
            failures: vec![
                CategoryFailure {
                    category: Category::Time,
                    error: ApiError::Status {
                        endpoint: "time",
                        status: 500,
                    },
                },
                CategoryFailure {
                    category: Category::Content,
                    error: ApiError::Transport {
                        endpoint: "content",
                        message: "connection refused".into(),
                    },
                },
            ],
        };

        assert_eq!(error.to_string(), "couldn't load time, content");
        assert_eq!(
            error.failed_categories(),
            vec![Category::Time, Category::Content]
        );
    }
}
