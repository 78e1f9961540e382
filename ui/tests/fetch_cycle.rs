//! Fetch cycles against an in-memory backend.

use std::cell::RefCell;

use api::{
    ApiError, ContentStats, FilterAck, IndexMap, InteractionAdjacency, SearchRequest,
    SourceSelection, StatsBackend, SummaryStats, TimeStats, TopicEmotionRow, UploadFile,
    UploadReceipt, User, UserStats,
};
use futures::executor::block_on;
use ui::core::config::DashboardConfig;
use ui::dashboard::{
    Category, DashboardError, DashboardStore, DashboardViewState, FetchOrchestrator, FilterAction,
    FilterQuery, NO_SOURCE_SELECTED,
};

struct MockBackend {
    summary: Result<SummaryStats, ApiError>,
    time: Result<TimeStats, ApiError>,
    users: Result<UserStats, ApiError>,
    content: Result<ContentStats, ApiError>,
    mutation: Result<FilterAck, ApiError>,
    calls: RefCell<Vec<String>>,
}

impl Default for MockBackend {
    fn default() -> Self {
        let summary = SummaryStats {
            total_events: Some(3),
            sources: Some(vec!["reddit".into()]),
            ..SummaryStats::default()
        };

        let mut adjacency = InteractionAdjacency::new();
        let mut replies = IndexMap::new();
        replies.insert("bob".to_string(), 2);
        adjacency.insert("ann".to_string(), replies);
        adjacency.insert("bob".to_string(), IndexMap::new());

        let users = UserStats {
            users: vec![User {
                author: "ann".into(),
                post: 1,
                comment: 2,
                ..User::default()
            }],
            interaction_graph: adjacency,
            ..UserStats::default()
        };

        let content = ContentStats {
            average_emotion_by_topic: vec![TopicEmotionRow::new(
                "Transport",
                25,
                [("emotion_fear", 0.5), ("emotion_joy", 0.2)],
            )],
            ..ContentStats::default()
        };

        Self {
            summary: Ok(summary),
            time: Ok(TimeStats::default()),
            users: Ok(users),
            content: Ok(content),
            mutation: Ok(FilterAck { rows: Some(3) }),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl MockBackend {
    fn record(&self, call: &str) {
        self.calls.borrow_mut().push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn reads(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with("read:"))
            .count()
    }
}

impl StatsBackend for MockBackend {
    async fn summary(&self) -> Result<SummaryStats, ApiError> {
        self.record("read:summary");
        self.summary.clone()
    }

    async fn time_stats(&self) -> Result<TimeStats, ApiError> {
        self.record("read:time");
        self.time.clone()
    }

    async fn user_stats(&self) -> Result<UserStats, ApiError> {
        self.record("read:users");
        self.users.clone()
    }

    async fn content_stats(&self) -> Result<ContentStats, ApiError> {
        self.record("read:content");
        self.content.clone()
    }

    async fn search(&self, request: &SearchRequest) -> Result<FilterAck, ApiError> {
        self.record(&format!("search:{}", request.query));
        self.mutation.clone()
    }

    async fn select_sources(&self, _selection: &SourceSelection) -> Result<FilterAck, ApiError> {
        self.record("sources");
        self.mutation.clone()
    }

    async fn reset(&self) -> Result<FilterAck, ApiError> {
        self.record("reset");
        self.mutation.clone()
    }

    async fn upload(
        &self,
        _posts: UploadFile,
        _comments: UploadFile,
    ) -> Result<UploadReceipt, ApiError> {
        self.record("upload");
        Ok(UploadReceipt::default())
    }
}

fn orchestrator(backend: MockBackend) -> FetchOrchestrator<MockBackend> {
    FetchOrchestrator::new(backend, DashboardConfig::default())
}

fn server_error(endpoint: &'static str) -> ApiError {
    ApiError::Status {
        endpoint,
        status: 500,
    }
}

#[test]
fn all_reads_succeeding_yields_ready() {
    let orchestrator = orchestrator(MockBackend::default());
    let state = block_on(orchestrator.run(&FilterQuery::default()));

    let data = state.data().expect("ready state");
    assert_eq!(data.summary.total_events, "3");
    assert_eq!(data.topics.topics[0].dominant.emotion, "fear");
    assert_eq!(data.graph.nodes.len(), 2);
    assert!(data.user("ann").is_some());
    assert!(data.user("missingUser").is_none());
    assert_eq!(orchestrator.backend().reads(), 4);
}

#[test]
fn one_failed_read_fails_the_whole_cycle() {
    let backend = MockBackend {
        time: Err(server_error("time")),
        ..MockBackend::default()
    };
    let orchestrator = orchestrator(backend);

    let state = block_on(orchestrator.run(&FilterQuery::default()));

    assert!(state.data().is_none());
    match state {
        DashboardViewState::Failed(DashboardError::Aggregate { failures }) => {
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].category, Category::Time);
            assert_eq!(failures[0].error, server_error("time"));
        }
        other => panic!("expected aggregate failure, got {other:?}"),
    }
    // The other three reads still ran; their results were dropped.
    assert_eq!(orchestrator.backend().reads(), 4);
}

#[test]
fn every_failed_category_is_reported() {
    let backend = MockBackend {
        summary: Err(server_error("summary")),
        content: Err(ApiError::Decode {
            endpoint: "content",
            message: "expected a map".into(),
        }),
        ..MockBackend::default()
    };

    let state = block_on(orchestrator(backend).run(&FilterQuery::default()));
    let error = state.error().expect("failed state");
    assert_eq!(
        error.failed_categories(),
        vec![Category::Summary, Category::Content]
    );
}

#[test]
fn failed_mutation_skips_the_refetch() {
    let backend = MockBackend {
        mutation: Err(server_error("search")),
        ..MockBackend::default()
    };
    let orchestrator = orchestrator(backend);

    let action = FilterAction::Search(FilterQuery::text("rent"));
    let state = block_on(orchestrator.apply_filter(&FilterQuery::default(), &action));

    assert!(matches!(
        state,
        DashboardViewState::Failed(DashboardError::FilterMutation {
            action: "search",
            ..
        })
    ));
    assert_eq!(orchestrator.backend().calls(), vec!["search:rent"]);
}

#[test]
fn acknowledged_search_refetches_under_the_new_filter() {
    let orchestrator = orchestrator(MockBackend::default());
    let action = FilterAction::Search(FilterQuery::text("  rent "));

    let state = block_on(orchestrator.apply_filter(&FilterQuery::default(), &action));

    let data = state.data().expect("ready state");
    assert_eq!(data.filter.text, "  rent ");
    let calls = orchestrator.backend().calls();
    assert_eq!(calls[0], "search:rent");
    assert_eq!(orchestrator.backend().reads(), 4);
}

#[test]
fn empty_source_selection_never_reaches_the_backend() {
    let orchestrator = orchestrator(MockBackend::default());
    let selection: SourceSelection = [("reddit".to_string(), false)].into_iter().collect();

    let state = block_on(
        orchestrator.apply_filter(&FilterQuery::default(), &FilterAction::Sources(selection)),
    );

    assert_eq!(
        state,
        DashboardViewState::Failed(DashboardError::InvalidFilter(
            NO_SOURCE_SELECTED.to_string()
        ))
    );
    assert!(orchestrator.backend().calls().is_empty());
}

#[test]
fn reset_refetches_the_unfiltered_dataset() {
    let orchestrator = orchestrator(MockBackend::default());
    let current = FilterQuery::text("rent");

    let state = block_on(orchestrator.apply_filter(&current, &FilterAction::Reset));

    assert!(state.data().expect("ready state").filter.is_default());
    assert_eq!(orchestrator.backend().calls()[0], "reset");
}

#[test]
fn store_keeps_the_most_recently_started_cycle() {
    let slow = orchestrator(MockBackend {
        users: Err(server_error("users")),
        ..MockBackend::default()
    });
    let fast = orchestrator(MockBackend::default());
    let mut store = DashboardStore::default();

    let first = store.begin_load();
    let second = store.begin_load();

    // The second cycle completes first; the first one's late failure must not replace it.
    let second_result = block_on(fast.fetch(store.active_filter()));
    assert!(store.finish(second, second_result));

    let first_result = block_on(slow.fetch(store.active_filter()));
    assert!(first_result.is_err());
    assert!(!store.finish(first, first_result));

    assert!(store.view().data().is_some());
    assert_eq!(store.latest_cycle(), second);
}

#[test]
fn mutation_cycle_through_the_store() {
    let orchestrator = orchestrator(MockBackend::default());
    let mut store = DashboardStore::default();
    let action = FilterAction::Search(FilterQuery::text("bus"));

    let cycle = store.begin_mutation(&action);
    let current = store.active_filter().clone();
    block_on(orchestrator.mutate(&action)).expect("mutation acknowledged");

    let filter = action.resulting_filter(&current);
    assert!(store.mutation_acknowledged(cycle, filter.clone()));
    assert_eq!(store.view(), &DashboardViewState::Refetching);

    let result = block_on(orchestrator.fetch(&filter));
    assert!(store.finish(cycle, result));
    assert_eq!(store.active_filter().text, "bus");
    assert!(store.view().data().is_some());
}
