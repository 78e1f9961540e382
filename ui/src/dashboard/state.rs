//! Dashboard view state and the cycle bookkeeping around it.

use api::{ContentStats, PhraseFrequency, SummaryStats, TimeStats, TopUser, User, UserStats};
use tracing::{debug, info, warn};

use super::error::{Category, DashboardError};
use super::filter::{FilterAction, FilterQuery};
use crate::core::config::DashboardConfig;
use crate::core::content::{reply_timings, word_cloud, ReplyTiming, WordWeight};
use crate::core::emotion::{analyze, TopicReport};
use crate::core::graph::InteractionGraph;
use crate::core::series::{filter_series, HeatmapMatrix};
use crate::core::summary::{project_with_limit, DisplaySummary};
use crate::core::users::{leaderboard, resolve};

/// Monotonic tag of a fetch cycle. Only the most recently started cycle may publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CycleId(u64);

impl CycleId {
    fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Raw payloads of one successful cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CyclePayload {
    pub summary: SummaryStats,
    pub time: TimeStats,
    pub users: UserStats,
    pub content: ContentStats,
}

/// Everything the stats page renders, reshaped once per cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub filter: FilterQuery,
    pub summary: DisplaySummary,
    pub total_events: Option<u64>,
    /// Data sources of the loaded dataset, offered by the source filter.
    pub sources: Vec<String>,
    pub events_per_day: Vec<api::EventCount>,
    pub heatmap: HeatmapMatrix,
    pub burstiness: Option<f64>,
    pub leaderboard: Vec<TopUser>,
    pub users: Vec<User>,
    pub graph: InteractionGraph,
    pub word_cloud: Vec<WordWeight>,
    pub two_word_phrases: Vec<PhraseFrequency>,
    pub three_word_phrases: Vec<PhraseFrequency>,
    pub topics: TopicReport,
    pub reply_timings: Vec<ReplyTiming>,
}

impl DashboardData {
    pub fn assemble(filter: FilterQuery, payload: CyclePayload, config: &DashboardConfig) -> Self {
        let CyclePayload {
            summary,
            time,
            users,
            content,
        } = payload;

        let events_per_day = match config.events_since_date() {
            Some(since) => filter_series(&time.events_per_day, since),
            None => time.events_per_day,
        };

        Self {
            filter,
            summary: project_with_limit(Some(&summary), config.source_preview_limit),
            total_events: summary.total_events,
            sources: summary.sources.unwrap_or_default(),
            events_per_day,
            heatmap: HeatmapMatrix::from_rows(&time.weekday_hour_heatmap),
            burstiness: time.burstiness.filter(|b| b.is_finite()),
            leaderboard: leaderboard(&users.top_users, config.top_users_limit),
            graph: InteractionGraph::build(&users.interaction_graph),
            users: users.users,
            word_cloud: word_cloud(&content.word_frequencies, config.word_cloud_limit),
            two_word_phrases: content.common_two_phrases,
            three_word_phrases: content.common_three_phrases,
            topics: analyze(&content.average_emotion_by_topic, config.sample_thresholds()),
            reply_timings: reply_timings(&content.reply_time_by_emotion),
        }
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        resolve(username, &self.users)
    }

    /// Whether `category` came back without anything to draw. Not an error: the panels show
    /// their empty message instead.
    pub fn is_empty(&self, category: Category) -> bool {
        match category {
            Category::Summary => self.total_events.unwrap_or(0) == 0,
            Category::Time => self.events_per_day.is_empty() && self.heatmap.is_empty(),
            Category::Users => self.leaderboard.is_empty() && self.graph.is_empty(),
            Category::Content => {
                self.word_cloud.is_empty()
                    && self.topics.is_empty()
                    && self.two_word_phrases.is_empty()
                    && self.three_word_phrases.is_empty()
            }
        }
    }

    pub fn empty_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|&category| self.is_empty(category))
            .collect()
    }
}

/// Exactly one of these is shown at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardViewState {
    #[default]
    Idle,
    Loading,
    Mutating { action: &'static str },
    Refetching,
    Ready(Box<DashboardData>),
    Failed(DashboardError),
}

impl DashboardViewState {
    pub fn from_result(result: Result<DashboardData, DashboardError>) -> Self {
        match result {
            Ok(data) => Self::Ready(Box::new(data)),
            Err(err) => Self::Failed(err),
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Mutating { .. } | Self::Refetching)
    }

    pub fn data(&self) -> Option<&DashboardData> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&DashboardError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Drives `DashboardViewState` one transition per external call.
///
/// Every load or filter action starts a new cycle; a completion from any older cycle is dropped
/// so the most recently started cycle always decides what is shown.
#[derive(Debug, Clone, Default)]
pub struct DashboardStore {
    latest: CycleId,
    view: DashboardViewState,
    active_filter: FilterQuery,
}

impl DashboardStore {
    pub fn view(&self) -> &DashboardViewState {
        &self.view
    }

    pub fn active_filter(&self) -> &FilterQuery {
        &self.active_filter
    }

    pub fn latest_cycle(&self) -> CycleId {
        self.latest
    }

    pub fn is_current(&self, cycle: CycleId) -> bool {
        cycle == self.latest
    }

    /// `Idle|Ready|Failed → Loading` for a plain reload of the active filter.
    pub fn begin_load(&mut self) -> CycleId {
        self.latest = self.latest.next();
        self.view = DashboardViewState::Loading;
        info!(cycle = self.latest.value(), "fetch cycle started");
        self.latest
    }

    /// `→ Mutating` while the backend applies `action`.
    pub fn begin_mutation(&mut self, action: &FilterAction) -> CycleId {
        self.latest = self.latest.next();
        self.view = DashboardViewState::Mutating {
            action: action.label(),
        };
        info!(
            cycle = self.latest.value(),
            action = action.label(),
            "filter mutation started"
        );
        self.latest
    }

    /// `Mutating → Refetching`. Returns `false` when a newer cycle has started since, in which
    /// case the caller must not refetch.
    pub fn mutation_acknowledged(&mut self, cycle: CycleId, filter: FilterQuery) -> bool {
        if !self.is_current(cycle) {
            debug!(
                cycle = cycle.value(),
                latest = self.latest.value(),
                "ignoring acknowledgement of superseded mutation"
            );
            return false;
        }
        self.active_filter = filter;
        self.view = DashboardViewState::Refetching;
        true
    }

    /// `→ Ready|Failed`. Returns `false` (and changes nothing) for a superseded cycle.
    pub fn finish(&mut self, cycle: CycleId, result: Result<DashboardData, DashboardError>) -> bool {
        if !self.is_current(cycle) {
            debug!(
                cycle = cycle.value(),
                latest = self.latest.value(),
                "discarding result of superseded cycle"
            );
            return false;
        }

        match &result {
            Ok(data) => {
                let empty = data.empty_categories();
                if !empty.is_empty() {
                    debug!(cycle = cycle.value(), ?empty, "cycle returned empty categories");
                }
                info!(cycle = cycle.value(), "fetch cycle ready");
            }
            Err(err) => warn!(cycle = cycle.value(), error = %err, "fetch cycle failed"),
        }

        self.view = DashboardViewState::from_result(result);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{ApiError, EventCount, TopicEmotionRow};

    fn payload() -> CyclePayload {
        let mut payload = CyclePayload::default();
        payload.summary.total_events = Some(12);
        payload.time.events_per_day = vec![
            EventCount::new("2026-01-09", 4),
            EventCount::new("2026-01-10", 8),
        ];
        payload.content.average_emotion_by_topic = vec![TopicEmotionRow::new(
            "Housing",
            30,
            [("emotion_anger", 0.7), ("emotion_joy", 0.1)],
        )];
        payload
    }

    fn data() -> DashboardData {
        DashboardData::assemble(FilterQuery::default(), payload(), &DashboardConfig::default())
    }

    #[test]
    fn assemble_shapes_every_category() {
        let data = data();
        assert_eq!(data.summary.total_events, "12");
        assert_eq!(data.events_per_day.len(), 2);
        assert_eq!(data.heatmap.rows().count(), 7);
        assert_eq!(data.topics.topics[0].dominant.emotion, "anger");
        assert_eq!(data.empty_categories(), vec![Category::Users]);
    }

    #[test]
    fn zero_event_summary_is_an_empty_category() {
        let mut payload = payload();
        payload.summary.total_events = Some(0);
        let data =
            DashboardData::assemble(FilterQuery::default(), payload, &DashboardConfig::default());

        assert!(data.is_empty(Category::Summary));
        assert!(!data.is_empty(Category::Time));
        assert_eq!(
            data.empty_categories(),
            vec![Category::Summary, Category::Users]
        );
    }

    #[test]
    fn events_since_trims_the_series() {
        let config = DashboardConfig {
            events_since: Some("2026-01-10".into()),
            ..DashboardConfig::default()
        };
        let data = DashboardData::assemble(FilterQuery::default(), payload(), &config);
        assert_eq!(data.events_per_day, vec![EventCount::new("2026-01-10", 8)]);
    }

    #[test]
    fn load_cycle_reaches_ready() {
        let mut store = DashboardStore::default();
        assert_eq!(store.view(), &DashboardViewState::Idle);

        let cycle = store.begin_load();
        assert!(store.view().is_busy());
        assert!(store.finish(cycle, Ok(data())));
        assert!(store.view().data().is_some());
    }

    #[test]
    fn superseded_cycle_is_discarded() {
        let mut store = DashboardStore::default();
        let first = store.begin_load();
        let second = store.begin_load();

        assert!(store.finish(second, Ok(data())));
        let stale_error = DashboardError::Unavailable(ApiError::Status {
            endpoint: "summary",
            status: 502,
        });
        assert!(!store.finish(first, Err(stale_error)));
        assert!(store.view().data().is_some());
    }

    #[test]
    fn stale_acknowledgement_does_not_move_the_filter() {
        let mut store = DashboardStore::default();
        let search = FilterAction::Search(FilterQuery::text("rent"));
        let first = store.begin_mutation(&search);
        let _reload = store.begin_load();

        assert!(!store.mutation_acknowledged(first, FilterQuery::text("rent")));
        assert!(store.active_filter().is_default());
        assert_eq!(store.view(), &DashboardViewState::Loading);
    }

    #[test]
    fn mutation_goes_through_refetching() {
        let mut store = DashboardStore::default();
        let search = FilterAction::Search(FilterQuery::text("rent"));
        let cycle = store.begin_mutation(&search);
        assert_eq!(
            store.view(),
            &DashboardViewState::Mutating { action: "search" }
        );

        assert!(store.mutation_acknowledged(cycle, FilterQuery::text("rent")));
        assert_eq!(store.view(), &DashboardViewState::Refetching);
        assert_eq!(store.active_filter().text, "rent");
    }

    #[test]
    fn user_lookup_goes_through_the_held_list() {
        let mut data = data();
        data.users.push(User {
            author: "ann".into(),
            ..User::default()
        });
        assert!(data.user("ann").is_some());
        assert!(data.user("missingUser").is_none());
    }
}
