use api::HttpBackend;
use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::{debug, error};

use super::error::DashboardError;
use super::filter::FilterAction;
use super::orchestrator::FetchOrchestrator;
use super::state::DashboardStore;
use crate::core::config::DashboardConfig;
use crate::core::platform;

type Orchestrator = FetchOrchestrator<HttpBackend>;

#[derive(Debug, Clone)]
pub enum DashboardEvent {
    /// Refetch under the active filter.
    Load,
    Apply(FilterAction),
}

/// Signals of the stats page plus the channel that starts cycles.
#[derive(Clone)]
pub struct DashboardHandle {
    pub store: Signal<DashboardStore>,
    /// Local validation message; never replaces the dashboard itself.
    pub notice: Signal<Option<String>>,
    pub selected_user: Signal<Option<String>>,
    events: Coroutine<DashboardEvent>,
}

impl DashboardHandle {
    pub fn reload(&self) {
        self.events.send(DashboardEvent::Load);
    }

    pub fn apply(&self, action: FilterAction) {
        self.events.send(DashboardEvent::Apply(action));
    }
}

/// Wire the stats page to the backend named by the `DashboardConfig` in context (or the
/// environment defaults) and start the first cycle.
pub fn use_dashboard() -> DashboardHandle {
    let config = try_use_context::<DashboardConfig>().unwrap_or_else(DashboardConfig::load);
    let store = use_signal(DashboardStore::default);
    let notice = use_signal(|| Option::<String>::None);
    let selected_user = use_signal(|| Option::<String>::None);

    let orchestrator = use_hook(move || {
        HttpBackend::new(config.api_base_url.clone())
            .map(|backend| FetchOrchestrator::new(backend, config))
    });

    let events = use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| {
        let orchestrator = orchestrator.clone();
        let mut store = store;
        let mut notice = notice;

        async move {
            while let Some(event) = rx.next().await {
                let orchestrator = match &orchestrator {
                    Ok(orchestrator) => orchestrator.clone(),
                    Err(err) => {
                        error!(error = %err, "no usable statistics backend");
                        let cycle = store.write().begin_load();
                        store
                            .write()
                            .finish(cycle, Err(DashboardError::Unavailable(err.clone())));
                        continue;
                    }
                };

                match event {
                    DashboardEvent::Load => start_load(orchestrator, store),
                    DashboardEvent::Apply(action) => {
                        if let Err(err) = action.validate() {
                            debug!(action = action.label(), error = %err, "filter rejected locally");
                            notice.set(Some(err.to_string()));
                            continue;
                        }
                        notice.set(None);
                        start_filter(orchestrator, store, action);
                    }
                }
            }
        }
    });

    use_hook(|| events.send(DashboardEvent::Load));

    DashboardHandle {
        store,
        notice,
        selected_user,
        events,
    }
}

fn start_load(orchestrator: Orchestrator, mut store: Signal<DashboardStore>) {
    let (cycle, filter) = {
        let mut guard = store.write();
        let cycle = guard.begin_load();
        (cycle, guard.active_filter().clone())
    };

    platform::spawn_future(async move {
        let result = orchestrator.fetch(&filter).await;
        store.write().finish(cycle, result);
    });
}

fn start_filter(orchestrator: Orchestrator, mut store: Signal<DashboardStore>, action: FilterAction) {
    let (cycle, current) = {
        let mut guard = store.write();
        let cycle = guard.begin_mutation(&action);
        (cycle, guard.active_filter().clone())
    };

    platform::spawn_future(async move {
        if let Err(err) = orchestrator.mutate(&action).await {
            store.write().finish(cycle, Err(err));
            return;
        }

        let filter = action.resulting_filter(&current);
        if !store.write().mutation_acknowledged(cycle, filter.clone()) {
            return;
        }

        let result = orchestrator.fetch(&filter).await;
        store.write().finish(cycle, result);
    });
}
