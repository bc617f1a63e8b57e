// src/services/analytics_service.rs
//
// Search Analytics Service - per-term search counters
//
// Reacts to `MoviesFetched` on the event bus:
// - only query-driven fetches with at least one result are counted
// - existing term: count + 1
// - new term: count 1, poster and movie id taken from the top result
//
// Syncs run as background tasks. Failures are logged and published as
// `SearchCountSyncFailed`; they never reach the UI state.

use std::sync::{Arc, Mutex, PoisonError, Weak};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::domain::catalog::compose_image_url;
use crate::domain::{validate_search_counter, Movie, SearchCounter};
use crate::error::AppResult;
use crate::events::{EventBus, MoviesFetched, SearchCountRecorded, SearchCountSyncFailed};
use crate::repositories::SearchCounterRepository;

pub struct SearchAnalyticsService {
    counter_repo: Arc<dyn SearchCounterRepository>,
    event_bus: Arc<EventBus>,
    image_base_url: String,
    /// Serializes find-then-write so two syncs of a new term cannot both create it
    sync_lock: tokio::sync::Mutex<()>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl SearchAnalyticsService {
    pub fn new(
        counter_repo: Arc<dyn SearchCounterRepository>,
        event_bus: Arc<EventBus>,
        image_base_url: String,
    ) -> Self {
        Self {
            counter_repo,
            event_bus,
            image_base_url,
            sync_lock: tokio::sync::Mutex::new(()),
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Record one search of `search_term` whose top result is `top_result`
    pub async fn record_search(&self, search_term: &str, top_result: &Movie) -> AppResult<SearchCounter> {
        let _guard = self.sync_lock.lock().await;

        match self.counter_repo.find_by_term(search_term).await? {
            Some(existing) => self.counter_repo.increment(&existing).await,
            None => {
                let poster_url = top_result
                    .poster()
                    .map(|path| compose_image_url(&self.image_base_url, path));
                let counter = SearchCounter::first_search(search_term, top_result, poster_url);
                validate_search_counter(&counter)?;
                self.counter_repo.create(&counter).await
            }
        }
    }

    /// Subscribe to fetch results on the event bus
    ///
    /// The handler holds only a weak reference, so the bus does not keep the
    /// service alive.
    pub fn register_event_handlers(self: &Arc<Self>) {
        let service: Weak<Self> = Arc::downgrade(self);

        self.event_bus.subscribe::<MoviesFetched, _>(move |event| {
            if !event.is_countable_search() {
                return;
            }
            let (Some(service), Some(top_result)) = (service.upgrade(), event.top_result.clone()) else {
                return;
            };

            service.spawn_sync(event.query.clone(), top_result);
        });
    }

    fn spawn_sync(self: Arc<Self>, search_term: String, top_result: Movie) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("No async runtime; search for '{}' not counted", search_term);
                return;
            }
        };

        let service = Arc::clone(&self);
        let task = handle.spawn(async move {
            service.sync(search_term, top_result).await;
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|t| !t.is_finished());
        pending.push(task);
    }

    async fn sync(&self, search_term: String, top_result: Movie) {
        match self.record_search(&search_term, &top_result).await {
            Ok(counter) => {
                log::debug!("Search '{}' counted ({})", counter.search_term, counter.count);
                self.event_bus
                    .emit(SearchCountRecorded::new(counter.search_term, counter.count));
            }
            Err(e) => {
                log::warn!("Failed to update search count for '{}': {}", search_term, e);
                self.event_bus
                    .emit(SearchCountSyncFailed::new(search_term, e.to_string()));
            }
        }
    }

    /// Number of sync tasks still running
    pub fn pending_syncs(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| !t.is_finished())
            .count()
    }

    /// Wait for every spawned sync to finish
    pub async fn flush(&self) {
        loop {
            let tasks: Vec<JoinHandle<()>> = {
                let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *pending)
            };

            if tasks.is_empty() {
                break;
            }

            for task in tasks {
                if let Err(e) = task.await {
                    log::error!("Search count sync task failed: {}", e);
                }
            }
        }
    }
}
