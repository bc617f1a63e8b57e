// src/services/discovery_session.rs
//
// Discovery Session - search-state reconciliation
//
// Flow:
//   type_query → Debouncer → stabilize → fetch → UiState
//                                          └→ MoviesFetched → analytics
//
// - UiState lives in a watch channel and changes only through `dispatch`
// - Every fetch gets a RequestId; completions are reconciled by OverlapPolicy
// - In-flight fetches are never cancelled; only the debounce timer is

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::application::ui_state::{OverlapPolicy, RequestId, UiEvent, UiState};
use crate::domain::{GenreFilter, GenreId};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, GenreFilterChanged, MovieFetchFailed, MovieFetchStarted, MoviesFetched,
    QueryStabilized,
};
use crate::services::analytics_service::SearchAnalyticsService;
use crate::services::catalog_service::CatalogService;
use crate::services::debouncer::Debouncer;
use crate::services::trending_service::TrendingService;

/// Session tuning
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub quiet_period: Duration,
    pub overlap_policy: OverlapPolicy,
    pub trending_limit: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(500),
            overlap_policy: OverlapPolicy::default(),
            trending_limit: 5,
        }
    }
}

/// Holds one slot of the in-flight fetch count; released on drop, so an
/// aborted or panicked fetch is released too
struct InFlightFetch(Arc<watch::Sender<usize>>);

impl InFlightFetch {
    fn acquire(counter: &Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|n| *n += 1);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlightFetch {
    fn drop(&mut self) {
        self.0.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// A request that has been issued but not yet completed
struct IssuedFetch {
    request: RequestId,
    query: String,
    genre: GenreFilter,
}

pub struct DiscoverySession {
    catalog: Arc<CatalogService>,
    analytics: Arc<SearchAnalyticsService>,
    trending: Arc<TrendingService>,
    event_bus: Arc<EventBus>,
    settings: SessionSettings,
    state: watch::Sender<UiState>,
    next_request: AtomicU64,
    in_flight: Arc<watch::Sender<usize>>,
    debouncer: Debouncer<String>,
    stabilized: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
    stabilizer: Mutex<Option<JoinHandle<()>>>,
}

impl DiscoverySession {
    pub fn new(
        catalog: Arc<CatalogService>,
        analytics: Arc<SearchAnalyticsService>,
        trending: Arc<TrendingService>,
        event_bus: Arc<EventBus>,
        settings: SessionSettings,
    ) -> Arc<Self> {
        let (debouncer, stabilized) = Debouncer::new(settings.quiet_period);
        let (state, _) = watch::channel(UiState::default());

        Arc::new(Self {
            catalog,
            analytics,
            trending,
            event_bus,
            settings,
            state,
            next_request: AtomicU64::new(0),
            in_flight: Arc::new(watch::channel(0).0),
            debouncer,
            stabilized: Mutex::new(Some(stabilized)),
            stabilizer: Mutex::new(None),
        })
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Start the stabilizer loop and run the startup loads
    ///
    /// Trending, genres and the initial discover listing run concurrently;
    /// this returns once all three have settled.
    pub async fn start(self: &Arc<Self>) -> AppResult<()> {
        let receiver = self
            .stabilized
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| AppError::Other("Session already started".to_string()))?;

        let task = tokio::spawn(Self::run_stabilizer(Arc::downgrade(self), receiver));
        *self.stabilizer.lock().unwrap_or_else(PoisonError::into_inner) = Some(task);

        log::info!("Discovery session started");

        tokio::join!(self.load_trending(), self.load_genres(), self.fetch_movies());
        Ok(())
    }

    async fn run_stabilizer(session: Weak<Self>, mut receiver: mpsc::UnboundedReceiver<String>) {
        while let Some(query) = receiver.recv().await {
            let Some(session) = session.upgrade() else {
                break;
            };
            session.stabilize(query);
        }
        log::debug!("Stabilizer loop stopped");
    }

    /// Stop accepting input, let issued fetches finish, then wait for the
    /// analytics syncs they triggered
    pub async fn shutdown(&self) {
        self.debouncer.cancel();

        if let Some(task) = self
            .stabilizer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            task.abort();
        }

        self.wait_for_fetches().await;
        self.analytics.flush().await;
        log::info!("Discovery session stopped");
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    /// Record the raw search box contents and restart the quiet period
    pub fn type_query(&self, raw: &str) {
        self.dispatch(UiEvent::QueryChanged(raw.to_string()));
        self.debouncer.push(raw.to_string());
    }

    /// Adopt a settled query and fetch for it
    ///
    /// Returns `None` when the query equals the current stabilized query.
    pub fn stabilize(self: &Arc<Self>, query: String) -> Option<JoinHandle<()>> {
        if self.state.borrow().query == query {
            return None;
        }

        log::debug!("Query stabilized: '{}'", query);
        self.dispatch(UiEvent::QueryStabilized(query.clone()));
        self.event_bus.emit(QueryStabilized::new(query));

        Some(self.spawn_fetch())
    }

    /// Select `id`, or clear it if already selected, then refetch
    pub fn toggle_genre(self: &Arc<Self>, id: GenreId) -> JoinHandle<()> {
        self.dispatch(UiEvent::GenreToggled(id));

        let genre = self.state.borrow().genre.active();
        self.event_bus.emit(GenreFilterChanged::new(genre));

        self.spawn_fetch()
    }

    // ========================================================================
    // LOADS
    // ========================================================================

    /// Issue a fetch now and run it in the background
    ///
    /// The query and genre are captured before this returns, so later input
    /// cannot change what this request asks for.
    fn spawn_fetch(self: &Arc<Self>) -> JoinHandle<()> {
        let slot = InFlightFetch::acquire(&self.in_flight);
        let issued = self.issue_fetch();
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let _slot = slot;
            session.run_fetch(issued).await;
        })
    }

    /// Background fetches issued but not yet completed
    pub fn fetches_in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    async fn wait_for_fetches(&self) {
        let pending = self.fetches_in_flight();
        if pending > 0 {
            log::debug!("Waiting for {} in-flight fetches", pending);
        }

        let mut in_flight = self.in_flight.subscribe();
        // The sender lives as long as `self`, so this cannot observe a close
        let _ = in_flight.wait_for(|n| *n == 0).await;
    }

    /// Fetch movies for the current stabilized query and genre
    pub async fn fetch_movies(&self) -> RequestId {
        let issued = self.issue_fetch();
        let request = issued.request;
        self.run_fetch(issued).await;
        request
    }

    fn issue_fetch(&self) -> IssuedFetch {
        let policy = self.settings.overlap_policy;

        // Id allocation and `latest_request` advance under the same write
        let mut issued = IssuedFetch {
            request: RequestId(0),
            query: String::new(),
            genre: GenreFilter::none(),
        };
        self.state.send_modify(|state| {
            issued.request = RequestId(self.next_request.fetch_add(1, Ordering::SeqCst) + 1);
            issued.query = state.query.clone();
            issued.genre = state.genre;
            *state = state.apply(UiEvent::FetchStarted(issued.request), policy);
        });

        self.event_bus.emit(MovieFetchStarted::new(
            issued.request.0,
            issued.query.clone(),
            issued.genre.active(),
        ));

        issued
    }

    async fn run_fetch(&self, issued: IssuedFetch) {
        let IssuedFetch {
            request,
            query,
            genre,
        } = issued;

        match self.catalog.fetch_movies(&query, genre).await {
            Ok(movies) => {
                let event = MoviesFetched::new(request.0, query, genre.active(), &movies, false);
                let applied = self.complete(request, UiEvent::FetchSucceeded { request, movies });

                log::debug!(
                    "Fetch {} returned {} movies{}",
                    request,
                    event.result_count,
                    if applied { "" } else { " (stale)" }
                );
                self.event_bus.emit(MoviesFetched { applied, ..event });
            }
            Err(e) => {
                if e.is_remote() {
                    log::warn!("Error fetching movies: {}", e);
                } else {
                    log::error!("Error fetching movies: {}", e);
                }
                let applied = self.complete(request, UiEvent::FetchFailed { request });
                self.event_bus
                    .emit(MovieFetchFailed::new(request.0, query, e.to_string(), applied));
            }
        }
    }

    /// Apply a completion; returns whether the state accepted it
    fn complete(&self, request: RequestId, event: UiEvent) -> bool {
        let policy = self.settings.overlap_policy;
        let mut applied = false;

        self.state.send_modify(|state| {
            applied = state.accepts(request, policy);
            *state = state.apply(event, policy);
        });

        applied
    }

    pub async fn load_trending(&self) {
        let trending = self.trending.load(self.settings.trending_limit).await;
        self.dispatch(UiEvent::TrendingLoaded(trending));
    }

    pub async fn load_genres(&self) {
        let genres = self.catalog.load_genres().await;
        self.dispatch(UiEvent::GenresLoaded(genres));
    }

    // ========================================================================
    // STATE
    // ========================================================================

    /// Apply one transition and notify subscribers
    pub fn dispatch(&self, event: UiEvent) {
        let policy = self.settings.overlap_policy;
        self.state.send_modify(|state| *state = state.apply(event, policy));
    }

    pub fn subscribe(&self) -> watch::Receiver<UiState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> UiState {
        self.state.borrow().clone()
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}
