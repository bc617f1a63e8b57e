// src/lib.rs
// MovieScout - movie discovery with debounced search and trending searches
//
// Architecture:
// - Domain-centric: movie data is read-only, search counters are the only entity
// - Event-driven: fetch results reach analytics through the event bus
// - Explicit: UI state changes only through discrete transitions
// - Pluggable counter store: hosted document store or local SQLite

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{validate_search_counter, Genre, GenreFilter, GenreId, Movie, SearchCounter};

// ============================================================================
// PUBLIC API - Errors & Configuration
// ============================================================================

pub use config::{AppConfig, AppwriteConfig, CounterBackend, TmdbConfig};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    DomainEvent,
    EventBus,
    EventLogEntry,
    // Input
    GenreFilterChanged,
    QueryStabilized,
    // Fetch
    MovieFetchFailed,
    MovieFetchStarted,
    MoviesFetched,
    // Analytics
    SearchCountRecorded,
    SearchCountSyncFailed,
    TrendingLoaded,
};

// ============================================================================
// PUBLIC API - Storage
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};
pub use repositories::{SearchCounterRepository, SqliteSearchCounterRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    CatalogService, Debouncer, DiscoverySession, SearchAnalyticsService, SessionSettings,
    TrendingService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, MovieCardView, OverlapPolicy, UiEvent, UiState};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{AppwriteCounterStore, MovieCatalog, MovieRequest, TmdbClient};
