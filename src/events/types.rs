// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{GenreId, Movie};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// INPUT EVENTS
// ============================================================================

/// Emitted when the debounced query settles on a new value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryStabilized {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub query: String,
}

impl QueryStabilized {
    pub fn new(query: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            query,
        }
    }
}

domain_event!(QueryStabilized);

/// Emitted when the user toggles a genre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreFilterChanged {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    /// Filter after the toggle; `None` means no genre constraint
    pub genre: Option<GenreId>,
}

impl GenreFilterChanged {
    pub fn new(genre: Option<GenreId>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            genre,
        }
    }
}

domain_event!(GenreFilterChanged);

// ============================================================================
// FETCH EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieFetchStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: u64,
    pub query: String,
    pub genre: Option<GenreId>,
}

impl MovieFetchStarted {
    pub fn new(request_id: u64, query: String, genre: Option<GenreId>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            query,
            genre,
        }
    }
}

domain_event!(MovieFetchStarted);

/// Emitted for every successful fetch, including superseded ones
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoviesFetched {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: u64,
    pub query: String,
    pub genre: Option<GenreId>,
    pub result_count: usize,
    /// Highest-ranked result, if any
    pub top_result: Option<Movie>,
    /// Whether the result reached the UI state
    pub applied: bool,
}

impl MoviesFetched {
    pub fn new(
        request_id: u64,
        query: String,
        genre: Option<GenreId>,
        movies: &[Movie],
        applied: bool,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            query,
            genre,
            result_count: movies.len(),
            top_result: movies.first().cloned(),
            applied,
        }
    }

    /// A query-driven search that produced at least one result
    pub fn is_countable_search(&self) -> bool {
        !self.query.is_empty() && self.top_result.is_some()
    }
}

domain_event!(MoviesFetched);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieFetchFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: u64,
    pub query: String,
    pub reason: String,
    pub applied: bool,
}

impl MovieFetchFailed {
    pub fn new(request_id: u64, query: String, reason: String, applied: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            query,
            reason,
            applied,
        }
    }
}

domain_event!(MovieFetchFailed);

// ============================================================================
// ANALYTICS EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCountRecorded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub search_term: String,
    pub count: u64,
}

impl SearchCountRecorded {
    pub fn new(search_term: String, count: u64) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            search_term,
            count,
        }
    }
}

domain_event!(SearchCountRecorded);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchCountSyncFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub search_term: String,
    pub reason: String,
}

impl SearchCountSyncFailed {
    pub fn new(search_term: String, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            search_term,
            reason,
        }
    }
}

domain_event!(SearchCountSyncFailed);

/// Emitted once the trending list is loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entries: usize,
}

impl TrendingLoaded {
    pub fn new(entries: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entries,
        }
    }
}

domain_event!(TrendingLoaded);
