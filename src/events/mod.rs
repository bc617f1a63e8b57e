// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use types::DomainEvent;

pub use types::{
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

pub use bus::{EventBus, EventLogEntry};
