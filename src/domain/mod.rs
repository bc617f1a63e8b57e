// src/domain/mod.rs
//
// Domain Root
//
// All other modules import domain types from `crate::domain::*`.
// Movies and genres are read-only data received from the metadata API;
// search counters are the only entity this crate creates.

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod catalog;
pub mod movie;
pub mod search;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain (external, read-only)
pub use movie::{Genre, GenreId, Movie};

// Search Domain
pub use search::{validate_search_counter, GenreFilter, SearchCounter};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid genre identifier: {0}")]
    InvalidGenreId(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
