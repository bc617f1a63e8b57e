//! Search Domain
//!
//! 1. A genre filter holds at most one genre (single-select)
//! 2. Toggling the active genre clears the filter
//! 3. A search counter is keyed by the exact search term
//! 4. Counters start at 1 and only ever grow
//! 5. Counters are never deleted

pub mod entity;
pub mod invariants;

pub use entity::{GenreFilter, SearchCounter};
pub use invariants::validate_search_counter;
