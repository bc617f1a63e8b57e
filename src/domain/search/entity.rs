use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::movie::{GenreId, Movie};

/// Zero-or-one selected genre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreFilter(Option<GenreId>);

impl GenreFilter {
    /// No genre constraint
    pub fn none() -> Self {
        Self(None)
    }

    pub fn only(id: GenreId) -> Self {
        Self(Some(id))
    }

    /// Select `id`, or clear the filter if `id` is already selected
    pub fn toggle(self, id: GenreId) -> Self {
        if self.0 == Some(id) {
            Self(None)
        } else {
            Self(Some(id))
        }
    }

    pub fn active(self) -> Option<GenreId> {
        self.0
    }

    pub fn is_selected(self, id: GenreId) -> bool {
        self.0 == Some(id)
    }
}

/// Persisted popularity counter for one search term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCounter {
    /// Document identifier in the counter store
    pub id: String,

    /// Exact query string, used as the lookup key
    pub search_term: String,

    /// Number of searches recorded for this term
    pub count: u64,

    /// Full poster URL of the top result when the counter was created
    pub poster_url: Option<String>,

    /// Top result when the counter was created
    pub movie_id: u64,
}

impl SearchCounter {
    /// Counter for a term searched for the first time
    pub fn first_search(search_term: &str, top_result: &Movie, poster_url: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            search_term: search_term.to_string(),
            count: 1,
            poster_url,
            movie_id: top_result.id,
        }
    }

    /// Copy of this counter with one more search recorded
    pub fn incremented(&self) -> Self {
        Self {
            count: self.count + 1,
            ..self.clone()
        }
    }
}
