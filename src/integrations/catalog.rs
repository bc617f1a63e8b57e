// src/integrations/catalog.rs
//
// Seam between the services and the movie metadata API.

use async_trait::async_trait;

use crate::domain::catalog::DISCOVER_SORT;
use crate::domain::{Genre, GenreFilter, GenreId, Movie};
use crate::error::AppResult;

/// One movie listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieRequest {
    /// Text search
    Search { query: String, genre: Option<GenreId> },
    /// Query-less listing by popularity
    Discover { genre: Option<GenreId> },
}

impl MovieRequest {
    /// Search for a non-empty query, discover otherwise
    pub fn new(query: &str, genre: GenreFilter) -> Self {
        if query.is_empty() {
            MovieRequest::Discover {
                genre: genre.active(),
            }
        } else {
            MovieRequest::Search {
                query: query.to_string(),
                genre: genre.active(),
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            MovieRequest::Search { .. } => "/search/movie",
            MovieRequest::Discover { .. } => "/discover/movie",
        }
    }

    /// Query string parameters, unencoded
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let (mut params, genre) = match self {
            MovieRequest::Search { query, genre } => (vec![("query", query.clone())], genre),
            MovieRequest::Discover { genre } => (vec![("sort_by", DISCOVER_SORT.to_string())], genre),
        };

        if let Some(id) = genre {
            params.push(("with_genres", id.to_string()));
        }

        params
    }

    pub fn is_search(&self) -> bool {
        matches!(self, MovieRequest::Search { .. })
    }
}

/// Read access to the movie metadata API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Full genre list, unfiltered
    async fn genres(&self) -> AppResult<Vec<Genre>>;

    /// Movies for one request; a missing result array yields an empty list
    async fn movies(&self, request: &MovieRequest) -> AppResult<Vec<Movie>>;
}
