// src/services/catalog_service.rs
//
// Catalog Service - movie listing and genre loading
//
// - Picks search or discover from the query
// - Restricts genres to the allow-list, keeping the API's order
// - Genre loading never fails; the filter row is simply empty

use std::sync::Arc;

use crate::domain::catalog::is_allowed_genre;
use crate::domain::{Genre, GenreFilter, Movie};
use crate::error::AppResult;
use crate::integrations::{MovieCatalog, MovieRequest};

pub struct CatalogService {
    catalog: Arc<dyn MovieCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Arc<dyn MovieCatalog>) -> Self {
        Self { catalog }
    }

    /// Allowed genres in the order the API returned them
    pub async fn load_genres(&self) -> Vec<Genre> {
        match self.catalog.genres().await {
            Ok(genres) => {
                let allowed: Vec<Genre> = genres
                    .into_iter()
                    .filter(|g| is_allowed_genre(&g.name))
                    .collect();
                log::debug!("Loaded {} genres", allowed.len());
                allowed
            }
            Err(e) => {
                log::warn!("Failed to load genres: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch the listing for `query` under `genre`
    ///
    /// An empty query means the discover listing. The query is sent as typed.
    pub async fn fetch_movies(&self, query: &str, genre: GenreFilter) -> AppResult<Vec<Movie>> {
        let request = MovieRequest::new(query, genre);
        self.catalog.movies(&request).await
    }
}
