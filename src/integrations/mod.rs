// src/integrations/mod.rs
//
// External Integrations
//
// Infrastructure only: HTTP clients for the movie metadata API and the
// hosted counter store. They map wire data to domain values and never
// touch UI state.

pub mod appwrite;
pub mod catalog;
pub mod tmdb;

#[cfg(test)]
pub(crate) mod test_server;

pub use appwrite::AppwriteCounterStore;
pub use catalog::{MovieCatalog, MovieRequest};
pub use tmdb::TmdbClient;

#[cfg(test)]
pub use catalog::MockMovieCatalog;
