// src/application/state.rs
//
// Application wiring: builds every service from an AppConfig.

use std::sync::Arc;

use crate::config::{AppConfig, CounterBackend};
use crate::db::{
    create_connection_pool, get_connection, get_database_path, get_database_stats,
    initialize_database, verify_database_integrity, ConnectionPool, DatabaseStats,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::integrations::{AppwriteCounterStore, MovieCatalog, TmdbClient};
use crate::repositories::{SearchCounterRepository, SqliteSearchCounterRepository};
use crate::services::{
    CatalogService, DiscoverySession, SearchAnalyticsService, SessionSettings, TrendingService,
};

/// Everything the front-end needs, Arc-wrapped for sharing across tasks
pub struct AppState {
    pub config: AppConfig,
    pub event_bus: Arc<EventBus>,
    pub session: Arc<DiscoverySession>,
    /// Present only with the local SQLite backend
    pub db_pool: Option<Arc<ConnectionPool>>,
}

impl AppState {
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let catalog: Arc<dyn MovieCatalog> =
            Arc::new(TmdbClient::new(&config.tmdb, config.request_timeout)?);

        // 2. COUNTER STORE
        let (counter_repo, db_pool) = match &config.counter_backend {
            CounterBackend::Appwrite(appwrite) => {
                log::info!("Search counters: Appwrite project {}", appwrite.project_id);
                let store: Arc<dyn SearchCounterRepository> =
                    Arc::new(AppwriteCounterStore::new(appwrite, config.request_timeout)?);
                (store, None)
            }
            CounterBackend::Sqlite { path } => {
                let path = match path {
                    Some(path) => path.clone(),
                    None => get_database_path()?,
                };
                log::info!("Search counters: {}", path.display());

                let pool = Arc::new(create_connection_pool(&path)?);
                {
                    let conn = get_connection(&pool)?;
                    initialize_database(&conn)?;
                    verify_database_integrity(&conn)?;
                }
                let store: Arc<dyn SearchCounterRepository> =
                    Arc::new(SqliteSearchCounterRepository::new(pool.clone()));
                (store, Some(pool))
            }
        };

        // 3. SERVICES
        let catalog_service = Arc::new(CatalogService::new(catalog));
        let analytics_service = Arc::new(SearchAnalyticsService::new(
            counter_repo.clone(),
            event_bus.clone(),
            config.tmdb.image_base_url.clone(),
        ));
        let trending_service = Arc::new(TrendingService::new(counter_repo, event_bus.clone()));

        // 4. EVENT HANDLER REGISTRATION (WIRING)
        analytics_service.register_event_handlers();

        // 5. SESSION
        let session = DiscoverySession::new(
            catalog_service,
            analytics_service,
            trending_service,
            event_bus.clone(),
            SessionSettings {
                quiet_period: config.quiet_period,
                overlap_policy: config.overlap_policy,
                trending_limit: config.trending_limit,
            },
        );

        Ok(Self {
            config,
            event_bus,
            session,
            db_pool,
        })
    }

    /// Local store summary; `None` with a hosted backend
    pub fn database_stats(&self) -> AppResult<Option<DatabaseStats>> {
        let Some(pool) = &self.db_pool else {
            return Ok(None);
        };
        let conn = get_connection(pool)?;
        Ok(Some(get_database_stats(&conn)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TmdbConfig;
    use crate::events::MoviesFetched;
    use std::time::Duration;
    use tempfile::TempDir;

    fn config(db_path: std::path::PathBuf) -> AppConfig {
        AppConfig {
            tmdb: TmdbConfig {
                api_key: "token".to_string(),
                base_url: "http://127.0.0.1:9".to_string(),
                image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
            },
            counter_backend: CounterBackend::Sqlite { path: Some(db_path) },
            quiet_period: Duration::from_millis(500),
            request_timeout: Duration::from_secs(2),
            trending_limit: 5,
            overlap_policy: Default::default(),
        }
    }

    #[test]
    fn test_sqlite_backend_creates_database() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("counters.db");

        let state = AppState::initialize(config(path.clone())).unwrap();

        assert!(path.exists());
        let stats = state.database_stats().unwrap().unwrap();
        assert_eq!(stats.counter_count, 0);
        assert_eq!(stats.total_searches, 0);
    }

    #[test]
    fn test_analytics_handler_is_registered() {
        let dir = TempDir::new().unwrap();
        let state = AppState::initialize(config(dir.path().join("counters.db"))).unwrap();

        assert_eq!(state.event_bus.subscriber_count::<MoviesFetched>(), 1);
    }
}
