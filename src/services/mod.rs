// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod analytics_service;
pub mod catalog_service;
pub mod debouncer;
pub mod discovery_session;
pub mod trending_service;


// Re-export all services and their types
pub use analytics_service::SearchAnalyticsService;

pub use catalog_service::CatalogService;

pub use debouncer::Debouncer;

pub use discovery_session::{DiscoverySession, SessionSettings};

pub use trending_service::TrendingService;
