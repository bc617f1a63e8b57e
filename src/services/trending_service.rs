// src/services/trending_service.rs
//
// Trending Service - most searched terms, loaded once per session

use std::sync::Arc;

use crate::domain::SearchCounter;
use crate::events::{EventBus, TrendingLoaded};
use crate::repositories::SearchCounterRepository;

pub struct TrendingService {
    counter_repo: Arc<dyn SearchCounterRepository>,
    event_bus: Arc<EventBus>,
}

impl TrendingService {
    pub fn new(counter_repo: Arc<dyn SearchCounterRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            counter_repo,
            event_bus,
        }
    }

    /// Top `limit` counters by descending count
    ///
    /// A store failure is logged and yields an empty list.
    pub async fn load(&self, limit: usize) -> Vec<SearchCounter> {
        let trending = match self.counter_repo.top_by_count(limit).await {
            Ok(counters) => counters,
            Err(e) => {
                log::warn!("Failed to load trending searches: {}", e);
                Vec::new()
            }
        };

        self.event_bus.emit(TrendingLoaded::new(trending.len()));
        trending
    }
}
