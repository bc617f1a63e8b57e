// src/repositories/search_counter_repository.rs

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::SearchCounter;
use crate::error::{AppError, AppResult};

/// Storage of per-term search counters.
///
/// Implemented by the local SQLite store and by the hosted document store
/// client (`integrations::appwrite`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchCounterRepository: Send + Sync {
    /// Counter stored under exactly `search_term`, if any
    async fn find_by_term(&self, search_term: &str) -> AppResult<Option<SearchCounter>>;

    async fn create(&self, counter: &SearchCounter) -> AppResult<SearchCounter>;

    /// Add one to an existing counter and return the stored result
    async fn increment(&self, counter: &SearchCounter) -> AppResult<SearchCounter>;

    /// Counters ordered by descending count
    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchCounter>>;
}

pub struct SqliteSearchCounterRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSearchCounterRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_counter(row: &Row) -> Result<SearchCounter, rusqlite::Error> {
        let count: i64 = row.get("count")?;
        let movie_id: i64 = row.get("movie_id")?;

        Ok(SearchCounter {
            id: row.get("id")?,
            search_term: row.get("search_term")?,
            count: count as u64,
            poster_url: row.get("poster_url")?,
            movie_id: movie_id as u64,
        })
    }

    fn get_by_id(&self, id: &str) -> AppResult<SearchCounter> {
        let conn = self.pool.get()?;
        conn.query_row(
            "SELECT * FROM search_counters WHERE id = ?1",
            params![id],
            Self::row_to_counter,
        )
        .optional()?
        .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl SearchCounterRepository for SqliteSearchCounterRepository {
    async fn find_by_term(&self, search_term: &str) -> AppResult<Option<SearchCounter>> {
        let conn = self.pool.get()?;

        let counter = conn
            .query_row(
                "SELECT * FROM search_counters WHERE search_term = ?1",
                params![search_term],
                Self::row_to_counter,
            )
            .optional()?;

        Ok(counter)
    }

    async fn create(&self, counter: &SearchCounter) -> AppResult<SearchCounter> {
        {
            let conn = self.pool.get()?;
            let now = Utc::now().to_rfc3339();

            conn.execute(
                "INSERT INTO search_counters (id, search_term, count, poster_url, movie_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
                params![
                    counter.id,
                    counter.search_term,
                    counter.count as i64,
                    counter.poster_url,
                    counter.movie_id as i64,
                    now,
                ],
            )?;
        }

        self.get_by_id(&counter.id)
    }

    async fn increment(&self, counter: &SearchCounter) -> AppResult<SearchCounter> {
        let updated = {
            let conn = self.pool.get()?;
            conn.execute(
                "UPDATE search_counters SET count = count + 1, updated_at = ?2 WHERE id = ?1",
                params![counter.id, Utc::now().to_rfc3339()],
            )?
        };

        if updated == 0 {
            return Err(AppError::NotFound);
        }

        self.get_by_id(&counter.id)
    }

    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchCounter>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT * FROM search_counters ORDER BY count DESC, search_term ASC LIMIT ?1",
        )?;

        let counters = stmt
            .query_map(params![limit as i64], Self::row_to_counter)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(counters)
    }
}
