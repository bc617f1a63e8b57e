// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are dumb data mappers
// - No business logic, no invariant enforcement
// - No event emission
// - Explicit SQL only

pub mod search_counter_repository;

pub use search_counter_repository::{SearchCounterRepository, SqliteSearchCounterRepository};

#[cfg(test)]
pub use search_counter_repository::MockSearchCounterRepository;
