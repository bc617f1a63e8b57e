pub mod client;

pub use client::AppwriteCounterStore;
