// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Sits between the terminal front-end and the services
// - Owns the UI state model and its text presentation
// - Never talks to the network or the store directly

pub mod commands;
pub mod state;
pub mod ui_state;
pub mod view;

pub use commands::{resolve_genre, Command};
pub use state::AppState;
pub use ui_state::{MovieSection, OverlapPolicy, RequestId, UiEvent, UiState};
pub use view::{render, render_trending, MovieCardView, TrendingEntryView};
