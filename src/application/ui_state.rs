// src/application/ui_state.rs
//
// Session UI state as one immutable record.
//
// Every change goes through `UiState::apply`, one transition per event.
// The movie list, the error message and the loading flag are written only
// by the fetch transitions.

use serde::Serialize;
use std::str::FromStr;

use crate::domain::catalog::{FETCH_ERROR_MESSAGE, NO_MOVIES_MESSAGE};
use crate::domain::{Genre, GenreFilter, GenreId, Movie, SearchCounter};
use crate::error::AppError;

/// Monotonic tag attached to every issued fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How completions of overlapping fetches are reconciled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Only the most recently issued request may change the list
    #[default]
    LatestIssued,
    /// Every completion is applied; the last one to finish wins
    LatestCompleted,
}

impl FromStr for OverlapPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest-issued" => Ok(OverlapPolicy::LatestIssued),
            "latest-completed" => Ok(OverlapPolicy::LatestCompleted),
            other => Err(AppError::Config(format!(
                "Unknown fetch ordering '{}' (expected latest-issued or latest-completed)",
                other
            ))),
        }
    }
}

/// Discrete state transitions
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Raw search box contents changed
    QueryChanged(String),
    /// Debounced query settled
    QueryStabilized(String),
    GenreToggled(GenreId),
    GenresLoaded(Vec<Genre>),
    TrendingLoaded(Vec<SearchCounter>),
    FetchStarted(RequestId),
    FetchSucceeded {
        request: RequestId,
        movies: Vec<Movie>,
    },
    FetchFailed {
        request: RequestId,
    },
}

/// What the movie section shows; exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovieSection<'a> {
    /// Nothing fetched yet
    Idle,
    Loading,
    Error(&'a str),
    Movies(&'a [Movie]),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UiState {
    pub raw_query: String,
    pub query: String,
    pub genre: GenreFilter,
    pub genres: Vec<Genre>,
    pub movies: Vec<Movie>,
    pub error_message: Option<String>,
    pub is_loading: bool,
    pub trending: Vec<SearchCounter>,
    pub latest_request: Option<RequestId>,
}

impl UiState {
    /// Apply one transition and return the resulting state
    pub fn apply(&self, event: UiEvent, policy: OverlapPolicy) -> UiState {
        let mut next = self.clone();

        match event {
            UiEvent::QueryChanged(raw) => next.raw_query = raw,
            UiEvent::QueryStabilized(query) => next.query = query,
            UiEvent::GenreToggled(id) => next.genre = self.genre.toggle(id),
            UiEvent::GenresLoaded(genres) => next.genres = genres,
            UiEvent::TrendingLoaded(trending) => next.trending = trending,
            UiEvent::FetchStarted(request) => {
                next.latest_request = Some(request);
                next.is_loading = true;
                next.error_message = None;
            }
            UiEvent::FetchSucceeded { request, movies } => {
                if !self.accepts(request, policy) {
                    return next;
                }
                next.is_loading = false;
                if movies.is_empty() {
                    next.movies = Vec::new();
                    next.error_message = Some(NO_MOVIES_MESSAGE.to_string());
                } else {
                    next.movies = movies;
                    next.error_message = None;
                }
            }
            UiEvent::FetchFailed { request } => {
                if !self.accepts(request, policy) {
                    return next;
                }
                next.is_loading = false;
                next.movies = Vec::new();
                next.error_message = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }

        next
    }

    /// Whether a completion of `request` may change this state
    pub fn accepts(&self, request: RequestId, policy: OverlapPolicy) -> bool {
        match policy {
            OverlapPolicy::LatestCompleted => true,
            OverlapPolicy::LatestIssued => self.latest_request == Some(request),
        }
    }

    pub fn movie_section(&self) -> MovieSection<'_> {
        if self.is_loading {
            MovieSection::Loading
        } else if let Some(message) = self.error_message.as_deref() {
            MovieSection::Error(message)
        } else if self.latest_request.is_none() {
            MovieSection::Idle
        } else {
            MovieSection::Movies(&self.movies)
        }
    }

    /// The active genre, if it is one of the loaded genres
    pub fn selected_genre(&self) -> Option<&Genre> {
        let id = self.genre.active()?;
        self.genres.iter().find(|g| g.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: OverlapPolicy = OverlapPolicy::LatestIssued;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: None,
            vote_average: None,
            release_date: None,
            original_language: None,
        }
    }

    fn started(id: u64) -> UiState {
        UiState::default().apply(UiEvent::FetchStarted(RequestId(id)), POLICY)
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = UiState::default();
        assert_eq!(state.movie_section(), MovieSection::Idle);
        assert!(state.movies.is_empty());
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_fetch_started_sets_loading_and_clears_error() {
        let state = UiState {
            error_message: Some(FETCH_ERROR_MESSAGE.to_string()),
            ..UiState::default()
        };
        let state = state.apply(UiEvent::FetchStarted(RequestId(1)), POLICY);
        assert!(state.is_loading);
        assert!(state.error_message.is_none());
        assert_eq!(state.movie_section(), MovieSection::Loading);
    }

    #[test]
    fn test_success_replaces_list() {
        let state = started(1).apply(
            UiEvent::FetchSucceeded {
                request: RequestId(1),
                movies: vec![movie(1, "Batman")],
            },
            POLICY,
        );
        assert!(!state.is_loading);
        assert!(state.error_message.is_none());
        assert_eq!(state.movies.len(), 1);
        assert!(matches!(state.movie_section(), MovieSection::Movies(list) if list.len() == 1));
    }

    #[test]
    fn test_empty_success_surfaces_not_found() {
        let state = started(1).apply(
            UiEvent::FetchSucceeded {
                request: RequestId(1),
                movies: Vec::new(),
            },
            POLICY,
        );
        assert!(!state.is_loading);
        assert!(state.movies.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(NO_MOVIES_MESSAGE));
    }

    #[test]
    fn test_failure_clears_list() {
        let loaded = started(1).apply(
            UiEvent::FetchSucceeded {
                request: RequestId(1),
                movies: vec![movie(1, "Batman")],
            },
            POLICY,
        );
        let state = loaded
            .apply(UiEvent::FetchStarted(RequestId(2)), POLICY)
            .apply(UiEvent::FetchFailed { request: RequestId(2) }, POLICY);

        assert!(!state.is_loading);
        assert!(state.movies.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert_eq!(state.movie_section(), MovieSection::Error(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_stale_completion_is_discarded_under_latest_issued() {
        let state = started(1).apply(UiEvent::FetchStarted(RequestId(2)), POLICY);

        // Request 2 finishes first, then the older request 1
        let state = state
            .apply(
                UiEvent::FetchSucceeded {
                    request: RequestId(2),
                    movies: vec![movie(2, "Newer")],
                },
                POLICY,
            )
            .apply(
                UiEvent::FetchSucceeded {
                    request: RequestId(1),
                    movies: vec![movie(1, "Older")],
                },
                POLICY,
            );

        assert_eq!(state.movies[0].title, "Newer");
        assert!(!state.is_loading);
    }

    #[test]
    fn test_stale_failure_does_not_clear_loading() {
        let state = started(1)
            .apply(UiEvent::FetchStarted(RequestId(2)), POLICY)
            .apply(UiEvent::FetchFailed { request: RequestId(1) }, POLICY);

        assert!(state.is_loading);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn test_latest_completed_lets_last_finisher_win() {
        let policy = OverlapPolicy::LatestCompleted;
        let state = UiState::default()
            .apply(UiEvent::FetchStarted(RequestId(1)), policy)
            .apply(UiEvent::FetchStarted(RequestId(2)), policy)
            .apply(
                UiEvent::FetchSucceeded {
                    request: RequestId(2),
                    movies: vec![movie(2, "Newer")],
                },
                policy,
            )
            .apply(
                UiEvent::FetchSucceeded {
                    request: RequestId(1),
                    movies: vec![movie(1, "Older")],
                },
                policy,
            );

        assert_eq!(state.movies[0].title, "Older");
    }

    #[test]
    fn test_genre_toggle_transition() {
        let state = UiState::default().apply(UiEvent::GenreToggled(GenreId(27)), POLICY);
        assert_eq!(state.genre.active(), Some(GenreId(27)));

        let state = state.apply(UiEvent::GenreToggled(GenreId(27)), POLICY);
        assert_eq!(state.genre.active(), None);
    }

    #[test]
    fn test_query_transitions_are_independent() {
        let state = UiState::default().apply(UiEvent::QueryChanged("bat".to_string()), POLICY);
        assert_eq!(state.raw_query, "bat");
        assert_eq!(state.query, "");

        let state = state.apply(UiEvent::QueryStabilized("bat".to_string()), POLICY);
        assert_eq!(state.query, "bat");
    }

    #[test]
    fn test_selected_genre_resolves_name() {
        let state = UiState {
            genres: vec![Genre {
                id: GenreId(27),
                name: "Horror".to_string(),
            }],
            genre: GenreFilter::only(GenreId(27)),
            ..UiState::default()
        };
        assert_eq!(state.selected_genre().map(|g| g.name.as_str()), Some("Horror"));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("latest-issued".parse::<OverlapPolicy>().unwrap(), OverlapPolicy::LatestIssued);
        assert_eq!(
            "Latest-Completed".parse::<OverlapPolicy>().unwrap(),
            OverlapPolicy::LatestCompleted
        );
        assert!("newest".parse::<OverlapPolicy>().is_err());
    }
}
