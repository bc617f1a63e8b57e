// src/application/view.rs
//
// Presentation models and text rendering of a UiState snapshot.
//
// Views are derived on demand; nothing here is stored in state.

use std::fmt::Write;

use crate::application::ui_state::{MovieSection, UiState};
use crate::domain::catalog::{compose_image_url, three_letter_language, NOT_AVAILABLE, POSTER_PLACEHOLDER};
use crate::domain::{Movie, SearchCounter};

/// One movie as shown in the listing
#[derive(Debug, Clone, PartialEq)]
pub struct MovieCardView {
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub language: String,
    pub year: String,
}

impl MovieCardView {
    pub fn from_movie(movie: &Movie, image_base_url: &str) -> Self {
        let poster_url = match movie.poster() {
            Some(path) => compose_image_url(image_base_url, path),
            None => POSTER_PLACEHOLDER.to_string(),
        };

        // Zero means unrated
        let rating = match movie.vote_average {
            Some(vote) if vote != 0.0 => format!("{:.1}", vote),
            _ => NOT_AVAILABLE.to_string(),
        };

        let language = movie
            .original_language
            .as_deref()
            .and_then(three_letter_language)
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        let year = movie.release_year().unwrap_or(NOT_AVAILABLE).to_string();

        Self {
            title: movie.title.clone(),
            poster_url,
            rating,
            language,
            year,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendingEntryView {
    /// 1-based
    pub rank: usize,
    pub search_term: String,
    pub count: u64,
    pub poster_url: Option<String>,
}

pub fn trending_view(trending: &[SearchCounter]) -> Vec<TrendingEntryView> {
    trending
        .iter()
        .enumerate()
        .map(|(i, counter)| TrendingEntryView {
            rank: i + 1,
            search_term: counter.search_term.clone(),
            count: counter.count,
            poster_url: counter.poster_url.clone(),
        })
        .collect()
}

/// Trending section text; empty when there is nothing trending
pub fn render_trending(state: &UiState) -> String {
    let mut out = String::new();
    if state.trending.is_empty() {
        return out;
    }

    out.push_str("Trending Movies\n");
    for entry in trending_view(&state.trending) {
        let _ = writeln!(
            out,
            "  {:>2}. {} ({} searches) {}",
            entry.rank,
            entry.search_term,
            entry.count,
            entry.poster_url.as_deref().unwrap_or(POSTER_PLACEHOLDER)
        );
    }
    out
}

/// Whole-screen text for one state snapshot
pub fn render(state: &UiState, image_base_url: &str) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Search: {}", state.raw_query);

    if !state.genres.is_empty() {
        let genres: Vec<String> = state
            .genres
            .iter()
            .map(|g| {
                if state.genre.is_selected(g.id) {
                    format!("[{}]", g.name)
                } else {
                    g.name.clone()
                }
            })
            .collect();
        let _ = writeln!(out, "Genres: {}", genres.join("  "));
    }

    out.push_str(&render_trending(state));

    out.push_str("All Movies\n");
    match state.movie_section() {
        MovieSection::Idle => {}
        MovieSection::Loading => out.push_str("  Loading...\n"),
        MovieSection::Error(message) => {
            let _ = writeln!(out, "  {}", message);
        }
        MovieSection::Movies(movies) => {
            for movie in movies {
                let card = MovieCardView::from_movie(movie, image_base_url);
                let _ = writeln!(
                    out,
                    "  - {}  ★ {} • {} • {}  {}",
                    card.title, card.rating, card.language, card.year, card.poster_url
                );
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ui_state::{OverlapPolicy, RequestId, UiEvent};
    use crate::domain::catalog::FETCH_ERROR_MESSAGE;
    use crate::domain::{Genre, GenreFilter, GenreId};

    const BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn batman() -> Movie {
        Movie {
            id: 268,
            title: "Batman".to_string(),
            poster_path: Some("/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg".to_string()),
            vote_average: Some(7.234),
            release_date: Some("1989-06-23".to_string()),
            original_language: Some("en".to_string()),
        }
    }

    #[test]
    fn test_card_with_all_fields() {
        let card = MovieCardView::from_movie(&batman(), BASE);
        assert_eq!(card.poster_url, "https://image.tmdb.org/t/p/w500/kBf3g9crrADGMc2AMAMlLBgSm2h.jpg");
        assert_eq!(card.rating, "7.2");
        assert_eq!(card.language, "eng");
        assert_eq!(card.year, "1989");
    }

    #[test]
    fn test_card_with_missing_fields() {
        let movie = Movie {
            id: 1,
            title: "Unknown".to_string(),
            poster_path: None,
            vote_average: Some(0.0),
            release_date: Some(String::new()),
            original_language: Some("xx".to_string()),
        };
        let card = MovieCardView::from_movie(&movie, BASE);

        assert_eq!(card.poster_url, POSTER_PLACEHOLDER);
        assert_eq!(card.rating, NOT_AVAILABLE);
        assert_eq!(card.language, NOT_AVAILABLE);
        assert_eq!(card.year, NOT_AVAILABLE);
    }

    #[test]
    fn test_trending_ranks_start_at_one() {
        let trending = vec![
            SearchCounter {
                id: "a".into(),
                search_term: "batman".into(),
                count: 7,
                poster_url: None,
                movie_id: 268,
            },
            SearchCounter {
                id: "b".into(),
                search_term: "dune".into(),
                count: 2,
                poster_url: Some("https://image.tmdb.org/t/p/w500/dune.jpg".into()),
                movie_id: 438631,
            },
        ];
        let view = trending_view(&trending);
        assert_eq!(view[0].rank, 1);
        assert_eq!(view[1].rank, 2);
        assert_eq!(view[1].search_term, "dune");
    }

    #[test]
    fn test_trending_hidden_when_empty() {
        let text = render(&UiState::default(), BASE);
        assert!(!text.contains("Trending"));
    }

    #[test]
    fn test_render_marks_selected_genre() {
        let state = UiState {
            genres: vec![
                Genre {
                    id: GenreId(28),
                    name: "Action".into(),
                },
                Genre {
                    id: GenreId(27),
                    name: "Horror".into(),
                },
            ],
            genre: GenreFilter::only(GenreId(27)),
            ..UiState::default()
        };
        let text = render(&state, BASE);
        assert!(text.contains("Genres: Action  [Horror]"));
    }

    #[test]
    fn test_render_movies_or_error() {
        let policy = OverlapPolicy::LatestIssued;
        let loaded = UiState::default()
            .apply(UiEvent::FetchStarted(RequestId(1)), policy)
            .apply(
                UiEvent::FetchSucceeded {
                    request: RequestId(1),
                    movies: vec![batman()],
                },
                policy,
            );
        let text = render(&loaded, BASE);
        assert!(text.contains("Batman  ★ 7.2 • eng • 1989"));

        let failed = loaded
            .apply(UiEvent::FetchStarted(RequestId(2)), policy)
            .apply(UiEvent::FetchFailed { request: RequestId(2) }, policy);
        let text = render(&failed, BASE);
        assert!(text.contains(FETCH_ERROR_MESSAGE));
        assert!(!text.contains("Batman"));
    }

    #[test]
    fn test_render_loading() {
        let state = UiState::default().apply(UiEvent::FetchStarted(RequestId(1)), OverlapPolicy::LatestIssued);
        assert!(render(&state, BASE).contains("Loading..."));
    }
}
