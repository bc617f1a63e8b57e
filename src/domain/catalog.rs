// src/domain/catalog.rs
//
// Static catalog configuration: genre allow-list, language table and
// user-facing messages. Kept as data so logic never embeds these literals.

/// Genres offered as filters, matched exactly against the API's genre names
pub const ALLOWED_GENRES: &[&str] = &["Horror", "Comedy", "Romance", "Mystery", "Action", "Drama"];

/// Two-letter to three-letter language codes shown on movie cards
pub const LANGUAGE_CODES: &[(&str, &str)] = &[
    ("en", "eng"),
    ("es", "spa"),
    ("fr", "fra"),
    ("de", "deu"),
    ("it", "ita"),
    ("pt", "por"),
    ("ru", "rus"),
    ("zh", "zho"),
    ("ja", "jpn"),
    ("ko", "kor"),
];

pub const NO_MOVIES_MESSAGE: &str = "No movies found.";
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Shown in place of a poster when the movie has none
pub const POSTER_PLACEHOLDER: &str = "/no-movie.png";

/// Shown for missing rating, language or year
pub const NOT_AVAILABLE: &str = "N/A";

/// Sort order of the discover listing
pub const DISCOVER_SORT: &str = "popularity.desc";

pub fn is_allowed_genre(name: &str) -> bool {
    ALLOWED_GENRES.contains(&name)
}

pub fn three_letter_language(code: &str) -> Option<&'static str> {
    LANGUAGE_CODES
        .iter()
        .find(|(two, _)| *two == code)
        .map(|(_, three)| *three)
}

/// Join an image base URL and a path fragment with exactly one slash
pub fn compose_image_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
