// src/application/commands.rs
//
// Terminal input parsing
//
// RULES:
// - A plain line is the whole search box contents, taken verbatim
// - `:`-prefixed lines are commands
// - No side effects here; the binary executes the parsed command

use crate::domain::{Genre, GenreId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// New search box contents
    Query(String),
    /// `:genre <name|id>`
    Genre(String),
    Trending,
    State,
    /// Current state as JSON
    Json,
    /// `:stats`, local counter store summary
    Stats,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let line = line.trim_end_matches(['\r', '\n']);

        let Some(command) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let (name, arg) = match command.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (command, ""),
        };

        match name {
            "genre" | "g" if !arg.is_empty() => Command::Genre(arg.to_string()),
            "trending" | "t" => Command::Trending,
            "state" | "s" => Command::State,
            "json" => Command::Json,
            "stats" => Command::Stats,
            "help" | "h" => Command::Help,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub const HELP: &str = "\
Type to search (each line replaces the search box, empty line clears it).
  :genre <name|id>  toggle a genre filter
  :trending         show trending searches
  :state            show the current view
  :json             dump the current state as JSON
  :stats            show local counter store stats
  :quit             exit";

/// Resolve a `:genre` argument against the loaded genres
///
/// Names match case-insensitively. A numeric id is accepted even when the
/// genre list failed to load.
pub fn resolve_genre(arg: &str, genres: &[Genre]) -> Option<GenreId> {
    if let Some(genre) = genres.iter().find(|g| g.name.eq_ignore_ascii_case(arg)) {
        return Some(genre.id);
    }

    arg.parse::<GenreId>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Vec<Genre> {
        vec![
            Genre {
                id: GenreId(27),
                name: "Horror".to_string(),
            },
            Genre {
                id: GenreId(35),
                name: "Comedy".to_string(),
            },
        ]
    }

    #[test]
    fn test_plain_line_is_verbatim_query() {
        assert_eq!(Command::parse("the thing \n"), Command::Query("the thing ".to_string()));
        assert_eq!(Command::parse(""), Command::Query(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse(":genre Horror"), Command::Genre("Horror".to_string()));
        assert_eq!(Command::parse(":g 27"), Command::Genre("27".to_string()));
        assert_eq!(Command::parse(":trending"), Command::Trending);
        assert_eq!(Command::parse(":state"), Command::State);
        assert_eq!(Command::parse(":json"), Command::Json);
        assert_eq!(Command::parse(":quit"), Command::Quit);
    }

    #[test]
    fn test_genre_without_argument_is_unknown() {
        assert_eq!(Command::parse(":genre"), Command::Unknown(":genre".to_string()));
        assert_eq!(Command::parse(":nope"), Command::Unknown(":nope".to_string()));
    }

    #[test]
    fn test_resolve_genre() {
        assert_eq!(resolve_genre("horror", &genres()), Some(GenreId(27)));
        assert_eq!(resolve_genre("35", &genres()), Some(GenreId(35)));
        assert_eq!(resolve_genre("10749", &[]), Some(GenreId(10749)));
        assert_eq!(resolve_genre("Western", &genres()), None);
    }
}
