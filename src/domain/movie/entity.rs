use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;

/// A movie as returned by the metadata API.
/// Received read-only; never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Identifier assigned by the metadata API
    pub id: u64,

    #[serde(default)]
    pub title: String,

    /// Path fragment of the poster image (e.g. "/abc123.jpg")
    #[serde(default)]
    pub poster_path: Option<String>,

    /// Average vote, 0 to 10
    #[serde(default)]
    pub vote_average: Option<f64>,

    /// ISO date string, may be empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,

    /// Two-letter language code
    #[serde(default)]
    pub original_language: Option<String>,
}

impl Movie {
    /// Year part of the release date, if there is one
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .filter(|date| !date.is_empty())
            .and_then(|date| date.split('-').next())
    }

    /// Poster path, ignoring empty strings
    pub fn poster(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|p| !p.is_empty())
    }
}

/// Genre identifier from the metadata API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenreId(pub u64);

impl std::fmt::Display for GenreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for GenreId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(GenreId)
            .map_err(|_| DomainError::InvalidGenreId(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}
