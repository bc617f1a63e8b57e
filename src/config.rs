// src/config.rs
//
// Runtime configuration
//
// Everything is read from environment variables. The binary loads a `.env`
// file first (dotenvy), so local development needs no exported variables.
// `from_lookup` accepts any key lookup, which keeps parsing testable.

use std::path::PathBuf;
use std::time::Duration;

use crate::application::ui_state::OverlapPolicy;
use crate::error::{AppError, AppResult};

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_APPWRITE_ENDPOINT: &str = "https://cloud.appwrite.io/v1";

const DEFAULT_QUIET_PERIOD_MS: u64 = 500;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Movie metadata API settings
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
}

/// Hosted document store settings
#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub api_key: Option<String>,
}

/// Where search counters are persisted
#[derive(Debug, Clone)]
pub enum CounterBackend {
    Appwrite(AppwriteConfig),
    /// Local SQLite file; `None` uses the per-user data directory
    Sqlite { path: Option<PathBuf> },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    pub counter_backend: CounterBackend,
    /// Quiet period before typed input becomes the stabilized query
    pub quiet_period: Duration,
    pub request_timeout: Duration,
    pub trending_limit: usize,
    pub overlap_policy: OverlapPolicy,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("TMDB_API_KEY")
            .or_else(|| get("VITE_TMDB_API_KEY"))
            .ok_or_else(|| AppError::Config("TMDB_API_KEY is required".to_string()))?;

        let tmdb = TmdbConfig {
            api_key,
            base_url: get("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
            image_base_url: get("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IMAGE_BASE_URL.to_string()),
        };

        let backend_name = match get("COUNTER_BACKEND") {
            Some(name) => name.to_lowercase(),
            None if get("APPWRITE_PROJECT_ID").is_some() => "appwrite".to_string(),
            None => "sqlite".to_string(),
        };

        let counter_backend = match backend_name.as_str() {
            "appwrite" => {
                let required = |key: &str| {
                    get(key).ok_or_else(|| {
                        AppError::Config(format!("{} is required for the appwrite backend", key))
                    })
                };
                CounterBackend::Appwrite(AppwriteConfig {
                    endpoint: get("APPWRITE_ENDPOINT")
                        .unwrap_or_else(|| DEFAULT_APPWRITE_ENDPOINT.to_string()),
                    project_id: required("APPWRITE_PROJECT_ID")?,
                    database_id: required("APPWRITE_DATABASE_ID")?,
                    collection_id: required("APPWRITE_COLLECTION_ID")?,
                    api_key: get("APPWRITE_API_KEY"),
                })
            }
            "sqlite" => CounterBackend::Sqlite {
                path: get("MOVIESCOUT_DB_PATH").map(PathBuf::from),
            },
            other => {
                return Err(AppError::Config(format!(
                    "Unknown COUNTER_BACKEND '{}' (expected appwrite or sqlite)",
                    other
                )))
            }
        };

        let quiet_period_ms = parse_or(&get, "DEBOUNCE_MS", DEFAULT_QUIET_PERIOD_MS)?;
        let timeout_secs = parse_or(&get, "REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let trending_limit = parse_or(&get, "TRENDING_LIMIT", DEFAULT_TRENDING_LIMIT)?;

        let overlap_policy = match get("FETCH_ORDERING") {
            Some(raw) => raw.parse::<OverlapPolicy>()?,
            None => OverlapPolicy::default(),
        };

        Ok(Self {
            tmdb,
            counter_backend,
            quiet_period: Duration::from_millis(quiet_period_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            trending_limit,
            overlap_policy,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}
