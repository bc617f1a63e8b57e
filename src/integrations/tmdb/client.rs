// src/integrations/tmdb/client.rs
//
// TMDB REST client
//
// - Bearer-token authenticated GET requests
// - Maps responses to domain `Movie` / `Genre` values
// - Non-2xx statuses become `AppError::UnexpectedStatus`
// - Never touches UI state; callers decide what a failure means

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TmdbConfig;
use crate::domain::{Genre, Movie};
use crate::error::{AppError, AppResult};
use crate::integrations::catalog::{MovieCatalog, MovieRequest};

const SERVICE: &str = "TMDB";

/// `/genre/movie/list` response
#[derive(Debug, Deserialize)]
struct GenreListResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// `/search/movie` and `/discover/movie` response
#[derive(Debug, Deserialize)]
struct MoviePage {
    #[serde(default)]
    results: Option<Vec<Movie>>,
}

pub struct TmdbClient {
    base_url: String,
    http_client: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client,
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str, params: &[(&'static str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        log::debug!("GET {} {:?}", url, params);

        let response = self
            .http_client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let response: GenreListResponse = self.get_json("/genre/movie/list", &[]).await?;
        Ok(response.genres)
    }

    async fn movies(&self, request: &MovieRequest) -> AppResult<Vec<Movie>> {
        let page: MoviePage = self
            .get_json(request.path(), &request.query_params())
            .await?;
        Ok(page.results.unwrap_or_default())
    }
}
