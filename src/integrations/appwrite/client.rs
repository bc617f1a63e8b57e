// src/integrations/appwrite/client.rs
//
// Appwrite document store client for search counters.
//
// One collection holds one document per search term:
//   { searchTerm, count, poster_url, movie_id }
// Queries use Appwrite's JSON query syntax in repeated `queries[]` params.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::config::AppwriteConfig;
use crate::domain::SearchCounter;
use crate::error::{AppError, AppResult};
use crate::repositories::SearchCounterRepository;

const SERVICE: &str = "Appwrite";

/// Counter document as stored in the collection
#[derive(Debug, Clone, Deserialize)]
struct CounterDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    count: u64,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default)]
    movie_id: u64,
}

impl From<CounterDocument> for SearchCounter {
    fn from(doc: CounterDocument) -> Self {
        SearchCounter {
            id: doc.id,
            search_term: doc.search_term,
            count: doc.count,
            poster_url: doc.poster_url,
            movie_id: doc.movie_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<CounterDocument>,
}

fn query_equal(attribute: &str, value: &str) -> String {
    json!({ "method": "equal", "attribute": attribute, "values": [value] }).to_string()
}

fn query_order_desc(attribute: &str) -> String {
    json!({ "method": "orderDesc", "attribute": attribute }).to_string()
}

fn query_limit(limit: usize) -> String {
    json!({ "method": "limit", "values": [limit] }).to_string()
}

pub struct AppwriteCounterStore {
    http_client: Client,
    documents_url: String,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteCounterStore {
    pub fn new(config: &AppwriteConfig, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;

        let documents_url = format!(
            "{}/databases/{}/collections/{}/documents",
            config.endpoint.trim_end_matches('/'),
            config.database_id,
            config.collection_id
        );

        Ok(Self {
            http_client,
            documents_url,
            project_id: config.project_id.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .http_client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .header("X-Appwrite-Project", &self.project_id);

        if let Some(key) = &self.api_key {
            request = request.header("X-Appwrite-Key", key);
        }

        request
    }

    async fn send<T>(&self, request: RequestBuilder) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UnexpectedStatus {
                service: SERVICE,
                status: status.as_u16(),
            });
        }

        Ok(response.json::<T>().await?)
    }

    async fn list(&self, queries: Vec<String>) -> AppResult<Vec<SearchCounter>> {
        let params: Vec<(&str, String)> = queries.into_iter().map(|q| ("queries[]", q)).collect();

        let list: DocumentList = self
            .send(self.request(Method::GET, &self.documents_url).query(&params))
            .await?;

        Ok(list.documents.into_iter().map(SearchCounter::from).collect())
    }
}

#[async_trait]
impl SearchCounterRepository for AppwriteCounterStore {
    async fn find_by_term(&self, search_term: &str) -> AppResult<Option<SearchCounter>> {
        let mut found = self
            .list(vec![query_equal("searchTerm", search_term), query_limit(1)])
            .await?;
        Ok(found.pop())
    }

    async fn create(&self, counter: &SearchCounter) -> AppResult<SearchCounter> {
        let body = json!({
            "documentId": counter.id,
            "data": {
                "searchTerm": counter.search_term,
                "count": counter.count,
                "poster_url": counter.poster_url,
                "movie_id": counter.movie_id,
            }
        });

        let doc: CounterDocument = self
            .send(self.request(Method::POST, &self.documents_url).json(&body))
            .await?;
        Ok(doc.into())
    }

    async fn increment(&self, counter: &SearchCounter) -> AppResult<SearchCounter> {
        // Read-modify-write: the document store has no atomic increment
        let url = format!("{}/{}", self.documents_url, counter.id);
        let body = json!({ "data": { "count": counter.count + 1 } });

        let doc: CounterDocument = self
            .send(self.request(Method::PATCH, &url).json(&body))
            .await?;
        Ok(doc.into())
    }

    async fn top_by_count(&self, limit: usize) -> AppResult<Vec<SearchCounter>> {
        self.list(vec![query_order_desc("count"), query_limit(limit)])
            .await
    }
}
