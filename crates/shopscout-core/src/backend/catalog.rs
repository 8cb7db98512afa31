//! Structured search backend client
//!
//! Executes a `QueryDescription` against the catalog's `_search` endpoint.
//! Backend failures propagate as retrieval failures; they are never
//! swallowed, since returning stale or wrong data would be worse than
//! failing loudly.

use crate::config::CatalogConfig;
use crate::error::{Result, ShopScoutError};
use crate::query::{to_query_body, QueryDescription};
use crate::search::{QueryExecutor, ResultSet, SearchResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the catalog search backend
pub struct HttpCatalogBackend {
    http_client: reqwest::Client,
    config: CatalogConfig,
}

impl HttpCatalogBackend {
    /// Create from configuration
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ShopScoutError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(CatalogConfig::default())
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Deserialize)]
struct HitsEnvelope {
    total: TotalCount,
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct TotalCount {
    value: u64,
}

#[derive(Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source")]
    source: Value,
}

#[async_trait]
impl QueryExecutor for HttpCatalogBackend {
    async fn execute(&self, query: &QueryDescription) -> Result<ResultSet> {
        let body = to_query_body(query);
        let url = format!("{}/{}/_search", self.config.url, self.config.index);

        tracing::debug!(index = %self.config.index, "executing catalog query");

        let response = self.http_client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopScoutError::Backend(format!(
                "catalog search failed (HTTP {}): {}",
                status, body
            )));
        }

        let search_response: SearchResponse = response.json().await?;

        let hits = search_response
            .hits
            .hits
            .into_iter()
            .map(|hit| SearchResult {
                id: hit.id,
                attributes: hit.source,
                score: hit.score,
                rerank_score: None,
            })
            .collect();

        Ok(ResultSet {
            hits,
            total: search_response.hits.total.value,
            attempt: None,
        })
    }
}
