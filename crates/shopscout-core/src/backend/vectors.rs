//! Vector store client

use crate::config::VectorStoreConfig;
use crate::error::{Result, ShopScoutError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Nearest-neighbor query interface over the vector store
#[async_trait]
pub trait VectorBackend: Send + Sync {
    /// Return records whose similarity to `vector` is at least
    /// `min_similarity`, best first, capped at `limit`
    async fn query(
        &self,
        vector: &[f32],
        min_similarity: f32,
        limit: usize,
    ) -> Result<Vec<VectorHit>>;

    /// Dimensionality of the stored vectors
    fn dimensions(&self) -> usize;
}

/// One nearest-neighbor hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorHit {
    pub id: String,
    pub payload: Value,
    /// Similarity in [0, 1] (1 − cosine distance)
    pub similarity: f32,
}

/// HTTP client for the vector store's points-search endpoint
pub struct HttpVectorStore {
    http_client: reqwest::Client,
    config: VectorStoreConfig,
}

impl HttpVectorStore {
    /// Create from configuration
    pub fn new(config: VectorStoreConfig) -> Result<Self> {
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
        Self::new(VectorStoreConfig::default())
    }
}

#[derive(Serialize)]
struct PointsSearchRequest<'a> {
    vector: &'a [f32],
    limit: usize,
    score_threshold: f32,
    with_payload: bool,
}

#[derive(Deserialize)]
struct PointsSearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Deserialize)]
struct ScoredPoint {
    id: Value,
    score: f32,
    #[serde(default)]
    payload: Value,
}

#[async_trait]
impl VectorBackend for HttpVectorStore {
    async fn query(
        &self,
        vector: &[f32],
        min_similarity: f32,
        limit: usize,
    ) -> Result<Vec<VectorHit>> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.config.url, self.config.collection
        );

        let request = PointsSearchRequest {
            vector,
            limit,
            score_threshold: min_similarity,
            with_payload: true,
        };

        let response = self.http_client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopScoutError::Backend(format!(
                "vector search failed (HTTP {}): {}",
                status, body
            )));
        }

        let search_response: PointsSearchResponse = response.json().await?;

        let hits = search_response
            .result
            .into_iter()
            .map(|point| VectorHit {
                // Point ids may be numeric or string
                id: match point.id {
                    Value::String(s) => s,
                    other => other.to_string(),
                },
                payload: point.payload,
                similarity: point.score,
            })
            .collect();

        Ok(hits)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }
}
