//! HTTP-based relevance scorer used as the reranker backend
//!
//! The scorer is strict: transport errors, non-2xx responses and malformed
//! bodies are all surfaced as errors. The rerank layer is the component
//! that degrades to the original order; the client does not guess scores.

use super::{PassageScore, RelevanceScorer};
use crate::config::ScorerConfig;
use crate::error::{Result, ShopScoutError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Scorer backed by a cross-encoder style `/rerank` endpoint
pub struct HttpScorer {
    http_client: reqwest::Client,
    config: ScorerConfig,
}

impl HttpScorer {
    /// Create from configuration
    pub fn new(config: ScorerConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ShopScoutError::Http)?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    passages: &'a [String],
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<PassageScore>,
}

#[async_trait]
impl RelevanceScorer for HttpScorer {
    async fn score(&self, query: &str, passages: &[String]) -> Result<Vec<PassageScore>> {
        let url = format!("{}/rerank", self.config.url);

        let request = RerankRequest {
            model: &self.config.model,
            query,
            passages,
        };

        let mut req = self.http_client.post(&url).json(&request);
        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopScoutError::ExternalService(format!(
                "Scorer error (HTTP {}): {}",
                status, body
            )));
        }

        let rerank_response: RerankResponse = response.json().await?;
        Ok(rerank_response.results)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
