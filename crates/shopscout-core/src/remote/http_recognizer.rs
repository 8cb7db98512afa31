//! HTTP-based named-entity recognizer client

use super::{EntityRecognizer, TextAnalysis};
use crate::config::RecognizerConfig;
use crate::error::{Result, ShopScoutError};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Recognizer backed by an external NLP service exposing `/analyze`
pub struct HttpRecognizer {
    http_client: reqwest::Client,
    config: RecognizerConfig,
}

impl HttpRecognizer {
    /// Create from configuration
    pub fn new(config: RecognizerConfig) -> Result<Self> {
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
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[async_trait]
impl EntityRecognizer for HttpRecognizer {
    async fn analyze(&self, text: &str) -> Result<TextAnalysis> {
        let url = format!("{}/analyze", self.config.url);

        let response = self
            .http_client
            .post(&url)
            .json(&AnalyzeRequest { text })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ShopScoutError::ExternalService(format!(
                "Recognizer error (HTTP {}): {}",
                status, body
            )));
        }

        let analysis: TextAnalysis = response.json().await?;
        Ok(analysis)
    }
}
