//! Collaborator trait definitions

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Embedding generation trait
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Named-entity recognition trait
///
/// Only the `entities` field of the analysis is consumed by intent
/// extraction; tokens and sentiment are carried for completeness.
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Analyze text, returning recognized entities
    async fn analyze(&self, text: &str) -> Result<TextAnalysis>;
}

/// Result of a text analysis call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextAnalysis {
    #[serde(default)]
    pub entities: Vec<RecognizedEntity>,

    #[serde(default)]
    pub tokens: Vec<String>,

    #[serde(default)]
    pub sentiment: Option<f64>,
}

/// One recognized entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizedEntity {
    /// Entity type label (e.g. "city", "brand", "person")
    pub label: String,

    /// Surface text of the entity
    pub text: String,
}

/// Relevance scoring trait (reranker backend)
#[async_trait]
pub trait RelevanceScorer: Send + Sync {
    /// Score passages against a query
    async fn score(&self, query: &str, passages: &[String]) -> Result<Vec<PassageScore>>;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Score for one passage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageScore {
    pub passage: String,
    pub score: f64,
}

/// Geocoding trait: free text to a structured location
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve a place name
    async fn locate(&self, text: &str) -> Result<GeoLocation>;
}

/// Structured location returned by geocoding
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
