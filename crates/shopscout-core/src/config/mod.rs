//! Configuration management

use crate::error::{Result, ShopScoutError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Catalog (structured search) backend
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Vector store backend
    #[serde(default)]
    pub vectors: VectorStoreConfig,

    /// Embedding service
    #[serde(default)]
    pub embedding: EmbeddingServiceConfig,

    /// Named-entity recognizer service (optional; extraction falls back to
    /// pattern rules when absent)
    #[serde(default)]
    pub recognizer: Option<RecognizerConfig>,

    /// Relevance scorer service used for reranking (optional)
    #[serde(default)]
    pub scorer: Option<ScorerConfig>,

    /// Geocoding service for location-flavored queries (optional)
    #[serde(default)]
    pub geocoder: Option<GeocoderConfig>,
}

/// Structured search backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the search backend
    pub url: String,

    /// Index name to query
    #[serde(default = "default_index")]
    pub index: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("SHOPSCOUT_CATALOG_URL")
                .unwrap_or_else(|_| "http://localhost:9200".to_string()),
            index: std::env::var("SHOPSCOUT_CATALOG_INDEX").unwrap_or_else(|_| default_index()),
            timeout_secs: default_timeout(),
        }
    }
}

/// Vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreConfig {
    /// Base URL of the vector store
    pub url: String,

    /// Collection holding the product vectors
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Dimensionality of the stored vectors
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("SHOPSCOUT_VECTOR_URL")
                .unwrap_or_else(|_| "http://localhost:6333".to_string()),
            collection: std::env::var("SHOPSCOUT_VECTOR_COLLECTION")
                .unwrap_or_else(|_| default_collection()),
            dimensions: std::env::var("SHOPSCOUT_VECTOR_DIMS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_else(default_dimensions),
            timeout_secs: default_timeout(),
        }
    }
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingServiceConfig {
    /// Base URL of the embedding service
    pub url: String,

    /// Model name for embeddings
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// API key (optional, for authenticated services)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for EmbeddingServiceConfig {
    fn default() -> Self {
        Self {
            url: std::env::var("SHOPSCOUT_EMBEDDING_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            model: default_embedding_model(),
            api_key: std::env::var("SHOPSCOUT_EMBEDDING_API_KEY").ok(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Named-entity recognizer service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Base URL of the NER service
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Relevance scorer (reranker backend) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Base URL of the scorer service
    pub url: String,

    /// Model name for scoring
    #[serde(default = "default_scorer_model")]
    pub model: String,

    /// API key (optional)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Geocoding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the geocoding service
    pub url: String,

    /// API key (optional)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_index() -> String {
    "products".to_string()
}

fn default_collection() -> String {
    "products".to_string()
}

fn default_dimensions() -> usize {
    768
}

fn default_embedding_model() -> String {
    std::env::var("SHOPSCOUT_EMBEDDING_MODEL")
        .unwrap_or_else(|_| "sentence-transformers/all-mpnet-base-v2".to_string())
}

fn default_scorer_model() -> String {
    "cross-encoder/ms-marco-MiniLM-L-6-v2".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Load config from default path
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_yaml(&content)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse config from YAML. A malformed file is a configuration error,
    /// not a transient failure.
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| ShopScoutError::Config(format!("invalid config file: {}", e)))
    }

    /// Save config to default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(crate::CONFIG_DIR_NAME)
            .join("config.yml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_roundtrip() {
        let yaml = "\
catalog:
  url: http://search.internal:9200
  index: products
vectors:
  url: http://vectors.internal:6333
  dimensions: 384
embedding:
  url: http://embed.internal:8000
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.catalog.url, "http://search.internal:9200");
        assert_eq!(config.vectors.dimensions, 384);
        assert!(config.recognizer.is_none());
    }

    #[test]
    fn test_malformed_yaml_is_config_error() {
        let err = Config::from_yaml("catalog: [not, a, mapping").unwrap_err();
        assert!(matches!(err, ShopScoutError::Config(_)));
        assert!(err.is_fatal());
    }
}
