//! ShopScout Core Library
//!
//! Resolves a free-text shopping query into a ranked, filtered result set
//! by coordinating two retrieval paths:
//!
//! # Features
//! - Structured intent extraction (pattern rules + NER fallback)
//! - Backend-agnostic boolean/filter query building with stable pagination
//! - Progressive fallback ladder guaranteeing a best-effort response
//! - Embedding-based nearest-neighbor search with a similarity floor
//! - Best-effort reranking that never degrades availability

pub mod backend;
pub mod config;
pub mod error;
pub mod intent;
pub mod query;
pub mod remote;
pub mod search;

pub use backend::{HttpCatalogBackend, HttpVectorStore, VectorBackend, VectorHit};
pub use config::{
    CatalogConfig, Config, EmbeddingServiceConfig, GeocoderConfig, RecognizerConfig, ScorerConfig,
    VectorStoreConfig,
};
pub use error::{Error, Result, ShopScoutError};
pub use intent::{extract, extract_with_recognizer, refine_location, StructuredIntent};
pub use query::{
    build, to_query_body, Clause, Pagination, QueryDescription, SortHint, SortOrder, SortTerm,
};
pub use remote::{
    Embedder, EntityRecognizer, GeoLocation, Geocoder, HttpEmbedder, HttpGeocoder, HttpRecognizer,
    HttpScorer, PassageScore, RecognizedEntity, RelevanceScorer, TextAnalysis,
};
pub use search::{
    rerank, resolve, QueryExecutor, ResolveRequest, ResultSet, SearchResult, SimilaritySearch,
};

/// Default config directory name
pub const CONFIG_DIR_NAME: &str = "shopscout";
