//! External collaborator clients
//!
//! Narrow HTTP clients for the black-box services the retrieval core
//! depends on:
//! - Embedding generation
//! - Named-entity recognition
//! - Relevance scoring (reranker backend)
//! - Geocoding for location-flavored queries
//!
//! Each client carries a bounded request timeout; a timed-out call is a
//! failure like any other, never an indefinite block.

mod http_embedder;
mod http_geocoder;
mod http_recognizer;
mod http_scorer;
mod traits;

pub use http_embedder::HttpEmbedder;
pub use http_geocoder::HttpGeocoder;
pub use http_recognizer::HttpRecognizer;
pub use http_scorer::HttpScorer;
pub use traits::*;
