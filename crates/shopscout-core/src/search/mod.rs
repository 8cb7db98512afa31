//! Retrieval paths
//!
//! - Structured path: query description execution behind the fallback
//!   ladder (`fallback`)
//! - Semantic path: embedding-based nearest-neighbor search (`vector`)
//!   followed by best-effort reranking (`rerank`)

mod fallback;
mod rerank;
mod vector;

pub use fallback::{resolve, FallbackAttempt, QueryExecutor, ResolveRequest, FALLBACK_LADDER};
pub use rerank::rerank;
pub use vector::SimilaritySearch;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One retrieved record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Backend identifier
    pub id: String,

    /// The backend's native attribute set; opaque to the core beyond what
    /// is needed for relevance
    pub attributes: Value,

    /// Similarity score in [0, 1] (vector path) or backend relevance score
    pub score: Option<f64>,

    /// Attached by the reranker when a batch was successfully rescored
    pub rerank_score: Option<f64>,
}

impl SearchResult {
    /// The passage text sent to the relevance scorer for this record.
    pub fn passage_text(&self) -> String {
        match (
            self.attributes.get("name").and_then(Value::as_str),
            self.attributes.get("description").and_then(Value::as_str),
        ) {
            (Some(name), Some(description)) => format!("{}. {}", name, description),
            (Some(name), None) => name.to_string(),
            (None, Some(description)) => description.to_string(),
            (None, None) => self.attributes.to_string(),
        }
    }
}

/// Result set for one query: hits plus an accurate total count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    pub hits: Vec<SearchResult>,
    pub total: u64,

    /// Name of the ladder attempt that produced this set, filled in by the
    /// fallback orchestrator ("strict", "broadest-filter",
    /// "generic-default"). Lets callers distinguish substituted results
    /// from strict matches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempt: Option<String>,
}

impl ResultSet {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_passage_text_prefers_name_and_description() {
        let result = SearchResult {
            id: "1".to_string(),
            attributes: json!({ "name": "Pixel 9", "description": "Flagship phone" }),
            score: Some(0.9),
            rerank_score: None,
        };
        assert_eq!(result.passage_text(), "Pixel 9. Flagship phone");
    }

    #[test]
    fn test_passage_text_falls_back_to_raw_attributes() {
        let result = SearchResult {
            id: "1".to_string(),
            attributes: json!({ "sku": "X-1" }),
            score: None,
            rerank_score: None,
        };
        assert_eq!(result.passage_text(), r#"{"sku":"X-1"}"#);
    }
}
