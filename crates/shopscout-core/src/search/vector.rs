//! Semantic nearest-neighbor search
//!
//! Embeds the query text, validates the vector dimensionality against the
//! store, and issues a nearest-neighbor query with a similarity floor and a
//! result cap. The floor and cap are enforced locally after the backend
//! returns, so a misbehaving backend cannot leak candidates below the
//! threshold or beyond the limit.

use super::SearchResult;
use crate::backend::VectorBackend;
use crate::error::{Result, ShopScoutError};
use crate::remote::Embedder;

/// The semantic retrieval path: embedder + vector store.
pub struct SimilaritySearch<'a> {
    embedder: &'a dyn Embedder,
    backend: &'a dyn VectorBackend,
}

impl<'a> SimilaritySearch<'a> {
    pub fn new(embedder: &'a dyn Embedder, backend: &'a dyn VectorBackend) -> Self {
        Self { embedder, backend }
    }

    /// Search for records semantically similar to `text`.
    ///
    /// A dimensionality mismatch between the embedding and the store is a
    /// fatal, non-retryable error (model/config drift) and is raised before
    /// any backend call. No candidate clearing the threshold is not an
    /// error; the result is simply empty.
    pub async fn search(
        &self,
        text: &str,
        limit: usize,
        min_similarity: f32,
    ) -> Result<Vec<SearchResult>> {
        let vector = self.embedder.embed(text).await?;

        let expected = self.backend.dimensions();
        if vector.len() != expected {
            return Err(ShopScoutError::DimensionMismatch {
                expected,
                actual: vector.len(),
            });
        }

        let hits = self.backend.query(&vector, min_similarity, limit).await?;

        let mut results: Vec<SearchResult> = hits
            .into_iter()
            .filter(|hit| hit.similarity >= min_similarity)
            .map(|hit| SearchResult {
                id: hit.id,
                attributes: hit.payload,
                score: Some(hit.similarity as f64),
                rerank_score: None,
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }
}
