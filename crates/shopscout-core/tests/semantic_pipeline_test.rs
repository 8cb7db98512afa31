//! End-to-end test of the semantic retrieval path:
//! embed → nearest-neighbor search → rerank.

use async_trait::async_trait;
use serde_json::json;
use shopscout_core::{
    rerank, Embedder, PassageScore, RelevanceScorer, Result, ShopScoutError, SimilaritySearch,
    VectorBackend, VectorHit,
};

struct FixedEmbedder {
    dims: usize,
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![0.5; self.dims])
    }

    fn model_name(&self) -> &str {
        "fixed-embedder"
    }
}

struct MemoryVectorStore {
    dims: usize,
    hits: Vec<VectorHit>,
}

#[async_trait]
impl VectorBackend for MemoryVectorStore {
    async fn query(
        &self,
        _vector: &[f32],
        min_similarity: f32,
        limit: usize,
    ) -> Result<Vec<VectorHit>> {
        let mut hits: Vec<VectorHit> = self
            .hits
            .iter()
            .filter(|h| h.similarity >= min_similarity)
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap());
        hits.truncate(limit);
        Ok(hits)
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

struct KeywordScorer;

#[async_trait]
impl RelevanceScorer for KeywordScorer {
    async fn score(&self, query: &str, passages: &[String]) -> Result<Vec<PassageScore>> {
        Ok(passages
            .iter()
            .map(|p| PassageScore {
                passage: p.clone(),
                score: if p.to_lowercase().contains(&query.to_lowercase()) {
                    1.0
                } else {
                    0.1
                },
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        "keyword-scorer"
    }
}

fn store() -> MemoryVectorStore {
    MemoryVectorStore {
        dims: 8,
        hits: vec![
            VectorHit {
                id: "1".to_string(),
                payload: json!({ "name": "Budget phone", "description": "entry level" }),
                similarity: 0.92,
            },
            VectorHit {
                id: "2".to_string(),
                payload: json!({ "name": "Rugged phone", "description": "waterproof build" }),
                similarity: 0.88,
            },
            VectorHit {
                id: "3".to_string(),
                payload: json!({ "name": "Old model", "description": "discontinued" }),
                similarity: 0.41,
            },
        ],
    }
}

#[tokio::test]
async fn test_vector_search_then_rerank_promotes_relevant_candidate() {
    let embedder = FixedEmbedder { dims: 8 };
    let backend = store();
    let search = SimilaritySearch::new(&embedder, &backend);

    let candidates = search.search("waterproof", 10, 0.5).await.unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].id, "1");

    let reranked = rerank(&KeywordScorer, "waterproof", candidates).await;
    assert_eq!(reranked[0].id, "2");
    assert_eq!(reranked[0].rerank_score, Some(1.0));
    assert_eq!(reranked.len(), 2);
}

#[tokio::test]
async fn test_dimension_mismatch_is_fatal_before_search() {
    let embedder = FixedEmbedder { dims: 512 };
    let backend = store(); // stores 8-dimensional vectors
    let search = SimilaritySearch::new(&embedder, &backend);

    let err = search.search("anything", 5, 0.0).await.unwrap_err();
    assert!(matches!(err, ShopScoutError::DimensionMismatch { .. }));
    assert!(err.is_fatal());
}
