//! Best-effort reranking
//!
//! Re-orders vector-search candidates with an independent relevance signal.
//! Reranking must never degrade availability or drop candidates: any
//! failure (transport error, malformed response, or a response missing a
//! score for any candidate) reverts the whole batch to its original order.

use super::SearchResult;
use crate::remote::RelevanceScorer;
use std::collections::HashMap;

/// Rerank candidates for a query.
///
/// Zero or one candidate is a no-op; the scorer is not invoked. Scores are
/// attached by exact passage-text match and sorted descending; a stable
/// sort keeps the original similarity order as the tiebreak.
pub async fn rerank(
    scorer: &dyn RelevanceScorer,
    query: &str,
    candidates: Vec<SearchResult>,
) -> Vec<SearchResult> {
    if candidates.len() <= 1 {
        return candidates;
    }

    let passages: Vec<String> = candidates.iter().map(|c| c.passage_text()).collect();

    let scores = match scorer.score(query, &passages).await {
        Ok(scores) => scores,
        Err(e) => {
            tracing::warn!("Rerank scorer failed: {}, keeping original order", e);
            return candidates;
        }
    };

    let by_passage: HashMap<&str, f64> = scores
        .iter()
        .map(|s| (s.passage.as_str(), s.score))
        .collect();

    // Every candidate must be covered; a partial response degrades the
    // whole batch.
    let mut attached: Vec<f64> = Vec::with_capacity(candidates.len());
    for passage in &passages {
        match by_passage.get(passage.as_str()) {
            Some(score) => attached.push(*score),
            None => {
                tracing::warn!(
                    "Rerank response missing {} of {} passages, keeping original order",
                    passages.len() - by_passage.len(),
                    passages.len()
                );
                return candidates;
            }
        }
    }

    let mut reranked: Vec<SearchResult> = candidates
        .into_iter()
        .zip(attached)
        .map(|(mut candidate, score)| {
            candidate.rerank_score = Some(score);
            candidate
        })
        .collect();

    // sort_by is stable: ties keep the original similarity order
    reranked.sort_by(|a, b| {
        b.rerank_score
            .partial_cmp(&a.rerank_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    reranked
}
