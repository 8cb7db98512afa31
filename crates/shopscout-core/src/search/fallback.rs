//! Fallback orchestration
//!
//! Wraps "run query, check result count" in a ladder of progressively
//! relaxed retries so the caller always receives a best-effort result set.
//! The ladder is plain data; each attempt is an intent transform plus a
//! guard that disables further fallback once applied, so relaxation cannot
//! recurse. A read-only executor makes `resolve` idempotent, and the
//! executor is invoked at most 3 times for any input.

use super::ResultSet;
use crate::error::Result;
use crate::intent::StructuredIntent;
use crate::query::{build, Pagination, QueryDescription, SortHint};
use async_trait::async_trait;

/// Runs one structured query against a backend.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &QueryDescription) -> Result<ResultSet>;
}

/// One resolution request
#[derive(Debug, Clone)]
pub struct ResolveRequest<'a> {
    pub intent: &'a StructuredIntent,
    pub residual_text: &'a str,
    pub pagination: Pagination,
    pub sort_hint: SortHint,

    /// When false, a zero-result strict query is returned as-is.
    pub allow_fallback: bool,
}

impl<'a> ResolveRequest<'a> {
    pub fn new(intent: &'a StructuredIntent, residual_text: &'a str) -> Self {
        Self {
            intent,
            residual_text,
            pagination: Pagination::default(),
            sort_hint: SortHint::default(),
            allow_fallback: true,
        }
    }
}

/// Ordered step in the fallback ladder
pub struct FallbackAttempt {
    pub name: &'static str,

    /// Whether this attempt applies to the original intent
    pub applies: fn(&StructuredIntent) -> bool,

    /// Relaxed copy of the intent for this attempt
    pub transform: fn(&StructuredIntent) -> StructuredIntent,

    /// Guard: once applied, no further fallback may run
    pub exhausts_fallback: bool,
}

/// The ladder. Attempts are tried in order after a zero-result strict
/// query; their `applies` guards are mutually exclusive. An intent no
/// guard accepts (filters set, but none broad enough to relax to) keeps
/// the honest empty strict result.
pub const FALLBACK_LADDER: &[FallbackAttempt] = &[
    // Drop free text, keep only the broadest geographic or categorical
    // filter. Narrow-only intents (price, storage, flags) are excluded:
    // relaxing them to match-all would substitute unrelated results for
    // a filtered query.
    FallbackAttempt {
        name: "broadest-filter",
        applies: |intent| {
            intent.city.is_some() || intent.state.is_some() || intent.category.is_some()
        },
        transform: keep_broadest_filter,
        exhausts_fallback: true,
    },
    // Pure free-text query with no matches: a generic "match everything,
    // default sort" sample so a non-filtered request never sees an empty
    // screen.
    FallbackAttempt {
        name: "generic-default",
        applies: |intent| intent.is_empty(),
        transform: |_| StructuredIntent::default(),
        exhausts_fallback: true,
    },
];

/// Keep the single broadest filter: city, else state, else category.
fn keep_broadest_filter(intent: &StructuredIntent) -> StructuredIntent {
    let mut relaxed = StructuredIntent::default();
    if intent.city.is_some() {
        relaxed.city = intent.city.clone();
    } else if intent.state.is_some() {
        relaxed.state = intent.state.clone();
    } else if intent.category.is_some() {
        relaxed.category = intent.category.clone();
    }
    relaxed
}

/// Resolve a query through the fallback ladder.
///
/// 1. Execute the full query (all filters + text); return on any hit.
/// 2. On zero results, when fallback is allowed, run the first applicable
///    ladder attempt once (text dropped, intent relaxed). The relaxed
///    request is not fallback-eligible itself.
/// 3. An empty set after exhausting the ladder is returned unmodified: a
///    valid, honest outcome, not an error.
///
/// Backend failures propagate; returning wrong data would be worse than
/// failing loudly.
pub async fn resolve(
    request: &ResolveRequest<'_>,
    executor: &dyn QueryExecutor,
) -> Result<ResultSet> {
    let strict = build(
        request.intent,
        request.residual_text,
        request.pagination,
        request.sort_hint,
    );
    let mut result = executor.execute(&strict).await?;
    result.attempt = Some("strict".to_string());

    if result.total > 0 || !request.allow_fallback {
        return Ok(result);
    }

    for attempt in FALLBACK_LADDER {
        if !(attempt.applies)(request.intent) {
            continue;
        }

        tracing::debug!(
            attempt = attempt.name,
            filters = request.intent.filter_count(),
            "strict query empty, relaxing"
        );

        let relaxed_intent = (attempt.transform)(request.intent);
        let relaxed = build(&relaxed_intent, "", request.pagination, request.sort_hint);
        let mut result = executor.execute(&relaxed).await?;
        result.attempt = Some(attempt.name.to_string());

        if attempt.exhausts_fallback || result.total > 0 {
            return Ok(result);
        }
    }

    Ok(result)
}
