//! Structured query building
//!
//! Turns a `StructuredIntent` plus residual free text into a
//! backend-agnostic `QueryDescription`: must clauses, filter clauses, a
//! pagination window and a sort specification. Purely a transform with no
//! I/O, deterministic for identical inputs. Rendering to the backend-native
//! JSON body lives in `dsl`.

mod dsl;

pub use dsl::to_query_body;

use crate::intent::StructuredIntent;
use serde::{Deserialize, Serialize};

/// Weighted text-match fields, most relevant first
pub const TEXT_MATCH_FIELDS: &[&str] = &["name^3", "description", "category^2", "brand^2"];

/// Deterministic tiebreak appended to every sort specification so identical
/// queries paginate consistently
pub const TIEBREAK_FIELD: &str = "id";

/// One query clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Clause {
    /// Exact-term match
    Term { field: String, value: String },
    /// Numeric range; either bound may be open
    Range {
        field: String,
        gte: Option<f64>,
        lte: Option<f64>,
    },
    /// Case-insensitive partial match
    PhrasePrefix { field: String, value: String },
    /// Weighted multi-field free-text match
    MultiMatch { query: String, fields: Vec<String> },
    /// Matches every record
    MatchAll,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// One field + direction pair of a sort specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortTerm {
    pub field: String,
    pub order: SortOrder,
}

impl SortTerm {
    pub fn asc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Requested sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortHint {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl std::str::FromStr for SortHint {
    type Err = crate::error::ShopScoutError;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "price_asc" | "price-asc" => Ok(Self::PriceAsc),
            "price_desc" | "price-desc" => Ok(Self::PriceDesc),
            "rating_desc" | "rating-desc" | "rating" => Ok(Self::RatingDesc),
            other => Err(crate::error::ShopScoutError::InvalidInput(format!(
                "unknown sort hint: {}",
                other
            ))),
        }
    }
}

/// Pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub from: usize,
    pub size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { from: 0, size: 10 }
    }
}

/// Backend-agnostic structured query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDescription {
    pub must: Vec<Clause>,
    pub filters: Vec<Clause>,
    pub pagination: Pagination,
    pub sort: Vec<SortTerm>,
}

/// Build a query description from an intent and residual text.
///
/// Every non-empty intent field maps to exactly one filter clause. The sort
/// specification always ends with the identifier tiebreak.
pub fn build(
    intent: &StructuredIntent,
    residual_text: &str,
    pagination: Pagination,
    sort_hint: SortHint,
) -> QueryDescription {
    let text = residual_text.trim();

    let must = if text.is_empty() {
        vec![Clause::MatchAll]
    } else {
        vec![Clause::MultiMatch {
            query: text.to_string(),
            fields: TEXT_MATCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        }]
    };

    let filters = build_filters(intent);
    let sort = build_sort(sort_hint, !text.is_empty());

    QueryDescription {
        must,
        filters,
        pagination,
        sort,
    }
}

fn build_filters(intent: &StructuredIntent) -> Vec<Clause> {
    let mut filters = Vec::new();

    // Numeric bounds, one clause per non-empty field
    if let Some(min) = intent.min_price {
        filters.push(Clause::Range {
            field: "price".to_string(),
            gte: Some(min),
            lte: None,
        });
    }
    if let Some(max) = intent.max_price {
        filters.push(Clause::Range {
            field: "price".to_string(),
            gte: None,
            lte: Some(max),
        });
    }
    if let Some(rating) = intent.min_rating {
        filters.push(Clause::Range {
            field: "rating".to_string(),
            gte: Some(rating),
            lte: None,
        });
    }

    // Categorical fields needing case-insensitive partial match
    phrase_prefix(&mut filters, "brand", &intent.brand);
    phrase_prefix(&mut filters, "model", &intent.model);
    phrase_prefix(&mut filters, "color", &intent.color);
    phrase_prefix(&mut filters, "processor", &intent.processor);
    phrase_prefix(&mut filters, "city", &intent.city);
    phrase_prefix(&mut filters, "state", &intent.state);

    // Exact-match categoricals
    term(&mut filters, "storage", &intent.storage);
    term(&mut filters, "ram", &intent.ram);
    term(&mut filters, "category", &intent.category);
    term(&mut filters, "postal_code", &intent.postal_code);

    // Boolean flags use the canonical Yes/No encoding
    flag(&mut filters, "water_resistant", intent.water_resistant);
    flag(&mut filters, "wireless_charging", intent.wireless_charging);
    flag(&mut filters, "fast_charging", intent.fast_charging);
    flag(&mut filters, "five_g", intent.five_g);

    filters
}

fn phrase_prefix(filters: &mut Vec<Clause>, field: &str, value: &Option<String>) {
    if let Some(value) = value {
        filters.push(Clause::PhrasePrefix {
            field: field.to_string(),
            value: value.clone(),
        });
    }
}

fn term(filters: &mut Vec<Clause>, field: &str, value: &Option<String>) {
    if let Some(value) = value {
        filters.push(Clause::Term {
            field: field.to_string(),
            value: value.clone(),
        });
    }
}

fn flag(filters: &mut Vec<Clause>, field: &str, value: Option<bool>) {
    if let Some(value) = value {
        filters.push(Clause::Term {
            field: field.to_string(),
            value: if value { "Yes" } else { "No" }.to_string(),
        });
    }
}

fn build_sort(hint: SortHint, has_text: bool) -> Vec<SortTerm> {
    let mut sort = match hint {
        // Score-based sorting is meaningless without a text match; degrade
        // to rating as the secondary ranking signal.
        SortHint::Relevance => {
            if has_text {
                vec![SortTerm::desc("_score")]
            } else {
                vec![SortTerm::desc("rating")]
            }
        }
        SortHint::PriceAsc => vec![SortTerm::asc("price")],
        SortHint::PriceDesc => vec![SortTerm::desc("price")],
        SortHint::RatingDesc => vec![SortTerm::desc("rating")],
    };
    sort.push(SortTerm::asc(TIEBREAK_FIELD));
    sort
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_intent_with_text() {
        let q = build(
            &StructuredIntent::default(),
            "find phones",
            Pagination::default(),
            SortHint::Relevance,
        );
        assert_eq!(
            q.must,
            vec![Clause::MultiMatch {
                query: "find phones".to_string(),
                fields: TEXT_MATCH_FIELDS.iter().map(|f| f.to_string()).collect(),
            }]
        );
        assert!(q.filters.is_empty());
    }

    #[test]
    fn test_filter_count_matches_field_count() {
        let intent = StructuredIntent {
            max_price: Some(500.0),
            brand: Some("Samsung".to_string()),
            city: Some("Austin".to_string()),
            five_g: Some(true),
            ..Default::default()
        };
        let q = build(&intent, "phones", Pagination::default(), SortHint::Relevance);
        assert_eq!(q.filters.len(), intent.filter_count());
    }

    #[test]
    fn test_storage_term_scenario() {
        // intent {storage: "128GB"}, empty text
        let intent = StructuredIntent {
            storage: Some("128GB".to_string()),
            ..Default::default()
        };
        let q = build(&intent, "", Pagination::default(), SortHint::Relevance);
        assert_eq!(q.must, vec![Clause::MatchAll]);
        assert_eq!(
            q.filters,
            vec![Clause::Term {
                field: "storage".to_string(),
                value: "128GB".to_string(),
            }]
        );
        assert_eq!(q.sort.last().unwrap().field, TIEBREAK_FIELD);
    }

    #[test]
    fn test_lower_bound_only_range_scenario() {
        // intent {minPrice: 500}, text "find phones"
        let intent = StructuredIntent {
            min_price: Some(500.0),
            ..Default::default()
        };
        let q = build(&intent, "find phones", Pagination::default(), SortHint::Relevance);
        assert_eq!(
            q.filters,
            vec![Clause::Range {
                field: "price".to_string(),
                gte: Some(500.0),
                lte: None,
            }]
        );
    }

    #[test]
    fn test_flag_encoded_as_yes_no() {
        let intent = StructuredIntent {
            five_g: Some(true),
            water_resistant: Some(false),
            ..Default::default()
        };
        let q = build(&intent, "", Pagination::default(), SortHint::Relevance);
        assert!(q.filters.contains(&Clause::Term {
            field: "five_g".to_string(),
            value: "Yes".to_string(),
        }));
        assert!(q.filters.contains(&Clause::Term {
            field: "water_resistant".to_string(),
            value: "No".to_string(),
        }));
    }

    #[test]
    fn test_relevance_degrades_without_text() {
        let q = build(
            &StructuredIntent::default(),
            "",
            Pagination::default(),
            SortHint::Relevance,
        );
        assert_eq!(q.sort, vec![SortTerm::desc("rating"), SortTerm::asc("id")]);

        let q = build(
            &StructuredIntent::default(),
            "phones",
            Pagination::default(),
            SortHint::Relevance,
        );
        assert_eq!(q.sort, vec![SortTerm::desc("_score"), SortTerm::asc("id")]);
    }

    #[test]
    fn test_sort_always_ends_with_tiebreak() {
        for hint in [
            SortHint::Relevance,
            SortHint::PriceAsc,
            SortHint::PriceDesc,
            SortHint::RatingDesc,
        ] {
            for text in ["", "phones"] {
                let q = build(&StructuredIntent::default(), text, Pagination::default(), hint);
                assert!(!q.sort.is_empty());
                let last = q.sort.last().unwrap();
                assert_eq!(last.field, TIEBREAK_FIELD);
                assert_eq!(last.order, SortOrder::Asc);
            }
        }
    }

    #[test]
    fn test_whitespace_text_is_match_all() {
        let q = build(
            &StructuredIntent::default(),
            "   ",
            Pagination::default(),
            SortHint::Relevance,
        );
        assert_eq!(q.must, vec![Clause::MatchAll]);
    }

    #[test]
    fn test_deterministic() {
        let intent = StructuredIntent {
            max_price: Some(700.0),
            brand: Some("Google".to_string()),
            ..Default::default()
        };
        let a = build(&intent, "pixel", Pagination::default(), SortHint::PriceAsc);
        let b = build(&intent, "pixel", Pagination::default(), SortHint::PriceAsc);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sort_hint_parsing() {
        assert_eq!("price_asc".parse::<SortHint>().unwrap(), SortHint::PriceAsc);
        assert_eq!("relevance".parse::<SortHint>().unwrap(), SortHint::Relevance);
        assert!("price_sideways".parse::<SortHint>().is_err());
    }
}
