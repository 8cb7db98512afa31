//! Structured intent extraction
//!
//! Turns free-text queries into a `StructuredIntent` record. Two strategies
//! are composed as primary/fallback:
//! - Pattern-based: ordered regex rule tables per field (`rules`)
//! - Entity-based: external NER service mapped onto intent fields, with
//!   per-field and whole-query fallback to the pattern rules (`entities`)

mod entities;
mod rules;

pub use entities::{extract_with_recognizer, refine_location};
pub use rules::extract;

use serde::{Deserialize, Serialize};

/// The set of typed filters extracted from one query.
///
/// Every field is optional; an intent with all fields empty is valid and
/// means "no filter, free-text only". Constructed once per query and not
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredIntent {
    // Numeric ranges
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,

    // Categorical attributes
    pub color: Option<String>,
    pub storage: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub processor: Option<String>,
    pub ram: Option<String>,
    pub category: Option<String>,

    // Geographic fields
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,

    // Boolean feature flags
    pub water_resistant: Option<bool>,
    pub wireless_charging: Option<bool>,
    pub fast_charging: Option<bool>,
    pub five_g: Option<bool>,
}

impl StructuredIntent {
    /// True when no field was extracted
    pub fn is_empty(&self) -> bool {
        self.filter_count() == 0
    }

    /// Number of non-empty fields
    pub fn filter_count(&self) -> usize {
        let mut count = 0;
        count += self.min_price.is_some() as usize;
        count += self.max_price.is_some() as usize;
        count += self.min_rating.is_some() as usize;
        count += self.color.is_some() as usize;
        count += self.storage.is_some() as usize;
        count += self.brand.is_some() as usize;
        count += self.model.is_some() as usize;
        count += self.processor.is_some() as usize;
        count += self.ram.is_some() as usize;
        count += self.category.is_some() as usize;
        count += self.city.is_some() as usize;
        count += self.state.is_some() as usize;
        count += self.postal_code.is_some() as usize;
        count += self.water_resistant.is_some() as usize;
        count += self.wireless_charging.is_some() as usize;
        count += self.fast_charging.is_some() as usize;
        count += self.five_g.is_some() as usize;
        count
    }

    /// Fill every empty field from `other`, leaving populated fields alone.
    /// Used to back a primary extraction strategy with a fallback one.
    pub(crate) fn fill_missing_from(&mut self, other: StructuredIntent) {
        macro_rules! fill {
            ($field:ident) => {
                if self.$field.is_none() {
                    self.$field = other.$field;
                }
            };
        }
        fill!(min_price);
        fill!(max_price);
        fill!(min_rating);
        fill!(color);
        fill!(storage);
        fill!(brand);
        fill!(model);
        fill!(processor);
        fill!(ram);
        fill!(category);
        fill!(city);
        fill!(state);
        fill!(postal_code);
        fill!(water_resistant);
        fill!(wireless_charging);
        fill!(fast_charging);
        fill!(five_g);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_intent_is_valid() {
        let intent = StructuredIntent::default();
        assert!(intent.is_empty());
        assert_eq!(intent.filter_count(), 0);
    }

    #[test]
    fn test_filter_count() {
        let intent = StructuredIntent {
            max_price: Some(500.0),
            brand: Some("Samsung".to_string()),
            five_g: Some(true),
            ..Default::default()
        };
        assert_eq!(intent.filter_count(), 3);
        assert!(!intent.is_empty());
    }

    #[test]
    fn test_fill_missing_keeps_populated_fields() {
        let mut primary = StructuredIntent {
            city: Some("Austin".to_string()),
            ..Default::default()
        };
        let fallback = StructuredIntent {
            city: Some("Dallas".to_string()),
            brand: Some("Apple".to_string()),
            ..Default::default()
        };
        primary.fill_missing_from(fallback);
        assert_eq!(primary.city.as_deref(), Some("Austin"));
        assert_eq!(primary.brand.as_deref(), Some("Apple"));
    }
}
