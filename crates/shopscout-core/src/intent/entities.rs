//! Entity-based extraction
//!
//! Delegates to an external named-entity recognizer and maps recognized
//! entity labels onto intent fields. Fields the recognizer did not populate
//! are filled from the pattern rules, and a recognizer failure falls back
//! entirely to pattern-based extraction.

use super::{rules, StructuredIntent};
use crate::remote::{EntityRecognizer, Geocoder, RecognizedEntity};

/// Extract an intent using the recognizer with pattern fallback.
pub async fn extract_with_recognizer(
    recognizer: &dyn EntityRecognizer,
    text: &str,
) -> StructuredIntent {
    match recognizer.analyze(text).await {
        Ok(analysis) => {
            let mut intent = map_entities(&analysis.entities);
            intent.fill_missing_from(rules::extract(text));
            intent
        }
        Err(e) => {
            tracing::warn!("Entity recognition failed: {}, using pattern rules", e);
            rules::extract(text)
        }
    }
}

/// Map recognized entities onto intent fields. Unknown labels are ignored;
/// the first entity of a given label wins.
fn map_entities(entities: &[RecognizedEntity]) -> StructuredIntent {
    let mut intent = StructuredIntent::default();

    for entity in entities {
        let value = entity.text.trim();
        if value.is_empty() {
            continue;
        }
        match entity.label.to_lowercase().as_str() {
            "city" | "location" | "gpe" => {
                if intent.city.is_none() {
                    intent.city = rules::norm_location(value);
                }
            }
            "state" | "region" => {
                if intent.state.is_none() {
                    intent.state = Some(value.to_string());
                }
            }
            "postal_code" | "zip" => {
                if intent.postal_code.is_none() {
                    intent.postal_code = Some(value.to_string());
                }
            }
            "brand" | "org" | "organization" => {
                if intent.brand.is_none() {
                    intent.brand = Some(value.to_string());
                }
            }
            "product" | "model" => {
                if intent.model.is_none() {
                    intent.model = Some(value.to_string());
                }
            }
            "color" => {
                if intent.color.is_none() {
                    intent.color = Some(value.to_string());
                }
            }
            // "person" and other labels carry no intent field in this domain
            _ => {}
        }
    }

    intent
}

/// Fill empty geographic fields of an extracted intent through the geocoder.
/// Geocoding failures never fail extraction.
pub async fn refine_location(geocoder: &dyn Geocoder, intent: &StructuredIntent) -> StructuredIntent {
    let Some(ref city) = intent.city else {
        return intent.clone();
    };
    if intent.state.is_some() && intent.postal_code.is_some() {
        return intent.clone();
    }

    match geocoder.locate(city).await {
        Ok(location) => {
            let mut refined = intent.clone();
            if refined.state.is_none() {
                refined.state = location.state;
            }
            if refined.postal_code.is_none() {
                refined.postal_code = location.postal_code;
            }
            refined
        }
        Err(e) => {
            tracing::warn!("Geocoding failed for {:?}: {}", city, e);
            intent.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, ShopScoutError};
    use crate::remote::{GeoLocation, TextAnalysis};
    use async_trait::async_trait;

    struct FakeRecognizer {
        entities: Vec<RecognizedEntity>,
        fail: bool,
    }

    #[async_trait]
    impl EntityRecognizer for FakeRecognizer {
        async fn analyze(&self, _text: &str) -> Result<TextAnalysis> {
            if self.fail {
                return Err(ShopScoutError::ExternalService("recognizer down".into()));
            }
            Ok(TextAnalysis {
                entities: self.entities.clone(),
                ..Default::default()
            })
        }
    }

    fn entity(label: &str, text: &str) -> RecognizedEntity {
        RecognizedEntity {
            label: label.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_entities_mapped_to_fields() {
        let recognizer = FakeRecognizer {
            entities: vec![entity("city", "new york city"), entity("brand", "Samsung")],
            fail: false,
        };
        let intent = extract_with_recognizer(&recognizer, "samsung stores").await;
        assert_eq!(intent.city.as_deref(), Some("New York"));
        assert_eq!(intent.brand.as_deref(), Some("Samsung"));
    }

    #[tokio::test]
    async fn test_city_entity_normalized_like_pattern_capture() {
        // Both strategies go through the same normalizer: leading "the"
        // stripped, blocklisted words rejected.
        let recognizer = FakeRecognizer {
            entities: vec![entity("city", "the  Bronx")],
            fail: false,
        };
        let intent = extract_with_recognizer(&recognizer, "gifts").await;
        assert_eq!(intent.city.as_deref(), Some("Bronx"));

        let recognizer = FakeRecognizer {
            entities: vec![entity("city", "nearby")],
            fail: false,
        };
        let intent = extract_with_recognizer(&recognizer, "gifts").await;
        assert_eq!(intent.city, None);
    }

    #[tokio::test]
    async fn test_person_entities_ignored() {
        let recognizer = FakeRecognizer {
            entities: vec![entity("person", "Alice")],
            fail: false,
        };
        let intent = extract_with_recognizer(&recognizer, "gifts").await;
        assert!(intent.is_empty());
    }

    #[tokio::test]
    async fn test_pattern_fallback_fills_missing_fields() {
        let recognizer = FakeRecognizer {
            entities: vec![entity("city", "Seattle")],
            fail: false,
        };
        // Recognizer found the city; the price bound comes from patterns
        let intent = extract_with_recognizer(&recognizer, "phones under $400 in Seattle").await;
        assert_eq!(intent.city.as_deref(), Some("Seattle"));
        assert_eq!(intent.max_price, Some(400.0));
    }

    #[tokio::test]
    async fn test_recognizer_failure_falls_back_to_patterns() {
        let recognizer = FakeRecognizer {
            entities: vec![],
            fail: true,
        };
        let intent = extract_with_recognizer(&recognizer, "phones under $400 in Seattle").await;
        assert_eq!(intent.max_price, Some(400.0));
        assert_eq!(intent.city.as_deref(), Some("Seattle"));
    }

    struct FakeGeocoder {
        fail: bool,
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        async fn locate(&self, _text: &str) -> Result<GeoLocation> {
            if self.fail {
                return Err(ShopScoutError::ExternalService("geocoder down".into()));
            }
            Ok(GeoLocation {
                city: Some("Austin".to_string()),
                state: Some("Texas".to_string()),
                postal_code: Some("78701".to_string()),
                latitude: Some(30.27),
                longitude: Some(-97.74),
            })
        }
    }

    #[tokio::test]
    async fn test_refine_location_fills_state_and_postal() {
        let intent = StructuredIntent {
            city: Some("Austin".to_string()),
            ..Default::default()
        };
        let refined = refine_location(&FakeGeocoder { fail: false }, &intent).await;
        assert_eq!(refined.state.as_deref(), Some("Texas"));
        assert_eq!(refined.postal_code.as_deref(), Some("78701"));
    }

    #[tokio::test]
    async fn test_refine_location_failure_is_non_fatal() {
        let intent = StructuredIntent {
            city: Some("Austin".to_string()),
            ..Default::default()
        };
        let refined = refine_location(&FakeGeocoder { fail: true }, &intent).await;
        assert_eq!(refined, intent);
    }
}
