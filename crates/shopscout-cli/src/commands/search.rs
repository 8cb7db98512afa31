//! Structured catalog search command

use crate::app::{OutputFormat, SearchArgs};
use crate::output;
use anyhow::Result;
use shopscout_core::{
    extract, extract_with_recognizer, refine_location, resolve, Config, HttpCatalogBackend,
    HttpGeocoder, HttpRecognizer, Pagination, ResolveRequest, SortHint, StructuredIntent,
};

pub async fn run(args: SearchArgs, config: &Config, format: OutputFormat) -> Result<()> {
    let query = args.query.join(" ");
    let sort_hint: SortHint = args.sort.parse()?;

    let intent = build_intent(&query, args.entities, config).await;
    tracing::debug!(filters = intent.filter_count(), "extracted intent");

    let backend = HttpCatalogBackend::new(config.catalog.clone())?;

    let request = ResolveRequest {
        intent: &intent,
        residual_text: &query,
        pagination: Pagination {
            from: args.from,
            size: args.size,
        },
        sort_hint,
        allow_fallback: !args.no_fallback,
    };

    let results = resolve(&request, &backend).await?;
    output::print_result_set(&results, format);
    Ok(())
}

/// Extraction strategy selection: recognizer with pattern fallback when
/// requested and configured, plain pattern rules otherwise. Geocoding, when
/// configured, fills missing state/postal fields for location queries.
pub async fn build_intent(query: &str, use_entities: bool, config: &Config) -> StructuredIntent {
    let intent = if use_entities {
        match config
            .recognizer
            .clone()
            .map(HttpRecognizer::new)
            .transpose()
        {
            Ok(Some(recognizer)) => extract_with_recognizer(&recognizer, query).await,
            Ok(None) => {
                eprintln!("Warning: no recognizer configured, using pattern rules.");
                extract(query)
            }
            Err(e) => {
                eprintln!("Warning: recognizer unavailable ({}), using pattern rules.", e);
                extract(query)
            }
        }
    } else {
        extract(query)
    };

    if let Some(geocoder_config) = config.geocoder.clone() {
        if let Ok(geocoder) = HttpGeocoder::new(geocoder_config) {
            return refine_location(&geocoder, &intent).await;
        }
    }
    intent
}
