//! Rendering to the backend-native query DSL
//!
//! Produces the JSON body the catalog backend expects: a `bool` query with
//! `must`/`filter` arrays, `from`/`size` pagination and a `sort` array.

use super::{Clause, QueryDescription, SortOrder};
use serde_json::{json, Map, Value};

/// `{ field: body }` for dynamically-named fields
fn keyed(field: &str, body: Value) -> Value {
    let mut object = Map::new();
    object.insert(field.to_string(), body);
    Value::Object(object)
}

/// Render a query description to the backend search body.
pub fn to_query_body(query: &QueryDescription) -> Value {
    let must: Vec<Value> = query.must.iter().map(render_clause).collect();
    let filter: Vec<Value> = query.filters.iter().map(render_clause).collect();
    let sort: Vec<Value> = query
        .sort
        .iter()
        .map(|term| {
            keyed(
                &term.field,
                json!({
                    "order": match term.order {
                        SortOrder::Asc => "asc",
                        SortOrder::Desc => "desc",
                    }
                }),
            )
        })
        .collect();

    json!({
        "query": {
            "bool": {
                "must": must,
                "filter": filter,
            }
        },
        "from": query.pagination.from,
        "size": query.pagination.size,
        "sort": sort,
    })
}

fn render_clause(clause: &Clause) -> Value {
    match clause {
        Clause::MatchAll => json!({ "match_all": {} }),
        Clause::MultiMatch { query, fields } => json!({
            "multi_match": {
                "query": query,
                "fields": fields,
            }
        }),
        Clause::Term { field, value } => json!({ "term": keyed(field, json!(value)) }),
        Clause::PhrasePrefix { field, value } => {
            json!({ "match_phrase_prefix": keyed(field, json!(value)) })
        }
        Clause::Range { field, gte, lte } => {
            let mut bounds = Map::new();
            if let Some(gte) = gte {
                bounds.insert("gte".to_string(), json!(gte));
            }
            if let Some(lte) = lte {
                bounds.insert("lte".to_string(), json!(lte));
            }
            json!({ "range": keyed(field, Value::Object(bounds)) })
        }
    }
}
