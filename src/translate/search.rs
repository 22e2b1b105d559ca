//! Translate a full Brief Search response into a [`SearchResponse`].

use serde_json::Value;

use crate::error::TranslateResult;
use crate::response::{FacetMap, SearchResponse};
use crate::translate::{translate_doc, translate_facet};

/// Translate the parsed response body of a Brief Search call.
///
/// Result counts stay `None` when the response omits them. Facets keep API
/// order; a facet name appearing twice keeps the first position with the
/// later translation (upstream never does this in practice). Docs map one
/// to one with the response's `docs` array.
pub fn translate_search(json: Value) -> TranslateResult<SearchResponse> {
    let total = json.pointer("/info/total").and_then(Value::as_u64);
    let first = json.pointer("/info/first").and_then(Value::as_u64);
    let last = json.pointer("/info/last").and_then(Value::as_u64);
    let did_u_mean = json
        .get("did_u_mean")
        .and_then(Value::as_str)
        .map(String::from);

    // The usable note sits at errorMessages[1], not [0]; the upstream API
    // puts a boilerplate message first.
    let controlled_vocabulary = json
        .pointer("/info/controlledVocabulary/errorMessages/1")
        .and_then(Value::as_str)
        .map(String::from);

    let mut facets = FacetMap::new();
    if let Some(raw_facets) = json.get("facets").and_then(Value::as_array) {
        for raw_facet in raw_facets {
            facets.insert(translate_facet(raw_facet)?);
        }
    }

    let docs = json
        .get("docs")
        .and_then(Value::as_array)
        .map(|raw_docs| raw_docs.iter().map(translate_doc).collect())
        .unwrap_or_default();

    Ok(SearchResponse {
        total,
        first,
        last,
        did_u_mean,
        controlled_vocabulary,
        docs,
        facets,
        raw: json,
    })
}
