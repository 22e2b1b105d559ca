//! Translate a raw facet JSON object into a [`ResponseFacet`].

use serde_json::Value;

use crate::error::{TranslateError, TranslateResult};
use crate::response::{ResponseFacet, ResponseFacetValue};

/// Translate one entry of the response's `facets` array, preserving value
/// order. Counts arrive as JSON numbers or numeric strings; anything else is
/// a translation error.
pub fn translate_facet(json: &Value) -> TranslateResult<ResponseFacet> {
    let name = json
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let mut facet = ResponseFacet::new(name);
    if let Some(values) = json.get("values").and_then(Value::as_array) {
        for entry in values {
            let value = entry
                .get("value")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let count = parse_count(entry.get("count"))?;
            facet.values.push(ResponseFacetValue::new(value, count));
        }
    }
    Ok(facet)
}

fn parse_count(count: Option<&Value>) -> TranslateResult<u64> {
    match count {
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| TranslateError::NonNumericFacetCount {
            value: n.to_string(),
        }),
        Some(Value::String(s)) => {
            s.parse()
                .map_err(|_| TranslateError::NonNumericFacetCount { value: s.clone() })
        }
        other => Err(TranslateError::NonNumericFacetCount {
            value: other.map_or_else(|| "null".to_string(), Value::to_string),
        }),
    }
}
