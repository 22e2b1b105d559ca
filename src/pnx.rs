//! Generic PNX field values and the packed multi-value decoding.
//!
//! PNX fields are lists of strings. In deduplicated records, Primo packs a
//! per-holding value into each element using `$$V`/`$$O` markers:
//!
//! ```text
//! "delcategory": [
//!     "$$VAlma-P$$OALMA-BC21331257940001021",
//!     "$$VAlma-E$$OALMA-BC51460206020001021"
//! ]
//! ```
//!
//! When the first element of a field matches that pattern, the whole field is
//! decoded into holding-id → value pairs; otherwise the field is returned as
//! a plain list.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TranslateError, TranslateResult};

static PACKED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\$\$V(.*)\$\$O(.*)$").expect("packed-entry pattern is valid")
});

/// Value of a PNX field: a plain list, or holding-keyed pairs for packed
/// fields. Keyed pairs preserve list order; a duplicate holding id keeps its
/// first position and takes the last value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PnxValue {
    List(Vec<String>),
    Keyed(Vec<(String, String)>),
}

impl PnxValue {
    pub fn is_empty(&self) -> bool {
        match self {
            PnxValue::List(items) => items.is_empty(),
            PnxValue::Keyed(pairs) => pairs.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PnxValue::List(items) => items.len(),
            PnxValue::Keyed(pairs) => pairs.len(),
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PnxValue::List(items) => Some(items),
            PnxValue::Keyed(_) => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&[(String, String)]> {
        match self {
            PnxValue::Keyed(pairs) => Some(pairs),
            PnxValue::List(_) => None,
        }
    }

    /// Look up the value for a holding id in a keyed field.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self {
            PnxValue::Keyed(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            PnxValue::List(_) => None,
        }
    }
}

/// Decode a raw PNX field list, detecting packed entries by the first element.
pub(crate) fn decode_field(raw: &[Value]) -> TranslateResult<PnxValue> {
    let items: Vec<String> = raw.iter().map(value_to_string).collect();
    match items.first() {
        Some(first) if PACKED_ENTRY.is_match(first) => decode_packed(&items).map(PnxValue::Keyed),
        _ => Ok(PnxValue::List(items)),
    }
}

/// Decode every element of a packed field. Once the first element has
/// signalled packing, an element that fails the pattern is an error, not
/// something to skip.
fn decode_packed(items: &[String]) -> TranslateResult<Vec<(String, String)>> {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(items.len());
    for item in items {
        let caps = PACKED_ENTRY
            .captures(item)
            .ok_or_else(|| TranslateError::MalformedPackedEntry { entry: item.clone() })?;
        let value = caps[1].to_string();
        let key = caps[2].to_string();
        match pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => pairs.push((key, value)),
        }
    }
    Ok(pairs)
}

/// Render a JSON scalar as a string. PNX lists hold strings in practice;
/// anything else keeps its JSON rendering.
pub(crate) fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
