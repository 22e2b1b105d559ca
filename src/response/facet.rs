//! Facet summaries in a Brief Search response.

use serde::{Deserialize, Serialize};

/// One (value, count) pair of a response facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFacetValue {
    pub value: String,
    pub count: u64,
}

impl ResponseFacetValue {
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        ResponseFacetValue {
            value: value.into(),
            count,
        }
    }
}

/// A facet in a Brief Search response: a name and its ordered value counts.
///
/// Values arrive in API order; the two sort methods reorder them in place
/// for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFacet {
    pub name: String,
    pub values: Vec<ResponseFacetValue>,
}

impl ResponseFacet {
    pub fn new(name: impl Into<String>) -> Self {
        ResponseFacet {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Sort values in place by descending count.
    pub fn sort_by_frequency(&mut self) {
        self.values.sort_by(|a, b| b.count.cmp(&a.count));
    }

    /// Sort values in place alphabetically, case-insensitively.
    pub fn sort_alphabetically(&mut self) {
        self.values
            .sort_by(|a, b| a.value.to_lowercase().cmp(&b.value.to_lowercase()));
    }
}
