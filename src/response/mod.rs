//! Typed records of a Brief Search response.

pub mod doc;
pub mod facet;

pub use doc::{Doc, Holding, Link};
pub use facet::{ResponseFacet, ResponseFacetValue};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Insertion-ordered map from facet name to [`ResponseFacet`].
///
/// Iteration order is the API's facet order. Inserting a facet whose name is
/// already present replaces it in place, keeping the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetMap {
    entries: Vec<ResponseFacet>,
}

impl FacetMap {
    pub fn new() -> Self {
        FacetMap::default()
    }

    pub fn insert(&mut self, facet: ResponseFacet) {
        match self.entries.iter_mut().find(|f| f.name == facet.name) {
            Some(existing) => *existing = facet,
            None => self.entries.push(facet),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ResponseFacet> {
        self.entries.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResponseFacet> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a FacetMap {
    type Item = &'a ResponseFacet;
    type IntoIter = std::slice::Iter<'a, ResponseFacet>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The result of one Brief Search call.
///
/// `total`/`first`/`last` stay `None` when the response omits them; absence
/// is meaningful upstream and is not collapsed to zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total: Option<u64>,
    pub first: Option<u64>,
    pub last: Option<u64>,
    pub did_u_mean: Option<String>,
    /// Controlled-vocabulary note, when the search was expanded.
    pub controlled_vocabulary: Option<String>,
    pub docs: Vec<Doc>,
    pub facets: FacetMap,
    /// The raw response JSON, retained verbatim as an escape hatch.
    pub raw: Value,
}
