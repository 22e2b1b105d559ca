//! A single Doc as returned by the Brief Search API.
//!
//! [`Doc`] is a typed projection over one search result. The named fields
//! cover the commonly used parts of the record; everything else is reachable
//! through [`Doc::pnx`] or the retained [`Doc::raw`] JSON:
//!
//! ```no_run
//! # use primo_client::response::Doc;
//! # let doc = Doc::new(serde_json::json!({}));
//! if let Some(title) = &doc.title {
//!     println!("{title}");
//! }
//! for link in &doc.link_to_resource {
//!     println!("-> {}", link.url);
//! }
//! for mms in doc.pnx("display", "lds11").unwrap().as_list().unwrap() {
//!     println!("MMS: {mms}");
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TranslateError, TranslateResult};
use crate::pnx::{self, PnxValue};

/// A delivery link of a Doc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
    /// Short link type key, e.g. `linktorsrc`, with the
    /// `http://purl.org/pnx/linkType/` namespace prefix already stripped.
    pub link_type: String,
}

impl Link {
    pub fn new(
        label: impl Into<String>,
        url: impl Into<String>,
        link_type: impl Into<String>,
    ) -> Self {
        Link {
            label: label.into(),
            url: url.into(),
            link_type: link_type.into(),
        }
    }
}

/// One physical or electronic holding of a Doc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub ils_id: String,
    pub library_code: String,
    pub location_code: String,
    pub location_display: String,
    pub call_number: String,
    pub availability_status: String,
}

/// One search result.
///
/// All list-typed fields default to an empty list, never to an absent value,
/// so consumers can iterate without checking. Scalar fields are `None` when
/// the record does not carry them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Doc {
    /// The raw doc JSON, retained verbatim as an escape hatch.
    pub raw: Value,

    pub id: Option<String>,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub contributors: Vec<String>,
    pub date: Option<String>,
    pub publisher: Option<String>,
    /// The record's abstract (PNX `addata/abstract`).
    pub abstract_text: Option<String>,
    /// The record's type (PNX `display/type`), e.g. `book`.
    pub record_type: Option<String>,
    pub isbn: Vec<String>,
    pub issn: Vec<String>,
    pub oclcid: Vec<String>,
    pub subjects: Vec<String>,
    pub display_subject: Option<String>,
    pub genres: Vec<String>,
    pub creator_facet: Vec<String>,
    pub collection_facet: Vec<String>,
    pub resourcetype_facet: Vec<String>,
    pub languages: Vec<String>,
    pub format: Option<String>,
    pub description: Vec<String>,
    pub frbr_group_id: Option<String>,
    pub cover_images: Vec<String>,
    pub is_part_of: Vec<String>,
    pub journal_title: Vec<String>,
    pub sort_title: Option<String>,
    pub sort_creator: Option<String>,
    pub sort_date: Option<String>,

    pub is_electronic: bool,
    pub is_digital: bool,
    pub is_physical: bool,
    pub is_open_access: bool,

    /// Delivery links grouped by short type key, in first-seen key order.
    pub link_groups: Vec<(String, Vec<Link>)>,
    pub link_to_resource: Vec<Link>,
    pub openurl: Vec<Link>,
    pub openurl_fulltext: Vec<Link>,
    pub thumbnail: Vec<Link>,

    pub holdings: Vec<Holding>,
}

impl Doc {
    /// Wrap a raw doc JSON. Typed fields start at their defaults; the
    /// translator fills them in.
    pub fn new(raw: Value) -> Self {
        Doc {
            raw,
            ..Doc::default()
        }
    }

    /// Return the value of an arbitrary PNX field.
    ///
    /// Fails if the category does not exist in the record; returns an empty
    /// list if the category exists but the field is absent or empty. Packed
    /// `$$V…$$O…` fields come back keyed by holding id (see [`PnxValue`]).
    pub fn pnx(&self, category: &str, field: &str) -> TranslateResult<PnxValue> {
        let section = self
            .raw
            .get("pnx")
            .and_then(|p| p.get(category))
            .ok_or_else(|| TranslateError::InvalidPnxCategory {
                category: category.to_string(),
            })?;
        match section.get(field) {
            Some(Value::Array(items)) if !items.is_empty() => pnx::decode_field(items),
            _ => Ok(PnxValue::List(Vec::new())),
        }
    }

    /// All links of the given short type key, empty if none.
    pub fn links_for(&self, key: &str) -> &[Link] {
        self.link_groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, links)| links.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Doc {
        Doc::new(json!({
            "pnx": {
                "control": {
                    "recordid": ["ALMA-BC12345"],
                    "almaid": [
                        "$$V01BC_INST:21331$$OALMA-BC21331",
                        "$$V01BC_INST:51460$$OALMA-BC51460"
                    ]
                },
                "display": {
                    "title": ["The Supreme Court"],
                    "lds11": []
                }
            }
        }))
    }

    #[test]
    fn invalid_pnx_category_is_an_error() {
        let err = doc().pnx("foo", "bar").unwrap_err();
        assert!(matches!(
            err,
            TranslateError::InvalidPnxCategory { category } if category == "foo"
        ));
    }

    #[test]
    fn unset_pnx_field_returns_empty_list() {
        assert!(doc().pnx("display", "lds31").unwrap().is_empty());
        assert!(doc().pnx("display", "lds11").unwrap().is_empty());
    }

    #[test]
    fn plain_pnx_field_returns_list() {
        let value = doc().pnx("display", "title").unwrap();
        assert_eq!(value.as_list().unwrap(), ["The Supreme Court".to_string()]);
    }

    #[test]
    fn packed_pnx_field_returns_keyed_pairs() {
        let value = doc().pnx("control", "almaid").unwrap();
        assert_eq!(value.get("ALMA-BC21331"), Some("01BC_INST:21331"));
        assert_eq!(value.get("ALMA-BC51460"), Some("01BC_INST:51460"));
        assert_eq!(value.len(), 2);
    }

    #[test]
    fn missing_pnx_object_entirely_is_an_invalid_category() {
        let doc = Doc::new(json!({}));
        assert!(doc.pnx("display", "title").is_err());
    }

    #[test]
    fn links_for_unknown_key_is_empty() {
        assert!(doc().links_for("openurl").is_empty());
    }
}
