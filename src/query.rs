//! Query and facet clauses for a Brief Search request.
//!
//! A [`Query`] is one clause of the `q` parameter; a [`QueryFacet`] is one
//! clause of the `qInclude`, `qExclude`, or `multiFacets` parameters. Both
//! render themselves through `Display` in the API's comma-separated grammar.
//! Fields, precisions, categories, and operators are closed enums, so an
//! invalid value is rejected when it is constructed (via `FromStr`), never
//! when the URL is rendered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::error::RequestError;

/// Percent-encode a query value the way the API expects (form encoding,
/// space becomes `+`).
pub(crate) fn urlencode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Searchable record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryField {
    Any,
    Title,
    Creator,
    Subject,
    Tag,
}

impl QueryField {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryField::Any => "any",
            QueryField::Title => "title",
            QueryField::Creator => "creator",
            QueryField::Subject => "sub",
            QueryField::Tag => "usertag",
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryField {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(QueryField::Any),
            "title" => Ok(QueryField::Title),
            "creator" => Ok(QueryField::Creator),
            "sub" => Ok(QueryField::Subject),
            "usertag" => Ok(QueryField::Tag),
            _ => Err(RequestError::InvalidField {
                field: s.to_string(),
            }),
        }
    }
}

/// Match precision for a query clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryPrecision {
    Exact,
    Contains,
    BeginsWith,
}

impl QueryPrecision {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryPrecision::Exact => "exact",
            QueryPrecision::Contains => "contains",
            QueryPrecision::BeginsWith => "begins with",
        }
    }
}

impl fmt::Display for QueryPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryPrecision {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(QueryPrecision::Exact),
            "contains" => Ok(QueryPrecision::Contains),
            "begins with" => Ok(QueryPrecision::BeginsWith),
            _ => Err(RequestError::InvalidPrecision {
                precision: s.to_string(),
            }),
        }
    }
}

/// One clause of the `q` parameter.
///
/// Renders as `{field},{precision},{urlencode(value)}`:
///
/// ```
/// use primo_client::query::{Query, QueryField, QueryPrecision};
///
/// let query = Query::new(QueryField::Any, QueryPrecision::Contains, "otters");
/// assert_eq!(query.to_string(), "any,contains,otters");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub field: QueryField,
    pub precision: QueryPrecision,
    pub value: String,
}

impl Query {
    pub fn new(field: QueryField, precision: QueryPrecision, value: impl Into<String>) -> Self {
        Query {
            field,
            precision,
            value: value.into(),
        }
    }

    /// Build a query from bare strings, validating field and precision.
    pub fn parse(field: &str, precision: &str, value: &str) -> Result<Self, RequestError> {
        Ok(Query {
            field: field.parse()?,
            precision: precision.parse()?,
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.field, self.precision, urlencode(&self.value))
    }
}

// ---------------------------------------------------------------------------
// QueryFacet
// ---------------------------------------------------------------------------

/// Facet category for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetCategory {
    Author,
    Availability,
    Collection,
    Language,
    LibraryName,
    LccClass,
    ResourceType,
    Subject,
}

impl FacetCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetCategory::Author => "facet_creator",
            FacetCategory::Availability => "facet_tlevel",
            FacetCategory::Collection => "facet_domain",
            FacetCategory::Language => "facet_lang",
            FacetCategory::LibraryName => "facet_library",
            // The trailing space is real; the upstream API expects it.
            FacetCategory::LccClass => "facet_lcc ",
            FacetCategory::ResourceType => "facet_rtype",
            FacetCategory::Subject => "facet_topic",
        }
    }
}

impl fmt::Display for FacetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetCategory {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facet_creator" => Ok(FacetCategory::Author),
            "facet_tlevel" => Ok(FacetCategory::Availability),
            "facet_domain" => Ok(FacetCategory::Collection),
            "facet_lang" => Ok(FacetCategory::Language),
            "facet_library" => Ok(FacetCategory::LibraryName),
            "facet_lcc " => Ok(FacetCategory::LccClass),
            "facet_rtype" => Ok(FacetCategory::ResourceType),
            "facet_topic" => Ok(FacetCategory::Subject),
            _ => Err(RequestError::InvalidCategory {
                category: s.to_string(),
            }),
        }
    }
}

/// How a facet clause filters.
///
/// Only [`FacetOperator::Exact`] facets are valid in the qInclude and
/// qExclude slots; only non-exact facets are valid in multiFacets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FacetOperator {
    Exact,
    Include,
    Exclude,
}

impl FacetOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            FacetOperator::Exact => "exact",
            FacetOperator::Include => "include",
            FacetOperator::Exclude => "exclude",
        }
    }
}

impl fmt::Display for FacetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacetOperator {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(FacetOperator::Exact),
            "include" => Ok(FacetOperator::Include),
            "exclude" => Ok(FacetOperator::Exclude),
            _ => Err(RequestError::InvalidFacetOperator {
                operator: s.to_string(),
            }),
        }
    }
}

/// One facet filter clause, rendered as `{category},{operator},{value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryFacet {
    pub category: FacetCategory,
    pub operator: FacetOperator,
    pub value: String,
}

impl QueryFacet {
    pub fn new(
        category: FacetCategory,
        operator: FacetOperator,
        value: impl Into<String>,
    ) -> Self {
        QueryFacet {
            category,
            operator,
            value: value.into(),
        }
    }

    /// Build a facet from bare strings, validating category and operator.
    pub fn parse(category: &str, operator: &str, value: &str) -> Result<Self, RequestError> {
        Ok(QueryFacet {
            category: category.parse()?,
            operator: operator.parse()?,
            value: value.to_string(),
        })
    }

    /// True if this facet uses the exact operator.
    ///
    /// The slot rules in [`crate::request::SearchRequest`] hinge on this:
    /// include/exclude demand exact facets, multiFacets demands non-exact.
    pub fn is_exact(&self) -> bool {
        self.operator == FacetOperator::Exact
    }
}

impl fmt::Display for QueryFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.category, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_renders_in_api_grammar() {
        let query = Query::new(QueryField::Any, QueryPrecision::Contains, "otters");
        assert_eq!(query.to_string(), "any,contains,otters");
    }

    #[test]
    fn query_value_is_urlencoded() {
        let query = Query::new(QueryField::Title, QueryPrecision::Exact, "sea otters & kelp");
        assert_eq!(query.to_string(), "title,exact,sea+otters+%26+kelp");
    }

    #[test]
    fn begins_with_precision_keeps_its_space() {
        let query = Query::new(QueryField::Any, QueryPrecision::BeginsWith, "ott");
        assert_eq!(query.to_string(), "any,begins with,ott");
    }

    #[test]
    fn invalid_field_is_rejected() {
        let err = Query::parse("barcode", "contains", "x").unwrap_err();
        assert!(matches!(err, RequestError::InvalidField { field } if field == "barcode"));
    }

    #[test]
    fn invalid_precision_is_rejected() {
        let err = Query::parse("any", "fuzzy", "x").unwrap_err();
        assert!(matches!(err, RequestError::InvalidPrecision { .. }));
    }

    #[test]
    fn facet_renders_in_api_grammar() {
        let facet = QueryFacet::new(FacetCategory::Author, FacetOperator::Exact, "Mark Twain");
        assert_eq!(facet.to_string(), "facet_creator,exact,Mark Twain");
    }

    #[test]
    fn lcc_category_keeps_trailing_space() {
        assert_eq!(FacetCategory::LccClass.as_str(), "facet_lcc ");
        assert_eq!("facet_lcc ".parse::<FacetCategory>().unwrap(), FacetCategory::LccClass);
        assert!("facet_lcc".parse::<FacetCategory>().is_err());
    }

    #[test]
    fn is_exact_follows_the_operator() {
        let exact = QueryFacet::new(FacetCategory::Language, FacetOperator::Exact, "eng");
        let include = QueryFacet::new(FacetCategory::Language, FacetOperator::Include, "eng");
        assert!(exact.is_exact());
        assert!(!include.is_exact());
    }

    #[test]
    fn invalid_category_is_rejected() {
        let err = QueryFacet::parse("facet_color", "exact", "red").unwrap_err();
        assert!(matches!(err, RequestError::InvalidCategory { .. }));
    }
}
