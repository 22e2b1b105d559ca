//! The Brief Search request builder.
//!
//! [`SearchRequest`] accumulates query parameters and renders them as the
//! URL of a search, from the path forward:
//!
//! ```
//! use primo_client::config::QueryConfig;
//! use primo_client::query::{Query, QueryField, QueryPrecision};
//! use primo_client::request::SearchRequest;
//!
//! let config = QueryConfig::new("https://gw", "my-key", "bclib", "default", "bcl");
//! let query = Query::new(QueryField::Any, QueryPrecision::Contains, "otters");
//! let url = SearchRequest::new(&config, &query).limit(10).offset(20).url("v1");
//! assert!(url.starts_with("/primo/v1/search?apikey=my-key"));
//! ```
//!
//! Setters consume and return the request so calls chain; the two facet-slot
//! setters return `Result` because the slot rules (exactness) are enforced at
//! the point the facet is attached.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::config::QueryConfig;
use crate::error::{RequestError, RequestResult};
use crate::query::{Query, QueryFacet};

/// API version used by [`SearchRequest::url`]'s `Display` shorthand.
pub const DEFAULT_VERSION: &str = "v1";

/// Separator the API uses between values of a multi-value parameter.
const MULTI_SEPARATOR: &str = "|,|";

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sort {
    Rank,
    Title,
    Author,
    Date,
}

impl Sort {
    pub fn as_str(self) -> &'static str {
        match self {
            Sort::Rank => "rank",
            Sort::Title => "title",
            Sort::Author => "author",
            Sort::Date => "date",
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sort {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rank" => Ok(Sort::Rank),
            "title" => Ok(Sort::Title),
            "author" => Ok(Sort::Author),
            "date" => Ok(Sort::Date),
            _ => Err(RequestError::InvalidSort { sort: s.to_string() }),
        }
    }
}

/// Boolean operator joining query clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryOperator {
    #[default]
    And,
    Or,
    Not,
}

impl QueryOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryOperator::And => "AND",
            QueryOperator::Or => "OR",
            QueryOperator::Not => "NOT",
        }
    }
}

impl fmt::Display for QueryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryOperator {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(QueryOperator::And),
            "OR" => Ok(QueryOperator::Or),
            "NOT" => Ok(QueryOperator::Not),
            _ => Err(RequestError::InvalidOperator {
                operator: s.to_string(),
            }),
        }
    }
}

/// A single Brief Search API request.
///
/// Parameters never set are omitted from the URL entirely; the API treats an
/// empty-valued parameter differently from an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    apikey: String,
    vid: String,
    tab: String,
    scope: String,
    inst: Option<String>,
    q: String,
    offset: Option<u32>,
    limit: Option<u32>,
    sort: Option<Sort>,
    con_voc: Option<bool>,
    get_more: Option<bool>,
    pc_availability: Option<bool>,
    q_include: Option<String>,
    q_exclude: Option<String>,
    multi_facets: Option<String>,
}

impl SearchRequest {
    /// Start a request from a config and an initial query clause.
    ///
    /// When the config carries an institution code, `vid` is sent as
    /// `{inst}:{vid}` and `inst` is sent separately.
    pub fn new(config: &QueryConfig, query: &Query) -> Self {
        let vid = match &config.inst {
            Some(inst) => format!("{inst}:{}", config.vid),
            None => config.vid.clone(),
        };
        SearchRequest {
            apikey: config.apikey.clone(),
            vid,
            tab: config.tab.clone(),
            scope: config.scope.clone(),
            inst: config.inst.clone(),
            q: query.to_string(),
            offset: None,
            limit: None,
            sort: None,
            con_voc: None,
            get_more: None,
            pc_availability: None,
            q_include: None,
            q_exclude: None,
            multi_facets: None,
        }
    }

    /// Add a further query clause, joined with the given boolean operator.
    pub fn add_query(mut self, query: &Query, operator: QueryOperator) -> Self {
        self.q = format!("{},{operator};{query}", self.q);
        self
    }

    /// Set the result offset (zero-based).
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the maximum number of results returned.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort order.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Use Primo's controlled-vocabulary searches.
    ///
    /// conVoc searches expand some phrases to use synonyms, e.g. "heart
    /// attack" will also search for "myocardial infarction".
    pub fn con_voc(mut self, use_controlled_vocabulary: bool) -> Self {
        self.con_voc = Some(use_controlled_vocabulary);
        self
    }

    /// Expand results in MetaLib searches.
    pub fn get_more(mut self, expand_metalib_searches: bool) -> Self {
        self.get_more = Some(expand_metalib_searches);
        self
    }

    /// Display non-fulltext Primo Central results?
    pub fn pc_availability(mut self, show_non_fulltext: bool) -> Self {
        self.pc_availability = Some(show_non_fulltext);
        self
    }

    /// Filter results to those matching the facet (logical AND between
    /// chained includes). The facet must use the exact operator.
    pub fn include(mut self, facet: &QueryFacet) -> RequestResult<Self> {
        if !facet.is_exact() {
            return Err(RequestError::FacetMustBeExact { slot: "qInclude" });
        }
        push_multi(&mut self.q_include, facet);
        Ok(self)
    }

    /// Filter results to exclude those matching the facet (logical AND
    /// between chained excludes). The facet must use the exact operator.
    pub fn exclude(mut self, facet: &QueryFacet) -> RequestResult<Self> {
        if !facet.is_exact() {
            return Err(RequestError::FacetMustBeExact { slot: "qExclude" });
        }
        push_multi(&mut self.q_exclude, facet);
        Ok(self)
    }

    /// Filter results using multiple possible values.
    ///
    /// Unlike include and exclude, multiFacet facets apply a logical OR
    /// between values of the same category (and AND between categories).
    /// The facet must not use the exact operator.
    pub fn multi_facet(mut self, facet: &QueryFacet) -> RequestResult<Self> {
        if facet.is_exact() {
            return Err(RequestError::FacetMustNotBeExact);
        }
        push_multi(&mut self.multi_facets, facet);
        Ok(self)
    }

    /// Render the request's URL from the path forward, e.g.
    /// `/primo/v1/search?apikey=...&q=any%2Ccontains%2Cotters`.
    pub fn url(&self, version: &str) -> String {
        let mut qs = form_urlencoded::Serializer::new(String::new());
        qs.append_pair("apikey", &self.apikey);
        qs.append_pair("vid", &self.vid);
        qs.append_pair("tab", &self.tab);
        qs.append_pair("scope", &self.scope);
        if let Some(inst) = &self.inst {
            qs.append_pair("inst", inst);
        }
        qs.append_pair("q", &self.q);
        if let Some(offset) = self.offset {
            qs.append_pair("offset", &offset.to_string());
        }
        if let Some(limit) = self.limit {
            qs.append_pair("limit", &limit.to_string());
        }
        if let Some(sort) = self.sort {
            qs.append_pair("sort", sort.as_str());
        }
        if let Some(con_voc) = self.con_voc {
            qs.append_pair("conVoc", if con_voc { "true" } else { "false" });
        }
        if let Some(get_more) = self.get_more {
            qs.append_pair("getMore", if get_more { "1" } else { "0" });
        }
        if let Some(pc) = self.pc_availability {
            qs.append_pair("pcAvailability", if pc { "true" } else { "false" });
        }
        if let Some(q_include) = &self.q_include {
            qs.append_pair("qInclude", q_include);
        }
        if let Some(q_exclude) = &self.q_exclude {
            qs.append_pair("qExclude", q_exclude);
        }
        if let Some(multi_facets) = &self.multi_facets {
            qs.append_pair("multiFacets", multi_facets);
        }
        format!("/primo/{version}/search?{}", qs.finish())
    }
}

/// Stringifying a request is equivalent to `url(DEFAULT_VERSION)`.
impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url(DEFAULT_VERSION))
    }
}

fn push_multi(slot: &mut Option<String>, facet: &QueryFacet) {
    match slot {
        Some(existing) => {
            existing.push_str(MULTI_SEPARATOR);
            existing.push_str(&facet.to_string());
        }
        None => *slot = Some(facet.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{FacetCategory, FacetOperator, QueryField, QueryPrecision};

    const APIKEY: &str = "l7xx38c6a1a3043974262e81a81fb7475ba9";

    fn config() -> QueryConfig {
        QueryConfig::new("https://gw", APIKEY, "bclib", "default", "bcl")
    }

    fn request() -> SearchRequest {
        let query = Query::new(QueryField::Any, QueryPrecision::Contains, "otters");
        SearchRequest::new(&config(), &query)
    }

    fn base_url() -> String {
        format!("/primo/v1/search?apikey={APIKEY}&vid=bclib&tab=default&scope=bcl&q=any%2Ccontains%2Cotters")
    }

    #[test]
    fn basic_request_produces_correct_url() {
        assert_eq!(request().url("v1"), base_url());
    }

    #[test]
    fn inst_prefixes_vid_and_is_sent_separately() {
        let config = config().with_inst("01BC_INST");
        let query = Query::new(QueryField::Any, QueryPrecision::Contains, "otters");
        let url = SearchRequest::new(&config, &query).url("v1");
        assert!(url.contains("vid=01BC_INST%3Abclib"));
        assert!(url.contains("&inst=01BC_INST&"));
    }

    #[test]
    fn sets_controlled_vocabulary() {
        let expected = format!("{}&conVoc=false", base_url());
        assert_eq!(request().con_voc(false).url("v1"), expected);
    }

    #[test]
    fn sets_get_more() {
        let expected = format!("{}&getMore=1", base_url());
        assert_eq!(request().get_more(true).url("v1"), expected);
    }

    #[test]
    fn sets_pc_availability() {
        let expected = format!("{}&pcAvailability=false", base_url());
        assert_eq!(request().pc_availability(false).url("v1"), expected);
    }

    #[test]
    fn sets_offset_and_limit() {
        let expected = format!("{}&offset=12&limit=4", base_url());
        assert_eq!(request().offset(12).limit(4).url("v1"), expected);
    }

    #[test]
    fn sets_sort() {
        let expected = format!("{}&sort=rank", base_url());
        assert_eq!(request().sort(Sort::Rank).url("v1"), expected);
    }

    #[test]
    fn bad_sort_string_is_rejected() {
        assert!(matches!(
            "NOTASORT".parse::<Sort>(),
            Err(RequestError::InvalidSort { .. })
        ));
    }

    #[test]
    fn bad_operator_string_is_rejected() {
        assert!(matches!(
            "XOR".parse::<QueryOperator>(),
            Err(RequestError::InvalidOperator { .. })
        ));
    }

    #[test]
    fn second_query_joins_with_operator() {
        let second = Query::new(QueryField::Title, QueryPrecision::Contains, "opera");
        let url = request().add_query(&second, QueryOperator::Or).url("v1");
        // q = any,contains,otters,OR;title,contains,opera (then form-encoded)
        assert!(url.contains("q=any%2Ccontains%2Cotters%2COR%3Btitle%2Ccontains%2Copera"));
    }

    #[test]
    fn include_joins_facets_with_multi_separator() {
        let f1 = QueryFacet::new(FacetCategory::Author, FacetOperator::Exact, "facet1");
        let f2 = QueryFacet::new(FacetCategory::Author, FacetOperator::Exact, "facet2");
        let url = request().include(&f1).unwrap().include(&f2).unwrap().url("v1");
        assert!(url.contains(
            "qInclude=facet_creator%2Cexact%2Cfacet1%7C%2C%7Cfacet_creator%2Cexact%2Cfacet2"
        ));
    }

    #[test]
    fn exclude_requires_exact_facet() {
        let facet = QueryFacet::new(FacetCategory::Language, FacetOperator::Exclude, "eng");
        let err = request().exclude(&facet).unwrap_err();
        assert!(matches!(err, RequestError::FacetMustBeExact { slot: "qExclude" }));
    }

    #[test]
    fn include_requires_exact_facet() {
        let facet = QueryFacet::new(FacetCategory::Language, FacetOperator::Include, "eng");
        let err = request().include(&facet).unwrap_err();
        assert!(matches!(err, RequestError::FacetMustBeExact { slot: "qInclude" }));
    }

    #[test]
    fn multi_facet_rejects_exact_facet() {
        let facet = QueryFacet::new(FacetCategory::Language, FacetOperator::Exact, "eng");
        let err = request().multi_facet(&facet).unwrap_err();
        assert!(matches!(err, RequestError::FacetMustNotBeExact));
    }

    #[test]
    fn multi_facet_accepts_non_exact_facets() {
        let english = QueryFacet::new(FacetCategory::Language, FacetOperator::Include, "eng");
        let french = QueryFacet::new(FacetCategory::Language, FacetOperator::Include, "fre");
        let url = request()
            .multi_facet(&english)
            .unwrap()
            .multi_facet(&french)
            .unwrap()
            .url("v1");
        assert!(url.contains("multiFacets="));
        assert!(url.contains("%7C%2C%7C"));
    }

    #[test]
    fn unset_parameters_never_appear() {
        let url = request().url("v1");
        for name in ["offset", "limit", "sort", "conVoc", "getMore", "pcAvailability",
                     "qInclude", "qExclude", "multiFacets"] {
            assert!(!url.contains(&format!("{name}=")), "{name} should be absent");
        }
    }

    #[test]
    fn version_is_caller_overridable() {
        let url = request().url("v2");
        assert!(url.starts_with("/primo/v2/search"));
    }

    #[test]
    fn display_matches_default_version_url() {
        let request = request().limit(3);
        assert_eq!(request.to_string(), request.url(DEFAULT_VERSION));
    }

    #[test]
    fn url_is_idempotent() {
        let request = request().sort(Sort::Date).offset(5);
        assert_eq!(request.url("v1"), request.url("v1"));
    }
}
