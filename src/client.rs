//! HTTP transport and the search facade.
//!
//! [`PrimoClient`] wires a [`QueryConfig`] to an HTTP transport and runs the
//! full request → GET → translate pipeline. The transport sits behind the
//! [`HttpGet`] trait so tests (and callers with their own HTTP stack) can
//! substitute one; [`UreqGateway`] is the default, a synchronous `ureq`
//! agent sending `Accept: application/json`.

use serde_json::Value;

use crate::config::QueryConfig;
use crate::error::{ApiError, ApiResult, PrimoResult};
use crate::query::{Query, QueryField, QueryPrecision};
use crate::request::{DEFAULT_VERSION, SearchRequest};
use crate::response::SearchResponse;
use crate::translate::translate_search;

/// A minimal HTTP GET primitive: fetch a URL, parse the body as JSON.
///
/// One call per search; no retries, no timeout policy beyond what the
/// implementation itself applies.
pub trait HttpGet {
    fn get_json(&self, url: &str) -> ApiResult<Value>;
}

/// Default transport: a synchronous `ureq` agent.
pub struct UreqGateway {
    agent: ureq::Agent,
}

impl UreqGateway {
    pub fn new() -> Self {
        UreqGateway {
            agent: ureq::Agent::new(),
        }
    }
}

impl Default for UreqGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGet for UreqGateway {
    fn get_json(&self, url: &str) -> ApiResult<Value> {
        let response = self
            .agent
            .get(url)
            .set("Accept", "application/json")
            .call()
            .map_err(|e| ApiError::BadResponse {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        response.into_json().map_err(|e| ApiError::InvalidJson {
            message: e.to_string(),
        })
    }
}

/// Client for the Primo Brief Search API.
///
/// ```no_run
/// use primo_client::client::PrimoClient;
/// use primo_client::config::QueryConfig;
///
/// let config = QueryConfig::new("https://api-na.hosted.exlibrisgroup.com",
///                               "my-key", "bclib", "default", "bcl");
/// let client = PrimoClient::new(config);
/// let response = client.keyword_search("otello").unwrap();
/// println!("{:?} hits", response.total);
/// ```
pub struct PrimoClient {
    config: QueryConfig,
    http: Box<dyn HttpGet>,
}

impl PrimoClient {
    /// Build a client using the default `ureq` transport.
    pub fn new(config: QueryConfig) -> Self {
        Self::with_transport(config, Box::new(UreqGateway::new()))
    }

    /// Build a client over a caller-supplied transport.
    pub fn with_transport(config: QueryConfig, http: Box<dyn HttpGet>) -> Self {
        PrimoClient { config, http }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Run a search: GET the request's URL against the configured gateway
    /// and translate the response.
    pub fn search(&self, request: &SearchRequest) -> PrimoResult<SearchResponse> {
        let url = format!("{}{}", self.config.gateway, request.url(DEFAULT_VERSION));
        tracing::debug!(url = %url, "brief search request");
        let json = self.http.get_json(&url)?;
        let response = translate_search(json)?;
        tracing::debug!(
            docs = response.docs.len(),
            total = ?response.total,
            "brief search translated"
        );
        Ok(response)
    }

    /// Convenience: search the whole index for a keyword (`any,contains`).
    pub fn keyword_search(&self, keyword: &str) -> PrimoResult<SearchResponse> {
        let query = Query::new(QueryField::Any, QueryPrecision::Contains, keyword);
        let request = SearchRequest::new(&self.config, &query);
        self.search(&request)
    }
}
