//! End-to-end translation of a captured Brief Search response.
//!
//! The fixture is a full search for "supreme court": 96 total hits, the
//! first page of 10 docs, and 12 facets. These tests exercise the whole
//! pipeline from raw JSON through the search, facet, and doc translators.

use primo_client::client::{HttpGet, PrimoClient};
use primo_client::config::QueryConfig;
use primo_client::error::ApiResult;
use primo_client::response::SearchResponse;
use primo_client::translate::translate_search;
use serde_json::Value;

fn fixture() -> Value {
    let raw = include_str!("fixtures/brief_search.json");
    serde_json::from_str(raw).unwrap()
}

fn translated() -> SearchResponse {
    translate_search(fixture()).unwrap()
}

#[test]
fn response_counts_and_suggestion() {
    let response = translated();
    assert_eq!(response.total, Some(96));
    assert_eq!(response.first, Some(1));
    assert_eq!(response.last, Some(10));
    assert_eq!(response.did_u_mean.as_deref(), Some("others"));
    assert_eq!(response.controlled_vocabulary, None);
}

#[test]
fn all_docs_translate_in_order() {
    let response = translated();
    assert_eq!(response.docs.len(), 10);
    assert_eq!(response.docs[0].title.as_deref(), Some("The Supreme Court"));
    assert_eq!(response.docs[9].title.as_deref(), Some("Out of Order"));
    for doc in &response.docs {
        assert!(doc.id.is_some(), "every doc carries a record id");
    }
}

#[test]
fn facet_map_has_all_names_in_api_order() {
    let response = translated();
    assert_eq!(response.facets.len(), 12);
    let names: Vec<&str> = response.facets.names().collect();
    assert_eq!(
        names,
        [
            "creator", "lang", "rtype", "topic", "tlevel", "domain",
            "library", "lcc", "genre", "pfilter", "creationdate", "local1",
        ]
    );
    let lang = response.facets.get("lang").unwrap();
    assert_eq!(lang.values.len(), 3);
}

#[test]
fn facet_sorts_permute_without_loss() {
    let response = translated();
    let mut facet = response.facets.get("creator").unwrap().clone();
    let original = facet.values.clone();

    facet.sort_by_frequency();
    assert!(facet.values.windows(2).all(|w| w[0].count >= w[1].count));
    assert_eq!(facet.values.len(), original.len());

    facet.sort_alphabetically();
    assert!(facet
        .values
        .windows(2)
        .all(|w| w[0].value.to_lowercase() <= w[1].value.to_lowercase()));
    for value in &original {
        assert!(facet.values.contains(value));
    }
}

#[test]
fn dedup_doc_exposes_packed_almaid() {
    let response = translated();
    let doc = &response.docs[0];
    let almaid = doc.pnx("control", "almaid").unwrap();
    assert_eq!(
        almaid.get("ALMA-BC21331257940001021"),
        Some("01BC_INST:21331257940001021")
    );
    assert_eq!(
        almaid.get("ALMA-BC51460206020001021"),
        Some("01BC_INST:51460206020001021")
    );
}

#[test]
fn delivery_flags_and_links_on_the_dedup_doc() {
    let response = translated();
    let doc = &response.docs[0];
    assert!(doc.is_physical);
    assert!(doc.is_electronic);
    assert!(!doc.is_digital);
    assert!(doc.is_open_access);
    assert_eq!(doc.link_to_resource.len(), 1);
    assert_eq!(
        doc.link_to_resource[0].url,
        "https://ebooks.example.org/supreme-court"
    );
    assert_eq!(doc.thumbnail.len(), 1);
    assert_eq!(doc.openurl.len(), 1);
    assert!(doc.openurl_fulltext.is_empty());
}

#[test]
fn holdings_follow_the_holding_list() {
    let response = translated();
    let with_holdings = &response.docs[0];
    assert_eq!(with_holdings.holdings.len(), 1);
    assert_eq!(with_holdings.holdings[0].library_code, "ONL");
    assert_eq!(with_holdings.holdings[0].location_display, "O'Neill Stacks");

    // Every third doc is electronic-only with no holding list.
    let electronic_only = &response.docs[2];
    assert!(electronic_only.is_electronic);
    assert!(electronic_only.holdings.is_empty());
}

#[test]
fn pnx_accessor_covers_the_whole_record() {
    let response = translated();
    let doc = &response.docs[1];
    let topics = doc.pnx("facets", "topic").unwrap();
    assert_eq!(
        topics.as_list().unwrap(),
        ["United States. Supreme Court".to_string()]
    );
    assert!(doc.pnx("display", "lds31").unwrap().is_empty());
    assert!(doc.pnx("dedup", "f10").is_err());
}

/// Transport stub that replays the fixture body.
struct FixtureHttp;

impl HttpGet for FixtureHttp {
    fn get_json(&self, _url: &str) -> ApiResult<Value> {
        Ok(fixture())
    }
}

#[test]
fn client_pipeline_over_a_stub_transport() {
    let config = QueryConfig::new("https://gw.example.org", "key", "bclib", "default", "bcl");
    let client = PrimoClient::with_transport(config, Box::new(FixtureHttp));
    let response = client.keyword_search("supreme court").unwrap();
    assert_eq!(response.total, Some(96));
    assert_eq!(response.docs.len(), 10);
    assert_eq!(response.facets.len(), 12);
}
