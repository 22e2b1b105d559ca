//! Translation of raw Brief Search JSON into typed records.
//!
//! The API response is loosely structured and semi-documented; these
//! translators normalize it. Nothing here talks to the network: the input is
//! an already-parsed `serde_json::Value`.

pub mod doc;
pub mod facet;
pub mod search;

pub use doc::translate_doc;
pub use facet::translate_facet;
pub use search::translate_search;
