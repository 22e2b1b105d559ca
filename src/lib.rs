//! # primo-client
//!
//! Client for the Ex Libris Primo Brief Search REST API.
//!
//! Two cooperating pieces form the core:
//!
//! - **Request building** (`query`, `request`): assemble the search URL from
//!   a [`config::QueryConfig`], boolean-joined query clauses, facet filters,
//!   sort, and pagination.
//! - **Response translation** (`translate`, `response`, `pnx`): normalize the
//!   loosely structured response JSON into typed records, including the
//!   packed `$$V…$$O…` multi-value PNX decoding.
//!
//! [`client::PrimoClient`] wires the two to a synchronous HTTP transport.
//!
//! ## Library usage
//!
//! ```no_run
//! use primo_client::client::PrimoClient;
//! use primo_client::config::QueryConfig;
//! use primo_client::query::{Query, QueryField, QueryPrecision};
//! use primo_client::request::{SearchRequest, Sort};
//!
//! let config = QueryConfig::new("https://api-na.hosted.exlibrisgroup.com",
//!                               "my-key", "bclib", "default", "bcl");
//! let query = Query::new(QueryField::Title, QueryPrecision::Contains, "opera");
//! let request = SearchRequest::new(&config, &query)
//!     .limit(20)
//!     .sort(Sort::Date);
//!
//! let client = PrimoClient::new(config);
//! let response = client.search(&request).unwrap();
//! for doc in &response.docs {
//!     println!("{}", doc.title.as_deref().unwrap_or("(untitled)"));
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pnx;
pub mod query;
pub mod request;
pub mod response;
pub mod translate;
