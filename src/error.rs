//! Diagnostic error types for the Primo client.
//!
//! Each subsystem defines its own error enum with miette `#[diagnostic]`
//! derives, providing error codes and help text. [`PrimoError`] wraps them all
//! so callers can hold one error type across request building, the HTTP call,
//! and response translation.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the Primo client.
#[derive(Debug, Error, Diagnostic)]
pub enum PrimoError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

pub type PrimoResult<T> = Result<T, PrimoError>;

// ---------------------------------------------------------------------------
// Request-building errors
// ---------------------------------------------------------------------------

/// Validation failures while assembling a Brief Search request.
///
/// These are raised at the point the invalid value is supplied, never when
/// the URL is rendered.
#[derive(Debug, Error, Diagnostic)]
pub enum RequestError {
    #[error("{field} is not a valid search field")]
    #[diagnostic(
        code(primo::request::invalid_field),
        help("Valid fields are: any, title, creator, sub, usertag.")
    )]
    InvalidField { field: String },

    #[error("{precision} is not a valid search precision")]
    #[diagnostic(
        code(primo::request::invalid_precision),
        help("Valid precisions are: exact, contains, \"begins with\".")
    )]
    InvalidPrecision { precision: String },

    #[error("{operator} is not a valid search operator")]
    #[diagnostic(
        code(primo::request::invalid_operator),
        help("Queries can be joined with AND, OR, or NOT.")
    )]
    InvalidOperator { operator: String },

    #[error("{category} is not a valid facet category")]
    #[diagnostic(
        code(primo::request::invalid_category),
        help(
            "Valid categories are the facet_* names from the Brief Search API: \
             facet_creator, facet_tlevel, facet_domain, facet_lang, \
             facet_library, \"facet_lcc \", facet_rtype, facet_topic."
        )
    )]
    InvalidCategory { category: String },

    #[error("{operator} is not a valid facet operator")]
    #[diagnostic(
        code(primo::request::invalid_facet_operator),
        help("Facet operators are: exact, include, exclude.")
    )]
    InvalidFacetOperator { operator: String },

    #[error("{sort} is not a valid sort")]
    #[diagnostic(
        code(primo::request::invalid_sort),
        help("Results can be sorted by rank, title, author, or date.")
    )]
    InvalidSort { sort: String },

    #[error("{slot} facets must be exact")]
    #[diagnostic(
        code(primo::request::facet_not_exact),
        help(
            "qInclude and qExclude accept only facets built with the exact \
             operator. Use multi_facet() for include/exclude facets."
        )
    )]
    FacetMustBeExact { slot: &'static str },

    #[error("multiFacets facets must not be exact")]
    #[diagnostic(
        code(primo::request::facet_exact),
        help("Exact facets belong in include() or exclude(), not multi_facet().")
    )]
    FacetMustNotBeExact,
}

pub type RequestResult<T> = Result<T, RequestError>;

// ---------------------------------------------------------------------------
// API transport errors
// ---------------------------------------------------------------------------

/// Failures of the HTTP call itself.
///
/// Every transport-level failure (connection refused, timeout, non-2xx
/// status) surfaces as a single [`ApiError::BadResponse`] so callers see one
/// error kind regardless of the underlying cause.
#[derive(Debug, Error, Diagnostic)]
pub enum ApiError {
    #[error("error connecting to {url}: {message}")]
    #[diagnostic(
        code(primo::api::bad_response),
        help(
            "The Primo gateway did not return a usable response. Check the \
             gateway hostname, the API key, and your network connection."
        )
    )]
    BadResponse { url: String, message: String },

    #[error("response body was not valid JSON: {message}")]
    #[diagnostic(
        code(primo::api::invalid_json),
        help("The gateway answered, but not with a JSON document.")
    )]
    InvalidJson { message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Translation errors
// ---------------------------------------------------------------------------

/// Malformed or unexpected JSON in an API response.
///
/// These indicate programming or upstream-data errors, not conditions worth
/// retrying. A translation error aborts the whole response; there is no
/// partial-result mode.
#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    #[error("{category} is not a valid PNX category")]
    #[diagnostic(
        code(primo::translate::invalid_pnx_category),
        help(
            "The requested category does not exist in this record's PNX \
             section. Common categories are control, display, addata, facets, \
             sort, and search."
        )
    )]
    InvalidPnxCategory { category: String },

    #[error("malformed packed PNX entry: {entry}")]
    #[diagnostic(
        code(primo::translate::malformed_packed_entry),
        help(
            "The first element of this field matched the $$V...$$O... packed \
             encoding, but a later element did not. The record is likely \
             corrupt upstream."
        )
    )]
    MalformedPackedEntry { entry: String },

    #[error("facet count {value} is not numeric")]
    #[diagnostic(
        code(primo::translate::non_numeric_facet_count),
        help("Facet value counts must be integers.")
    )]
    NonNumericFacetCount { value: String },
}

pub type TranslateResult<T> = Result<T, TranslateError>;

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("could not read config file: {source}")]
    #[diagnostic(
        code(primo::config::io),
        help("Check that the config file exists and is readable.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config: {source}")]
    #[diagnostic(
        code(primo::config::parse),
        help(
            "The config must be TOML with string keys gateway, apikey, vid, \
             tab, and scope (inst is optional)."
        )
    )]
    Parse {
        #[source]
        source: toml::de::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
