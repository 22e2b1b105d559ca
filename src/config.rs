//! Search configuration.
//!
//! A [`QueryConfig`] carries everything that identifies a Primo view to the
//! Brief Search API: the gateway host, the API key, and the view/tab/scope
//! coordinates. It is an explicit value passed into [`crate::request::SearchRequest`]
//! and [`crate::client::PrimoClient`]; there is no global configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Connection and view parameters for a Brief Search.
///
/// Immutable per search. Per-call variations (a different tab, say) are made
/// on a clone via the `with_*` helpers:
///
/// ```
/// use primo_client::config::QueryConfig;
///
/// let base = QueryConfig::new("https://api-na.hosted.exlibrisgroup.com",
///                             "my-key", "bclib", "default", "bcl");
/// let video = base.clone().with_tab("VIDEO");
/// assert_eq!(video.tab, "VIDEO");
/// assert_eq!(base.tab, "default");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Gateway base URI, e.g. `https://api-na.hosted.exlibrisgroup.com`.
    pub gateway: String,
    pub apikey: String,
    pub vid: String,
    pub tab: String,
    pub scope: String,
    /// Institution code, e.g. `01BC_INST`. Optional; when set it prefixes
    /// the vid parameter and is sent as `inst`.
    #[serde(default)]
    pub inst: Option<String>,
}

impl QueryConfig {
    pub fn new(
        gateway: impl Into<String>,
        apikey: impl Into<String>,
        vid: impl Into<String>,
        tab: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        QueryConfig {
            gateway: gateway.into(),
            apikey: apikey.into(),
            vid: vid.into(),
            tab: tab.into(),
            scope: scope.into(),
            inst: None,
        }
    }

    pub fn with_inst(mut self, inst: impl Into<String>) -> Self {
        self.inst = Some(inst.into());
        self
    }

    pub fn with_tab(mut self, tab: impl Into<String>) -> Self {
        self.tab = tab.into();
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_vid(mut self, vid: impl Into<String>) -> Self {
        self.vid = vid.into();
        self
    }

    /// Parse a config from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { source })
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io { source })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
gateway = "https://api-na.hosted.exlibrisgroup.com"
apikey = "l7xx38c6a1a3043974262e81a81fb7475ba9"
vid = "bclib"
tab = "default"
scope = "bcl"
"#;

    #[test]
    fn parses_toml_without_inst() {
        let config = QueryConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.vid, "bclib");
        assert_eq!(config.inst, None);
    }

    #[test]
    fn parses_toml_with_inst() {
        let toml = format!("{SAMPLE}inst = \"01BC_INST\"\n");
        let config = QueryConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.inst.as_deref(), Some("01BC_INST"));
    }

    #[test]
    fn missing_key_is_a_parse_error() {
        let err = QueryConfig::from_toml_str("gateway = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn loads_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("primo.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = QueryConfig::load(&path).unwrap();
        assert_eq!(config.scope, "bcl");
    }

    #[test]
    fn with_helpers_override_a_clone() {
        let base = QueryConfig::new("https://gw", "key", "bclib", "default", "bcl");
        let video = base.clone().with_tab("VIDEO").with_scope("MyInstitution");
        assert_eq!(video.tab, "VIDEO");
        assert_eq!(video.scope, "MyInstitution");
        assert_eq!(base.tab, "default");
    }
}
