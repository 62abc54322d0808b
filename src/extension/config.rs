//! Discovery configuration.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Resource path prefix used when none is configured.
pub const DEFAULT_RESOURCE_PREFIX: &str = "META-INF/services/";

/// Settings controlling where descriptor resources are looked up.
///
/// # Examples
///
/// ```
/// use capability_registry::extension::config::DiscoveryConfig;
///
/// let config = DiscoveryConfig::default();
/// assert_eq!(
///     config.resource_path("demo.codec.Codec"),
///     "META-INF/services/demo.codec.Codec"
/// );
///
/// let parsed = DiscoveryConfig::from_json_str(r#"{"search_roots": ["plugins"]}"#)
///     .expect("valid configuration");
/// assert_eq!(parsed.search_roots.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Prefix joined with a capability name to form its resource path.
    pub resource_prefix: String,
    /// Directories searched by the filesystem resource provider, in order.
    pub search_roots: Vec<Utf8PathBuf>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            resource_prefix: DEFAULT_RESOURCE_PREFIX.to_owned(),
            search_roots: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON or
    /// does not match the configuration shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(Arc::new(err)))
    }

    /// Adds a search root.
    #[must_use]
    pub fn with_search_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.search_roots.push(root.into());
        self
    }

    /// Replaces the resource prefix.
    #[must_use]
    pub fn with_resource_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.resource_prefix = prefix.into();
        self
    }

    /// Returns the resource path for a capability name.
    #[must_use]
    pub fn resource_path(&self, capability: &str) -> String {
        format!("{}{capability}", self.resource_prefix)
    }
}

/// Errors returned while loading discovery configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("invalid discovery configuration: {0}")]
    Parse(Arc<serde_json::Error>),
}
