// File: src/config.rs
// Purpose: Configuration snapshot from the environment or a TOML file

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Environment variable holding extra fragment regexes
pub const ENV_FRAGMENT_REGEX: &str = "DD_TRACE_RESOURCE_URI_FRAGMENT_REGEX";
/// Environment variable holding incoming mapping rules
pub const ENV_MAPPING_INCOMING: &str = "DD_TRACE_RESOURCE_URI_MAPPING_INCOMING";
/// Environment variable holding outgoing mapping rules
pub const ENV_MAPPING_OUTGOING: &str = "DD_TRACE_RESOURCE_URI_MAPPING_OUTGOING";
/// Environment variable holding the deprecated combined mapping
pub const ENV_LEGACY_MAPPING: &str = "DD_TRACE_RESOURCE_URI_MAPPING";

/// Immutable configuration snapshot used to build a normalizer
///
/// Callers take a new snapshot (and build a new normalizer) when the
/// configuration changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriConfig {
    /// Fragment regexes added after the built-in ones
    #[serde(default)]
    pub fragment_regex: Vec<String>,

    /// Wildcard rules for incoming (server) paths
    #[serde(default)]
    pub mapping_incoming: Vec<String>,

    /// Wildcard rules for outgoing (client) paths
    #[serde(default)]
    pub mapping_outgoing: Vec<String>,

    /// Deprecated comma-separated rules, used only when nothing else is set
    #[serde(default)]
    pub legacy_mapping: String,
}

/// Splits a comma-separated setting
///
/// Unset or blank values are an empty list. Otherwise every raw entry is
/// kept, including the empty one a trailing comma leaves behind.
pub fn split_list(value: &str) -> Vec<String> {
    if value.trim().is_empty() {
        return Vec::new();
    }
    value.split(',').map(str::to_string).collect()
}

impl UriConfig {
    /// Reads a snapshot from a TOML file
    ///
    /// A missing or blank file gives the default snapshot.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(err).with_context(|| format!("cannot read URI config {}", path.display()))
            }
        };

        // A blank file is the same as no file
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        toml::from_str(&text).with_context(|| format!("invalid URI config {}", path.display()))
    }

    /// Snapshot the `DD_TRACE_RESOURCE_URI_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a snapshot from any variable source
    ///
    /// # Examples
    ///
    /// ```
    /// use resource_uri::UriConfig;
    ///
    /// let config = UriConfig::from_lookup(|name| match name {
    ///     "DD_TRACE_RESOURCE_URI_MAPPING_INCOMING" => Some("users/*,".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.mapping_incoming, vec!["users/*", ""]);
    /// assert!(config.mapping_outgoing.is_empty());
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let list = |name: &str| lookup(name).map(|v| split_list(&v)).unwrap_or_default();

        Self {
            fragment_regex: list(ENV_FRAGMENT_REGEX),
            mapping_incoming: list(ENV_MAPPING_INCOMING),
            mapping_outgoing: list(ENV_MAPPING_OUTGOING),
            legacy_mapping: lookup(ENV_LEGACY_MAPPING)
                .map(|v| v.trim().to_string())
                .unwrap_or_default(),
        }
    }

    /// Overlay the environment: every variable that is set wins over the
    /// value already in `self`
    pub fn merge_env(self) -> Self {
        self.merge_lookup(|name| std::env::var(name).ok())
    }

    pub fn merge_lookup<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let overlay = Self::from_lookup(&lookup);

        Self {
            fragment_regex: pick(overlay.fragment_regex, self.fragment_regex),
            mapping_incoming: pick(overlay.mapping_incoming, self.mapping_incoming),
            mapping_outgoing: pick(overlay.mapping_outgoing, self.mapping_outgoing),
            legacy_mapping: if overlay.legacy_mapping.is_empty() {
                self.legacy_mapping
            } else {
                overlay.legacy_mapping
            },
        }
    }

    /// Whether any of the non-legacy settings has an entry
    pub fn has_modern_settings(&self) -> bool {
        !self.fragment_regex.is_empty()
            || !self.mapping_incoming.is_empty()
            || !self.mapping_outgoing.is_empty()
    }

    /// Legacy mapping split into its rules
    pub fn legacy_rules(&self) -> Vec<String> {
        split_list(&self.legacy_mapping)
    }
}

fn pick(preferred: Vec<String>, fallback: Vec<String>) -> Vec<String> {
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}
