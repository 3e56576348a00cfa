//! Resource-name normalization pipeline
//!
//! `ResourceNormalizer::new` picks the pipeline once per configuration
//! snapshot:
//!
//! - **Legacy**: only the legacy mapping is set. Paths go to
//!   [`LegacyNormalizer`] and nothing else runs.
//! - **Modern**: anything else. Direction-specific mapping rules run over
//!   the whole path, then every segment goes through the fragment
//!   classifier.
//!
//! Normalizing never fails; broken rules and regexes are dropped when the
//! normalizer is built.

use tracing::debug;

use crate::config::UriConfig;
use crate::direction::Direction;
use crate::fragment::FragmentClassifier;
use crate::legacy::LegacyNormalizer;
use crate::mapping::PathMapper;
use crate::path::{ensure_leading_slash, is_trivial_path};

#[derive(Debug, Clone)]
enum Pipeline {
    Legacy(LegacyNormalizer),
    Modern {
        incoming: PathMapper,
        outgoing: PathMapper,
        classifier: FragmentClassifier,
    },
}

/// Normalizer built from one configuration snapshot
///
/// Immutable after construction and safe to share across threads.
///
/// # Examples
///
/// ```
/// use resource_uri::{ResourceNormalizer, UriConfig};
///
/// let config = UriConfig {
///     mapping_incoming: vec!["name/*".to_string()],
///     ..UriConfig::default()
/// };
/// let normalizer = ResourceNormalizer::new(&config);
///
/// assert_eq!(normalizer.normalize_incoming_path("/numeric/123/name/some_name"), "/numeric/?/name/?");
/// assert_eq!(normalizer.normalize_outgoing_path("/numeric/123/name/some_name"), "/numeric/?/name/some_name");
/// assert_eq!(normalizer.normalize_incoming_path(None), "/");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceNormalizer {
    pipeline: Pipeline,
}

impl ResourceNormalizer {
    pub fn new(config: &UriConfig) -> Self {
        let pipeline = if !config.has_modern_settings() && !config.legacy_mapping.is_empty() {
            let legacy = LegacyNormalizer::new(config.legacy_rules());
            debug!(
                legacy_mapping = %config.legacy_mapping,
                rules = legacy.len(),
                "only legacy URI mapping configured, using legacy normalization"
            );
            Pipeline::Legacy(legacy)
        } else {
            let incoming = PathMapper::from_rules(&config.mapping_incoming);
            let outgoing = PathMapper::from_rules(&config.mapping_outgoing);
            let classifier = FragmentClassifier::new(&config.fragment_regex);
            debug!(
                incoming_rules = incoming.len(),
                outgoing_rules = outgoing.len(),
                fragment_regexes = classifier.len(),
                "URI normalizer ready"
            );
            Pipeline::Modern {
                incoming,
                outgoing,
                classifier,
            }
        };

        Self { pipeline }
    }

    /// Whether the legacy pipeline was selected
    pub fn is_legacy(&self) -> bool {
        matches!(self.pipeline, Pipeline::Legacy(_))
    }

    /// Normalizes a path for the given direction
    ///
    /// The result always starts with `/`.
    pub fn normalize(&self, path: Option<&str>, direction: Direction) -> String {
        let path = match path {
            Some(path) if !is_trivial_path(Some(path)) => ensure_leading_slash(path),
            _ => return "/".to_string(),
        };

        match &self.pipeline {
            Pipeline::Legacy(legacy) => ensure_leading_slash(&legacy.normalize(&path)).into_owned(),
            Pipeline::Modern {
                incoming,
                outgoing,
                classifier,
            } => {
                let mapper = match direction {
                    Direction::Incoming => incoming,
                    Direction::Outgoing => outgoing,
                };
                let mapped = mapper.apply(&path);
                classifier.classify(&mapped)
            }
        }
    }

    /// Normalizes a path received by this process
    pub fn normalize_incoming_path<'a>(&self, path: impl Into<Option<&'a str>>) -> String {
        self.normalize(path.into(), Direction::Incoming)
    }

    /// Normalizes a path requested by this process
    pub fn normalize_outgoing_path<'a>(&self, path: impl Into<Option<&'a str>>) -> String {
        self.normalize(path.into(), Direction::Outgoing)
    }
}

impl Default for ResourceNormalizer {
    fn default() -> Self {
        Self::new(&UriConfig::default())
    }
}

impl From<&UriConfig> for ResourceNormalizer {
    fn from(config: &UriConfig) -> Self {
        Self::new(config)
    }
}

/// One-shot incoming normalization against a configuration snapshot
///
/// Builds a normalizer per call; keep a [`ResourceNormalizer`] around when
/// normalizing many paths.
pub fn normalize_incoming_path<'a>(config: &UriConfig, path: impl Into<Option<&'a str>>) -> String {
    ResourceNormalizer::new(config).normalize_incoming_path(path)
}

/// One-shot outgoing normalization against a configuration snapshot
pub fn normalize_outgoing_path<'a>(config: &UriConfig, path: impl Into<Option<&'a str>>) -> String {
    ResourceNormalizer::new(config).normalize_outgoing_path(path)
}
