//! # Resource URI
//!
//! Turns raw HTTP request paths into low-cardinality resource names for
//! span names and metric tags:
//! - Integer ids (`/users/123` → `/users/?`)
//! - Hex tokens and UUIDs, with or without dashes
//! - Configured fragment regexes (`/^v[0-9]+$/`)
//! - Configured wildcard mappings per direction (`users/*/posts/*`)
//!
//! ## Pipeline
//!
//! 1. `""`, `/` and a missing path become `/`; a leading `/` is added if absent
//! 2. If only the deprecated combined mapping is configured, the legacy
//!    normalizer handles the path and nothing else runs
//! 3. Incoming or outgoing mapping rules rewrite the whole path, in order,
//!    each seeing the output of the last
//! 4. Each `/`-delimited segment is replaced by `?` when a fragment regex
//!    matches it (built-in regexes first, configured ones after)
//!
//! Slashes are never added or removed: empty segments from `//` and a
//! trailing `/` survive normalization.
//!
//! ## Example
//!
//! ```
//! use resource_uri::{ResourceNormalizer, UriConfig};
//!
//! let config = UriConfig {
//!     mapping_incoming: vec!["path/*-something".to_string()],
//!     ..UriConfig::default()
//! };
//! let normalizer = ResourceNormalizer::new(&config);
//!
//! assert_eq!(
//!     normalizer.normalize_incoming_path("/int/123/path/one-something/path/two-else"),
//!     "/int/?/path/?-something/path/two-else"
//! );
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod direction;
mod fragment;
mod legacy;
mod mapping;
mod normalizer;
pub mod path;

// ============================================================================
// Public API
// ============================================================================

pub use config::UriConfig;
pub use direction::Direction;
pub use fragment::{parse_fragment_pattern, FragmentClassifier, DEFAULT_FRAGMENT_PATTERNS};
pub use legacy::LegacyNormalizer;
pub use mapping::{MappingRule, PathMapper, WILDCARD};
pub use normalizer::{normalize_incoming_path, normalize_outgoing_path, ResourceNormalizer};
pub use path::PLACEHOLDER;
