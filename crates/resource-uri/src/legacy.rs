//! Legacy whole-path normalizer
//!
//! Kept for deployments that only set the combined legacy mapping. Each
//! rule must match the entire path; `*` spans anything, slashes included.
//! The first rule that matches decides the resource name. Paths no rule
//! matches get their integer and UUID segments replaced.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::mapping::WILDCARD;
use crate::path::{join_segments, match_key, split_segments, PLACEHOLDER};

static LEGACY_DEFAULT_REGEXES: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"^[0-9]+$").unwrap(),
        Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap(),
    ]
});

#[derive(Debug, Clone)]
struct LegacyRule {
    regex: Regex,
    replacement: String,
}

/// Normalizer built from the comma-split legacy mapping
///
/// # Examples
///
/// ```
/// use resource_uri::LegacyNormalizer;
///
/// let normalizer = LegacyNormalizer::new(["/user/*"]);
/// assert_eq!(normalizer.normalize("/user/123/nested/path"), "/user/?");
/// assert_eq!(normalizer.normalize("/team/42"), "/team/?");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LegacyNormalizer {
    rules: Vec<LegacyRule>,
}

impl LegacyNormalizer {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .filter_map(|pattern| {
                let pattern = pattern.as_ref().trim();
                if pattern.is_empty() {
                    return None;
                }

                let body = pattern
                    .split(WILDCARD)
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(".+");

                match Regex::new(&format!("^{}$", body)) {
                    Ok(regex) => Some(LegacyRule {
                        regex,
                        replacement: pattern.replace(WILDCARD, PLACEHOLDER),
                    }),
                    Err(err) => {
                        debug!(pattern = pattern, error = %err, "skipping legacy mapping rule");
                        None
                    }
                }
            })
            .collect();

        Self { rules }
    }

    /// Number of usable rules
    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn normalize(&self, path: &str) -> String {
        if let Some(rule) = self.rules.iter().find(|rule| rule.regex.is_match(path)) {
            return rule.replacement.clone();
        }

        let segments: Vec<&str> = split_segments(path)
            .into_iter()
            .map(|segment| {
                let key = match_key(segment);
                if LEGACY_DEFAULT_REGEXES.iter().any(|regex| regex.is_match(&key)) {
                    PLACEHOLDER
                } else {
                    segment
                }
            })
            .collect();

        join_segments(&segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_rule_wins() {
        let normalizer = LegacyNormalizer::new(["/user/*/edit", "/user/*"]);
        assert_eq!(normalizer.normalize("/user/7/edit"), "/user/?/edit");
        assert_eq!(normalizer.normalize("/user/7/view"), "/user/?");
    }

    #[test]
    fn test_rule_must_match_whole_path() {
        let normalizer = LegacyNormalizer::new(["/user/*"]);
        assert_eq!(normalizer.normalize("/api/user/abc"), "/api/user/abc");
    }

    #[test]
    fn test_blank_rules_ignored() {
        let normalizer = LegacyNormalizer::new(["/a/*", "", "  "]);
        assert_eq!(normalizer.len(), 1);
    }

    #[test]
    fn test_defaults_when_no_rule_matches() {
        let normalizer = LegacyNormalizer::new(["/user/*"]);
        assert_eq!(
            normalizer.normalize("/orders/15/items/b968fb04-2be9-494b-8b26-efb8a816e7a5"),
            "/orders/?/items/?"
        );
        // Plain hex tokens are not collapsed in legacy mode
        assert_eq!(normalizer.normalize("/blob/0123456789abcdef"), "/blob/0123456789abcdef");
    }
}
