//! Wildcard mapping rules applied to the whole path
//!
//! A rule such as `users/*/posts/*` collapses every span of the path with
//! that shape into `users/?/posts/?`. Rules run against the output of the
//! rules before them, in the order they were configured.

use std::borrow::Cow;

use regex::{NoExpand, Regex};
use tracing::debug;

use crate::path::{PLACEHOLDER, SEPARATOR};

/// Wildcard token in a mapping rule
pub const WILDCARD: char = '*';

/// What a wildcard matches: one or more characters up to the next `/`, `?` or `#`
const WILDCARD_PATTERN: &str = "[^/?#]+";

/// A single compiled wildcard mapping rule
///
/// # Examples
///
/// ```
/// use resource_uri::MappingRule;
///
/// let rule = MappingRule::compile("path/*-something").unwrap().unwrap();
/// assert_eq!(
///     rule.apply("/path/one-something/path/two-else").as_deref(),
///     Some("/path/?-something/path/two-else")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MappingRule {
    /// Rule text after trim + lower-case
    rule: String,
    regex: Regex,
    replacement: String,
}

impl MappingRule {
    /// Compiles a raw rule
    ///
    /// Returns `Ok(None)` for rules that can never change a path: blank
    /// entries (left by trailing commas) and rules without a `*`.
    pub fn compile(raw: &str) -> Result<Option<Self>, regex::Error> {
        let rule = raw.trim().to_lowercase();

        if rule.is_empty() || !rule.contains(WILDCARD) {
            return Ok(None);
        }

        let body = rule
            .split(WILDCARD)
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(WILDCARD_PATTERN);

        // Matching is case-sensitive against the lower-cased rule
        let regex = Regex::new(&format!("{}{}", SEPARATOR, body))?;

        let replacement = format!("{}{}", SEPARATOR, rule.replace(WILDCARD, PLACEHOLDER));

        Ok(Some(Self {
            rule,
            regex,
            replacement,
        }))
    }

    /// Normalized rule text
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// Replaces every occurrence of the rule's shape in `path`
    ///
    /// Returns `None` when nothing matched.
    pub fn apply(&self, path: &str) -> Option<String> {
        match self.regex.replace_all(path, NoExpand(&self.replacement)) {
            Cow::Borrowed(_) => None,
            Cow::Owned(replaced) => Some(replaced),
        }
    }
}

/// Ordered list of mapping rules for one direction
#[derive(Debug, Clone, Default)]
pub struct PathMapper {
    rules: Vec<MappingRule>,
}

impl PathMapper {
    /// Compiles every usable rule, keeping configuration order
    pub fn from_rules<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = rules
            .into_iter()
            .filter_map(|raw| {
                let raw = raw.as_ref();
                match MappingRule::compile(raw) {
                    Ok(Some(rule)) => Some(rule),
                    Ok(None) => {
                        debug!(rule = raw, "skipping blank or wildcard-free mapping rule");
                        None
                    }
                    Err(err) => {
                        debug!(rule = raw, error = %err, "skipping mapping rule that failed to compile");
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

    /// Runs every rule over the accumulated result
    ///
    /// Returns `Cow::Borrowed` when no rule matched.
    pub fn apply<'a>(&self, path: &'a str) -> Cow<'a, str> {
        let mut result = Cow::Borrowed(path);
        for rule in &self.rules {
            if let Some(replaced) = rule.apply(&result) {
                result = Cow::Owned(replaced);
            }
        }
        result
    }
}
