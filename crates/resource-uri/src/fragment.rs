//! Per-segment classification of dynamic path fragments
//!
//! Every segment is tested against the built-in patterns and then the
//! configured ones. A segment that matches any of them is replaced by `?`.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::path::{join_segments, match_key, split_segments, PLACEHOLDER};

/// Built-in fragment patterns, applied before configured ones
///
/// Segments are lower-cased before matching, so the patterns only list
/// lower-case hex digits.
pub const DEFAULT_FRAGMENT_PATTERNS: &[&str] = &[
    // Integer ids
    r"^[0-9]+$",
    // UUID
    r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$",
    // UUID without dashes
    r"^[0-9a-f]{32}$",
    // Hex tokens, digests, object ids
    r"^[0-9a-f]{8,128}$",
];

static DEFAULT_FRAGMENT_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    DEFAULT_FRAGMENT_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

/// Parses a configured fragment pattern into a regex
///
/// Accepts delimited patterns with trailing modifiers (`/^v\d+$/i`,
/// `#^[a-z]{3}$#`) as well as bare regexes (`^v\d+$`).
///
/// # Modifiers
///
/// - `i`, `m`, `s`, `x`, `U` become the matching inline flag
/// - `u` and `D` are accepted and have no effect
/// - anything else rejects the pattern
///
/// # Examples
///
/// ```
/// use resource_uri::parse_fragment_pattern;
///
/// let regex = parse_fragment_pattern("/^some_name$/").unwrap();
/// assert!(regex.is_match("some_name"));
///
/// let regex = parse_fragment_pattern("#^V\\d+$#i").unwrap();
/// assert!(regex.is_match("v2"));
///
/// assert!(parse_fragment_pattern("/(((((]]]]]]wrong_regex$/").is_err());
/// ```
pub fn parse_fragment_pattern(raw: &str) -> Result<Regex> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!("empty fragment pattern");
    }

    let (body, modifiers) = split_delimited(raw).unwrap_or((raw, ""));

    let mut flags = String::new();
    for modifier in modifiers.chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !flags.contains(modifier) {
                    flags.push(modifier);
                }
            }
            'u' | 'D' => {}
            other => bail!("unsupported pattern modifier '{}'", other),
        }
    }

    let regex = if flags.is_empty() {
        Regex::new(body)?
    } else {
        Regex::new(&format!("(?{}){}", flags, body))?
    };

    Ok(regex)
}

/// Splits `<delim>body<delim>modifiers` into `(body, modifiers)`
///
/// Returns `None` when the pattern is not delimited.
fn split_delimited(raw: &str) -> Option<(&str, &str)> {
    let open = raw.chars().next()?;
    if open.is_alphanumeric() || open.is_whitespace() || open == '\\' {
        return None;
    }

    let close = match open {
        '(' => ')',
        '[' => ']',
        '{' => '}',
        '<' => '>',
        other => other,
    };

    let rest = &raw[open.len_utf8()..];
    let end = rest.rfind(close)?;
    let modifiers = &rest[end + close.len_utf8()..];

    if !modifiers.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    Some((&rest[..end], modifiers))
}

/// Ordered set of fragment regexes: defaults first, then configured ones
#[derive(Debug, Clone)]
pub struct FragmentClassifier {
    regexes: Vec<Regex>,
}

impl FragmentClassifier {
    /// Builds a classifier from configured patterns
    ///
    /// Patterns that are blank, rejected or fail to compile are skipped;
    /// the rest keep their configured order.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut regexes = DEFAULT_FRAGMENT_REGEXES.to_vec();

        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.trim().is_empty() {
                continue;
            }
            match parse_fragment_pattern(pattern) {
                Ok(regex) => regexes.push(regex),
                Err(err) => warn!(pattern = pattern, error = %err, "ignoring invalid fragment regex"),
            }
        }

        Self { regexes }
    }

    /// Number of active regexes, defaults included
    pub(crate) fn len(&self) -> usize {
        self.regexes.len()
    }

    /// Whether a single segment is dynamic
    pub fn is_dynamic(&self, segment: &str) -> bool {
        let key = match_key(segment);
        self.regexes.iter().any(|regex| regex.is_match(&key))
    }

    /// Replaces every dynamic segment of `path` with `?`
    ///
    /// Regexes run in order over the whole segment list; a segment already
    /// replaced is seen as `?` by later regexes. Empty segments are path
    /// structure (leading, trailing and doubled slashes) and never replaced.
    pub fn classify(&self, path: &str) -> String {
        let mut segments = split_segments(path);

        for regex in &self.regexes {
            for segment in segments.iter_mut().filter(|segment| !segment.is_empty()) {
                if regex.is_match(&match_key(*segment)) {
                    *segment = PLACEHOLDER;
                }
            }
        }

        join_segments(&segments)
    }
}

impl Default for FragmentClassifier {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
