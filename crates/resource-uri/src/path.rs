//! Path utilities for preprocessing and segmentation
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.
//!
//! Unlike route normalization, nothing here collapses `//` or drops a
//! trailing `/`: the resource name must keep every slash the request had.

use std::borrow::Cow;

/// Literal substituted for every dynamic segment or wildcard match
pub const PLACEHOLDER: &str = "?";

/// Path separator
pub const SEPARATOR: char = '/';

/// Checks whether a path short-circuits straight to `/`
///
/// `None` (a missing path), the empty string and `/` itself are trivial.
///
/// # Examples
///
/// ```
/// use resource_uri::path::is_trivial_path;
///
/// assert!(is_trivial_path(None));
/// assert!(is_trivial_path(Some("")));
/// assert!(is_trivial_path(Some("/")));
///
/// assert!(!is_trivial_path(Some("//")));
/// assert!(!is_trivial_path(Some("/users")));
/// ```
pub fn is_trivial_path(path: Option<&str>) -> bool {
    matches!(path, None | Some("") | Some("/"))
}

/// Prepends `/` when the path does not already start with one
///
/// Returns `Cow::Borrowed` when the input already has its leading slash
/// (zero allocations).
///
/// # Examples
///
/// ```
/// use resource_uri::path::ensure_leading_slash;
/// use std::borrow::Cow;
///
/// assert!(matches!(ensure_leading_slash("/int/123"), Cow::Borrowed("/int/123")));
/// assert_eq!(ensure_leading_slash("int/123"), "/int/123");
/// ```
pub fn ensure_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with(SEPARATOR) {
        Cow::Borrowed(path)
    } else {
        let mut owned = String::with_capacity(path.len() + 1);
        owned.push(SEPARATOR);
        owned.push_str(path);
        Cow::Owned(owned)
    }
}

/// Splits a path into its `/`-delimited segments
///
/// Empty segments are kept: a leading slash yields a leading `""`, a
/// trailing slash a trailing `""`, and `//` an empty segment in between.
/// Joining the result with `/` gives back the input exactly.
///
/// # Examples
///
/// ```
/// use resource_uri::path::split_segments;
///
/// assert_eq!(
///     split_segments("/some//path/123/"),
///     vec!["", "some", "", "path", "123", ""]
/// );
/// ```
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split(SEPARATOR).collect()
}

/// Key a segment is compared under: trimmed and lower-cased
///
/// Returns `Cow::Borrowed` when the segment is already in that form.
pub fn match_key(segment: &str) -> Cow<'_, str> {
    let trimmed = segment.trim();
    if trimmed.chars().any(char::is_uppercase) {
        Cow::Owned(trimmed.to_lowercase())
    } else {
        Cow::Borrowed(trimmed)
    }
}

/// Joins segments back into a path
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            joined.push(SEPARATOR);
        }
        joined.push_str(segment.as_ref());
    }
    joined
}
