//! Parsing of inventory path strings.
//!
//! Paths have the fixed shape `/seg1/seg2/.../segN/`. Parsing strips the
//! leading and trailing separator and splits the rest, preserving order.
//! Anything else is rejected here rather than left to fail during
//! traversal.

use crate::error::{Error, Result};

use super::types::{PathSegments, SEPARATOR};

/// Parses a raw path string into segments.
///
/// `/` parses to the root (no segments).
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the leading or trailing separator is
/// missing or if any segment is empty.
///
/// # Examples
///
/// ```
/// use vcinv::path::parse;
///
/// let path = parse("/DC1/Folder1/").unwrap();
/// assert_eq!(path.iter().collect::<Vec<_>>(), vec!["DC1", "Folder1"]);
///
/// assert!(parse("/").unwrap().is_empty());
/// assert!(parse("/DC1/Folder1").is_err());
/// assert!(parse("/DC1//Folder1/").is_err());
/// ```
pub fn parse(raw: &str) -> Result<PathSegments> {
    let invalid = |reason: &str| Error::InvalidPath {
        path: raw.to_string(),
        reason: reason.to_string(),
    };

    let Some(rest) = raw.strip_prefix(SEPARATOR) else {
        return Err(invalid("must start with '/'"));
    };
    if rest.is_empty() {
        return Ok(PathSegments::root());
    }
    let Some(inner) = rest.strip_suffix(SEPARATOR) else {
        return Err(invalid("must end with '/'"));
    };

    let segments: Vec<String> = inner.split(SEPARATOR).map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
        return Err(invalid("contains an empty segment"));
    }

    Ok(PathSegments::from_parsed(segments))
}
