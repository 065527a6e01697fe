//! Core types for inventory paths.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::parser;

/// The separator between inventory path segments.
pub const SEPARATOR: char = '/';

/// An ordered, root-relative list of inventory names.
///
/// The order of segments is the traversal order: the first segment names a
/// child of the root folder. An empty list denotes the root itself.
///
/// # Examples
///
/// ```
/// use vcinv::path::PathSegments;
///
/// let path: PathSegments = "/DC1/Prod/".parse().unwrap();
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "/DC1/Prod/");
///
/// let (parent, leaf) = path.split_last().unwrap();
/// assert_eq!(parent.to_string(), "/DC1/");
/// assert_eq!(leaf, "Prod");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathSegments {
    segments: Vec<String>,
}

impl PathSegments {
    /// The root path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a path from names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if a name is empty or contains the
    /// separator.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = names.into_iter().map(Into::into).collect();
        for segment in &segments {
            check_name(&segments, segment)?;
        }
        Ok(Self { segments })
    }

    pub(crate) fn from_parsed(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over segment names in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// The final segment, if any.
    #[must_use]
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path without its final segment.
    ///
    /// Returns `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.split_last().map(|(parent, _)| parent)
    }

    /// Splits into the parent path and the final segment.
    #[must_use]
    pub fn split_last(&self) -> Option<(Self, &str)> {
        let (last, rest) = self.segments.split_last()?;
        Some((
            Self {
                segments: rest.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Returns a new path with `name` appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if `name` is empty or contains the
    /// separator.
    pub fn join(&self, name: impl Into<String>) -> Result<Self> {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        if let Some(name) = segments.last() {
            check_name(&segments, name)?;
        }
        Ok(Self { segments })
    }
}

fn check_name(segments: &[String], name: &str) -> Result<()> {
    if name.is_empty() || name.contains(SEPARATOR) {
        return Err(Error::InvalidPath {
            path: segments.join("/"),
            reason: format!("'{name}' is not a valid inventory name"),
        });
    }
    Ok(())
}

impl fmt::Display for PathSegments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SEPARATOR}")?;
        for segment in &self.segments {
            write!(f, "{segment}{SEPARATOR}")?;
        }
        Ok(())
    }
}

impl FromStr for PathSegments {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parser::parse(s)
    }
}

impl<'a> IntoIterator for &'a PathSegments {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments
            .iter()
            .map(String::as_str as fn(&'a String) -> &'a str)
    }
}
