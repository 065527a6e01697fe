//! Inventory paths.
//!
//! An inventory path names a location in the control plane's tree as a
//! slash-delimited list of display names, always written with a leading
//! and a trailing separator:
//!
//! ```text
//! /DC1/Production/ClusterA/
//! ```
//!
//! The first segment names a child of the root folder. A datacenter is
//! entered through its host folder, which never appears in a path, so
//! `/DC1/ClusterA/` names the cluster `ClusterA` in the host folder of
//! `DC1`. Clusters are terminal: no path continues below one.
//!
//! # Examples
//!
//! ```
//! use vcinv::path::{parse, PathSegments};
//!
//! let path = parse("/DC1/Production/").unwrap();
//! assert_eq!(path, PathSegments::from_names(["DC1", "Production"]).unwrap());
//! assert_eq!(path.to_string(), "/DC1/Production/");
//! ```

pub mod parser;
pub mod resolver;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use parser::parse;
pub use resolver::PathResolver;
pub use types::{PathSegments, SEPARATOR};
