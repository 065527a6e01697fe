//! Serialized form of an in-memory inventory.
//!
//! A datacenter's `children` are the entries of its host folder; the host
//! folder itself is implied and never written out.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeKind;

/// An inventory tree together with the credentials it accepts.
///
/// # Examples
///
/// ```
/// use vcinv::inventory::{InventoryDocument, NodeKind};
///
/// let yaml = r#"
/// root:
///   name: Datacenters
///   kind: folder
///   children:
///     - name: DC1
///       kind: datacenter
///       children:
///         - name: ClusterA
///           kind: cluster
/// "#;
/// let doc: InventoryDocument = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(doc.root.children[0].kind, NodeKind::Datacenter);
/// assert!(doc.credentials.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InventoryDocument {
    /// Credentials `connect` checks, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,

    /// Certificate thumbprints presented by hosts, keyed by host name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub certificates: BTreeMap<String, String>,

    /// Whether the control plane presents a certificate clients can verify.
    ///
    /// When `false`, only insecure connections are accepted.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub trusted_certificate: bool,

    /// The root folder.
    pub root: NodeDocument,
}

impl Default for InventoryDocument {
    fn default() -> Self {
        Self {
            credentials: None,
            certificates: BTreeMap::new(),
            trusted_certificate: false,
            root: NodeDocument::new(super::memory::ROOT_FOLDER_NAME, NodeKind::Folder),
        }
    }
}

/// User and password accepted by the control plane.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials {
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// One node and its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDocument {
    /// Display name.
    pub name: String,

    /// Node kind.
    pub kind: NodeKind,

    /// Child nodes in listing order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeDocument>,

    /// Accepted certificate thumbprint of a host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
}

impl NodeDocument {
    /// Creates a leaf node.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            thumbprint: None,
        }
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: NodeDocument) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_empty_root() {
        let doc = InventoryDocument::default();
        assert_eq!(doc.root.name, "Datacenters");
        assert_eq!(doc.root.kind, NodeKind::Folder);
        assert!(doc.root.children.is_empty());
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let doc = InventoryDocument::default();
        let yaml = serde_yaml::to_string(&doc).unwrap();
        assert!(!yaml.contains("credentials"));
        assert!(!yaml.contains("certificates"));
        assert!(!yaml.contains("children"));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let yaml = "root:\n  name: Datacenters\n  kind: folder\n  color: blue\n";
        assert!(serde_yaml::from_str::<InventoryDocument>(yaml).is_err());
    }

    #[test]
    fn test_credentials_debug_masks_password() {
        let creds = Credentials {
            user: "administrator".into(),
            password: "s3cret".into(),
        };
        assert!(!format!("{creds:?}").contains("s3cret"));
    }
}
