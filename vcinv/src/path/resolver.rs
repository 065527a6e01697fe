//! Path resolution against a live inventory.
//!
//! This module provides the `PathResolver` type, which walks an inventory
//! tree segment by segment and wraps the node it ends on in a
//! [`Container`].

use crate::connection::ConnectionDescriptor;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::inventory::{InventoryService, NodeKind, NodeRef};

use super::parser;
use super::types::PathSegments;

/// Resolves inventory paths to containers.
///
/// At every step the resolver dispatches on the kind of the current node:
/// - **Folder**: the next segment names a direct child
/// - **Datacenter**: the next segment names a child of its host folder
/// - **Cluster** and anything else: nothing can be below it
///
/// There is no backtracking. Names are assumed unique among siblings, so
/// the first match is the only match.
///
/// # Examples
///
/// ```
/// use vcinv::inventory::{InMemoryInventory, InventoryService};
/// use vcinv::path::PathResolver;
/// use vcinv::ConnectionDescriptor;
///
/// let inventory = InMemoryInventory::new();
/// let root = inventory.root();
/// let dc = inventory.create_datacenter(&root, "DC1").unwrap();
/// let hosts = inventory.host_folder(&dc).unwrap();
/// inventory.create_folder(&hosts, "Folder1").unwrap();
///
/// let resolver = PathResolver::new(&inventory);
/// let descriptor = ConnectionDescriptor::parse("root:pw@vc01").unwrap();
/// let container = resolver.resolve(&descriptor, "/DC1/Folder1/", "no such folder").unwrap();
/// assert!(container.is_folder());
/// assert_eq!(container.name(), "Folder1");
/// ```
#[derive(Clone, Copy)]
pub struct PathResolver<'a> {
    service: &'a dyn InventoryService,
}

impl<'a> PathResolver<'a> {
    /// Creates a resolver over `service`.
    #[must_use]
    pub fn new(service: &'a dyn InventoryService) -> Self {
        Self { service }
    }

    /// The inventory this resolver walks.
    #[must_use]
    pub fn service(&self) -> &'a dyn InventoryService {
        self.service
    }

    /// Connects and returns the root folder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connection`] if the control plane refuses the
    /// connection.
    pub fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<NodeRef> {
        log::debug!("connecting to {descriptor}");
        self.service
            .connect(descriptor)
            .map_err(|source| Error::Connection {
                host: descriptor.host().to_string(),
                source,
            })
    }

    /// Walks `path` from `root` and wraps the final node.
    ///
    /// `context` is carried verbatim by every [`Error::PathNotFound`] this
    /// returns.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if a segment has no matching child,
    /// if traversal reaches a cluster or a non-container node before the
    /// last segment, or if the final node is not a container. Faults from
    /// the inventory are returned as [`Error::Remote`].
    pub fn find_immediate_parent(
        &self,
        root: &NodeRef,
        path: &PathSegments,
        context: &str,
    ) -> Result<Container> {
        let mut current = root.clone();

        for segment in path {
            let next = match current.kind() {
                NodeKind::Folder => self.service.find_child(&current, segment)?,
                NodeKind::Datacenter => {
                    let host_folder = self.service.host_folder(&current)?;
                    self.service.find_child(&host_folder, segment)?
                }
                // Clusters and leaves have no path-addressable children.
                _ => None,
            };

            current = next.ok_or_else(|| {
                log::debug!("'{segment}' not found below {current}");
                Error::path_not_found(context, Some(segment))
            })?;
            log::debug!("'{segment}' resolved to {current}");
        }

        Container::new(self.service, current).map_err(|e| match e {
            Error::NotAContainer { .. } => Error::path_not_found(context, None),
            other => other,
        })
    }

    /// Connects, parses `raw` and resolves it in one call.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PathResolver::connect`], of
    /// [`parse`](super::parse) and of
    /// [`PathResolver::find_immediate_parent`].
    pub fn resolve(
        &self,
        descriptor: &ConnectionDescriptor,
        raw: &str,
        context: &str,
    ) -> Result<Container> {
        let path = parser::parse(raw)?;
        let root = self.connect(descriptor)?;
        self.find_immediate_parent(&root, &path, context)
    }

    /// Resolves the parent of `raw` and returns it with the final segment.
    ///
    /// This is how a path naming a container that may not exist yet is
    /// handled: `/DC1/Prod/` resolves `/DC1/` and yields `Prod`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] for the root path, which has no final
    /// segment, and otherwise the errors of [`PathResolver::resolve`].
    pub fn resolve_parent(
        &self,
        descriptor: &ConnectionDescriptor,
        raw: &str,
        context: &str,
    ) -> Result<(Container, String)> {
        let path = parser::parse(raw)?;
        let Some((parent, leaf)) = path.split_last() else {
            return Err(Error::InvalidPath {
                path: raw.to_string(),
                reason: "the root has no parent".to_string(),
            });
        };
        let root = self.connect(descriptor)?;
        let container = self.find_immediate_parent(&root, &parent, context)?;
        Ok((container, leaf.to_string()))
    }
}

impl std::fmt::Debug for PathResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathResolver").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{HostConnectSpec, InMemoryInventory, InventoryFault, MockInventoryService};

    fn descriptor() -> ConnectionDescriptor {
        ConnectionDescriptor::new("administrator", "secret", "vc01")
    }

    /// Datacenters / DC1 / host / { Folder1, ClusterA / esx01 }
    fn lab() -> InMemoryInventory {
        let inventory = InMemoryInventory::new();
        let dc = inventory.create_datacenter(&inventory.root(), "DC1").unwrap();
        let hosts = inventory.host_folder(&dc).unwrap();
        inventory.create_folder(&hosts, "Folder1").unwrap();
        let cluster = inventory.create_cluster(&hosts, "ClusterA").unwrap();
        let task = inventory
            .add_cluster_host(&cluster, &HostConnectSpec::new("esx01"), true)
            .unwrap();
        inventory.wait_for_task(&task).unwrap();
        inventory
    }

    #[test]
    fn test_resolve_folder_under_datacenter() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let container = resolver
            .resolve(&descriptor(), "/DC1/Folder1/", "Folder1 missing")
            .unwrap();
        assert!(container.is_folder());
        assert_eq!(container.name(), "Folder1");
    }

    #[test]
    fn test_traversal_through_cluster_fails() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let err = resolver
            .resolve(&descriptor(), "/DC1/ClusterA/Sub/", "cannot resolve")
            .unwrap_err();
        match err {
            Error::PathNotFound { context, segment } => {
                assert_eq!(context, "cannot resolve");
                assert_eq!(segment.as_deref(), Some("Sub"));
            }
            other => panic!("expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_cluster_member_is_not_reachable_by_path() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let err = resolver
            .resolve(&descriptor(), "/DC1/ClusterA/esx01/", "ctx")
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_root_path_resolves_to_root_folder() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let container = resolver.resolve(&descriptor(), "/", "ctx").unwrap();
        assert_eq!(container.node(), &inventory.root());
    }

    #[test]
    fn test_datacenter_and_cluster_resolve_to_their_kinds() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let dc = resolver.resolve(&descriptor(), "/DC1/", "ctx").unwrap();
        assert!(dc.is_datacenter());
        let cluster = resolver.resolve(&descriptor(), "/DC1/ClusterA/", "ctx").unwrap();
        assert!(cluster.is_cluster());
    }

    #[test]
    fn test_non_container_terminal_is_not_found() {
        let inventory = lab();
        let hosts = inventory
            .host_folder(&inventory.find_child(&inventory.root(), "DC1").unwrap().unwrap())
            .unwrap();
        let task = inventory
            .add_standalone_host(&hosts, &HostConnectSpec::new("esx02"), true)
            .unwrap();
        inventory.wait_for_task(&task).unwrap();

        let resolver = PathResolver::new(&inventory);
        let err = resolver
            .resolve(&descriptor(), "/DC1/esx02/", "not a container")
            .unwrap_err();
        match err {
            Error::PathNotFound { segment, .. } => assert_eq!(segment, None),
            other => panic!("expected PathNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let first = resolver.resolve(&descriptor(), "/DC1/Folder1/", "ctx").unwrap();
        let second = resolver.resolve(&descriptor(), "/DC1/Folder1/", "ctx").unwrap();
        assert_eq!(first.node().id(), second.node().id());
    }

    #[test]
    fn test_malformed_path_fails_before_connecting() {
        let mut mock = MockInventoryService::new();
        mock.expect_connect().never();

        let resolver = PathResolver::new(&mock);
        let err = resolver.resolve(&descriptor(), "/DC1", "ctx").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
    }

    #[test]
    fn test_connection_fault_is_wrapped() {
        let mut mock = MockInventoryService::new();
        mock.expect_connect()
            .returning(|_| Err(InventoryFault::Connection("bad login".into())));

        let resolver = PathResolver::new(&mock);
        let err = resolver.resolve(&descriptor(), "/", "ctx").unwrap_err();
        assert!(matches!(err, Error::Connection { ref host, .. } if host == "vc01"));
    }

    #[test]
    fn test_datacenter_step_uses_host_folder() {
        let mut mock = MockInventoryService::new();
        let root = NodeRef::new("group-d1", "Datacenters", NodeKind::Folder);
        let dc = NodeRef::new("datacenter-2", "DC1", NodeKind::Datacenter);
        let host_folder = NodeRef::new("group-h3", "host", NodeKind::Folder);
        let folder = NodeRef::new("group-v4", "Folder1", NodeKind::Folder);

        let dc_clone = dc.clone();
        mock.expect_find_child()
            .withf(|parent, name| parent.id() == "group-d1" && name == "DC1")
            .times(1)
            .returning(move |_, _| Ok(Some(dc_clone.clone())));
        let hf = host_folder.clone();
        mock.expect_host_folder()
            .withf(|node| node.id() == "datacenter-2")
            .times(1)
            .returning(move |_| Ok(hf.clone()));
        let folder_clone = folder.clone();
        mock.expect_find_child()
            .withf(|parent, name| parent.id() == "group-h3" && name == "Folder1")
            .times(1)
            .returning(move |_, _| Ok(Some(folder_clone.clone())));

        let resolver = PathResolver::new(&mock);
        let path = parser::parse("/DC1/Folder1/").unwrap();
        let container = resolver.find_immediate_parent(&root, &path, "ctx").unwrap();
        assert_eq!(container, Container::Folder(folder));
    }

    #[test]
    fn test_resolve_parent_splits_leaf() {
        let inventory = lab();
        let resolver = PathResolver::new(&inventory);
        let (parent, leaf) = resolver
            .resolve_parent(&descriptor(), "/DC1/NewFolder/", "ctx")
            .unwrap();
        assert!(parent.is_datacenter());
        assert_eq!(leaf, "NewFolder");

        assert!(resolver.resolve_parent(&descriptor(), "/", "ctx").is_err());
    }
}
