//! Kind-aware wrapper around a folder, datacenter or cluster.
//!
//! [`Container`] is a closed sum type: every lifecycle operation matches on
//! the three variants, so adding a variant is a compile error everywhere
//! until each operation decides what it means for it. A datacenter never
//! holds hosts or clusters directly; its variant carries the host folder
//! that does, and the datacenter arms of every operation target it.
//!
//! Containers are transient views. They are built per resolution and hold
//! nothing but node handles.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inventory::{HostConnectSpec, InventoryService, NodeKind, NodeRef, TaskHandle};
use crate::retry::ThumbprintRetry;

/// The three node kinds a [`Container`] can wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// A folder.
    Folder,
    /// A datacenter.
    Datacenter,
    /// A cluster.
    Cluster,
}

impl ContainerKind {
    /// The corresponding inventory node kind.
    #[must_use]
    pub fn node_kind(self) -> NodeKind {
        match self {
            Self::Folder => NodeKind::Folder,
            Self::Datacenter => NodeKind::Datacenter,
            Self::Cluster => NodeKind::Cluster,
        }
    }
}

impl From<ContainerKind> for NodeKind {
    fn from(kind: ContainerKind) -> Self {
        kind.node_kind()
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node_kind().fmt(f)
    }
}

/// A folder, datacenter or cluster, with a uniform lifecycle surface.
///
/// # Examples
///
/// ```
/// use vcinv::container::{Container, ContainerKind};
/// use vcinv::inventory::{InMemoryInventory, InventoryService};
/// use vcinv::ConnectionDescriptor;
///
/// let inventory = InMemoryInventory::new();
/// let root = inventory.connect(&ConnectionDescriptor::new("u", "p", "vc")).unwrap();
///
/// let container = Container::new(&inventory, root).unwrap();
/// assert_eq!(container.kind(), ContainerKind::Folder);
///
/// let dc = container.create_datacenter(&inventory, "DC1").unwrap();
/// let dc = Container::new(&inventory, dc).unwrap();
/// assert!(dc.is_datacenter());
/// dc.create_cluster(&inventory, "ClusterA").unwrap();
/// assert_eq!(dc.children(&inventory).unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Container {
    /// A folder.
    Folder(NodeRef),
    /// A datacenter and its host folder.
    Datacenter {
        /// The datacenter itself.
        datacenter: NodeRef,
        /// The root of the datacenter's host hierarchy.
        host_folder: NodeRef,
    },
    /// A cluster.
    Cluster(NodeRef),
}

impl Container {
    /// Wraps a node.
    ///
    /// For a datacenter the host folder is fetched up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotAContainer`] if the node is not a folder, a
    /// datacenter or a cluster, and [`Error::Remote`] if the host folder
    /// cannot be fetched.
    pub fn new(service: &dyn InventoryService, node: NodeRef) -> Result<Self> {
        match node.kind() {
            NodeKind::Folder => Ok(Self::Folder(node)),
            NodeKind::Datacenter => {
                let host_folder = service.host_folder(&node)?;
                Ok(Self::Datacenter {
                    datacenter: node,
                    host_folder,
                })
            }
            NodeKind::Cluster => Ok(Self::Cluster(node)),
            other => Err(Error::NotAContainer {
                name: node.name().to_string(),
                kind: other.clone(),
            }),
        }
    }

    /// The wrapped node (the datacenter itself for a datacenter).
    #[must_use]
    pub fn node(&self) -> &NodeRef {
        match self {
            Self::Folder(folder) => folder,
            Self::Datacenter { datacenter, .. } => datacenter,
            Self::Cluster(cluster) => cluster,
        }
    }

    /// Name of the wrapped node.
    #[must_use]
    pub fn name(&self) -> &str {
        self.node().name()
    }

    /// The container kind.
    #[must_use]
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Folder(_) => ContainerKind::Folder,
            Self::Datacenter { .. } => ContainerKind::Datacenter,
            Self::Cluster(_) => ContainerKind::Cluster,
        }
    }

    /// Whether this wraps a folder.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// Whether this wraps a datacenter.
    #[must_use]
    pub fn is_datacenter(&self) -> bool {
        matches!(self, Self::Datacenter { .. })
    }

    /// Whether this wraps a cluster.
    #[must_use]
    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }

    /// Lists the children: folder entries, the host folder's entries for a
    /// datacenter, or the member hosts of a cluster.
    ///
    /// # Errors
    ///
    /// Propagates inventory faults.
    pub fn children(&self, service: &dyn InventoryService) -> Result<Vec<NodeRef>> {
        let children = match self {
            Self::Folder(folder) => service.children(folder)?,
            Self::Datacenter { host_folder, .. } => service.children(host_folder)?,
            Self::Cluster(cluster) => service.hosts(cluster)?,
        };
        Ok(children)
    }

    /// Finds a child by name, or `None`.
    ///
    /// Cluster members are scanned linearly and matched on exact name.
    ///
    /// # Errors
    ///
    /// Propagates inventory faults.
    pub fn find_child_by_name(
        &self,
        service: &dyn InventoryService,
        name: &str,
    ) -> Result<Option<NodeRef>> {
        let child = match self {
            Self::Folder(folder) => service.find_child(folder, name)?,
            Self::Datacenter { host_folder, .. } => service.find_child(host_folder, name)?,
            Self::Cluster(cluster) => service
                .hosts(cluster)?
                .into_iter()
                .find(|host| host.name() == name),
        };
        Ok(child)
    }

    /// Creates a child folder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for a cluster and propagates
    /// faults raised by the control plane.
    pub fn create_folder(&self, service: &dyn InventoryService, name: &str) -> Result<NodeRef> {
        log::debug!("creating folder '{name}' under {self}");
        let folder = match self {
            Self::Folder(folder) => service.create_folder(folder, name)?,
            Self::Datacenter { host_folder, .. } => service.create_folder(host_folder, name)?,
            Self::Cluster(_) => return Err(self.unsupported("create a folder")),
        };
        Ok(folder)
    }

    /// Creates a child datacenter.
    ///
    /// Under a datacenter the request is still sent (to the host folder) so
    /// that the control plane reports why it is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for a cluster and propagates
    /// faults raised by the control plane.
    pub fn create_datacenter(
        &self,
        service: &dyn InventoryService,
        name: &str,
    ) -> Result<NodeRef> {
        log::debug!("creating datacenter '{name}' under {self}");
        let datacenter = match self {
            Self::Folder(folder) => service.create_datacenter(folder, name)?,
            Self::Datacenter { host_folder, .. } => {
                service.create_datacenter(host_folder, name)?
            }
            Self::Cluster(_) => return Err(self.unsupported("create a datacenter")),
        };
        Ok(datacenter)
    }

    /// Creates a child cluster.
    ///
    /// Under a folder the control plane rejects the request unless the
    /// folder lies inside a datacenter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperation`] for a cluster and propagates
    /// faults raised by the control plane.
    pub fn create_cluster(&self, service: &dyn InventoryService, name: &str) -> Result<NodeRef> {
        log::debug!("creating cluster '{name}' under {self}");
        let cluster = match self {
            Self::Folder(folder) => service.create_cluster(folder, name)?,
            Self::Datacenter { host_folder, .. } => service.create_cluster(host_folder, name)?,
            Self::Cluster(_) => return Err(self.unsupported("create a cluster")),
        };
        Ok(cluster)
    }

    /// Destroys the named child after checking its kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathNotFound`] if there is no such child,
    /// [`Error::KindMismatch`] if it is not of kind `expected` (nothing is
    /// destroyed then), and [`Error::Remote`] if the destroy task fails.
    pub fn destroy_child(
        &self,
        service: &dyn InventoryService,
        name: &str,
        expected: &NodeKind,
    ) -> Result<()> {
        let child = self.find_child_by_name(service, name)?.ok_or_else(|| {
            Error::path_not_found(&format!("no child named '{name}' under {self}"), Some(name))
        })?;

        if child.kind() != expected {
            return Err(Error::KindMismatch {
                name: name.to_string(),
                expected: expected.clone(),
                actual: child.kind().clone(),
            });
        }

        log::debug!("destroying {child} under {self}");
        let task = service.destroy(&child)?;
        await_task(service, &task)
    }

    /// Adds a host.
    ///
    /// Folders and datacenters receive a standalone host; clusters receive
    /// a member host. Whenever `policy` recognizes the failure as a
    /// certificate fault, the reported thumbprint is stored in
    /// `spec.ssl_thumbprint` and the mutation is issued again. On return
    /// `spec` holds the thumbprint that was accepted, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CertificateNotTrusted`] when a bounded policy runs
    /// out of attempts and [`Error::Remote`] for any other fault, after a
    /// single attempt.
    pub fn add_host(
        &self,
        service: &dyn InventoryService,
        spec: &mut HostConnectSpec,
        policy: &ThumbprintRetry,
    ) -> Result<()> {
        let mut attempts: u32 = 0;
        loop {
            attempts = ThumbprintRetry::next_attempt(attempts);
            let outcome = self
                .issue_add_host(service, spec)
                .and_then(|task| service.wait_for_task(&task));

            let fault = match outcome {
                Ok(()) => {
                    log::info!("added host {} to {self}", spec.host_name);
                    return Ok(());
                }
                Err(fault) => fault,
            };

            let Some(thumbprint) = policy.certificate_thumbprint(&fault) else {
                return Err(fault.into());
            };

            if policy.is_exhausted(attempts) {
                return Err(Error::CertificateNotTrusted {
                    host: spec.host_name.clone(),
                    thumbprint,
                    attempts,
                });
            }

            log::info!(
                "accepting certificate {thumbprint} of host {} (attempt {attempts})",
                spec.host_name
            );
            spec.ssl_thumbprint = Some(thumbprint);
        }
    }

    fn issue_add_host(
        &self,
        service: &dyn InventoryService,
        spec: &HostConnectSpec,
    ) -> crate::inventory::FaultResult<TaskHandle> {
        match self {
            Self::Folder(folder) => service.add_standalone_host(folder, spec, true),
            Self::Datacenter { host_folder, .. } => {
                service.add_standalone_host(host_folder, spec, true)
            }
            Self::Cluster(cluster) => service.add_cluster_host(cluster, spec, true),
        }
    }

    /// Moves a host into this container.
    ///
    /// Folders and datacenters take `host` as is. A cluster needs host
    /// systems: a compute resource is replaced by its member hosts and a
    /// single host is moved alone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownHostType`] when moving anything else into a
    /// cluster and [`Error::Remote`] if the move task fails.
    pub fn move_host_into(&self, service: &dyn InventoryService, host: &NodeRef) -> Result<()> {
        log::debug!("moving {host} into {self}");
        let task = match self {
            Self::Folder(folder) => service.move_into_folder(folder, std::slice::from_ref(host))?,
            Self::Datacenter { host_folder, .. } => {
                service.move_into_folder(host_folder, std::slice::from_ref(host))?
            }
            Self::Cluster(cluster) => {
                let hosts = match host.kind() {
                    NodeKind::ComputeResource => service.hosts(host)?,
                    NodeKind::HostSystem => vec![host.clone()],
                    other => {
                        return Err(Error::UnknownHostType {
                            name: host.name().to_string(),
                            kind: other.clone(),
                        })
                    }
                };
                service.move_into_cluster(cluster, &hosts)?
            }
        };
        await_task(service, &task)
    }

    fn unsupported(&self, operation: &str) -> Error {
        Error::UnsupportedOperation {
            operation: operation.to_string(),
            container: self.to_string(),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node().fmt(f)
    }
}

fn await_task(service: &dyn InventoryService, task: &TaskHandle) -> Result<()> {
    service.wait_for_task(task)?;
    Ok(())
}
