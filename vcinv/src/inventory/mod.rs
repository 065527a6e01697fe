//! The inventory service boundary.
//!
//! The control plane owns the inventory tree. Everything the library knows
//! about it flows through the [`InventoryService`] trait: connecting, looking
//! up children, reading a datacenter's host folder, and issuing mutations
//! whose tasks are awaited with [`InventoryService::wait_for_task`].
//!
//! [`memory::InMemoryInventory`] is a complete in-process implementation
//! used by the CLI's file-backed mode and by the test suites.

pub mod document;
pub mod memory;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::connection::ConnectionDescriptor;

pub use document::{Credentials, InventoryDocument, NodeDocument};
pub use memory::{InMemoryInventory, RecordedCall};

/// Result type for calls into the inventory service.
pub type FaultResult<T> = std::result::Result<T, InventoryFault>;

/// The kind of an inventory node.
///
/// Only [`NodeKind::Folder`], [`NodeKind::Datacenter`] and
/// [`NodeKind::Cluster`] can be wrapped in a
/// [`Container`](crate::container::Container).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A generic grouping folder.
    Folder,
    /// A datacenter with its own host folder.
    Datacenter,
    /// A cluster compute resource.
    Cluster,
    /// A standalone compute resource owning one host.
    ComputeResource,
    /// A single host.
    HostSystem,
    /// Any other managed object type.
    Other(String),
}

impl NodeKind {
    /// Whether nodes of this kind can be wrapped as a container.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Folder | Self::Datacenter | Self::Cluster)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Datacenter => write!(f, "datacenter"),
            Self::Cluster => write!(f, "cluster"),
            Self::ComputeResource => write!(f, "compute resource"),
            Self::HostSystem => write!(f, "host"),
            Self::Other(other) => write!(f, "{other}"),
        }
    }
}

/// Opaque handle to a remote inventory node.
///
/// The identifier is assigned by the control plane; two handles refer to the
/// same node exactly when their identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    id: String,
    name: String,
    kind: NodeKind,
}

impl NodeRef {
    /// Creates a handle.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }

    /// The control plane identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node kind.
    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)
    }
}

/// Handle to an asynchronous remote mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle(String);

impl TaskHandle {
    /// Wraps a task identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The task identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Specification of a host to add to the inventory.
///
/// `ssl_thumbprint` is filled in by
/// [`Container::add_host`](crate::container::Container::add_host) when the
/// control plane reports the host certificate as unverified.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConnectSpec {
    /// DNS name or IP address of the host.
    pub host_name: String,
    /// Administrative user on the host.
    pub user_name: Option<String>,
    /// Password of the administrative user.
    pub password: Option<String>,
    /// Accepted certificate thumbprint.
    pub ssl_thumbprint: Option<String>,
    /// Take over the host even if another control plane manages it.
    pub force: bool,
}

impl HostConnectSpec {
    /// Creates a spec for `host_name` with `force` enabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use vcinv::inventory::HostConnectSpec;
    ///
    /// let spec = HostConnectSpec::new("10.0.0.5").with_credentials("root", "secret");
    /// assert!(spec.force);
    /// assert!(spec.ssl_thumbprint.is_none());
    /// ```
    #[must_use]
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            user_name: None,
            password: None,
            ssl_thumbprint: None,
            force: true,
        }
    }

    /// Sets the host credentials.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user_name = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Pre-accepts a certificate thumbprint.
    #[must_use]
    pub fn with_thumbprint(mut self, thumbprint: impl Into<String>) -> Self {
        self.ssl_thumbprint = Some(thumbprint.into());
        self
    }
}

impl fmt::Debug for HostConnectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostConnectSpec")
            .field("host_name", &self.host_name)
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("ssl_thumbprint", &self.ssl_thumbprint)
            .field("force", &self.force)
            .finish()
    }
}

/// A fault reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryFault {
    /// Authentication or transport failure.
    #[error("connection refused: {0}")]
    Connection(String),

    /// The host certificate is not verified; carries its thumbprint.
    #[error("host certificate not verified (thumbprint {thumbprint})")]
    SslVerify {
        /// Thumbprint of the certificate presented by the host.
        thumbprint: String,
    },

    /// An asynchronous task completed with an error.
    #[error("task {task} failed: {message}")]
    TaskFailed {
        /// The failed task.
        task: String,
        /// The reported error.
        message: String,
    },

    /// A call argument was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A sibling with the same name exists.
    #[error("the name '{0}' already exists")]
    DuplicateName(String),

    /// The operation is not supported on the target object.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// The referenced managed object does not exist.
    #[error("managed object {0} has already been deleted or has not been completely created")]
    ManagedObjectNotFound(String),

    /// Any other fault.
    #[error("{0}")]
    Other(String),
}

/// Boundary to the control plane's inventory.
///
/// Every method is synchronous from the caller's point of view. Mutations
/// return a [`TaskHandle`] that callers pass to
/// [`InventoryService::wait_for_task`] before treating the mutation as done.
#[cfg_attr(test, mockall::automock)]
pub trait InventoryService {
    /// Authenticates and returns the root folder of the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryFault::Connection`] on authentication or transport
    /// failure.
    fn connect(&self, descriptor: &ConnectionDescriptor) -> FaultResult<NodeRef>;

    /// Returns the host folder of a datacenter.
    ///
    /// # Errors
    ///
    /// Fails when `datacenter` is not a datacenter.
    fn host_folder(&self, datacenter: &NodeRef) -> FaultResult<NodeRef>;

    /// Looks up a direct child of a folder by name.
    ///
    /// # Errors
    ///
    /// Fails when `parent` is not a folder.
    fn find_child(&self, parent: &NodeRef, name: &str) -> FaultResult<Option<NodeRef>>;

    /// Lists the direct children of a folder.
    ///
    /// # Errors
    ///
    /// Fails when `parent` is not a folder.
    fn children(&self, parent: &NodeRef) -> FaultResult<Vec<NodeRef>>;

    /// Lists the hosts of a cluster or compute resource.
    ///
    /// # Errors
    ///
    /// Fails when `resource` owns no hosts.
    fn hosts(&self, resource: &NodeRef) -> FaultResult<Vec<NodeRef>>;

    /// Finds a host anywhere below `root` by name.
    ///
    /// # Errors
    ///
    /// Fails on transport errors.
    fn find_host(&self, root: &NodeRef, name: &str) -> FaultResult<Option<NodeRef>>;

    /// Creates a folder.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names or when `parent` cannot hold folders.
    fn create_folder(&self, parent: &NodeRef, name: &str) -> FaultResult<NodeRef>;

    /// Creates a datacenter.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names or when `parent` is inside a datacenter.
    fn create_datacenter(&self, parent: &NodeRef, name: &str) -> FaultResult<NodeRef>;

    /// Creates a cluster.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names or when `parent` has no datacenter ancestor.
    fn create_cluster(&self, parent: &NodeRef, name: &str) -> FaultResult<NodeRef>;

    /// Starts destroying a node and its subtree.
    ///
    /// # Errors
    ///
    /// Fails when the task cannot be started.
    fn destroy(&self, node: &NodeRef) -> FaultResult<TaskHandle>;

    /// Starts adding a standalone host to a folder.
    ///
    /// # Errors
    ///
    /// Fails when the task cannot be started.
    fn add_standalone_host(
        &self,
        folder: &NodeRef,
        spec: &HostConnectSpec,
        add_connected: bool,
    ) -> FaultResult<TaskHandle>;

    /// Starts adding a host to a cluster.
    ///
    /// # Errors
    ///
    /// Fails when the task cannot be started.
    fn add_cluster_host(
        &self,
        cluster: &NodeRef,
        spec: &HostConnectSpec,
        as_connected: bool,
    ) -> FaultResult<TaskHandle>;

    /// Starts moving entities into a folder.
    ///
    /// # Errors
    ///
    /// Fails when the task cannot be started.
    fn move_into_folder(&self, folder: &NodeRef, list: &[NodeRef]) -> FaultResult<TaskHandle>;

    /// Starts moving hosts into a cluster.
    ///
    /// # Errors
    ///
    /// Fails when the task cannot be started.
    fn move_into_cluster(&self, cluster: &NodeRef, hosts: &[NodeRef]) -> FaultResult<TaskHandle>;

    /// Blocks until a task completes.
    ///
    /// # Errors
    ///
    /// Returns the fault the task completed with.
    fn wait_for_task(&self, task: &TaskHandle) -> FaultResult<()>;
}
