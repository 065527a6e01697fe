//! An in-process inventory.
//!
//! [`InMemoryInventory`] keeps the whole tree in an arena and enforces the
//! structural rules a real control plane applies: datacenters never nest,
//! clusters and hosts live inside a datacenter, and sibling names are
//! unique. Mutations complete immediately; their outcome is stored under a
//! task identifier until [`InventoryService::wait_for_task`] reports it.
//! Secure connections are refused unless the control plane certificate is
//! marked trusted.
//!
//! The inventory uses interior mutability and is not `Sync`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::connection::ConnectionDescriptor;
use crate::error::{Error, Result};

use super::document::{Credentials, InventoryDocument, NodeDocument};
use super::{
    FaultResult, HostConnectSpec, InventoryFault, InventoryService, NodeKind, NodeRef, TaskHandle,
};

/// Name of the root folder of a fresh inventory.
pub(crate) const ROOT_FOLDER_NAME: &str = "Datacenters";

/// Name of the host folder every datacenter owns.
pub(crate) const HOST_FOLDER_NAME: &str = "host";

/// A call made against an [`InMemoryInventory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    /// `connect`.
    Connect {
        /// The host from the descriptor.
        host: String,
    },
    /// A read-only lookup.
    Lookup {
        /// The trait method.
        method: &'static str,
        /// Identifier of the node looked at.
        target: String,
    },
    /// `create_folder`, `create_datacenter` or `create_cluster`.
    Create {
        /// Identifier of the parent.
        parent: String,
        /// Requested name.
        name: String,
        /// Requested kind.
        kind: NodeKind,
    },
    /// `destroy`.
    Destroy {
        /// Identifier of the destroyed node.
        target: String,
    },
    /// `add_standalone_host` or `add_cluster_host`.
    AddHost {
        /// Identifier of the folder or cluster.
        target: String,
        /// Host name from the spec.
        host_name: String,
        /// Thumbprint carried by the spec.
        ssl_thumbprint: Option<String>,
    },
    /// `move_into_folder` or `move_into_cluster`.
    Move {
        /// Identifier of the destination.
        target: String,
        /// Identifiers of the moved entries.
        entries: Vec<String>,
    },
    /// `wait_for_task`.
    WaitForTask {
        /// The awaited task.
        task: String,
    },
}

impl RecordedCall {
    /// Whether the call changes the inventory.
    #[must_use]
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::Create { .. } | Self::Destroy { .. } | Self::AddHost { .. } | Self::Move { .. }
        )
    }
}

#[derive(Debug, Clone)]
struct Node {
    id: String,
    name: String,
    kind: NodeKind,
    parent: Option<usize>,
    children: Vec<usize>,
    thumbprint: Option<String>,
    attached: bool,
}

#[derive(Debug)]
struct State {
    nodes: Vec<Node>,
    ids: HashMap<String, usize>,
    tasks: HashMap<String, FaultResult<()>>,
    next_task: u64,
    injected_failure: Option<String>,
    credentials: Option<Credentials>,
    certificates: BTreeMap<String, String>,
    trusted_certificate: bool,
    calls: Vec<RecordedCall>,
}

const ROOT: usize = 0;

/// How one entry of a folder move lands in the folder.
#[derive(Debug, Clone, Copy)]
enum FolderMove {
    /// A standalone host's compute resource, moved as is.
    Resource(usize),
    /// A cluster member, wrapped in a new compute resource.
    ClusteredHost(usize),
}

impl FolderMove {
    fn index(self) -> usize {
        match self {
            Self::Resource(index) | Self::ClusteredHost(index) => index,
        }
    }
}

fn id_prefix(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "group-",
        NodeKind::Datacenter => "datacenter-",
        NodeKind::Cluster => "domain-c",
        NodeKind::ComputeResource => "domain-s",
        NodeKind::HostSystem => "host-",
        NodeKind::Other(_) => "obj-",
    }
}

impl State {
    fn with_root(name: &str) -> Self {
        let mut state = Self {
            nodes: Vec::new(),
            ids: HashMap::new(),
            tasks: HashMap::new(),
            next_task: 0,
            injected_failure: None,
            credentials: None,
            certificates: BTreeMap::new(),
            trusted_certificate: false,
            calls: Vec::new(),
        };
        state.insert(None, name, NodeKind::Folder);
        state
    }

    fn insert(&mut self, parent: Option<usize>, name: &str, kind: NodeKind) -> usize {
        let index = self.nodes.len();
        let id = format!("{}{}", id_prefix(&kind), index + 1);
        let is_datacenter = kind == NodeKind::Datacenter;

        self.ids.insert(id.clone(), index);
        self.nodes.push(Node {
            id,
            name: name.to_string(),
            kind,
            parent,
            children: Vec::new(),
            thumbprint: None,
            attached: true,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(index);
        }
        if is_datacenter {
            self.insert(Some(index), HOST_FOLDER_NAME, NodeKind::Folder);
        }
        index
    }

    fn node_ref(&self, index: usize) -> NodeRef {
        let node = &self.nodes[index];
        NodeRef::new(node.id.clone(), node.name.clone(), node.kind.clone())
    }

    fn describe(&self, index: usize) -> String {
        self.node_ref(index).to_string()
    }

    fn lookup(&self, node: &NodeRef) -> FaultResult<usize> {
        self.ids
            .get(node.id())
            .copied()
            .filter(|&index| self.nodes[index].attached)
            .ok_or_else(|| InventoryFault::ManagedObjectNotFound(node.id().to_string()))
    }

    fn expect_kind(&self, index: usize, kinds: &[NodeKind]) -> FaultResult<()> {
        if kinds.contains(&self.nodes[index].kind) {
            return Ok(());
        }
        let expected: Vec<String> = kinds.iter().map(ToString::to_string).collect();
        Err(InventoryFault::InvalidArgument(format!(
            "{} is not a {}",
            self.describe(index),
            expected.join(" or ")
        )))
    }

    fn child_named(&self, parent: usize, name: &str) -> Option<usize> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name == name)
    }

    fn host_folder_of(&self, datacenter: usize) -> FaultResult<usize> {
        self.child_named(datacenter, HOST_FOLDER_NAME)
            .ok_or_else(|| InventoryFault::ManagedObjectNotFound(format!("{}/host", self.nodes[datacenter].id)))
    }

    fn in_datacenter(&self, index: usize) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if self.nodes[i].kind == NodeKind::Datacenter {
                return true;
            }
            current = self.nodes[i].parent;
        }
        false
    }

    fn ensure_unique(&self, parent: usize, name: &str) -> FaultResult<()> {
        if self.child_named(parent, name).is_some() {
            return Err(InventoryFault::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    fn detach(&mut self, index: usize) {
        if let Some(parent) = self.nodes[index].parent {
            self.nodes[parent].children.retain(|&child| child != index);
        }
        let mut pending = vec![index];
        while let Some(i) = pending.pop() {
            self.nodes[i].attached = false;
            pending.extend(self.nodes[i].children.iter().copied());
        }
    }

    fn reparent(&mut self, index: usize, new_parent: usize) {
        if let Some(old) = self.nodes[index].parent {
            self.nodes[old].children.retain(|&child| child != index);
        }
        self.nodes[index].parent = Some(new_parent);
        self.nodes[new_parent].children.push(index);
    }

    fn reparent_into(&mut self, index: usize, destination: usize) {
        if self.nodes[index].parent != Some(destination) {
            self.reparent(index, destination);
        }
    }

    /// Checks that every entry can land in `destination` under its own
    /// name, before any of them is moved.
    fn check_batch(
        &self,
        destination: usize,
        entries: impl IntoIterator<Item = usize>,
    ) -> FaultResult<()> {
        let mut names = HashSet::new();
        for entry in entries {
            let name = &self.nodes[entry].name;
            if !names.insert(name.as_str()) {
                return Err(InventoryFault::DuplicateName(name.clone()));
            }
            if self.nodes[entry].parent != Some(destination) {
                self.ensure_unique(destination, name)?;
            }
        }
        Ok(())
    }

    fn folder_move(&self, entry: usize) -> FaultResult<FolderMove> {
        match self.nodes[entry].kind {
            NodeKind::ComputeResource => Ok(FolderMove::Resource(entry)),
            NodeKind::HostSystem => match self.nodes[entry].parent {
                Some(p) if self.nodes[p].kind == NodeKind::ComputeResource => {
                    Ok(FolderMove::Resource(p))
                }
                _ => Ok(FolderMove::ClusteredHost(entry)),
            },
            _ => Err(InventoryFault::InvalidArgument(format!(
                "{} cannot be moved into a folder as a host",
                self.describe(entry)
            ))),
        }
    }

    fn hosts_below(&self, root: usize) -> impl Iterator<Item = usize> + '_ {
        let mut pending = vec![root];
        std::iter::from_fn(move || {
            while let Some(i) = pending.pop() {
                pending.extend(self.nodes[i].children.iter().rev().copied());
                if self.nodes[i].kind == NodeKind::HostSystem {
                    return Some(i);
                }
            }
            None
        })
    }

    fn check_host_addable(&self, destination: usize, spec: &HostConnectSpec) -> FaultResult<()> {
        if !self.in_datacenter(destination) {
            return Err(InventoryFault::NotSupported(format!(
                "hosts cannot be added outside a datacenter ({})",
                self.describe(destination)
            )));
        }
        if let Some(expected) = self.certificates.get(&spec.host_name) {
            if spec.ssl_thumbprint.as_deref() != Some(expected.as_str()) {
                return Err(InventoryFault::SslVerify {
                    thumbprint: expected.clone(),
                });
            }
        }
        if self
            .hosts_below(ROOT)
            .any(|host| self.nodes[host].name == spec.host_name)
        {
            return Err(InventoryFault::DuplicateName(spec.host_name.clone()));
        }
        self.ensure_unique(destination, &spec.host_name)
    }

    fn insert_host(&mut self, parent: usize, spec: &HostConnectSpec) -> usize {
        let thumbprint = self.certificates.get(&spec.host_name).cloned();
        let host = self.insert(Some(parent), &spec.host_name, NodeKind::HostSystem);
        self.nodes[host].thumbprint = thumbprint;
        host
    }

    fn run_task<F>(&mut self, apply: F) -> TaskHandle
    where
        F: FnOnce(&mut Self) -> FaultResult<()>,
    {
        self.next_task += 1;
        let id = format!("task-{}", self.next_task);
        let outcome = match self.injected_failure.take() {
            Some(message) => Err(InventoryFault::TaskFailed {
                task: id.clone(),
                message,
            }),
            None => apply(self),
        };
        if let Err(fault) = &outcome {
            log::debug!("{id} failed: {fault}");
        }
        self.tasks.insert(id.clone(), outcome);
        TaskHandle::new(id)
    }

    fn load_children(&mut self, parent: usize, docs: &[NodeDocument]) -> Result<()> {
        for doc in docs {
            self.load_node(parent, doc)?;
        }
        Ok(())
    }

    fn load_node(&mut self, parent: usize, doc: &NodeDocument) -> Result<()> {
        let invalid = |message: String| Error::Validation {
            field: "inventory".to_string(),
            message,
        };

        let parent_kind = self.nodes[parent].kind.clone();
        let allowed = match (&parent_kind, &doc.kind) {
            (NodeKind::Folder, NodeKind::Folder | NodeKind::Other(_)) => true,
            (NodeKind::Folder, NodeKind::Datacenter) => !self.in_datacenter(parent),
            (
                NodeKind::Folder,
                NodeKind::Cluster | NodeKind::ComputeResource | NodeKind::HostSystem,
            ) => self.in_datacenter(parent),
            (NodeKind::Cluster, NodeKind::HostSystem) => true,
            (NodeKind::ComputeResource, NodeKind::HostSystem) => {
                self.nodes[parent].children.is_empty()
            }
            _ => false,
        };
        if !allowed {
            return Err(invalid(format!(
                "a {} named '{}' cannot be placed under {}",
                doc.kind,
                doc.name,
                self.describe(parent)
            )));
        }
        if doc.name.is_empty() {
            return Err(invalid(format!(
                "a {} under {} has an empty name",
                doc.kind,
                self.describe(parent)
            )));
        }
        if self.ensure_unique(parent, &doc.name).is_err() {
            return Err(invalid(format!(
                "'{}' appears twice under {}",
                doc.name,
                self.describe(parent)
            )));
        }

        // A host listed directly in a folder is standalone.
        let parent = if parent_kind == NodeKind::Folder && doc.kind == NodeKind::HostSystem {
            self.insert(Some(parent), &doc.name, NodeKind::ComputeResource)
        } else {
            parent
        };

        let index = self.insert(Some(parent), &doc.name, doc.kind.clone());
        self.nodes[index].thumbprint = doc.thumbprint.clone();

        if doc.kind == NodeKind::HostSystem && !doc.children.is_empty() {
            return Err(invalid(format!("host '{}' cannot have children", doc.name)));
        }

        let children_parent = if doc.kind == NodeKind::Datacenter {
            self.host_folder_of(index).map_err(|fault| invalid(fault.to_string()))?
        } else {
            index
        };
        self.load_children(children_parent, &doc.children)
    }

    fn dump_node(&self, index: usize) -> NodeDocument {
        let node = &self.nodes[index];
        let listed = match node.kind {
            NodeKind::Datacenter => self
                .host_folder_of(index)
                .map(|folder| self.nodes[folder].children.as_slice())
                .unwrap_or_default(),
            _ => node.children.as_slice(),
        };
        NodeDocument {
            name: node.name.clone(),
            kind: node.kind.clone(),
            children: listed.iter().map(|&child| self.dump_node(child)).collect(),
            thumbprint: node.thumbprint.clone(),
        }
    }
}

/// An [`InventoryService`] holding the whole tree in memory.
///
/// # Examples
///
/// ```
/// use vcinv::inventory::{HostConnectSpec, InMemoryInventory, InventoryService, NodeKind};
/// use vcinv::ConnectionDescriptor;
///
/// let inventory = InMemoryInventory::new();
/// let root = inventory.connect(&ConnectionDescriptor::new("u", "p", "vc")).unwrap();
/// let dc = inventory.create_datacenter(&root, "DC1").unwrap();
/// let hosts = inventory.host_folder(&dc).unwrap();
///
/// let task = inventory
///     .add_standalone_host(&hosts, &HostConnectSpec::new("esx01"), true)
///     .unwrap();
/// inventory.wait_for_task(&task).unwrap();
///
/// let entry = inventory.find_child(&hosts, "esx01").unwrap().unwrap();
/// assert_eq!(entry.kind(), &NodeKind::ComputeResource);
/// ```
#[derive(Debug)]
pub struct InMemoryInventory {
    state: RefCell<State>,
}

impl Default for InMemoryInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryInventory {
    /// Creates an inventory holding only the root folder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RefCell::new(State::with_root(ROOT_FOLDER_NAME)),
        }
    }

    /// Requires `connect` to present these credentials.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.state.get_mut().credentials = Some(Credentials {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    /// Makes the control plane present a verifiable certificate, so that
    /// secure connections are accepted too.
    #[must_use]
    pub fn with_trusted_certificate(mut self) -> Self {
        self.state.get_mut().trusted_certificate = true;
        self
    }

    /// Makes host `host_name` present a certificate with `thumbprint`.
    ///
    /// Adding that host fails with [`InventoryFault::SslVerify`] until the
    /// spec carries the same thumbprint.
    #[must_use]
    pub fn with_host_certificate(
        mut self,
        host_name: impl Into<String>,
        thumbprint: impl Into<String>,
    ) -> Self {
        self.state
            .get_mut()
            .certificates
            .insert(host_name.into(), thumbprint.into());
        self
    }

    /// Makes the next task fail with `message` without applying its mutation.
    pub fn fail_next_task(&self, message: impl Into<String>) {
        self.state.borrow_mut().injected_failure = Some(message.into());
    }

    /// All calls made so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.borrow().calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Handle to the root folder, without authenticating.
    #[must_use]
    pub fn root(&self) -> NodeRef {
        self.state.borrow().node_ref(ROOT)
    }

    /// Builds an inventory from a document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the tree breaks a structural rule.
    pub fn from_document(doc: &InventoryDocument) -> Result<Self> {
        if doc.root.kind != NodeKind::Folder {
            return Err(Error::Validation {
                field: "inventory".to_string(),
                message: format!("the root must be a folder, found a {}", doc.root.kind),
            });
        }

        let mut state = State::with_root(&doc.root.name);
        state.credentials.clone_from(&doc.credentials);
        state.certificates.clone_from(&doc.certificates);
        state.trusted_certificate = doc.trusted_certificate;
        state.load_children(ROOT, &doc.root.children)?;

        Ok(Self {
            state: RefCell::new(state),
        })
    }

    /// Snapshots the inventory as a document.
    #[must_use]
    pub fn to_document(&self) -> InventoryDocument {
        let state = self.state.borrow();
        InventoryDocument {
            credentials: state.credentials.clone(),
            certificates: state.certificates.clone(),
            trusted_certificate: state.trusted_certificate,
            root: state.dump_node(ROOT),
        }
    }

    /// Loads an inventory from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be read,
    /// [`Error::Configuration`] if it is not a valid document and
    /// [`Error::Validation`] if the tree breaks a structural rule.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::File {
            path: path.to_path_buf(),
            reason: format!("failed to read inventory: {e}"),
        })?;
        let doc: InventoryDocument = serde_yaml::from_str(&contents)?;
        log::debug!("loaded inventory from {}", path.display());
        Self::from_document(&doc)
    }

    /// Writes the inventory as a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::File`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(&self.to_document())?;
        fs::write(path, yaml).map_err(|e| Error::File {
            path: path.to_path_buf(),
            reason: format!("failed to write inventory: {e}"),
        })?;
        log::debug!("saved inventory to {}", path.display());
        Ok(())
    }

    fn record(&self, call: RecordedCall) {
        self.state.borrow_mut().calls.push(call);
    }

    fn lookup_call(&self, method: &'static str, target: &NodeRef) {
        self.record(RecordedCall::Lookup {
            method,
            target: target.id().to_string(),
        });
    }

    fn create(&self, parent: &NodeRef, name: &str, kind: NodeKind) -> FaultResult<NodeRef> {
        self.record(RecordedCall::Create {
            parent: parent.id().to_string(),
            name: name.to_string(),
            kind: kind.clone(),
        });

        let mut state = self.state.borrow_mut();
        let index = state.lookup(parent)?;
        if state.nodes[index].kind != NodeKind::Folder {
            return Err(InventoryFault::NotSupported(format!(
                "cannot create a {kind} under {}",
                state.describe(index)
            )));
        }
        match kind {
            NodeKind::Datacenter if state.in_datacenter(index) => {
                return Err(InventoryFault::NotSupported(format!(
                    "a datacenter cannot be created inside another datacenter ({})",
                    state.describe(index)
                )))
            }
            NodeKind::Cluster if !state.in_datacenter(index) => {
                return Err(InventoryFault::NotSupported(format!(
                    "a cluster must be created inside a datacenter ({})",
                    state.describe(index)
                )))
            }
            _ => {}
        }
        if name.is_empty() {
            return Err(InventoryFault::InvalidArgument(
                "name must not be empty".to_string(),
            ));
        }
        state.ensure_unique(index, name)?;

        let created = state.insert(Some(index), name, kind);
        log::debug!("created {}", state.describe(created));
        Ok(state.node_ref(created))
    }
}

impl InventoryService for InMemoryInventory {
    fn connect(&self, descriptor: &ConnectionDescriptor) -> FaultResult<NodeRef> {
        self.record(RecordedCall::Connect {
            host: descriptor.host().to_string(),
        });

        let state = self.state.borrow();
        if !descriptor.insecure() && !state.trusted_certificate {
            return Err(InventoryFault::Connection(format!(
                "the certificate of {} cannot be verified (connect insecurely or trust it)",
                descriptor.host()
            )));
        }
        if let Some(credentials) = &state.credentials {
            if credentials.user != descriptor.user() || credentials.password != descriptor.password()
            {
                return Err(InventoryFault::Connection(format!(
                    "cannot complete login due to an incorrect user name or password for {}",
                    descriptor.user()
                )));
            }
        }
        Ok(state.node_ref(ROOT))
    }

    fn host_folder(&self, datacenter: &NodeRef) -> FaultResult<NodeRef> {
        self.lookup_call("host_folder", datacenter);
        let state = self.state.borrow();
        let index = state.lookup(datacenter)?;
        state.expect_kind(index, &[NodeKind::Datacenter])?;
        Ok(state.node_ref(state.host_folder_of(index)?))
    }

    fn find_child(&self, parent: &NodeRef, name: &str) -> FaultResult<Option<NodeRef>> {
        self.lookup_call("find_child", parent);
        let state = self.state.borrow();
        let index = state.lookup(parent)?;
        state.expect_kind(index, &[NodeKind::Folder])?;
        Ok(state
            .child_named(index, name)
            .map(|child| state.node_ref(child)))
    }

    fn children(&self, parent: &NodeRef) -> FaultResult<Vec<NodeRef>> {
        self.lookup_call("children", parent);
        let state = self.state.borrow();
        let index = state.lookup(parent)?;
        state.expect_kind(index, &[NodeKind::Folder])?;
        Ok(state.nodes[index]
            .children
            .iter()
            .map(|&child| state.node_ref(child))
            .collect())
    }

    fn hosts(&self, resource: &NodeRef) -> FaultResult<Vec<NodeRef>> {
        self.lookup_call("hosts", resource);
        let state = self.state.borrow();
        let index = state.lookup(resource)?;
        state.expect_kind(index, &[NodeKind::Cluster, NodeKind::ComputeResource])?;
        Ok(state.nodes[index]
            .children
            .iter()
            .copied()
            .filter(|&child| state.nodes[child].kind == NodeKind::HostSystem)
            .map(|child| state.node_ref(child))
            .collect())
    }

    fn find_host(&self, root: &NodeRef, name: &str) -> FaultResult<Option<NodeRef>> {
        self.lookup_call("find_host", root);
        let state = self.state.borrow();
        let index = state.lookup(root)?;
        let found = state
            .hosts_below(index)
            .find(|&host| state.nodes[host].name == name)
            .map(|host| match state.nodes[host].parent {
                // A standalone host is represented by its compute resource.
                Some(parent) if state.nodes[parent].kind == NodeKind::ComputeResource => parent,
                _ => host,
            });
        Ok(found.map(|entry| state.node_ref(entry)))
    }

    fn create_folder(&self, parent: &NodeRef, name: &str) -> FaultResult<NodeRef> {
        self.create(parent, name, NodeKind::Folder)
    }

    fn create_datacenter(&self, parent: &NodeRef, name: &str) -> FaultResult<NodeRef> {
        self.create(parent, name, NodeKind::Datacenter)
    }

    fn create_cluster(&self, parent: &NodeRef, name: &str) -> FaultResult<NodeRef> {
        self.create(parent, name, NodeKind::Cluster)
    }

    fn destroy(&self, node: &NodeRef) -> FaultResult<TaskHandle> {
        self.record(RecordedCall::Destroy {
            target: node.id().to_string(),
        });

        let mut state = self.state.borrow_mut();
        let index = state.lookup(node)?;
        Ok(state.run_task(|state| {
            let parent = state.nodes[index].parent;
            let parent_kind = parent.map(|p| state.nodes[p].kind.clone());
            match parent_kind {
                None => Err(InventoryFault::NotSupported(
                    "the root folder cannot be destroyed".to_string(),
                )),
                Some(NodeKind::Datacenter) => Err(InventoryFault::NotSupported(format!(
                    "the host folder of a datacenter cannot be destroyed ({})",
                    state.describe(index)
                ))),
                Some(NodeKind::ComputeResource) => {
                    // Removing a standalone host removes its compute resource.
                    if let Some(parent) = parent {
                        state.detach(parent);
                    }
                    Ok(())
                }
                Some(_) => {
                    state.detach(index);
                    Ok(())
                }
            }
        }))
    }

    fn add_standalone_host(
        &self,
        folder: &NodeRef,
        spec: &HostConnectSpec,
        _add_connected: bool,
    ) -> FaultResult<TaskHandle> {
        self.record(RecordedCall::AddHost {
            target: folder.id().to_string(),
            host_name: spec.host_name.clone(),
            ssl_thumbprint: spec.ssl_thumbprint.clone(),
        });

        let mut state = self.state.borrow_mut();
        let index = state.lookup(folder)?;
        state.expect_kind(index, &[NodeKind::Folder])?;
        Ok(state.run_task(|state| {
            state.check_host_addable(index, spec)?;
            let resource = state.insert(Some(index), &spec.host_name, NodeKind::ComputeResource);
            state.insert_host(resource, spec);
            Ok(())
        }))
    }

    fn add_cluster_host(
        &self,
        cluster: &NodeRef,
        spec: &HostConnectSpec,
        _as_connected: bool,
    ) -> FaultResult<TaskHandle> {
        self.record(RecordedCall::AddHost {
            target: cluster.id().to_string(),
            host_name: spec.host_name.clone(),
            ssl_thumbprint: spec.ssl_thumbprint.clone(),
        });

        let mut state = self.state.borrow_mut();
        let index = state.lookup(cluster)?;
        state.expect_kind(index, &[NodeKind::Cluster])?;
        Ok(state.run_task(|state| {
            state.check_host_addable(index, spec)?;
            state.insert_host(index, spec);
            Ok(())
        }))
    }

    fn move_into_folder(&self, folder: &NodeRef, list: &[NodeRef]) -> FaultResult<TaskHandle> {
        self.record(RecordedCall::Move {
            target: folder.id().to_string(),
            entries: list.iter().map(|n| n.id().to_string()).collect(),
        });

        let mut state = self.state.borrow_mut();
        let index = state.lookup(folder)?;
        state.expect_kind(index, &[NodeKind::Folder])?;
        let entries = list
            .iter()
            .map(|node| state.lookup(node))
            .collect::<FaultResult<Vec<_>>>()?;

        Ok(state.run_task(|state| {
            if !state.in_datacenter(index) {
                return Err(InventoryFault::NotSupported(format!(
                    "hosts cannot be moved outside a datacenter ({})",
                    state.describe(index)
                )));
            }
            let moves = entries
                .iter()
                .map(|&entry| state.folder_move(entry))
                .collect::<FaultResult<Vec<_>>>()?;
            state.check_batch(index, moves.iter().copied().map(FolderMove::index))?;

            for planned in moves {
                match planned {
                    FolderMove::Resource(resource) => state.reparent_into(resource, index),
                    FolderMove::ClusteredHost(host) => {
                        // A clustered host leaves as a standalone host.
                        let name = state.nodes[host].name.clone();
                        let resource = state.insert(Some(index), &name, NodeKind::ComputeResource);
                        state.reparent(host, resource);
                    }
                }
            }
            Ok(())
        }))
    }

    fn move_into_cluster(&self, cluster: &NodeRef, hosts: &[NodeRef]) -> FaultResult<TaskHandle> {
        self.record(RecordedCall::Move {
            target: cluster.id().to_string(),
            entries: hosts.iter().map(|n| n.id().to_string()).collect(),
        });

        let mut state = self.state.borrow_mut();
        let index = state.lookup(cluster)?;
        state.expect_kind(index, &[NodeKind::Cluster])?;
        let entries = hosts
            .iter()
            .map(|node| {
                let entry = state.lookup(node)?;
                state.expect_kind(entry, &[NodeKind::HostSystem])?;
                Ok(entry)
            })
            .collect::<FaultResult<Vec<_>>>()?;

        Ok(state.run_task(|state| {
            state.check_batch(index, entries.iter().copied())?;
            for entry in entries {
                let old_parent = state.nodes[entry].parent;
                state.reparent_into(entry, index);
                if let Some(old) = old_parent {
                    if state.nodes[old].kind == NodeKind::ComputeResource
                        && state.nodes[old].children.is_empty()
                    {
                        state.detach(old);
                    }
                }
            }
            Ok(())
        }))
    }

    fn wait_for_task(&self, task: &TaskHandle) -> FaultResult<()> {
        self.record(RecordedCall::WaitForTask {
            task: task.id().to_string(),
        });
        // An outcome is reported once; the task is forgotten afterwards.
        self.state
            .borrow_mut()
            .tasks
            .remove(task.id())
            .unwrap_or_else(|| Err(InventoryFault::InvalidArgument(format!("unknown task {task}"))))
    }
}
