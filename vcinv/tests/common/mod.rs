//! Common test utilities for integration tests.
//!
//! This module provides helper functions and fixture builders for testing
//! the vcinv library against the in-memory inventory.

use vcinv::container::Container;
use vcinv::inventory::{HostConnectSpec, InMemoryInventory};
use vcinv::{ConnectionDescriptor, PathResolver, ThumbprintRetry};

/// The descriptor every fixture accepts.
#[allow(dead_code)]
pub fn descriptor() -> ConnectionDescriptor {
    ConnectionDescriptor::new("administrator", "secret", "vc01")
}

/// Resolves `path` in `inventory`, panicking on failure.
#[allow(dead_code)]
pub fn resolve(inventory: &InMemoryInventory, path: &str) -> Container {
    PathResolver::new(inventory)
        .resolve(&descriptor(), path, &format!("fixture path {path}"))
        .unwrap()
}

/// Builder for populated test inventories.
///
/// Each step names the path of an existing container and the child to
/// put in it, so fixtures read top-down like the tree they build.
///
/// # Examples
///
/// ```no_run
/// # use common::InventoryFixture;
/// let inventory = InventoryFixture::new()
///     .datacenter("/", "DC1")
///     .cluster("/DC1/", "ClusterA")
///     .host("/DC1/ClusterA/", "esx01")
///     .build();
/// ```
#[allow(dead_code)]
pub struct InventoryFixture {
    inventory: InMemoryInventory,
}

#[allow(dead_code)]
impl InventoryFixture {
    /// Starts from an empty inventory.
    pub fn new() -> Self {
        Self {
            inventory: InMemoryInventory::new(),
        }
    }

    /// Registers a certificate for a host that has not been added yet.
    pub fn certificate(mut self, host: &str, thumbprint: &str) -> Self {
        self.inventory = self.inventory.with_host_certificate(host, thumbprint);
        self
    }

    /// Adds a folder under `parent`.
    pub fn folder(self, parent: &str, name: &str) -> Self {
        resolve(&self.inventory, parent)
            .create_folder(&self.inventory, name)
            .unwrap();
        self
    }

    /// Adds a datacenter under `parent`.
    pub fn datacenter(self, parent: &str, name: &str) -> Self {
        resolve(&self.inventory, parent)
            .create_datacenter(&self.inventory, name)
            .unwrap();
        self
    }

    /// Adds a cluster under `parent`.
    pub fn cluster(self, parent: &str, name: &str) -> Self {
        resolve(&self.inventory, parent)
            .create_cluster(&self.inventory, name)
            .unwrap();
        self
    }

    /// Adds a host under `parent`, accepting any certificate.
    pub fn host(self, parent: &str, name: &str) -> Self {
        let mut spec = HostConnectSpec::new(name).with_credentials("root", "esx-secret");
        resolve(&self.inventory, parent)
            .add_host(&self.inventory, &mut spec, &ThumbprintRetry::default())
            .unwrap();
        self
    }

    /// Finishes the fixture with an empty call log.
    pub fn build(self) -> InMemoryInventory {
        self.inventory.clear_calls();
        self.inventory
    }
}

impl Default for InventoryFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The inventory used by most suites.
///
/// ```text
/// Datacenters
/// ├── DC1
/// │   └── host
/// │       ├── Folder1
/// │       │   └── esx10
/// │       ├── esx01
/// │       └── ClusterA
/// │           ├── esx02
/// │           └── esx03
/// └── Lab
///     └── DC2
///         └── host
/// ```
#[allow(dead_code)]
pub fn lab() -> InMemoryInventory {
    InventoryFixture::new()
        .datacenter("/", "DC1")
        .folder("/", "Lab")
        .datacenter("/Lab/", "DC2")
        .folder("/DC1/", "Folder1")
        .cluster("/DC1/", "ClusterA")
        .host("/DC1/", "esx01")
        .host("/DC1/Folder1/", "esx10")
        .host("/DC1/ClusterA/", "esx02")
        .host("/DC1/ClusterA/", "esx03")
        .build()
}
