#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # vcinv
//!
//! A library for managing the inventory tree of a vCenter control plane.
//!
//! Inventory locations are addressed by slash-delimited paths of display
//! names. This library resolves such paths to folders, datacenters and
//! clusters, and creates, destroys and populates them through a single
//! kind-aware container type.
//!
//! ## Core Types
//!
//! - [`PathSegments`] and [`PathResolver`]: Parsing and resolving paths
//! - [`Container`] and [`ContainerKind`]: Lifecycle operations on folders,
//!   datacenters and clusters
//! - [`InventoryService`]: The boundary to the control plane, with an
//!   in-memory implementation in [`InMemoryInventory`]
//! - [`ThumbprintRetry`]: Certificate acceptance when adding hosts
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use vcinv::{ConnectionDescriptor, InMemoryInventory, InventoryService, PathResolver};
//!
//! let inventory = InMemoryInventory::new();
//! let dc = inventory.create_datacenter(&inventory.root(), "DC1").unwrap();
//! let hosts = inventory.host_folder(&dc).unwrap();
//! inventory.create_cluster(&hosts, "ClusterA").unwrap();
//!
//! let descriptor = ConnectionDescriptor::parse("administrator:secret@vc01").unwrap();
//! let cluster = PathResolver::new(&inventory)
//!     .resolve(&descriptor, "/DC1/ClusterA/", "cluster not found")
//!     .unwrap();
//! assert!(cluster.is_cluster());
//! ```

pub mod config;
pub mod connection;
pub mod container;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod operations;
pub mod path;
pub mod retry;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder};
pub use connection::ConnectionDescriptor;
pub use container::{Container, ContainerKind};
pub use error::{Error, Result};
pub use inventory::{
    HostConnectSpec, InMemoryInventory, InventoryDocument, InventoryFault, InventoryService,
    NodeKind, NodeRef, TaskHandle,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use operations::{
    ContainerOptions, ContainerPlan, Ensure, ExecutionResult, HostOptions, HostPlan,
    OperationPlan, PlanAction, PlanExecutor,
};
pub use path::{PathResolver, PathSegments};
pub use retry::ThumbprintRetry;
