//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `resolve`: Show the container at a path
//! - `container`: Ensure a folder, datacenter or cluster is present or absent
//! - `host`: Ensure a host is present or absent
//! - `init_inventory`: Write an empty inventory file
//! - `validate`: Validate configuration
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod container;
pub mod host;
pub mod init_inventory;
pub mod resolve;
pub mod validate;

pub use completions::CompletionsCommand;
pub use container::ContainerCommand;
pub use host::HostCommand;
pub use init_inventory::InitInventoryCommand;
pub use resolve::ResolveCommand;
pub use validate::ValidateCommand;
