//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ContainerCommand, HostCommand, InitInventoryCommand, ResolveCommand,
    ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for managing a vCenter inventory tree.
#[derive(Parser)]
#[command(name = "vcinv")]
#[command(
    version,
    about = "Manage folders, datacenters, clusters and hosts in a vCenter inventory",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Connection string, user:password@host
    #[arg(long, value_name = "CONNECTION", global = true, env = "VCINV_CONNECTION")]
    pub connection: Option<String>,

    /// Inventory file backing the session
    #[arg(long, value_name = "FILE", global = true, env = "VCINV_INVENTORY")]
    pub inventory: Option<PathBuf>,

    /// Skip certificate verification of the control plane
    #[arg(long, global = true, overrides_with = "secure")]
    pub insecure: bool,

    /// Verify the certificate of the control plane
    #[arg(long, global = true, overrides_with = "insecure")]
    pub secure: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The certificate verification choice made on the command line, if any.
    pub fn insecure_flag(&self) -> Option<bool> {
        match (self.insecure, self.secure) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Show the kind and children of the container at a path
    Resolve(ResolveCommand),

    /// Ensure a folder is present or absent
    Folder(ContainerCommand),

    /// Ensure a datacenter is present or absent
    Datacenter(ContainerCommand),

    /// Ensure a cluster is present or absent
    Cluster(ContainerCommand),

    /// Ensure a host is present in, or absent from, a container
    Host(HostCommand),

    /// Write an empty inventory file
    InitInventory(InitInventoryCommand),

    /// Validate the configuration
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
