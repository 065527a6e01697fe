//! Resolve command implementation.
//!
//! This module implements the `resolve` command, which prints the kind
//! and children of the container at an inventory path.

use crate::error::CliError;
use crate::utils::{connection_descriptor, load_configuration, open_inventory, GlobalOptions};
use clap::{Args, ValueEnum};
use serde::Serialize;
use vcinv::{ContainerKind, NodeKind, NodeRef, PathResolver};

/// Output format for `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per node
    Text,
    /// A JSON document
    Json,
}

/// Show the container at a path.
#[derive(Args)]
pub struct ResolveCommand {
    /// Inventory path, e.g. /DC1/ClusterA/
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ResolvedContainer<'a> {
    path: &'a str,
    id: &'a str,
    name: &'a str,
    kind: ContainerKind,
    children: Vec<ChildEntry<'a>>,
}

#[derive(Serialize)]
struct ChildEntry<'a> {
    id: &'a str,
    name: &'a str,
    kind: &'a NodeKind,
}

impl<'a> From<&'a NodeRef> for ChildEntry<'a> {
    fn from(node: &'a NodeRef) -> Self {
        Self {
            id: node.id(),
            name: node.name(),
            kind: node.kind(),
        }
    }
}

impl ResolveCommand {
    /// Execute the resolve command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let descriptor = connection_descriptor(&config)?;
        let (inventory, _) = open_inventory(&config)?;

        let context = format!("no container at {}", self.path);
        let container = PathResolver::new(&inventory).resolve(&descriptor, &self.path, &context)?;
        let children = container.children(&inventory)?;

        match self.format {
            OutputFormat::Text => {
                println!("{container}");
                for child in &children {
                    println!("  {child}");
                }
            }
            OutputFormat::Json => {
                let resolved = ResolvedContainer {
                    path: &self.path,
                    id: container.node().id(),
                    name: container.name(),
                    kind: container.kind(),
                    children: children.iter().map(ChildEntry::from).collect(),
                };
                let json =
                    serde_json::to_string_pretty(&resolved).map_err(std::io::Error::from)?;
                println!("{json}");
            }
        }

        Ok(())
    }
}
