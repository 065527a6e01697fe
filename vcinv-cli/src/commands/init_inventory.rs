//! Init-inventory command implementation.
//!
//! This module implements the `init-inventory` command, which writes an
//! inventory file holding only the root folder.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use std::path::PathBuf;
use vcinv::inventory::Credentials;
use vcinv::{InMemoryInventory, InventoryDocument};

/// Write an empty inventory file.
#[derive(Args)]
pub struct InitInventoryCommand {
    /// File to create
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only accept connections as this user
    #[arg(long, value_name = "USER", requires = "password")]
    pub user: Option<String>,

    /// Password for --user
    #[arg(long, value_name = "PASSWORD", requires = "user")]
    pub password: Option<String>,

    /// Present a verifiable certificate, so --secure connections succeed
    #[arg(long)]
    pub trusted_certificate: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub overwrite: bool,
}

impl InitInventoryCommand {
    /// Execute the init-inventory command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.file.exists() && !self.overwrite {
            return Err(CliError::InvalidArguments(format!(
                "{} already exists (use --overwrite to replace it)",
                self.file.display()
            )));
        }

        let credentials = match (self.user, self.password) {
            (Some(user), Some(password)) => Some(Credentials { user, password }),
            _ => None,
        };
        let document = InventoryDocument {
            credentials,
            trusted_certificate: self.trusted_certificate,
            ..Default::default()
        };

        InMemoryInventory::from_document(&document)?.save(&self.file)?;

        if !global.quiet {
            eprintln!("Created inventory {}", self.file.display());
        }
        Ok(())
    }
}
