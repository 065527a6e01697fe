//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, inventory access and plan reporting.

use crate::error::CliError;
use std::path::PathBuf;
use vcinv::operations::{ExecutionResult, OperationPlan, PlanExecutor};
use vcinv::{Config, ConfigBuilder, ConnectionDescriptor, InMemoryInventory, Logger};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Connection string from the command line.
    pub connection: Option<String>,

    /// Inventory file from the command line.
    pub inventory: Option<PathBuf>,

    /// Certificate verification choice from the command line.
    pub insecure: Option<bool>,
}

/// Choose the logger for this invocation.
///
/// Precedence: `--verbose`/`--quiet`, then the configured log mode
/// (`VCINV_LOG_MODE` or a config file), then normal.
pub fn init_logging(global: &GlobalOptions) -> Logger {
    if global.verbose || global.quiet {
        return vcinv::init_logger(global.verbose, global.quiet);
    }

    ConfigBuilder::new()
        .build()
        .ok()
        .and_then(|config| config.log_level().ok().flatten())
        .map_or_else(|| vcinv::init_logger(false, false), Logger::new)
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let overrides = Config {
        connection: global.connection.clone(),
        insecure: global.insecure,
        inventory_file: global.inventory.clone(),
        ..Default::default()
    };

    ConfigBuilder::new()
        .with_config(overrides)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// The connection descriptor from the merged configuration.
///
/// A missing connection is a configuration error; a malformed one keeps
/// its library error.
pub fn connection_descriptor(config: &Config) -> Result<ConnectionDescriptor, CliError> {
    config.connection_descriptor().map_err(|e| match e {
        e @ vcinv::Error::InvalidConnection { .. } => CliError::Library(e),
        e => CliError::Config(e.to_string()),
    })
}

/// The inventory file from the merged configuration.
pub fn inventory_path(config: &Config) -> Result<PathBuf, CliError> {
    config.inventory_file.clone().ok_or_else(|| {
        CliError::Config(
            "no inventory file configured (use --inventory or VCINV_INVENTORY)".to_string(),
        )
    })
}

/// Open the inventory file named by the configuration.
pub fn open_inventory(config: &Config) -> Result<(InMemoryInventory, PathBuf), CliError> {
    let path = inventory_path(config)?;
    let inventory = InMemoryInventory::load(&path)?;
    Ok((inventory, path))
}

/// Execute a plan, report it and persist the inventory if anything changed.
pub fn run_plan(
    plan: &OperationPlan,
    mut executor: PlanExecutor<'_>,
    dry_run: bool,
    inventory: &InMemoryInventory,
    inventory_file: &std::path::Path,
    global: &GlobalOptions,
) -> Result<ExecutionResult, CliError> {
    if dry_run {
        executor = executor.dry_run();
    }
    let result = executor.execute(plan)?;

    if !global.quiet {
        for warning in &result.warnings {
            eprintln!("Warning: {warning}");
        }
        if result.dry_run {
            if !result.actions_taken.is_empty() {
                eprintln!("Dry run - would perform the following actions:");
                for (i, action) in result.actions_taken.iter().enumerate() {
                    eprintln!("  {}. {action}", i + 1);
                }
            }
        } else {
            for action in &result.actions_taken {
                eprintln!("{action}");
            }
            if let Some(ref thumbprint) = result.accepted_thumbprint {
                eprintln!("Accepted certificate thumbprint {thumbprint}");
            }
        }
    }

    if !result.dry_run && !plan.is_empty() {
        inventory.save(inventory_file)?;
        log::debug!("saved inventory to {}", inventory_file.display());
    }

    Ok(result)
}
