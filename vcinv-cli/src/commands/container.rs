//! Folder, datacenter and cluster command implementation.
//!
//! The three commands share one argument set; the subcommand chooses the
//! container kind.

use crate::error::CliError;
use crate::utils::{
    connection_descriptor, load_configuration, open_inventory, run_plan, GlobalOptions,
};
use clap::Args;
use vcinv::operations::{ContainerOptions, ContainerPlan, Ensure, PlanExecutor};
use vcinv::{ContainerKind, PathResolver};

/// Ensure a container is present or absent.
#[derive(Args)]
pub struct ContainerCommand {
    /// Inventory path of the container, e.g. /DC1/Production/
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Desired state
    #[arg(long, value_enum, default_value_t = Ensure::Present)]
    pub ensure: Ensure,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,
}

impl ContainerCommand {
    /// Execute the command for a container of `kind`.
    pub fn execute(self, kind: ContainerKind, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let descriptor = connection_descriptor(&config)?;
        let (inventory, inventory_file) = open_inventory(&config)?;

        let options = ContainerOptions::new(self.path, kind).with_ensure(self.ensure);
        let plan = ContainerPlan::new(options)
            .build_plan(&PathResolver::new(&inventory), &descriptor)?;

        run_plan(
            &plan,
            PlanExecutor::new(&inventory),
            self.dry_run,
            &inventory,
            &inventory_file,
            global,
        )?;
        Ok(())
    }
}
