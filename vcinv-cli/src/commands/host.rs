//! Host command implementation.
//!
//! This module implements the `host` command, which ensures a host is
//! present in, or absent from, a container.

use crate::error::CliError;
use crate::utils::{
    connection_descriptor, load_configuration, open_inventory, run_plan, GlobalOptions,
};
use clap::Args;
use vcinv::operations::{Ensure, HostOptions, HostPlan, PlanExecutor};
use vcinv::{PathResolver, ThumbprintRetry};

/// Ensure a host is present or absent.
#[derive(Args)]
pub struct HostCommand {
    /// DNS name or IP address of the host
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Inventory path of the container, e.g. /DC1/ClusterA/
    #[arg(long, value_name = "PATH")]
    pub path: String,

    /// Administrative user on the host
    #[arg(long, value_name = "USER", requires = "password")]
    pub username: Option<String>,

    /// Password of the administrative user
    #[arg(long, value_name = "PASSWORD", env = "VCINV_HOST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Certificate thumbprint to accept without asking the control plane
    #[arg(long, value_name = "THUMBPRINT")]
    pub thumbprint: Option<String>,

    /// Desired state
    #[arg(long, value_enum, default_value_t = Ensure::Present)]
    pub ensure: Ensure,

    /// Perform a dry run
    #[arg(long)]
    pub dry_run: bool,

    /// Give up after this many certificate rejections (default: retry until accepted)
    #[arg(long, value_name = "N")]
    pub max_thumbprint_attempts: Option<u32>,
}

impl HostCommand {
    /// Execute the host command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.max_thumbprint_attempts == Some(0) {
            return Err(CliError::InvalidArguments(
                "--max-thumbprint-attempts must be at least 1".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let descriptor = connection_descriptor(&config)?;
        let (inventory, inventory_file) = open_inventory(&config)?;

        let retry = match self.max_thumbprint_attempts {
            Some(attempts) => ThumbprintRetry::new().with_max_attempts(attempts),
            None => config.retry_policy(),
        };

        let mut options = HostOptions::new(self.name, self.path)
            .with_thumbprint(self.thumbprint)
            .with_ensure(self.ensure);
        options.username = self.username;
        options.password = self.password;

        let plan =
            HostPlan::new(options).build_plan(&PathResolver::new(&inventory), &descriptor)?;

        run_plan(
            &plan,
            PlanExecutor::new(&inventory).with_retry(retry),
            self.dry_run,
            &inventory,
            &inventory_file,
            global,
        )?;
        Ok(())
    }
}
