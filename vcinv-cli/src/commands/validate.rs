//! Command to validate the vcinv configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use std::path::PathBuf;
use vcinv::config::{ConfigLoader, ConfigValidator};

/// Validate a configuration file, or the merged configuration.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate (default: the merged configuration)
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let Some(path) = self.config_path else {
            let config = load_configuration(global)?;
            if !global.quiet {
                if let Some(ref inventory) = config.inventory_file {
                    eprintln!("Inventory file: {}", inventory.display());
                }
            }
            println!("Configuration is valid");
            return Ok(());
        };

        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let config = match ConfigLoader::load_file(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        match ConfigValidator::validate(&config) {
            Ok(()) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
