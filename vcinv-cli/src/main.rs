//! Main entry point for the vcinv CLI.
//!
//! This is the command-line interface for managing a vCenter inventory.
//! It provides commands for:
//! - `resolve`: Show the container at an inventory path
//! - `folder`, `datacenter`, `cluster`: Ensure a container is present or absent
//! - `host`: Ensure a host is present or absent
//! - `init-inventory`: Write an empty inventory file

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;
use vcinv::ContainerKind;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        verbose: cli.verbose,
        quiet: cli.quiet,
        connection: cli.connection.clone(),
        inventory: cli.inventory.clone(),
        insecure: cli.insecure_flag(),
    };

    // Route library log records to stderr
    if let Err(e) = utils::init_logging(&global).install() {
        eprintln!("Warning: {e}");
    }

    // Execute the command
    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Folder(cmd) => cmd.execute(ContainerKind::Folder, &global),
        cli::Command::Datacenter(cmd) => cmd.execute(ContainerKind::Datacenter, &global),
        cli::Command::Cluster(cmd) => cmd.execute(ContainerKind::Cluster, &global),
        cli::Command::Host(cmd) => cmd.execute(&global),
        cli::Command::InitInventory(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
