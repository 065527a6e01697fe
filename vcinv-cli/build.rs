//! Build script for vcinv-cli.
//!
//! This script generates the man page at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
fn build_cli() -> Command {
    let container = |name: &'static str, kind: &'static str| {
        Command::new(name)
            .about(format!("Ensure a {kind} is present or absent"))
            .arg(Arg::new("path").value_name("PATH").required(true))
            .arg(Arg::new("ensure").long("ensure").value_name("STATE"))
            .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue))
    };

    Command::new("vcinv")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage folders, datacenters, clusters and hosts in a vCenter inventory")
        .long_about(
            "Command-line tool for resolving inventory paths and ensuring that folders, \
             datacenters, clusters and hosts are present or absent",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("connection")
                .long("connection")
                .help("Connection string, user:password@host")
                .value_name("CONNECTION")
                .global(true)
                .env("VCINV_CONNECTION"),
        )
        .arg(
            Arg::new("inventory")
                .long("inventory")
                .help("Inventory file backing the session")
                .value_name("FILE")
                .global(true)
                .env("VCINV_INVENTORY"),
        )
        .arg(
            Arg::new("insecure")
                .long("insecure")
                .help("Skip certificate verification of the control plane")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("secure")
                .long("secure")
                .help("Verify the certificate of the control plane")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("Show the kind and children of the container at a path")
                .arg(Arg::new("path").value_name("PATH").required(true))
                .arg(Arg::new("format").long("format").value_name("FORMAT")),
            container("folder", "folder"),
            container("datacenter", "datacenter"),
            container("cluster", "cluster"),
            Command::new("host")
                .about("Ensure a host is present in, or absent from, a container")
                .arg(Arg::new("name").value_name("NAME").required(true))
                .arg(Arg::new("path").long("path").value_name("PATH").required(true))
                .arg(Arg::new("username").long("username").value_name("USER"))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .value_name("PASSWORD")
                        .env("VCINV_HOST_PASSWORD"),
                )
                .arg(Arg::new("thumbprint").long("thumbprint").value_name("THUMBPRINT"))
                .arg(Arg::new("ensure").long("ensure").value_name("STATE"))
                .arg(Arg::new("dry-run").long("dry-run").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("max-thumbprint-attempts")
                        .long("max-thumbprint-attempts")
                        .value_name("N"),
                ),
            Command::new("init-inventory")
                .about("Write an empty inventory file")
                .arg(Arg::new("file").value_name("FILE").required(true))
                .arg(Arg::new("user").long("user").value_name("USER"))
                .arg(Arg::new("password").long("password").value_name("PASSWORD"))
                .arg(
                    Arg::new("trusted-certificate")
                        .long("trusted-certificate")
                        .action(ArgAction::SetTrue),
                )
                .arg(Arg::new("overwrite").long("overwrite").action(ArgAction::SetTrue)),
            Command::new("validate")
                .about("Validate the configuration")
                .arg(Arg::new("config-path").value_name("CONFIG_PATH")),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell")
                .arg(Arg::new("shell").value_name("SHELL").required(true)),
        ])
}

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(man_dir.join("vcinv.1"), buffer)?;

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
    Ok(())
}
