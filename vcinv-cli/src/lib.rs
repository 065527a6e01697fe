//! Library exports for vcinv-cli.
//!
//! This module exports the CLI structure for use by tooling that renders
//! documentation from it.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
