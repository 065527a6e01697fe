//! Shell completion generation command.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary.
const BIN_NAME: &str = "vcinv";

/// Generate shell completion scripts
#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        if !global.quiet {
            let hint = match self.shell {
                Shell::Bash => "eval \"$(vcinv completions bash)\" in ~/.bashrc",
                Shell::Zsh => "vcinv completions zsh > ~/.zsh/completions/_vcinv",
                Shell::Fish => "vcinv completions fish | source",
                Shell::PowerShell => "vcinv completions powershell | Out-String | Invoke-Expression",
                _ => "source the generated script from your shell profile",
            };
            eprintln!("# Enable with: {hint}");
        }

        let mut cmd = Cli::command();
        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());
        Ok(())
    }
}
