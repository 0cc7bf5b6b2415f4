//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::Parser;

use crate::commands::deploy::DeployCommand;
use crate::utils::terminal::disable_colors;

/// cardlab-deploy - deployment tasks for CardLab
///
/// Builds the Vite bundles into the publish directory and compiles the base
/// game packs with the published application.
#[derive(Parser, Debug)]
#[command(name = "cardlab-deploy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub deploy: DeployCommand,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        if self.no_color {
            disable_colors();
        }

        self.deploy.execute(self.verbose)
    }
}
