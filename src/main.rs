//! cardlab-deploy - deployment helper for the CardLab web project
//!
//! Runs the production build steps that sit between `dotnet publish` and
//! shipping the publish directory:
//!
//! ```text
//! build_vite     → npm run build -- --outDir <publish>/wwwroot
//! compile_packs  → dotnet <publish>/CardLab.dll --compile <assets>
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod tasks;
mod utils;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::DeployError;
use utils::terminal::print_error;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<DeployError>() {
                Some(deploy_err) => deploy_err.display_with_hints(),
                None => print_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
