//! Base game pack compilation
//!
//! The published application compiles the packs itself when started with
//! `--compile <assets>`. What it writes, and where, is up to the application.

use std::path::Path;

use anyhow::Result;

use crate::config::PacksConfig;
use crate::error::DeployError;
use crate::exec::CommandSpec;
use crate::utils::paths::join_if_relative;

/// Build `dotnet <publish>/CardLab.dll --compile <assets>`
///
/// Fails when the application binary is not in the publish directory.
pub fn command(project_dir: &Path, publish_dir: &Path, packs: &PacksConfig) -> Result<CommandSpec> {
    let app_dll = publish_dir.join(&packs.app_dll);
    if !app_dll.exists() {
        return Err(DeployError::missing_artifact(packs.app_dll.as_str(), publish_dir).into());
    }

    let assets_dir = join_if_relative(project_dir, &packs.assets_dir);

    Ok(CommandSpec::new(packs.dotnet.as_str())
        .arg(app_dll)
        .arg("--compile")
        .arg(assets_dir))
}
