//! Vite bundle build
//!
//! Runs the frontend's build script through npm, redirecting Vite's output
//! into the `wwwroot` folder of the publish directory.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::FrontendConfig;
use crate::error::{hints, DeployError};
use crate::exec::CommandSpec;
use crate::utils::paths::join_if_relative;

/// Folder inside the publish directory that the server serves static files from
pub const WWWROOT_DIR: &str = "wwwroot";

/// Where the bundles end up for a publish directory
pub fn output_dir(publish_dir: &Path) -> PathBuf {
    publish_dir.join(WWWROOT_DIR)
}

/// Build `npm run <script> -- --outDir <publish>/wwwroot`, run from the frontend folder
pub fn command(project_dir: &Path, publish_dir: &Path, frontend: &FrontendConfig) -> Result<CommandSpec> {
    let frontend_dir = join_if_relative(project_dir, &frontend.dir);
    if !frontend_dir.is_dir() {
        return Err(DeployError::missing_directory(
            "Frontend project",
            frontend_dir,
            hints::frontend_dir(),
        )
        .into());
    }

    Ok(CommandSpec::new(frontend.npm.as_str())
        .arg("run")
        .arg(&frontend.script)
        .arg("--")
        .arg("--outDir")
        .arg(output_dir(publish_dir))
        .current_dir(frontend_dir))
}
