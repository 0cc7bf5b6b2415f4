//! Configuration validation with helpful error messages

use anyhow::Result;

use super::DeployConfig;
use crate::error::DeployError;

/// Validate the entire deploy configuration
pub fn validate_config(config: &DeployConfig) -> Result<()> {
    validate_program("frontend.npm", &config.frontend.npm)?;
    validate_non_empty("frontend.script", &config.frontend.script)?;
    validate_program("packs.dotnet", &config.packs.dotnet)?;
    validate_file_name("packs.app_dll", &config.packs.app_dll)?;

    if config.frontend.dir.as_os_str().is_empty() {
        return Err(empty_value("frontend.dir").into());
    }
    if config.packs.assets_dir.as_os_str().is_empty() {
        return Err(empty_value("packs.assets_dir").into());
    }

    Ok(())
}

fn validate_non_empty(key: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(empty_value(key).into());
    }
    Ok(())
}

fn validate_program(key: &str, value: &str) -> Result<()> {
    validate_non_empty(key, value)?;

    // Spawned directly, so the value is used verbatim as the program path
    if value.trim() != value {
        return Err(DeployError::config_error_with_hint(
            format!("{} has leading or trailing whitespace: '{}'", key, value),
            None,
            "Give only the program name or path; arguments are not accepted here",
        )
        .into());
    }
    Ok(())
}

/// The application binary lives directly in the publish directory
fn validate_file_name(key: &str, value: &str) -> Result<()> {
    validate_non_empty(key, value)?;

    if value.contains('/') || value.contains('\\') {
        return Err(DeployError::config_error_with_hint(
            format!("{} must be a file name, got '{}'", key, value),
            None,
            "The application binary is looked up directly inside --publish-dir",
        )
        .into());
    }
    Ok(())
}

fn empty_value(key: &str) -> DeployError {
    DeployError::config_error_with_hint(
        format!("{} cannot be empty", key),
        None,
        "Remove the key to use the default",
    )
}
