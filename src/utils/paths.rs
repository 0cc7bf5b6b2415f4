//! Path utilities for cardlab-deploy

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the optional project configuration file
pub const CONFIG_FILE_NAME: &str = "deploy.toml";

/// Join a directory and a relative path, leaving absolute paths untouched
pub fn join_if_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Make a path absolute against the current working directory
///
/// Subprocesses may run in another directory, so every path handed to them
/// goes through here first. The path is not canonicalized and need not exist.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(current_dir.join(path))
}

/// Default config file location inside a project directory
pub fn default_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_if_relative() {
        let base = Path::new("/web");
        assert_eq!(
            join_if_relative(base, Path::new("Client/card-lab")),
            PathBuf::from("/web/Client/card-lab")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_join_if_relative_keeps_absolute() {
        assert_eq!(
            join_if_relative(Path::new("/web"), Path::new("/opt/assets")),
            PathBuf::from("/opt/assets")
        );
    }

    #[test]
    fn test_absolutize_relative_path() {
        let resolved = absolutize(Path::new("publish")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("publish"));
    }

    #[test]
    fn test_default_config_path() {
        assert_eq!(
            default_config_path(Path::new("/web")),
            PathBuf::from("/web/deploy.toml")
        );
    }
}
