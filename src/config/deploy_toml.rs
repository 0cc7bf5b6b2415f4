//! deploy.toml configuration parsing
//!
//! ```toml
//! [frontend]
//! dir = "Client/card-lab"
//! npm = "npm"
//! script = "build"
//!
//! [packs]
//! dotnet = "dotnet"
//! app_dll = "CardLab.dll"
//! assets_dir = "Game/BasePacks/Assets"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::validation::validate_config;
use crate::error::{hints, ResultExt};
use crate::utils::paths::default_config_path;

/// Root configuration from deploy.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    /// Frontend (Vite) build settings
    #[serde(default)]
    pub frontend: FrontendConfig,

    /// Base game pack compilation settings
    #[serde(default)]
    pub packs: PacksConfig,
}

/// `[frontend]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontendConfig {
    /// Frontend project directory, relative to the project dir
    pub dir: PathBuf,

    /// npm executable
    pub npm: String,

    /// package.json script that runs the Vite build
    pub script: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Client").join("card-lab"),
            npm: "npm".to_string(),
            script: "build".to_string(),
        }
    }
}

/// `[packs]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PacksConfig {
    /// .NET host executable
    pub dotnet: String,

    /// Application binary expected inside the publish directory
    pub app_dll: String,

    /// Source assets for the base packs, relative to the project dir
    pub assets_dir: PathBuf,
}

impl Default for PacksConfig {
    fn default() -> Self {
        Self {
            dotnet: "dotnet".to_string(),
            app_dll: "CardLab.dll".to_string(),
            assets_dir: PathBuf::from("Game").join("BasePacks").join("Assets"),
        }
    }
}

impl DeployConfig {
    /// Load configuration for a project
    ///
    /// An explicit path must exist. Without one, `<project_dir>/deploy.toml`
    /// is read when present and the defaults are used otherwise.
    pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }

        let path = default_config_path(project_dir);
        if path.is_file() {
            Self::load_from_path(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .context_with_hint("Failed to parse deploy.toml", hints::invalid_deploy_toml())?;

        validate_config(&config)?;

        Ok(config)
    }
}
