//! Error types and helpers for user-friendly error messages
//!
//! Precondition failures carry an actionable hint so the operator knows what
//! to fix before re-running the deployment.

use std::path::PathBuf;

use thiserror::Error;

/// Deployment errors with helpful context and suggestions
#[derive(Error, Debug)]
pub enum DeployError {
    /// A task needs a command-line argument that was not supplied
    #[error("{argument} is required for {task}")]
    MissingArgument {
        argument: String,
        task: String,
        hint: String,
    },

    /// An artifact that must already exist in the publish directory is absent
    #[error("No {artifact} found in publish directory {}", .publish_dir.display())]
    MissingArtifact {
        artifact: String,
        publish_dir: PathBuf,
        hint: String,
    },

    /// A directory a task runs in does not exist
    #[error("{what} not found: {}", .path.display())]
    MissingDirectory {
        what: String,
        path: PathBuf,
        hint: String,
    },

    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// A subprocess failed while fail-fast was requested
    #[error("Task {task} failed: {message}")]
    TaskFailed {
        task: String,
        message: String,
        hint: Option<String>,
    },
}

impl DeployError {
    /// Create a missing argument error
    pub fn missing_argument(argument: impl Into<String>, task: impl Into<String>) -> Self {
        let argument = argument.into();
        let hint = format!("Pass {} <PATH> pointing at the published server build", argument);
        Self::MissingArgument {
            argument,
            task: task.into(),
            hint,
        }
    }

    /// Create a missing artifact error
    pub fn missing_artifact(artifact: impl Into<String>, publish_dir: impl Into<PathBuf>) -> Self {
        Self::MissingArtifact {
            artifact: artifact.into(),
            publish_dir: publish_dir.into(),
            hint: hints::publish_server().to_string(),
        }
    }

    /// Create a missing directory error
    pub fn missing_directory(
        what: impl Into<String>,
        path: impl Into<PathBuf>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingDirectory {
            what: what.into(),
            path: path.into(),
            hint: hint.into(),
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a task failure error
    pub fn task_failed(task: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            task: task.into(),
            message: message.into(),
            hint: Some("Re-run without --fail-fast to continue past failing tasks".to_string()),
        }
    }

    /// The hint attached to this error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            DeployError::MissingArgument { hint, .. }
            | DeployError::MissingArtifact { hint, .. }
            | DeployError::MissingDirectory { hint, .. } => Some(hint.as_str()),
            DeployError::Config { hint, .. } | DeployError::TaskFailed { hint, .. } => {
                hint.as_deref()
            }
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let DeployError::Config {
            source: Some(source),
            ..
        } = self
        {
            eprintln!("  {}", source);
        }

        if let Some(h) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), h);
        }

        eprintln!();
    }
}

/// Helper trait for adding hints to Result types
pub trait ResultExt<T> {
    /// Add context with a hint
    fn context_with_hint(
        self,
        context: impl Into<String>,
        hint: impl Into<String>,
    ) -> Result<T, DeployError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context_with_hint(
        self,
        context: impl Into<String>,
        hint: impl Into<String>,
    ) -> Result<T, DeployError> {
        self.map_err(|e| {
            DeployError::config_error_with_hint(context.into(), Some(e.into()), hint)
        })
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for a publish directory without the server build
    pub fn publish_server() -> &'static str {
        "Publish the server first so the application binary exists, e.g.:\n\
         • dotnet publish -c Release -o <publish-dir>"
    }

    /// Get hint for a missing frontend project
    pub fn frontend_dir() -> &'static str {
        "Run from the web project root or pass --project-dir.\n\
         The frontend location can be changed with [frontend] dir in deploy.toml."
    }

    /// Get hint for invalid deploy.toml
    pub fn invalid_deploy_toml() -> &'static str {
        "deploy.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • Unknown section or key (only [frontend] and [packs] are read)\n\
         • Empty program or file name"
    }

    /// Get hint for a missing npm
    pub fn npm() -> &'static str {
        "Install Node.js (which ships npm) from https://nodejs.org/ or use your package manager:\n\
         • macOS: brew install node\n\
         • Ubuntu: sudo apt install nodejs npm\n\
         • Windows: winget install OpenJS.NodeJS"
    }

    /// Get hint for a missing dotnet
    pub fn dotnet() -> &'static str {
        "Install the .NET runtime from https://dotnet.microsoft.com/download\n\
         and ensure the dotnet host is in your PATH."
    }
}
