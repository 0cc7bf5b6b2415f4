//! Project configuration
//!
//! The layout of the web project and the programs to invoke, read from an
//! optional `deploy.toml`. Every value has a default matching the standard
//! CardLab checkout.

mod deploy_toml;
mod validation;

pub use deploy_toml::{DeployConfig, FrontendConfig, PacksConfig};
pub use validation::validate_config;
