#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_resolved, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ARTIFACTS_DIR: &str = ".";

/// Fully resolved settings the server runs with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub artifacts_dir: String,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifacts_dir: DEFAULT_ARTIFACTS_DIR.to_string(),
            verbose: false,
            json_logs: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;
        validate_resolved("server.host", &self.host)?;
        validate_range("server.port", self.port, 1, u16::MAX)?;
        validate_path("artifacts.dir", &self.artifacts_dir)?;
        validate_resolved("artifacts.dir", &self.artifacts_dir)?;
        Ok(())
    }
}
