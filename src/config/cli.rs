use crate::config::toml_config::TomlConfig;
use crate::config::{ServerConfig, DEFAULT_ARTIFACTS_DIR, DEFAULT_HOST, DEFAULT_PORT};
use crate::utils::error::Result;
use clap::{ArgAction, Parser};

/// Command line flags. Flags left unset fall back to the config file, then
/// to built-in defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "region-predict")]
#[command(about = "Serves regional price/area models over HTTP")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "REGION_PREDICT_CONFIG")]
    pub config: Option<String>,

    /// Address to bind [default: 0.0.0.0]
    #[arg(long, env = "REGION_PREDICT_HOST")]
    pub host: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short, long, env = "REGION_PREDICT_PORT")]
    pub port: Option<u16>,

    /// Directory holding scaler.json and the per-region model files [default: .]
    #[arg(long, env = "REGION_PREDICT_ARTIFACTS_DIR")]
    pub artifacts_dir: Option<String>,

    /// Enable verbose output (`--verbose=false` overrides the config file)
    #[arg(
        short,
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub verbose: Option<bool>,

    /// Emit logs as JSON lines (`--json-logs=false` overrides the config file)
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub json_logs: Option<bool>,

    /// Load and validate artifacts, then exit without serving
    #[arg(long)]
    pub check: bool,
}

impl CliConfig {
    /// Loads the config file (if any) and layers these flags on top of it.
    pub fn resolve(&self) -> Result<ServerConfig> {
        let file = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(self.merge(&file))
    }

    pub fn merge(&self, file: &TomlConfig) -> ServerConfig {
        ServerConfig {
            host: self
                .host
                .clone()
                .or_else(|| file.host().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.or(file.port()).unwrap_or(DEFAULT_PORT),
            artifacts_dir: self
                .artifacts_dir
                .clone()
                .or_else(|| file.artifacts_dir().map(str::to_string))
                .unwrap_or_else(|| DEFAULT_ARTIFACTS_DIR.to_string()),
            verbose: self.verbose.or(file.verbose()).unwrap_or(false),
            json_logs: self.json_logs.or(file.json_logs()).unwrap_or(false),
        }
    }
}
