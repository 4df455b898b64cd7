pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::http::{router, serve, AppState};
pub use adapters::storage::LocalArtifactStore;
pub use config::ServerConfig;
pub use core::service::PredictionService;
pub use domain::model::{Output, PredictionRequest, PredictionResponse, Region};
pub use utils::error::{Result, ServiceError};
