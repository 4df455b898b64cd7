use crate::core::artifacts::{ModelArtifact, ScalerArtifact};
use crate::core::service::PredictionService;
use crate::domain::model::Region;
use crate::domain::ports::{Predictor, Scaler};
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const SCALER_FILE: &str = "scaler.json";

/// Reads artifacts from a directory on local disk.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn read_artifact<T: DeserializeOwned + Validate>(&self, file: &str) -> Result<T> {
        let full_path = self.base_path.join(file);
        let location = full_path.display().to_string();

        let data = fs::read(&full_path)
            .map_err(|e| ServiceError::artifact(&location, e.to_string()))?;
        let artifact: T = serde_json::from_slice(&data)
            .map_err(|e| ServiceError::artifact(&location, e.to_string()))?;
        artifact
            .validate()
            .map_err(|e| ServiceError::artifact(&location, e.to_string()))?;

        tracing::info!("📦 Loaded artifact {}", location);
        Ok(artifact)
    }

    pub fn load_scaler(&self) -> Result<ScalerArtifact> {
        self.read_artifact(SCALER_FILE)
    }

    pub fn load_model(&self, region: Region) -> Result<ModelArtifact> {
        self.read_artifact(region.artifact_file())
    }

    /// Loads every artifact and checks their shapes; any failure is fatal.
    pub fn load_service(&self) -> Result<PredictionService> {
        let mut models: HashMap<Region, Arc<dyn Predictor>> = HashMap::new();
        for region in Region::ALL {
            models.insert(region, Arc::new(self.load_model(region)?));
        }
        let scaler: Arc<dyn Scaler> = Arc::new(self.load_scaler()?);

        let service = PredictionService::new(scaler, models)?;
        service.check_shapes()?;
        Ok(service)
    }
}
