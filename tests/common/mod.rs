#![allow(dead_code)]

use region_predict::core::artifacts::{ModelArtifact, ScalerArtifact};
use region_predict::domain::ports::{Predictor, Scaler};
use region_predict::{Output, PredictionService, Region, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const SCALER_JSON: &str =
    r#"{"type": "standard", "mean": [400000.0, 300.0], "scale": [100000.0, 50.0]}"#;

pub const KMEANS_JSON: &str =
    r#"{"type": "k_means", "cluster_centers": [[0.0, 0.0, 0.0], [2.0, 1.0, 1.0], [1.0, -1.0, -1.0]]}"#;

/// Writes a complete, consistent artifact set into `dir`.
pub fn seed_artifacts(dir: &Path) {
    std::fs::write(dir.join("scaler.json"), SCALER_JSON).unwrap();
    for region in Region::ALL {
        std::fs::write(dir.join(region.artifact_file()), KMEANS_JSON).unwrap();
    }
}

pub fn standard_scaler(n: usize) -> Arc<dyn Scaler> {
    Arc::new(ScalerArtifact::Standard {
        mean: vec![0.0; n],
        scale: vec![1.0; n],
    })
}

/// Model that records how often it was consulted.
pub struct CountingPredictor {
    label: usize,
    calls: AtomicUsize,
}

impl CountingPredictor {
    pub fn new(label: usize) -> Self {
        Self {
            label,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predictor for CountingPredictor {
    fn n_features(&self) -> usize {
        3
    }

    fn predict(&self, _features: &[f64]) -> Result<Vec<Output>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Output::Cluster(self.label)])
    }
}

/// Service backed by counting models; returns the counters keyed by region.
pub fn counting_service(
    scaler: Arc<dyn Scaler>,
) -> (PredictionService, HashMap<Region, Arc<CountingPredictor>>) {
    let counters: HashMap<Region, Arc<CountingPredictor>> = Region::ALL
        .into_iter()
        .enumerate()
        .map(|(i, region)| (region, Arc::new(CountingPredictor::new(i))))
        .collect();

    let models: HashMap<Region, Arc<dyn Predictor>> = counters
        .iter()
        .map(|(region, counter)| (*region, counter.clone() as Arc<dyn Predictor>))
        .collect();

    let service = PredictionService::new(scaler, models).unwrap();
    (service, counters)
}

pub fn kmeans_model() -> ModelArtifact {
    serde_json::from_str(KMEANS_JSON).unwrap()
}
