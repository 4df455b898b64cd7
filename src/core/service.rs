use crate::core::preprocessing::{preprocess, MODEL_FEATURES, SCALED_FEATURES};
use crate::domain::model::{PredictionRequest, PredictionResponse, Region};
use crate::domain::ports::{Predictor, Scaler};
use crate::utils::error::{Result, ServiceError};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable set of loaded artifacts plus the preprocess → predict pipeline.
///
/// Built once at startup and shared across requests behind an `Arc`.
pub struct PredictionService {
    scaler: Arc<dyn Scaler>,
    models: HashMap<Region, Arc<dyn Predictor>>,
}

impl PredictionService {
    /// Requires a model for every region in [`Region::ALL`].
    pub fn new(
        scaler: Arc<dyn Scaler>,
        models: HashMap<Region, Arc<dyn Predictor>>,
    ) -> Result<Self> {
        if let Some(missing) = Region::ALL.into_iter().find(|r| !models.contains_key(r)) {
            return Err(ServiceError::MissingRegionError {
                region: missing.to_string(),
            });
        }

        Ok(Self { scaler, models })
    }

    /// Verifies the scaler and every model agree with the feature layout
    /// produced by [`preprocess`].
    pub fn check_shapes(&self) -> Result<()> {
        if self.scaler.n_features() != SCALED_FEATURES {
            return Err(ServiceError::shape_mismatch(
                "scaler",
                self.scaler.n_features(),
                SCALED_FEATURES,
            ));
        }

        for region in Region::ALL {
            let model = self.model(region)?;
            if model.n_features() != MODEL_FEATURES {
                return Err(ServiceError::shape_mismatch(
                    format!("{} model", region),
                    model.n_features(),
                    MODEL_FEATURES,
                ));
            }
        }
        Ok(())
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        Region::ALL
            .into_iter()
            .filter(|region| self.models.contains_key(region))
    }

    fn model(&self, region: Region) -> Result<&Arc<dyn Predictor>> {
        self.models
            .get(&region)
            .ok_or_else(|| ServiceError::MissingRegionError {
                region: region.to_string(),
            })
    }

    pub fn predict(&self, region: Region, request: &PredictionRequest) -> Result<PredictionResponse> {
        let model = self.model(region)?;
        let features = preprocess(self.scaler.as_ref(), request)?;
        tracing::debug!(%region, ?features, "Preprocessed request");

        let prediction = model.predict(&features)?;
        Ok(PredictionResponse { prediction })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifacts::{ModelArtifact, ScalerArtifact};
    use crate::domain::model::Output;

    fn scaler(n: usize) -> Arc<dyn Scaler> {
        Arc::new(ScalerArtifact::Standard {
            mean: vec![0.0; n],
            scale: vec![1.0; n],
        })
    }

    fn labelled_model(label_offset: f64, dims: usize) -> Arc<dyn Predictor> {
        Arc::new(ModelArtifact::Linear {
            coefficients: vec![0.0; dims],
            intercept: label_offset,
        })
    }

    fn all_models(dims: usize) -> HashMap<Region, Arc<dyn Predictor>> {
        Region::ALL
            .into_iter()
            .enumerate()
            .map(|(i, region)| (region, labelled_model(i as f64, dims)))
            .collect()
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            type_encoding: 2,
            price: 500_000.0,
            area_m2: 350.0,
        }
    }

    #[test]
    fn test_requires_every_region() {
        let mut models = all_models(3);
        models.remove(&Region::Southern);

        let err = PredictionService::new(scaler(2), models).err().unwrap();
        assert!(matches!(err, ServiceError::MissingRegionError { ref region } if region == "southern"));
    }

    #[test]
    fn test_dispatches_to_region_model() {
        let service = PredictionService::new(scaler(2), all_models(3)).unwrap();
        assert!(service.check_shapes().is_ok());

        for (i, region) in Region::ALL.into_iter().enumerate() {
            let response = service.predict(region, &request()).unwrap();
            assert_eq!(response.prediction, vec![Output::Value(i as f64)]);
        }
    }

    #[test]
    fn test_check_shapes_rejects_three_feature_scaler() {
        let service = PredictionService::new(scaler(3), all_models(3)).unwrap();
        assert!(matches!(
            service.check_shapes(),
            Err(ServiceError::ShapeMismatchError { .. })
        ));
    }

    #[test]
    fn test_check_shapes_rejects_wrong_model_width() {
        let mut models = all_models(3);
        models.insert(Region::Eastern, labelled_model(0.0, 4));

        let service = PredictionService::new(scaler(2), models).unwrap();
        let err = service.check_shapes().unwrap_err();
        assert!(err.to_string().contains("eastern model"));
    }

    #[test]
    fn test_runtime_mismatch_is_an_error_not_a_panic() {
        let service = PredictionService::new(scaler(3), all_models(3)).unwrap();
        assert!(service.predict(Region::Riyadh, &request()).is_err());
    }
}
