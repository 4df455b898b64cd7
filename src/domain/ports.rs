use crate::domain::model::Output;
use crate::utils::error::Result;

/// Pre-fit feature transform shared by every region.
pub trait Scaler: Send + Sync {
    /// Number of features the transform was fit on.
    fn n_features(&self) -> usize;
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// Pre-trained model serving one region.
pub trait Predictor: Send + Sync {
    fn n_features(&self) -> usize;
    fn predict(&self, features: &[f64]) -> Result<Vec<Output>>;
}
