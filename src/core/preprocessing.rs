//! Feature preparation applied before every prediction.
//!
//! Only `Price` and `Area_m2` go through the scaler; the category code is a
//! label and is passed through untouched in front of the scaled values.

use crate::domain::model::PredictionRequest;
use crate::domain::ports::Scaler;
use crate::utils::error::Result;

/// Number of features the scaler must be fit on: `[Price, Area_m2]`.
pub const SCALED_FEATURES: usize = 2;

/// Number of features every model receives: `[Type_encoding, Price, Area_m2]`.
pub const MODEL_FEATURES: usize = 3;

/// Builds the `[type_encoding, scaled_price, scaled_area]` feature vector.
pub fn preprocess(scaler: &dyn Scaler, request: &PredictionRequest) -> Result<Vec<f64>> {
    let scaled = scaler.transform(&[request.price, request.area_m2])?;

    let mut features = Vec::with_capacity(1 + scaled.len());
    features.push(request.type_encoding as f64);
    features.extend(scaled);
    Ok(features)
}
