pub mod artifacts;
pub mod preprocessing;
pub mod service;

pub use crate::domain::model::{Output, PredictionRequest, PredictionResponse, Region};
pub use crate::domain::ports::{Predictor, Scaler};
pub use crate::utils::error::Result;
