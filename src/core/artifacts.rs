//! Serialized scaler and model artifacts.
//!
//! Artifacts are JSON documents tagged by `type`. Each variant implements one
//! of the ports in [`crate::domain::ports`], so the rest of the service never
//! looks inside them.

use crate::domain::model::Output;
use crate::domain::ports::{Predictor, Scaler};
use crate::utils::error::{Result, ServiceError};
use crate::utils::validation::{validate_finite, Validate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// `x' = (x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x' = x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl ScalerArtifact {
    fn name(&self) -> &'static str {
        match self {
            ScalerArtifact::Standard { .. } => "StandardScaler",
            ScalerArtifact::MinMax { .. } => "MinMaxScaler",
        }
    }
}

impl Validate for ScalerArtifact {
    fn validate(&self) -> Result<()> {
        let (offset_field, offset, scale) = match self {
            ScalerArtifact::Standard { mean, scale } => ("mean", mean, scale),
            ScalerArtifact::MinMax { min, scale } => ("min", min, scale),
        };

        validate_finite(offset_field, offset)?;
        validate_finite("scale", scale)?;

        if offset.len() != scale.len() {
            return Err(ServiceError::InvalidConfigValueError {
                field: "scale".to_string(),
                value: scale.len().to_string(),
                reason: format!(
                    "{} has {} entries but scale has {}",
                    offset_field,
                    offset.len(),
                    scale.len()
                ),
            });
        }
        Ok(())
    }
}

impl Scaler for ScalerArtifact {
    fn n_features(&self) -> usize {
        match self {
            ScalerArtifact::Standard { scale, .. } | ScalerArtifact::MinMax { scale, .. } => {
                scale.len()
            }
        }
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.n_features() {
            return Err(ServiceError::shape_mismatch(
                self.name(),
                self.n_features(),
                features.len(),
            ));
        }

        let scaled = match self {
            ScalerArtifact::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| {
                    // zero-variance features pass through centered only
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            ScalerArtifact::MinMax { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
        };
        Ok(scaled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelArtifact {
    /// Assigns the index of the nearest cluster center.
    KMeans { cluster_centers: Vec<Vec<f64>> },
    Linear { coefficients: Vec<f64>, intercept: f64 },
}

impl ModelArtifact {
    fn name(&self) -> &'static str {
        match self {
            ModelArtifact::KMeans { .. } => "KMeans",
            ModelArtifact::Linear { .. } => "LinearRegression",
        }
    }
}

impl Validate for ModelArtifact {
    fn validate(&self) -> Result<()> {
        match self {
            ModelArtifact::KMeans { cluster_centers } => {
                let first = cluster_centers.first().ok_or_else(|| {
                    ServiceError::InvalidConfigValueError {
                        field: "cluster_centers".to_string(),
                        value: "[]".to_string(),
                        reason: "At least one cluster center is required".to_string(),
                    }
                })?;

                for (i, center) in cluster_centers.iter().enumerate() {
                    validate_finite(&format!("cluster_centers[{}]", i), center)?;
                    if center.len() != first.len() {
                        return Err(ServiceError::InvalidConfigValueError {
                            field: format!("cluster_centers[{}]", i),
                            value: center.len().to_string(),
                            reason: format!("Expected {} dimensions", first.len()),
                        });
                    }
                }
                Ok(())
            }
            ModelArtifact::Linear {
                coefficients,
                intercept,
            } => {
                validate_finite("coefficients", coefficients)?;
                validate_finite("intercept", std::slice::from_ref(intercept))
            }
        }
    }
}

impl Predictor for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            ModelArtifact::KMeans { cluster_centers } => {
                cluster_centers.first().map(Vec::len).unwrap_or(0)
            }
            ModelArtifact::Linear { coefficients, .. } => coefficients.len(),
        }
    }

    fn predict(&self, features: &[f64]) -> Result<Vec<Output>> {
        if features.len() != self.n_features() {
            return Err(ServiceError::shape_mismatch(
                self.name(),
                self.n_features(),
                features.len(),
            ));
        }

        match self {
            ModelArtifact::KMeans { cluster_centers } => {
                let mut best: Option<(usize, f64)> = None;
                for (label, center) in cluster_centers.iter().enumerate() {
                    let distance: f64 = center
                        .iter()
                        .zip(features)
                        .map(|(c, x)| (c - x).powi(2))
                        .sum();
                    if !distance.is_finite() {
                        return Err(ServiceError::InferenceError {
                            message: format!(
                                "KMeans distance to cluster {} is not finite: {}",
                                label, distance
                            ),
                        });
                    }
                    // strict comparison keeps the lowest label on ties
                    if best.map_or(true, |(_, d)| distance < d) {
                        best = Some((label, distance));
                    }
                }

                let (label, _) = best.ok_or_else(|| ServiceError::InferenceError {
                    message: "KMeans has no cluster centers".to_string(),
                })?;
                Ok(vec![Output::Cluster(label)])
            }
            ModelArtifact::Linear {
                coefficients,
                intercept,
            } => {
                let value = coefficients
                    .iter()
                    .zip(features)
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
                    + intercept;

                if !value.is_finite() {
                    return Err(ServiceError::InferenceError {
                        message: format!("LinearRegression produced a non-finite value: {}", value),
                    });
                }
                Ok(vec![Output::Value(value)])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> ScalerArtifact {
        ScalerArtifact::Standard {
            mean: vec![400_000.0, 300.0],
            scale: vec![100_000.0, 50.0],
        }
    }

    #[test]
    fn test_parse_tagged_artifacts() {
        let scaler: ScalerArtifact =
            serde_json::from_str(r#"{"type": "standard", "mean": [1.0], "scale": [2.0]}"#)
                .unwrap();
        assert_eq!(scaler.n_features(), 1);

        let model: ModelArtifact = serde_json::from_str(
            r#"{"type": "k_means", "cluster_centers": [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]}"#,
        )
        .unwrap();
        assert_eq!(model.n_features(), 3);

        assert!(serde_json::from_str::<ModelArtifact>(r#"{"type": "forest"}"#).is_err());
    }

    #[test]
    fn test_standard_scaler_transform() {
        let scaled = standard().transform(&[500_000.0, 350.0]).unwrap();
        assert!((scaled[0] - 1.0).abs() < 1e-10);
        assert!((scaled[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_standard_scaler_zero_scale() {
        let scaler = ScalerArtifact::Standard {
            mean: vec![5.0],
            scale: vec![0.0],
        };
        assert_eq!(scaler.transform(&[7.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_min_max_scaler_transform() {
        let scaler = ScalerArtifact::MinMax {
            min: vec![-0.5, 0.0],
            scale: vec![0.001, 0.01],
        };
        let scaled = scaler.transform(&[1000.0, 50.0]).unwrap();
        assert!((scaled[0] - 0.5).abs() < 1e-10);
        assert!((scaled[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_scaler_rejects_wrong_dimension() {
        let err = standard().transform(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::ShapeMismatchError {
                expected: 2,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_scaler_validation() {
        assert!(standard().validate().is_ok());

        let uneven = ScalerArtifact::Standard {
            mean: vec![1.0, 2.0],
            scale: vec![1.0],
        };
        assert!(uneven.validate().is_err());

        let nan = ScalerArtifact::MinMax {
            min: vec![f64::NAN],
            scale: vec![1.0],
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_kmeans_predicts_nearest_center() {
        let model = ModelArtifact::KMeans {
            cluster_centers: vec![
                vec![0.0, 0.0, 0.0],
                vec![2.0, 1.0, 1.0],
                vec![5.0, 5.0, 5.0],
            ],
        };
        assert_eq!(
            model.predict(&[2.0, 1.2, 0.9]).unwrap(),
            vec![Output::Cluster(1)]
        );
        assert_eq!(
            model.predict(&[6.0, 4.0, 5.0]).unwrap(),
            vec![Output::Cluster(2)]
        );
    }

    #[test]
    fn test_kmeans_tie_prefers_lowest_label() {
        let model = ModelArtifact::KMeans {
            cluster_centers: vec![vec![-1.0], vec![1.0]],
        };
        assert_eq!(model.predict(&[0.0]).unwrap(), vec![Output::Cluster(0)]);
    }

    #[test]
    fn test_kmeans_rejects_overflowing_distances() {
        let model = ModelArtifact::KMeans {
            cluster_centers: vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]],
        };
        let err = model.predict(&[2.0, 1e300, 0.0]).unwrap_err();
        assert!(matches!(err, ServiceError::InferenceError { .. }));
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn test_kmeans_validation() {
        let empty = ModelArtifact::KMeans {
            cluster_centers: vec![],
        };
        assert!(empty.validate().is_err());

        let ragged = ModelArtifact::KMeans {
            cluster_centers: vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0]],
        };
        assert!(ragged.validate().is_err());
    }

    #[test]
    fn test_linear_predict() {
        let model = ModelArtifact::Linear {
            coefficients: vec![1.0, 2.0, -1.0],
            intercept: 0.5,
        };
        assert_eq!(
            model.predict(&[1.0, 1.0, 1.0]).unwrap(),
            vec![Output::Value(2.5)]
        );
        assert!(model.predict(&[1.0, 1.0]).is_err());
    }
}
