use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load artifact '{path}': {message}")]
    ArtifactError { path: String, message: String },

    #[error("{artifact} is expecting {expected} features as input, but got {actual}")]
    ShapeMismatchError {
        artifact: String,
        expected: usize,
        actual: usize,
    },

    #[error("Inference error: {message}")]
    InferenceError { message: String },

    #[error("No model registered for region '{region}'")]
    MissingRegionError { region: String },
}

impl ServiceError {
    pub fn artifact(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ArtifactError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn shape_mismatch(artifact: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatchError {
            artifact: artifact.into(),
            expected,
            actual,
        }
    }

    /// Hint printed next to fatal startup errors.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::ArtifactError { .. } => {
                "Re-export the artifact; it must be a JSON document with a valid `type` tag"
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags"
            }
            Self::ShapeMismatchError { .. } => {
                "The scaler must be fit on [Price, Area_m2] and every model on 3 features"
            }
            Self::InferenceError { .. } => "Inspect the request payload and model artifact",
            Self::MissingRegionError { .. } => "Provide a model artifact for every region",
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
