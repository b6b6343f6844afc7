use ort::Error as OrtError;
use std::fmt;

/// Represents the different types of errors that can occur in the price predictor.
#[derive(Debug)]
pub enum PredictorError {
    /// The requested location is not part of the trained vocabulary
    UnknownLocation(String),
    /// Error occurred while loading or running the ONNX model
    ModelError(String),
    /// Error occurred during the build phase
    BuildError(String),
    /// Error occurred while making predictions
    PredictionError(String),
    /// Error occurred due to invalid input parameters
    ValidationError(String),
}

impl fmt::Display for PredictorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownLocation(name) => {
                write!(f, "Unknown location: '{}' is not in the trained vocabulary", name)
            }
            Self::ModelError(msg) => write!(f, "Model error: {}", msg),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
            Self::PredictionError(msg) => write!(f, "Prediction error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for PredictorError {}

impl From<OrtError> for PredictorError {
    fn from(err: OrtError) -> Self {
        PredictorError::BuildError(err.to_string())
    }
}
