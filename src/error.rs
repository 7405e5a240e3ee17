//! Error types for the fidelis crate

use thiserror::Error;

/// Result type alias for fidelity operations
pub type Result<T> = std::result::Result<T, FidelisError>;

/// Main error type for the fidelis crate
#[derive(Error, Debug)]
pub enum FidelisError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FidelisError {
    fn from(err: serde_json::Error) -> Self {
        FidelisError::SerializationError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for FidelisError {
    fn from(err: ndarray::ShapeError) -> Self {
        FidelisError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FidelisError::FeatureNotFound("petal_width".to_string());
        assert_eq!(err.to_string(), "Feature not found: petal_width");
    }

    #[test]
    fn test_shape_error_display() {
        let err = FidelisError::ShapeError {
            expected: "4 features".to_string(),
            actual: "3 features".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid shape: expected 4 features, got 3 features");
    }
}
