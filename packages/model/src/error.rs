//! Error types for model loading, training and inference

use std::path::PathBuf;
use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while handling a classifier
#[derive(Error, Debug)]
pub enum ModelError {
    /// No artifact exists at the resolved path
    #[error("Model artifact not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The artifact exists but could not be read or decoded
    #[error("Failed to load model artifact from {}: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The artifact could not be written
    #[error("Failed to save model artifact to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Artifact written by an incompatible format version
    #[error("Unsupported model artifact version: found {found}, expected {expected}")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("Artifact encoding failed: {0}")]
    Encode(#[from] rmp_serde::encode::Error),

    #[error("Artifact decoding failed: {0}")]
    Decode(#[from] rmp_serde::decode::Error),

    /// Input batch does not match what the model was trained on
    #[error("Invalid input shape: {0}")]
    Shape(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Prediction failed: {0}")]
    Prediction(String),
}

impl From<ndarray::ShapeError> for ModelError {
    fn from(err: ndarray::ShapeError) -> Self {
        ModelError::Shape(err.to_string())
    }
}
