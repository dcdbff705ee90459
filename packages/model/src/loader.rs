//! Resolve, read and write the model artifact on disk

use crate::artifact::MLModel;
use crate::error::{ModelError, ModelResult};
use std::path::{Path, PathBuf};

/// Fixed artifact file name inside the model directory
pub const MODEL_FILE_NAME: &str = "model.pkl";

/// Environment variable holding the model directory
pub const MODEL_DIR_ENV: &str = "MODEL_DIR";

/// Model directory used when [`MODEL_DIR_ENV`] is unset
pub const DEFAULT_MODEL_DIR: &str = "model";

pub fn model_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(MODEL_FILE_NAME)
}

/// Load the artifact stored in `dir`.
///
/// Fails with [`ModelError::NotFound`] when the file is absent and with
/// [`ModelError::Load`] for any read or decode failure.
pub fn load_model(dir: impl AsRef<Path>) -> ModelResult<MLModel> {
    let path = model_path(dir);

    if !path.exists() {
        tracing::error!("Model artifact not found at {}", path.display());
        return Err(ModelError::NotFound { path });
    }

    let result = std::fs::read(&path)
        .map_err(|e| ModelError::Load {
            path: path.clone(),
            source: Box::new(e),
        })
        .and_then(|bytes| {
            MLModel::from_artifact_slice(&bytes).map_err(|e| ModelError::Load {
                path: path.clone(),
                source: Box::new(e),
            })
        });

    match &result {
        Ok(model) => tracing::info!("Loaded {} from {}", model, path.display()),
        Err(e) => tracing::error!("Model loading failed: {}", e),
    }
    result
}

/// Write `model` into `dir`, creating the directory if needed.
/// Returns the path of the written artifact.
pub fn save_model(dir: impl AsRef<Path>, model: &MLModel) -> ModelResult<PathBuf> {
    let dir = dir.as_ref();
    let path = model_path(dir);

    let bytes = model.to_artifact_vec()?;
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(&path, bytes))
        .map_err(|e| ModelError::Save {
            path: path.clone(),
            source: Box::new(e),
        })?;

    tracing::info!("Saved {} to {}", model, path.display());
    Ok(path)
}
