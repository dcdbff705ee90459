//! Serialized model artifact
//!
//! The artifact is a MessagePack document holding a format version next to the
//! model itself. The version is decoded first so an incompatible file is reported
//! as such instead of as a confusing field mismatch.

use crate::classifier::Classifier;
use crate::error::{ModelError, ModelResult};
use crate::forest::ForestClassifier;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current artifact format version
pub const ARTIFACT_VERSION: u8 = 1;

/// # Unified type for every classifier the service can load
#[derive(Debug, Serialize, Deserialize)]
pub enum MLModel {
    RandomForest(ForestClassifier),
}

impl fmt::Display for MLModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MLModel::RandomForest(forest) => write!(
                f,
                "Random Forest Classification ({} trees, {} classes)",
                forest.n_trees(),
                forest.n_classes()
            ),
        }
    }
}

impl Classifier for MLModel {
    fn predict(&self, batch: &Array2<f64>) -> ModelResult<Vec<usize>> {
        match self {
            MLModel::RandomForest(forest) => forest.predict(batch),
        }
    }

    fn predict_proba(&self, batch: &Array2<f64>) -> ModelResult<Vec<Vec<f64>>> {
        match self {
            MLModel::RandomForest(forest) => forest.predict_proba(batch),
        }
    }
}

/// Owned form of the on-disk document
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u8,
    pub model: MLModel,
}

#[derive(Serialize)]
struct ModelArtifactRef<'a> {
    version: u8,
    model: &'a MLModel,
}

#[derive(Deserialize)]
struct ArtifactHeader {
    version: u8,
}

impl MLModel {
    /// Encode the model as an artifact document
    pub fn to_artifact_vec(&self) -> ModelResult<Vec<u8>> {
        let artifact = ModelArtifactRef {
            version: ARTIFACT_VERSION,
            model: self,
        };
        Ok(rmp_serde::to_vec_named(&artifact)?)
    }

    /// Decode a model from an artifact document
    pub fn from_artifact_slice(bytes: &[u8]) -> ModelResult<Self> {
        let header: ArtifactHeader = rmp_serde::from_slice(bytes)?;
        if header.version != ARTIFACT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: header.version,
                expected: ARTIFACT_VERSION,
            });
        }

        let artifact: ModelArtifact = rmp_serde::from_slice(bytes)?;
        Ok(artifact.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    fn small_model() -> MLModel {
        let records = array![[0.0, 0.0], [0.2, 0.1], [3.0, 3.0], [3.1, 2.9]];
        let targets: Array1<usize> = array![0, 0, 1, 1];
        let forest = ForestClassifier::params()
            .n_estimators(5)
            .fit(&records, &targets, 2)
            .unwrap();
        MLModel::RandomForest(forest)
    }

    #[test]
    fn test_artifact_preserves_predictions() {
        let model = small_model();
        let bytes = model.to_artifact_vec().unwrap();
        let decoded = MLModel::from_artifact_slice(&bytes).unwrap();

        let batch = array![[0.1, 0.1], [1.5, 1.5], [3.0, 3.0]];
        assert_eq!(
            model.predict_proba(&batch).unwrap(),
            decoded.predict_proba(&batch).unwrap()
        );
    }

    #[test]
    fn test_artifact_rejects_other_version() {
        let model = small_model();
        let bytes = rmp_serde::to_vec_named(&ModelArtifactRef {
            version: ARTIFACT_VERSION + 1,
            model: &model,
        })
        .unwrap();

        let result = MLModel::from_artifact_slice(&bytes);
        assert!(matches!(
            result,
            Err(ModelError::UnsupportedVersion { found, expected })
                if found == ARTIFACT_VERSION + 1 && expected == ARTIFACT_VERSION
        ));
    }

    #[test]
    fn test_artifact_rejects_garbage() {
        let result = MLModel::from_artifact_slice(b"definitely not a model");
        assert!(matches!(result, Err(ModelError::Decode(_))));
    }

    #[test]
    fn test_display_names_model_kind() {
        let model = small_model();
        assert_eq!(
            model.to_string(),
            "Random Forest Classification (5 trees, 2 classes)"
        );
    }
}
