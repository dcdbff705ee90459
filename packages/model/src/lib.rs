//! Iris classifier model
//!
//! The classifier capability consumed by the prediction service, the on-disk
//! artifact format written by the trainer, and the loader that connects the two.
//!
//! Note: the bundled Iris dataset is only available with the `datasets` feature.

pub mod artifact;
pub mod classifier;
#[cfg(feature = "datasets")]
pub mod dataset;
pub mod error;
pub mod forest;
pub mod loader;
pub mod species;
pub mod training;

pub use artifact::{ARTIFACT_VERSION, MLModel, ModelArtifact};
pub use classifier::{Classifier, batch_of_one};
pub use error::{ModelError, ModelResult};
pub use forest::{ForestClassifier, ForestParams};
pub use loader::{
    DEFAULT_MODEL_DIR, MODEL_DIR_ENV, MODEL_FILE_NAME, load_model, model_path, save_model,
};
pub use species::{FEATURE_NAMES, N_FEATURES, SPECIES, species_name};
