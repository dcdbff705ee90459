use iris_model::dataset::iris;
use iris_model::training::{accuracy, train_test_split};
use iris_model::{Classifier, ForestClassifier, MLModel, ModelResult, SPECIES, save_model};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub test_ratio: f64,
    pub seed: u64,
}

#[derive(Debug, Clone)]
pub struct TrainReport {
    pub path: PathBuf,
    pub accuracy: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// Fit on the Iris dataset, score the hold-out split and save the artifact.
pub fn run(model_dir: &Path, options: &TrainOptions) -> ModelResult<TrainReport> {
    let (records, targets) = iris();
    tracing::info!(
        "Loaded Iris dataset: {} samples, {} features",
        records.nrows(),
        records.ncols()
    );

    let split = train_test_split(&records, &targets, options.test_ratio, options.seed)?;

    let forest = ForestClassifier::params()
        .n_estimators(options.n_estimators)
        .max_depth(options.max_depth)
        .seed(options.seed)
        .fit(&split.train_records, &split.train_targets, SPECIES.len())?;
    let model = MLModel::RandomForest(forest);
    tracing::info!("Trained {}", model);

    let accuracy = if split.test_targets.is_empty() {
        tracing::warn!("No hold-out samples, skipping evaluation");
        0.0
    } else {
        let predictions = model.predict(&split.test_records)?;
        accuracy(&predictions, &split.test_targets)?
    };
    tracing::info!("Test accuracy: {:.4}", accuracy);

    let path = save_model(model_dir, &model)?;

    Ok(TrainReport {
        path,
        accuracy,
        n_train: split.train_targets.len(),
        n_test: split.test_targets.len(),
    })
}
