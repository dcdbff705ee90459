//! Dataset splitting and evaluation helpers for the trainer

use crate::error::{ModelError, ModelResult};
use ndarray::{Array1, Array2, Axis};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Records and targets split into a training and a held-out part
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train_records: Array2<f64>,
    pub train_targets: Array1<usize>,
    pub test_records: Array2<f64>,
    pub test_targets: Array1<usize>,
}

/// Shuffle with a seeded RNG and hold out `test_ratio` of the samples
pub fn train_test_split(
    records: &Array2<f64>,
    targets: &Array1<usize>,
    test_ratio: f64,
    seed: u64,
) -> ModelResult<TrainTestSplit> {
    let n_samples = records.nrows();
    if targets.len() != n_samples {
        return Err(ModelError::Training(format!(
            "Got {} targets for {} records",
            targets.len(),
            n_samples
        )));
    }
    if !(0.0..1.0).contains(&test_ratio) {
        return Err(ModelError::Training(format!(
            "test_ratio must be in [0, 1), got {test_ratio}"
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = (n_samples as f64 * test_ratio).round() as usize;
    let (test_indices, train_indices) = indices.split_at(n_test);
    if train_indices.is_empty() {
        return Err(ModelError::Training(
            "Split leaves no samples for training".to_string(),
        ));
    }

    let take = |idx: &[usize]| -> (Array2<f64>, Array1<usize>) {
        let r = records.select(Axis(0), idx);
        let t: Array1<usize> = idx.iter().map(|&i| targets[i]).collect();
        (r, t)
    };

    let (train_records, train_targets) = take(train_indices);
    let (test_records, test_targets) = take(test_indices);

    Ok(TrainTestSplit {
        train_records,
        train_targets,
        test_records,
        test_targets,
    })
}

/// Fraction of predictions matching their target
pub fn accuracy(predictions: &[usize], targets: &Array1<usize>) -> ModelResult<f64> {
    if predictions.len() != targets.len() {
        return Err(ModelError::Training(format!(
            "Got {} predictions for {} targets",
            predictions.len(),
            targets.len()
        )));
    }
    if predictions.is_empty() {
        return Err(ModelError::Training(
            "Cannot score an empty prediction set".to_string(),
        ));
    }
    let correct = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(p, t)| p == t)
        .count();
    Ok(correct as f64 / predictions.len() as f64)
}
