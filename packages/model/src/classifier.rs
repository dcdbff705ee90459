use crate::error::ModelResult;
use ndarray::Array2;

/// A trained model that maps feature rows to class indices and class probabilities.
///
/// Implementations must be read-only after construction so a single instance can
/// serve concurrent callers without locking.
pub trait Classifier: Send + Sync {
    /// Predicted class index for every row of `batch`
    fn predict(&self, batch: &Array2<f64>) -> ModelResult<Vec<usize>>;

    /// Probability distribution over classes for every row of `batch`
    fn predict_proba(&self, batch: &Array2<f64>) -> ModelResult<Vec<Vec<f64>>>;
}

/// Wrap a single feature vector as a batch with one row
pub fn batch_of_one(features: &[f64]) -> ModelResult<Array2<f64>> {
    Ok(Array2::from_shape_vec((1, features.len()), features.to_vec())?)
}
