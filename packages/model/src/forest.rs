//! Bagged ensemble of decision trees
//!
//! Each tree is fitted with [`linfa_trees`] on a bootstrap resample of the training
//! records. Class probabilities are the fraction of trees voting for each class and
//! the predicted class is the most probable one.

use crate::classifier::Classifier;
use crate::error::{ModelError, ModelResult};
use linfa::DatasetBase;
use linfa::traits::{Fit, Predict};
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Hyperparameters for [`ForestClassifier`]
#[derive(Debug, Clone)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_estimators: usize,
    /// Maximum depth of every tree. None means unlimited.
    pub max_depth: Option<usize>,
    /// Seed for the bootstrap resampling
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: Some(10),
            seed: 42,
        }
    }
}

impl ForestParams {
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Fit the ensemble on `records` (one row per sample) labelled with `targets`.
    ///
    /// `n_classes` fixes the width of the probability vectors so that classes missing
    /// from a bootstrap sample still get a (zero) slot.
    pub fn fit(
        &self,
        records: &Array2<f64>,
        targets: &Array1<usize>,
        n_classes: usize,
    ) -> ModelResult<ForestClassifier> {
        let n_samples = records.nrows();
        if n_samples == 0 {
            return Err(ModelError::Training("Cannot fit on an empty dataset".to_string()));
        }
        if targets.len() != n_samples {
            return Err(ModelError::Training(format!(
                "Got {} targets for {} records",
                targets.len(),
                n_samples
            )));
        }
        if self.n_estimators == 0 {
            return Err(ModelError::Training(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if let Some(bad) = targets.iter().find(|&&t| t >= n_classes) {
            return Err(ModelError::Training(format!(
                "Target class {bad} is outside 0..{n_classes}"
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            let indices: Vec<usize> = (0..n_samples)
                .map(|_| rng.random_range(0..n_samples))
                .collect();
            let sample_records = records.select(Axis(0), &indices);
            let sample_targets: Array1<usize> = indices.iter().map(|&i| targets[i]).collect();
            let ds = DatasetBase::from(sample_records).with_targets(sample_targets);

            let mut params = DecisionTree::<f64, usize>::params();
            if let Some(depth) = self.max_depth {
                params = params.max_depth(Some(depth));
            }
            let tree = params
                .fit(&ds)
                .map_err(|e| ModelError::Training(e.to_string()))?;
            trees.push(tree);
        }

        tracing::debug!(
            "Fitted forest with {} trees on {} samples",
            trees.len(),
            n_samples
        );

        Ok(ForestClassifier {
            n_features: records.ncols(),
            n_classes,
            trees,
        })
    }
}

/// # Random forest classifier over [`linfa_trees::DecisionTree`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ForestClassifier {
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree<f64, usize>>,
}

impl ForestClassifier {
    pub fn params() -> ForestParams {
        ForestParams::default()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    fn check_batch(&self, batch: &Array2<f64>) -> ModelResult<()> {
        if batch.ncols() != self.n_features {
            return Err(ModelError::Shape(format!(
                "expected {} features per row, got {}",
                self.n_features,
                batch.ncols()
            )));
        }
        if self.trees.is_empty() {
            return Err(ModelError::Prediction("Forest contains no trees".to_string()));
        }
        Ok(())
    }
}

impl Classifier for ForestClassifier {
    fn predict(&self, batch: &Array2<f64>) -> ModelResult<Vec<usize>> {
        let probabilities = self.predict_proba(batch)?;
        Ok(probabilities
            .iter()
            .map(|row| {
                // first maximum wins ties
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |best, (class, &p)| {
                        if p > best.1 { (class, p) } else { best }
                    })
                    .0
            })
            .collect())
    }

    fn predict_proba(&self, batch: &Array2<f64>) -> ModelResult<Vec<Vec<f64>>> {
        self.check_batch(batch)?;

        let mut votes = Array2::<f64>::zeros((batch.nrows(), self.n_classes));
        for tree in &self.trees {
            let predictions: Array1<usize> = tree.predict(batch);
            for (row, &class) in predictions.iter().enumerate() {
                if class >= self.n_classes {
                    return Err(ModelError::Prediction(format!(
                        "Tree voted for class {class} but the model only knows {} classes",
                        self.n_classes
                    )));
                }
                votes[[row, class]] += 1.0;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(votes
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|v| v / n_trees).collect())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy_dataset() -> (Array2<f64>, Array1<usize>) {
        let records = array![
            [1.0, 1.0],
            [1.1, 0.9],
            [0.9, 1.2],
            [5.0, 5.0],
            [5.2, 4.8],
            [4.9, 5.1],
        ];
        let targets = array![0, 0, 0, 1, 1, 1];
        (records, targets)
    }

    #[test]
    fn test_default_params() {
        let params = ForestClassifier::params();
        assert_eq!(params.n_estimators, 100);
        assert_eq!(params.max_depth, Some(10));
        assert_eq!(params.seed, 42);
    }

    #[test]
    fn test_fit_and_predict_separable() {
        let (records, targets) = toy_dataset();
        let forest = ForestClassifier::params()
            .n_estimators(15)
            .fit(&records, &targets, 2)
            .unwrap();

        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.n_features(), 2);

        let batch = array![[1.0, 1.0], [5.0, 5.0]];
        let predictions = forest.predict(&batch).unwrap();
        assert_eq!(predictions, vec![0, 1]);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let (records, targets) = toy_dataset();
        let forest = ForestClassifier::params()
            .n_estimators(10)
            .fit(&records, &targets, 3)
            .unwrap();

        let batch = array![[1.0, 1.0], [3.0, 3.0], [5.0, 5.0]];
        let probabilities = forest.predict_proba(&batch).unwrap();
        assert_eq!(probabilities.len(), 3);
        for row in &probabilities {
            assert_eq!(row.len(), 3);
            let sum: f64 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9);
            assert!(row.iter().all(|p| (0.0..=1.0).contains(p)));
            // class 2 never appears in the training targets
            assert_eq!(row[2], 0.0);
        }
    }

    #[test]
    fn test_fit_is_deterministic_for_seed() {
        let (records, targets) = toy_dataset();
        let params = ForestClassifier::params().n_estimators(8).seed(7);
        let a = params.fit(&records, &targets, 2).unwrap();
        let b = params.fit(&records, &targets, 2).unwrap();

        let batch = array![[2.5, 2.5], [3.5, 3.0]];
        assert_eq!(
            a.predict_proba(&batch).unwrap(),
            b.predict_proba(&batch).unwrap()
        );
    }

    #[test]
    fn test_fit_rejects_empty_dataset() {
        let records = Array2::<f64>::zeros((0, 2));
        let targets = Array1::<usize>::zeros(0);
        let result = ForestClassifier::params().fit(&records, &targets, 2);
        assert!(matches!(result, Err(ModelError::Training(_))));
    }

    #[test]
    fn test_fit_rejects_mismatched_targets() {
        let (records, _) = toy_dataset();
        let targets = array![0, 1];
        let result = ForestClassifier::params().fit(&records, &targets, 2);
        assert!(matches!(result, Err(ModelError::Training(_))));
    }

    #[test]
    fn test_fit_rejects_zero_estimators() {
        let (records, targets) = toy_dataset();
        let result = ForestClassifier::params()
            .n_estimators(0)
            .fit(&records, &targets, 2);
        assert!(matches!(result, Err(ModelError::Training(_))));
    }

    #[test]
    fn test_fit_rejects_target_outside_class_range() {
        let (records, targets) = toy_dataset();
        let result = ForestClassifier::params().fit(&records, &targets, 1);
        assert!(matches!(result, Err(ModelError::Training(_))));
    }

    #[test]
    fn test_predict_rejects_wrong_width() {
        let (records, targets) = toy_dataset();
        let forest = ForestClassifier::params()
            .n_estimators(3)
            .fit(&records, &targets, 2)
            .unwrap();

        let batch = array![[1.0, 1.0, 1.0]];
        assert!(matches!(forest.predict(&batch), Err(ModelError::Shape(_))));
        assert!(matches!(
            forest.predict_proba(&batch),
            Err(ModelError::Shape(_))
        ));
    }
}
