//! Bundled Iris dataset

use crate::species::{N_FEATURES, SPECIES};
use ndarray::{Array1, Array2};

/// The 150-sample Iris dataset as (records, class indices).
///
/// Columns follow [`crate::species::FEATURE_NAMES`]; targets index into [`SPECIES`].
pub fn iris() -> (Array2<f64>, Array1<usize>) {
    let dataset = linfa_datasets::iris();
    let records = dataset.records().clone();
    let targets = dataset.targets().clone();
    debug_assert_eq!(records.ncols(), N_FEATURES);
    debug_assert!(targets.iter().all(|&t| t < SPECIES.len()));
    (records, targets)
}
