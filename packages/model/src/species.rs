//! Fixed Iris label and feature tables

/// Class index → species name. The order is part of the wire contract.
pub const SPECIES: [&str; 3] = ["setosa", "versicolor", "virginica"];

/// Number of measurements per sample
pub const N_FEATURES: usize = 4;

/// Measurement names in the order the classifier expects them (cm)
pub const FEATURE_NAMES: [&str; N_FEATURES] =
    ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Map a predicted class index to its species name
pub fn species_name(index: usize) -> Option<&'static str> {
    SPECIES.get(index).copied()
}
