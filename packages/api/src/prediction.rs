//! Prediction request/response contract
//!
//! Validates a request, runs the classifier on a batch of one and shapes the
//! result. Errors are returned as [`PredictionError`]; translating them to HTTP
//! happens once, at the route boundary.

use indexmap::IndexMap;
use iris_model::{Classifier, ModelError, N_FEATURES, SPECIES, batch_of_one, species_name};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Decimal places kept for every probability in a response
pub const PROBABILITY_DECIMALS: i32 = 4;

// tolerance for float noise around the [0, 1] bounds
const PROBABILITY_EPSILON: f64 = 1e-9;

/// Species name → probability, in [`SPECIES`] order
pub type Probabilities = IndexMap<String, f64>;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionRequest {
    /// sepal length, sepal width, petal length, petal width (cm)
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PredictionResponse {
    /// Class index into [`SPECIES`]
    pub prediction: usize,
    pub species: String,
    #[schema(value_type = std::collections::HashMap<String, f64>)]
    pub probabilities: Probabilities,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// No classifier was loaded at startup
    #[error("Model not loaded")]
    ModelUnavailable,

    /// Request shape is wrong; the classifier was not called
    #[error("Exactly {expected} features required, got {actual}")]
    Validation { expected: usize, actual: usize },

    /// Inference or result shaping failed
    #[error("Prediction failed: {0}")]
    Inference(String),
}

impl PredictionError {
    /// Failures caused by the request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, PredictionError::Validation { .. })
    }
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::Inference(err.to_string())
    }
}

pub fn round_probability(p: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_DECIMALS);
    (p * scale).round() / scale
}

/// Run one prediction against `classifier`.
///
/// Pure apart from logging; safe to call concurrently.
pub fn predict(
    classifier: Option<&dyn Classifier>,
    request: &PredictionRequest,
) -> Result<PredictionResponse, PredictionError> {
    let result = classifier
        .ok_or(PredictionError::ModelUnavailable)
        .and_then(|classifier| {
            validate(request)?;
            infer(classifier, &request.features)
        });

    match &result {
        Ok(response) => tracing::info!(
            "Prediction made: {} (index {}) with probabilities {:?}",
            response.species,
            response.prediction,
            response.probabilities
        ),
        Err(e) if e.is_client_error() => tracing::warn!("Rejected prediction request: {}", e),
        Err(e) => tracing::error!("Prediction error: {}", e),
    }
    result
}

fn validate(request: &PredictionRequest) -> Result<(), PredictionError> {
    if request.features.len() != N_FEATURES {
        return Err(PredictionError::Validation {
            expected: N_FEATURES,
            actual: request.features.len(),
        });
    }
    Ok(())
}

fn infer(
    classifier: &dyn Classifier,
    features: &[f64],
) -> Result<PredictionResponse, PredictionError> {
    let batch = batch_of_one(features)?;

    let prediction = classifier
        .predict(&batch)?
        .first()
        .copied()
        .ok_or_else(|| PredictionError::Inference("Got an empty prediction".to_string()))?;
    let row = classifier
        .predict_proba(&batch)?
        .into_iter()
        .next()
        .ok_or_else(|| {
            PredictionError::Inference("Got an empty probability batch".to_string())
        })?;

    let species = species_name(prediction).ok_or_else(|| {
        PredictionError::Inference(format!(
            "Couldn't map prediction {} to any of these classes {:?}",
            prediction, SPECIES
        ))
    })?;

    if row.len() != SPECIES.len() {
        return Err(PredictionError::Inference(format!(
            "Expected {} class probabilities, got {}",
            SPECIES.len(),
            row.len()
        )));
    }

    let mut probabilities = Probabilities::with_capacity(SPECIES.len());
    for (name, p) in SPECIES.iter().zip(row) {
        if !p.is_finite() || p < -PROBABILITY_EPSILON || p > 1.0 + PROBABILITY_EPSILON {
            return Err(PredictionError::Inference(format!(
                "Probability for {name} is out of range: {p}"
            )));
        }
        probabilities.insert(name.to_string(), round_probability(p.clamp(0.0, 1.0)));
    }

    Ok(PredictionResponse {
        prediction,
        species: species.to_string(),
        probabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use iris_model::ModelResult;
    use ndarray::Array2;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedClassifier {
        class: usize,
        probabilities: Vec<f64>,
        calls: AtomicUsize,
    }

    impl FixedClassifier {
        fn new(class: usize, probabilities: Vec<f64>) -> Self {
            Self {
                class,
                probabilities,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, batch: &Array2<f64>) -> ModelResult<Vec<usize>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![self.class; batch.nrows()])
        }

        fn predict_proba(&self, batch: &Array2<f64>) -> ModelResult<Vec<Vec<f64>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![self.probabilities.clone(); batch.nrows()])
        }
    }

    struct FailingClassifier;

    impl Classifier for FailingClassifier {
        fn predict(&self, _batch: &Array2<f64>) -> ModelResult<Vec<usize>> {
            Err(ModelError::Prediction("tree exploded".to_string()))
        }

        fn predict_proba(&self, _batch: &Array2<f64>) -> ModelResult<Vec<Vec<f64>>> {
            Err(ModelError::Prediction("tree exploded".to_string()))
        }
    }

    fn request(features: &[f64]) -> PredictionRequest {
        PredictionRequest {
            features: features.to_vec(),
        }
    }

    #[test]
    fn test_predict_shapes_response() {
        let classifier = FixedClassifier::new(0, vec![0.9, 0.1, 0.0]);
        let response = predict(Some(&classifier), &request(&[5.1, 3.5, 1.4, 0.2])).unwrap();

        assert_eq!(response.prediction, 0);
        assert_eq!(response.species, "setosa");
        let keys: Vec<&str> = response.probabilities.keys().map(String::as_str).collect();
        assert_eq!(keys, SPECIES.to_vec());
        let sum: f64 = response.probabilities.values().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_predict_rounds_probabilities() {
        let classifier = FixedClassifier::new(1, vec![0.123456, 0.654321, 0.222223]);
        let response = predict(Some(&classifier), &request(&[6.0, 2.9, 4.5, 1.5])).unwrap();

        assert_eq!(response.species, "versicolor");
        assert_eq!(response.probabilities["setosa"], 0.1235);
        assert_eq!(response.probabilities["versicolor"], 0.6543);
        assert_eq!(response.probabilities["virginica"], 0.2222);
    }

    #[test]
    fn test_predict_without_model() {
        let result = predict(None, &request(&[5.1, 3.5, 1.4, 0.2]));
        assert_eq!(result, Err(PredictionError::ModelUnavailable));

        // model state is checked before the request shape
        let result = predict(None, &request(&[1.0]));
        assert_eq!(result, Err(PredictionError::ModelUnavailable));
    }

    #[test]
    fn test_predict_wrong_length_skips_classifier() {
        let classifier = FixedClassifier::new(0, vec![1.0, 0.0, 0.0]);
        for features in [&[][..], &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0, 4.0, 5.0]] {
            let result = predict(Some(&classifier), &request(features));
            assert_eq!(
                result,
                Err(PredictionError::Validation {
                    expected: 4,
                    actual: features.len()
                })
            );
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_predict_class_outside_table() {
        let classifier = FixedClassifier::new(3, vec![0.2, 0.3, 0.5]);
        let result = predict(Some(&classifier), &request(&[5.1, 3.5, 1.4, 0.2]));
        assert!(matches!(result, Err(PredictionError::Inference(_))));
    }

    #[test]
    fn test_predict_wrong_probability_width() {
        let classifier = FixedClassifier::new(0, vec![0.5, 0.5]);
        let result = predict(Some(&classifier), &request(&[5.1, 3.5, 1.4, 0.2]));
        assert!(matches!(result, Err(PredictionError::Inference(_))));
    }

    #[test]
    fn test_predict_probability_out_of_range() {
        let classifier = FixedClassifier::new(0, vec![1.5, -0.5, 0.0]);
        let result = predict(Some(&classifier), &request(&[5.1, 3.5, 1.4, 0.2]));
        assert!(matches!(result, Err(PredictionError::Inference(_))));

        let classifier = FixedClassifier::new(0, vec![f64::NAN, 0.5, 0.5]);
        let result = predict(Some(&classifier), &request(&[5.1, 3.5, 1.4, 0.2]));
        assert!(matches!(result, Err(PredictionError::Inference(_))));
    }

    #[test]
    fn test_predict_classifier_failure_keeps_message() {
        let result = predict(Some(&FailingClassifier), &request(&[5.1, 3.5, 1.4, 0.2]));
        match result {
            Err(PredictionError::Inference(msg)) => assert!(msg.contains("tree exploded")),
            other => panic!("expected inference error, got {other:?}"),
        }
    }

    #[test]
    fn test_predict_is_idempotent() {
        let classifier = FixedClassifier::new(2, vec![0.01, 0.09, 0.9]);
        let req = request(&[6.3, 3.3, 6.0, 2.5]);
        let a = predict(Some(&classifier), &req).unwrap();
        let b = predict(Some(&classifier), &req).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_validation_is_client_error() {
        assert!(
            PredictionError::Validation {
                expected: 4,
                actual: 0
            }
            .is_client_error()
        );
        assert!(!PredictionError::ModelUnavailable.is_client_error());
        assert!(!PredictionError::Inference("x".to_string()).is_client_error());
    }

    #[test]
    fn test_round_probability() {
        assert_eq!(round_probability(0.99996), 1.0);
        assert_eq!(round_probability(0.00004), 0.0);
        assert_eq!(round_probability(0.33333333), 0.3333);
    }
}
