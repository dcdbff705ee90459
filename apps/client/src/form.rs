use iris_api::PredictionRequest;

pub const MIN_MEASUREMENT: f64 = 0.0;
pub const MAX_MEASUREMENT: f64 = 10.0;

pub const DEFAULT_SEPAL_LENGTH: f64 = 5.8;
pub const DEFAULT_SEPAL_WIDTH: f64 = 3.5;
pub const DEFAULT_PETAL_LENGTH: f64 = 4.0;
pub const DEFAULT_PETAL_WIDTH: f64 = 1.3;

/// The four form inputs, in centimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl Default for Measurements {
    fn default() -> Self {
        Self {
            sepal_length: DEFAULT_SEPAL_LENGTH,
            sepal_width: DEFAULT_SEPAL_WIDTH,
            petal_length: DEFAULT_PETAL_LENGTH,
            petal_width: DEFAULT_PETAL_WIDTH,
        }
    }
}

impl Measurements {
    /// Build from raw inputs, clamping each into the slider range.
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self {
            sepal_length: clamp_input(sepal_length, DEFAULT_SEPAL_LENGTH),
            sepal_width: clamp_input(sepal_width, DEFAULT_SEPAL_WIDTH),
            petal_length: clamp_input(petal_length, DEFAULT_PETAL_LENGTH),
            petal_width: clamp_input(petal_width, DEFAULT_PETAL_WIDTH),
        }
    }

    pub fn features(&self) -> [f64; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }

    pub fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            features: self.features().to_vec(),
        }
    }
}

fn clamp_input(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.clamp(MIN_MEASUREMENT, MAX_MEASUREMENT)
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form() {
        assert_eq!(Measurements::default().features(), [5.8, 3.5, 4.0, 1.3]);
    }

    #[test]
    fn test_inputs_are_clamped() {
        let m = Measurements::new(-1.0, 12.5, 10.0, 0.0);
        assert_eq!(m.features(), [0.0, 10.0, 10.0, 0.0]);
    }

    #[test]
    fn test_non_finite_inputs_fall_back_to_defaults() {
        let m = Measurements::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.4);
        assert_eq!(m.features(), [5.8, 3.5, 4.0, 0.4]);
    }

    #[test]
    fn test_request_keeps_feature_order() {
        let m = Measurements::new(5.1, 3.5, 1.4, 0.2);
        assert_eq!(m.to_request().features, vec![5.1, 3.5, 1.4, 0.2]);
    }
}
