use crate::form::Measurements;
use iris_api::PredictionResponse;
use iris_model::{FEATURE_NAMES, SPECIES};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn percentage(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

fn bar(p: f64) -> String {
    let filled = (p.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// "sepal_length" → "Sepal length"
pub fn feature_label(name: &str) -> String {
    capitalize(&name.replace('_', " "))
}

/// The submitted measurements, one labelled line each
pub fn render_measurements(measurements: &Measurements) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Measurements (cm):");
    let width = FEATURE_NAMES.iter().map(|n| n.len()).max().unwrap_or(0);
    for (name, value) in FEATURE_NAMES.iter().zip(measurements.features()) {
        let _ = writeln!(out, "  {:<width$}  {:>5.2}", feature_label(name), value);
    }
    out
}

/// Species headline followed by one probability line per species, in table order.
pub fn render_prediction(response: &PredictionResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Predicted species: {}", capitalize(&response.species));
    let _ = writeln!(out);
    let _ = writeln!(out, "Probabilities:");

    let width = SPECIES.iter().map(|s| s.len()).max().unwrap_or(0);
    for species in SPECIES {
        let p = response.probabilities.get(species).copied().unwrap_or(0.0);
        let _ = writeln!(
            out,
            "  {:<width$}  {:>7}  {}",
            capitalize(species),
            percentage(p),
            bar(p),
            width = width
        );
    }
    out
}
