use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to fallback labels produced after an inference failure.
pub const ESTIMATED_SUFFIX: &str = " (Estimated)";

/// Outcome of a single classification.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prediction {
    /// Top class reported by the loaded model.
    Real { label: String, confidence: f64 },
    /// Random guess after the loaded model failed on this input.
    Estimated { label: String, confidence: f64 },
    /// Random guess because no model could be loaded at startup.
    Unavailable { label: String, confidence: f64 },
}

impl Prediction {
    /// Label as presented to clients. Estimated guesses carry [`ESTIMATED_SUFFIX`].
    pub fn display_label(&self) -> String {
        match self {
            Prediction::Estimated { label, .. } => format!("{label}{ESTIMATED_SUFFIX}"),
            Prediction::Real { label, .. } | Prediction::Unavailable { label, .. } => {
                label.clone()
            }
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Prediction::Real { label, .. }
            | Prediction::Estimated { label, .. }
            | Prediction::Unavailable { label, .. } => label,
        }
    }

    /// Confidence percentage in `[0, 100]`, two decimal places.
    pub fn confidence(&self) -> f64 {
        match self {
            Prediction::Real { confidence, .. }
            | Prediction::Estimated { confidence, .. }
            | Prediction::Unavailable { confidence, .. } => *confidence,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Prediction::Real { .. } => "real",
            Prediction::Estimated { .. } => "estimated",
            Prediction::Unavailable { .. } => "unavailable",
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Prediction::Real { .. })
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.display_label(), self.confidence())
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a probability into a rounded percentage clamped to `[0, 100]`.
pub fn to_percentage(probability: f32) -> f64 {
    round2(f64::from(probability) * 100.0).clamp(0.0, 100.0)
}
