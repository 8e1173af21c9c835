use crate::backend::{Prediction, ProbabilityEntry};
use std::f64::consts::PI;

pub const STAR_GLYPH: &str = "⭐";

/// Radius of the confidence ring, in SVG user units.
pub const RING_RADIUS: f64 = 85.0;

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

pub fn stars(count: i64) -> String {
    STAR_GLYPH.repeat(count.clamp(0, 5) as usize)
}

/// `value` in [0, 1] as a percentage with one decimal, without the `%` sign.
/// Ties round away from zero, so 0.0625 shows as `6.3`.
pub fn percent(value: f64) -> String {
    format!("{:.1}", (value * 1000.0).round() / 10.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    pub label: i64,
    pub stars: String,
    pub percent: String,
}

impl From<&ProbabilityEntry> for ProbabilityBar {
    fn from(entry: &ProbabilityEntry) -> Self {
        Self {
            label: entry.label,
            stars: stars(entry.label),
            percent: percent(entry.probability),
        }
    }
}

/// Everything the results card shows for one prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDisplay {
    pub rating: u8,
    pub stars: String,
    pub confidence_percent: String,
    pub ring_offset: f64,
    pub bars: Vec<ProbabilityBar>,
}

impl ResultDisplay {
    pub fn from_prediction(prediction: &Prediction) -> Self {
        Self {
            rating: prediction.rating,
            stars: stars(i64::from(prediction.rating)),
            confidence_percent: percent(prediction.confidence),
            ring_offset: ring_circumference() * (1.0 - prediction.confidence),
            bars: prediction
                .probabilities
                .iter()
                .map(ProbabilityBar::from)
                .collect(),
        }
    }
}
