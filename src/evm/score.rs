//! Performance index → 0-100 score mapping.
//!
//! Every curve is monotonic in the index, maps an index of 1.0 (on plan)
//! to 50 and saturates at 0 and 100.

use serde::{Deserialize, Serialize};

/// Curve turning a performance index into a score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreCurve {
    /// `clamp(50 + (index − 1) × slope, 0, 100)`.
    Linear {
        /// Points per unit of index deviation.
        slope: f64,
    },
    /// `100 / (1 + e^(−steepness × (index − 1)))`.
    Logistic {
        /// Growth rate around index 1.0.
        steepness: f64,
    },
}

impl Default for ScoreCurve {
    fn default() -> Self {
        Self::Linear { slope: 100.0 }
    }
}

impl ScoreCurve {
    /// Score in `0.0..=100.0`. Non-finite indices score 0.
    pub fn score(&self, index: f64) -> f64 {
        if !index.is_finite() {
            return 0.0;
        }
        let raw = match *self {
            Self::Linear { slope } => 50.0 + (index - 1.0) * slope,
            Self::Logistic { steepness } => 100.0 / (1.0 + (-steepness * (index - 1.0)).exp()),
        };
        raw.clamp(0.0, 100.0)
    }

    /// Curve parameter (slope or steepness).
    pub fn parameter(&self) -> f64 {
        match *self {
            Self::Linear { slope } => slope,
            Self::Logistic { steepness } => steepness,
        }
    }
}

/// Relative weights of the component scores in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Weight of the schedule score.
    pub schedule: f64,
    /// Weight of the cost score.
    pub cost: f64,
    /// Weight of the resource score.
    pub resource: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            schedule: 1.0,
            cost: 1.0,
            resource: 1.0,
        }
    }
}

impl ScoreWeights {
    /// Creates weights.
    pub fn new(schedule: f64, cost: f64, resource: f64) -> Self {
        Self {
            schedule,
            cost,
            resource,
        }
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.schedule + self.cost + self.resource
    }

    /// Weighted mean of three component scores.
    ///
    /// Falls back to the plain mean when the weights sum to zero.
    pub fn combine(&self, schedule: f64, cost: f64, resource: f64) -> f64 {
        let total = self.total();
        if total > 0.0 {
            (schedule * self.schedule + cost * self.cost + resource * self.resource) / total
        } else {
            (schedule + cost + resource) / 3.0
        }
    }
}

/// Rounds a score to the integer range 0..=100.
pub fn round_score(score: f64) -> u8 {
    if score.is_finite() {
        score.clamp(0.0, 100.0).round() as u8
    } else {
        0
    }
}
