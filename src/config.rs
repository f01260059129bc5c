//! Health engine configuration.
//!
//! Every tunable of the health calculation lives here: the actual-cost
//! fallback, the index→score curve, component weights and status bands.
//! Configuration is plain serde data so hosts can load it from JSON.
//!
//! ```
//! use site_schedule::config::HealthConfig;
//!
//! let config = HealthConfig::from_json(r#"{
//!     "cost_fallback": { "strategy": "earned_value" },
//!     "weights": { "schedule": 2.0 }
//! }"#).unwrap();
//! assert_eq!(config.weights.schedule, 2.0);
//! assert_eq!(config.weights.cost, 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::evm::{CostFallback, HealthThresholds, ScoreCurve, ScoreWeights};

/// Tunables of the schedule health calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Stand-in actual cost when no spend is recorded.
    pub cost_fallback: CostFallback,
    /// Index → score mapping.
    pub score_curve: ScoreCurve,
    /// Component weights for the overall score.
    pub weights: ScoreWeights,
    /// Score given to a component whose index is undefined.
    pub neutral_score: u8,
    /// Status bands.
    pub thresholds: HealthThresholds,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            cost_fallback: CostFallback::default(),
            score_curve: ScoreCurve::default(),
            weights: ScoreWeights::default(),
            neutral_score: 50,
            thresholds: HealthThresholds::default(),
        }
    }
}

impl HealthConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ScheduleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the actual-cost fallback.
    pub fn with_cost_fallback(mut self, fallback: CostFallback) -> Self {
        self.cost_fallback = fallback;
        self
    }

    /// Sets the score curve.
    pub fn with_score_curve(mut self, curve: ScoreCurve) -> Self {
        self.score_curve = curve;
        self
    }

    /// Sets the component weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the neutral score.
    pub fn with_neutral_score(mut self, score: u8) -> Self {
        self.neutral_score = score;
        self
    }

    /// Sets the status bands.
    pub fn with_thresholds(mut self, thresholds: HealthThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Checks internal consistency.
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        for (name, value) in [
            ("schedule", w.schedule),
            ("cost", w.cost),
            ("resource", w.resource),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScheduleError::Config(format!(
                    "{name} weight must be a non-negative number, got {value}"
                )));
            }
        }
        if w.total() <= 0.0 {
            return Err(ScheduleError::Config(
                "score weights must not all be zero".into(),
            ));
        }

        if let CostFallback::ProgressMarkup { factor } = self.cost_fallback {
            if !factor.is_finite() || factor <= 0.0 {
                return Err(ScheduleError::Config(format!(
                    "progress markup factor must be positive, got {factor}"
                )));
            }
        }

        let param = self.score_curve.parameter();
        if !param.is_finite() || param <= 0.0 {
            return Err(ScheduleError::Config(format!(
                "score curve parameter must be positive, got {param}"
            )));
        }

        if self.neutral_score > 100 {
            return Err(ScheduleError::Config(format!(
                "neutral score must be 0-100, got {}",
                self.neutral_score
            )));
        }

        let t = &self.thresholds;
        if t.critical_below > t.at_risk_below || t.at_risk_below > 100 {
            return Err(ScheduleError::Config(format!(
                "thresholds must satisfy critical_below <= at_risk_below <= 100, got {} / {}",
                t.critical_below, t.at_risk_below
            )));
        }

        Ok(())
    }
}
