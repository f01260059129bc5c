//! Actual-cost estimation when no spend has been booked.
//!
//! Projects often track progress long before cost records arrive. In that
//! case the engine asks an [`ActualCostEstimator`] for a stand-in AC. The
//! estimate drives CPI, EAC and TCPI, so the strategy is pluggable.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Produces an actual-cost figure from budget and progress.
pub trait ActualCostEstimator: Send + Sync + Debug {
    /// Strategy name (for logs).
    fn name(&self) -> &'static str;

    /// Estimated actual cost.
    ///
    /// `avg_progress` is the mean completion fraction (0.0..=1.0).
    fn estimate(&self, bac: f64, avg_progress: f64) -> f64;
}

/// Built-in estimation strategies, selectable from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum CostFallback {
    /// `BAC × min(1, progress × factor)`. Assumes spend runs ahead of progress.
    ProgressMarkup {
        /// Spend-to-progress multiplier.
        factor: f64,
    },
    /// AC = EV, i.e. spending exactly on plan (CPI = 1).
    EarnedValue,
    /// AC = 0. CPI becomes undefined and is reported as 0.
    Zero,
}

impl CostFallback {
    /// Default markup applied by [`CostFallback::ProgressMarkup`].
    pub const DEFAULT_MARKUP: f64 = 1.1;
}

impl Default for CostFallback {
    fn default() -> Self {
        Self::ProgressMarkup {
            factor: Self::DEFAULT_MARKUP,
        }
    }
}

impl ActualCostEstimator for CostFallback {
    fn name(&self) -> &'static str {
        match self {
            Self::ProgressMarkup { .. } => "progress_markup",
            Self::EarnedValue => "earned_value",
            Self::Zero => "zero",
        }
    }

    fn estimate(&self, bac: f64, avg_progress: f64) -> f64 {
        match self {
            Self::ProgressMarkup { factor } => bac * (avg_progress * factor).min(1.0),
            Self::EarnedValue => bac * avg_progress,
            Self::Zero => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_markup() {
        let est = CostFallback::default();
        assert_eq!(est.name(), "progress_markup");
        assert!((est.estimate(100_000.0, 0.5) - 55_000.0).abs() < 1e-6);
        // Saturates at BAC
        assert!((est.estimate(100_000.0, 0.95) - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_earned_value_parity() {
        let est = CostFallback::EarnedValue;
        assert!((est.estimate(80_000.0, 0.25) - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero() {
        assert_eq!(CostFallback::Zero.estimate(80_000.0, 0.25), 0.0);
    }

    #[test]
    fn test_serde_tagged() {
        let parsed: CostFallback =
            serde_json::from_str(r#"{"strategy":"progress_markup","factor":1.25}"#).unwrap();
        assert_eq!(parsed, CostFallback::ProgressMarkup { factor: 1.25 });

        let parsed: CostFallback = serde_json::from_str(r#"{"strategy":"earned_value"}"#).unwrap();
        assert_eq!(parsed, CostFallback::EarnedValue);
    }
}
