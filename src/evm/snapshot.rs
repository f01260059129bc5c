//! Health snapshot returned to dashboard callers.

use serde::{Deserialize, Serialize};

/// Derived, per-request project health.
///
/// Never a source of truth: always recomputed from current task and cost
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    /// Weighted combination of the component scores (0-100).
    pub overall_score: u8,
    /// Score derived from SPI (0-100).
    pub schedule_score: u8,
    /// Score derived from CPI (0-100).
    pub cost_score: u8,
    /// Score derived from SPI × CPI (0-100).
    pub resource_score: u8,
    /// Schedule performance index.
    pub spi: f64,
    /// Cost performance index.
    pub cpi: f64,
    /// EV − PV.
    pub schedule_variance: f64,
    /// EV − AC.
    pub cost_variance: f64,
    /// Budget at completion.
    pub bac: f64,
    /// Estimate at completion.
    pub eac: f64,
    /// Variance at completion.
    pub vac: f64,
    /// To-complete performance index.
    pub tcpi: f64,
}

impl HealthSnapshot {
    /// Zeroed snapshot for a project with no tasks.
    ///
    /// Scores are 0 because nothing was measured; dashboards pair it with
    /// [`HealthStatus::NoData`] rather than classifying the score.
    pub fn empty(bac: f64) -> Self {
        Self {
            overall_score: 0,
            schedule_score: 0,
            cost_score: 0,
            resource_score: 0,
            spi: 0.0,
            cpi: 0.0,
            schedule_variance: 0.0,
            cost_variance: 0.0,
            bac,
            eac: bac,
            vac: 0.0,
            tcpi: 1.0,
        }
    }

    /// Classifies the overall score.
    pub fn status(&self, thresholds: &HealthThresholds) -> HealthStatus {
        thresholds.classify(self.overall_score)
    }
}

/// Health classification for dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Nothing to score yet (no tasks). Sorts before every scored status.
    NoData,
    /// Score below the critical threshold.
    Critical,
    /// Score below the at-risk threshold.
    AtRisk,
    /// Score at or above the at-risk threshold.
    Healthy,
}

/// Score bands for [`HealthStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// Scores below this are at risk.
    pub at_risk_below: u8,
    /// Scores below this are critical.
    pub critical_below: u8,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            at_risk_below: 70,
            critical_below: 40,
        }
    }
}

impl HealthThresholds {
    /// Maps a score to a status.
    pub fn classify(&self, score: u8) -> HealthStatus {
        if score < self.critical_below {
            HealthStatus::Critical
        } else if score < self.at_risk_below {
            HealthStatus::AtRisk
        } else {
            HealthStatus::Healthy
        }
    }
}
