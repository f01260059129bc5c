//! Schedule health engine.
//!
//! # Algorithm
//!
//! 1. Average actual and planned progress across tasks.
//! 2. AC from recorded costs, else from the configured estimator.
//! 3. EVM metrics (see [`EvmMetrics`]).
//! 4. Component scores: schedule from SPI, cost from CPI, resource from
//!    SPI × CPI. A component whose index is undefined gets the neutral score.
//! 5. Overall score = weighted mean of the components.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::estimator::ActualCostEstimator;
use super::metrics::{EvmInputs, EvmMetrics};
use super::progress::{average_actual_progress, average_planned_progress};
use super::score::round_score;
use super::snapshot::{HealthSnapshot, HealthStatus};
use crate::config::HealthConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{CostAggregate, Task};

/// Full output of a health evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// Dashboard snapshot.
    pub snapshot: HealthSnapshot,
    /// Underlying EVM figures.
    pub metrics: EvmMetrics,
    /// Classification of the overall score.
    pub status: HealthStatus,
    /// Number of evaluated tasks.
    pub task_count: usize,
}

/// Computes EVM metrics and health scores.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use site_schedule::evm::HealthEngine;
/// use site_schedule::models::{CostAggregate, Task};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 7, day).unwrap();
/// let tasks = vec![
///     Task::new("slab").with_dates(d(1), d(11)).with_progress(60.0),
/// ];
/// let cost = CostAggregate::new(100_000.0, Some(50_000.0));
///
/// let report = HealthEngine::new().evaluate("P1", &tasks, &cost, d(6)).unwrap();
/// assert!((report.metrics.spi - 1.2).abs() < 1e-9);
/// assert!((report.metrics.cpi - 1.2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct HealthEngine {
    config: HealthConfig,
    estimator: Arc<dyn ActualCostEstimator>,
}

impl Default for HealthEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::from_valid_config(HealthConfig::default())
    }

    /// Creates an engine from a configuration.
    ///
    /// The estimator is the configuration's `cost_fallback`.
    ///
    /// # Errors
    /// [`ScheduleError::Config`] when [`HealthConfig::validate`] rejects it.
    pub fn with_config(config: HealthConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: HealthConfig) -> Self {
        let estimator: Arc<dyn ActualCostEstimator> = Arc::new(config.cost_fallback.clone());
        Self { config, estimator }
    }

    /// Replaces the actual-cost estimator.
    pub fn with_estimator(mut self, estimator: Arc<dyn ActualCostEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Evaluates project health on `as_of`.
    ///
    /// Cost figures are clamped to non-negative amounts first.
    ///
    /// # Errors
    /// [`ScheduleError::InsufficientData`] when `tasks` is empty.
    pub fn evaluate(
        &self,
        project_id: &str,
        tasks: &[Task],
        cost: &CostAggregate,
        as_of: NaiveDate,
    ) -> Result<HealthReport> {
        let cost = cost.normalized();
        let insufficient = || ScheduleError::InsufficientData {
            project_id: project_id.to_string(),
        };
        let avg_actual = average_actual_progress(tasks).ok_or_else(insufficient)?;
        let avg_planned = average_planned_progress(tasks, as_of).ok_or_else(insufficient)?;

        let (actual_cost, estimated) = match cost.actual_cost {
            Some(ac) => (ac, false),
            None => {
                let ac = self.estimator.estimate(cost.bac, avg_actual).max(0.0);
                tracing::warn!(
                    project_id,
                    estimator = self.estimator.name(),
                    actual_cost = ac,
                    "no recorded actual costs, using estimate"
                );
                (ac, true)
            }
        };

        let metrics = EvmMetrics::calculate(&EvmInputs {
            bac: cost.bac,
            avg_actual_progress: avg_actual,
            avg_planned_progress: avg_planned,
            actual_cost,
            actual_cost_estimated: estimated,
        });

        let snapshot = self.snapshot(&metrics);
        let status = snapshot.status(&self.config.thresholds);

        tracing::debug!(
            project_id,
            tasks = tasks.len(),
            spi = metrics.spi,
            cpi = metrics.cpi,
            overall = snapshot.overall_score,
            "schedule health evaluated"
        );

        Ok(HealthReport {
            snapshot,
            metrics,
            status,
            task_count: tasks.len(),
        })
    }

    /// Builds the dashboard snapshot from EVM metrics.
    pub fn snapshot(&self, metrics: &EvmMetrics) -> HealthSnapshot {
        let curve = &self.config.score_curve;
        let neutral = f64::from(self.config.neutral_score);

        let schedule = if metrics.spi_defined() {
            curve.score(metrics.spi)
        } else {
            neutral
        };
        let cost = if metrics.cpi_defined() {
            curve.score(metrics.cpi)
        } else {
            neutral
        };
        let resource = if metrics.spi_defined() && metrics.cpi_defined() {
            curve.score(metrics.sci)
        } else {
            neutral
        };

        let schedule_score = round_score(schedule);
        let cost_score = round_score(cost);
        let resource_score = round_score(resource);
        let overall = self.config.weights.combine(
            f64::from(schedule_score),
            f64::from(cost_score),
            f64::from(resource_score),
        );

        HealthSnapshot {
            overall_score: round_score(overall),
            schedule_score,
            cost_score,
            resource_score,
            spi: metrics.spi,
            cpi: metrics.cpi,
            schedule_variance: metrics.schedule_variance,
            cost_variance: metrics.cost_variance,
            bac: metrics.bac,
            eac: metrics.eac,
            vac: metrics.vac,
            tcpi: metrics.tcpi,
        }
    }
}
