//! Request-level entry points.
//!
//! [`ScheduleService`] pulls a consistent project snapshot from a
//! [`ProjectStore`] and runs the pure calculators over it. Each call builds
//! its own graph and metrics; the service holds no mutable state, so one
//! instance can serve concurrent requests.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HealthConfig;
use crate::critical_path::{CriticalPathCalculator, CriticalPathResult};
use crate::error::{Result, ScheduleError};
use crate::evm::{HealthEngine, HealthSnapshot, HealthStatus};
use crate::store::ProjectStore;

/// Combined dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDashboard {
    /// Health scores and EVM figures.
    pub health: HealthSnapshot,
    /// Classification of the overall score.
    pub status: HealthStatus,
    /// Early/late windows and critical tasks.
    pub critical_path: CriticalPathResult,
    /// Number of tasks in the project.
    pub task_count: usize,
    /// Whether AC came from the fallback estimator.
    pub actual_cost_estimated: bool,
}

/// Schedule analysis over an injected project store.
#[derive(Debug)]
pub struct ScheduleService<S> {
    store: S,
    engine: HealthEngine,
    calculator: CriticalPathCalculator,
}

impl<S: ProjectStore> ScheduleService<S> {
    /// Creates a service with default health settings.
    pub fn new(store: S) -> Self {
        Self {
            store,
            engine: HealthEngine::new(),
            calculator: CriticalPathCalculator::new(),
        }
    }

    /// Applies a validated health configuration.
    pub fn with_health_config(mut self, config: HealthConfig) -> Result<Self> {
        self.engine = HealthEngine::with_config(config)?;
        Ok(self)
    }

    /// Replaces the health engine (e.g. one with a custom estimator).
    pub fn with_engine(mut self, engine: HealthEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replaces the critical path calculator.
    pub fn with_calculator(mut self, calculator: CriticalPathCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Critical path of a project.
    pub fn compute_critical_path(&self, project_id: &str) -> Result<CriticalPathResult> {
        let _span = tracing::debug_span!("critical_path", project_id).entered();
        let tasks = self.store.list_tasks(project_id)?;
        self.calculator.calculate(&tasks)
    }

    /// Health snapshot of a project on `as_of`.
    ///
    /// A project with no tasks yields [`HealthSnapshot::empty`].
    pub fn compute_schedule_health(
        &self,
        project_id: &str,
        as_of: NaiveDate,
    ) -> Result<HealthSnapshot> {
        let _span = tracing::debug_span!("schedule_health", project_id).entered();
        let snapshot = self.store.snapshot(project_id)?;
        match self
            .engine
            .evaluate(project_id, &snapshot.tasks, &snapshot.cost, as_of)
        {
            Ok(report) => Ok(report.snapshot),
            Err(ScheduleError::InsufficientData { .. }) => {
                tracing::debug!(project_id, "no tasks, returning empty health snapshot");
                Ok(HealthSnapshot::empty(snapshot.cost.normalized().bac))
            }
            Err(e) => Err(e),
        }
    }

    /// Health snapshot of a project as of today (UTC).
    pub fn compute_schedule_health_today(&self, project_id: &str) -> Result<HealthSnapshot> {
        self.compute_schedule_health(project_id, Utc::now().date_naive())
    }

    /// Health, status and critical path from one snapshot.
    ///
    /// A project with no tasks gets [`HealthStatus::NoData`] next to the
    /// empty snapshot.
    ///
    /// # Errors
    /// A dependency cycle fails the whole dashboard; render it with
    /// [`ScheduleError::user_message`].
    pub fn dashboard(&self, project_id: &str, as_of: NaiveDate) -> Result<ProjectDashboard> {
        let _span = tracing::debug_span!("dashboard", project_id).entered();
        let snapshot = self.store.snapshot(project_id)?;
        let critical_path = self.calculator.calculate(&snapshot.tasks)?;

        let (health, status, actual_cost_estimated) =
            match self
                .engine
                .evaluate(project_id, &snapshot.tasks, &snapshot.cost, as_of)
            {
                Ok(report) => (
                    report.snapshot,
                    report.status,
                    report.metrics.actual_cost_estimated,
                ),
                Err(ScheduleError::InsufficientData { .. }) => (
                    HealthSnapshot::empty(snapshot.cost.normalized().bac),
                    HealthStatus::NoData,
                    false,
                ),
                Err(e) => return Err(e),
            };

        Ok(ProjectDashboard {
            status,
            health,
            critical_path,
            task_count: snapshot.tasks.len(),
            actual_cost_estimated,
        })
    }
}
