//! Task model.
//!
//! A task is a unit of site work (excavation, formwork, MEP rough-in, ...)
//! with a planned duration, a planned date window, progress tracking and
//! finish-to-start links to the tasks that must complete before it.
//!
//! Derived schedule values (earliest/latest dates, float) are never stored
//! here. They are recomputed by [`crate::critical_path`] on every request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Execution status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not begun.
    #[default]
    NotStarted,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Derives a status from a percent-complete value.
    pub fn from_progress(progress: f64) -> Self {
        if progress >= 100.0 {
            Self::Completed
        } else if progress > 0.0 {
            Self::InProgress
        } else {
            Self::NotStarted
        }
    }
}

/// Dependency type between two tasks.
///
/// Only finish-to-start links take part in the critical path calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// Successor starts once the predecessor finishes (no lag).
    #[default]
    FinishToStart,
}

/// A directed dependency edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Task that must finish first.
    pub predecessor_id: String,
    /// Task that waits on the predecessor.
    pub successor_id: String,
    /// Link semantics.
    pub kind: DependencyKind,
}

/// A schedulable construction task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Planned working duration in days. Must be non-negative.
    pub duration_days: i64,
    /// Planned start date.
    pub start_date: Option<NaiveDate>,
    /// Planned end date.
    pub end_date: Option<NaiveDate>,
    /// Date work actually began.
    pub actual_start_date: Option<NaiveDate>,
    /// Date work actually finished.
    pub actual_end_date: Option<NaiveDate>,
    /// Percent complete (0-100).
    pub progress: f64,
    /// Execution status.
    pub status: TaskStatus,
    /// IDs of tasks that must finish before this one starts.
    pub predecessors: Vec<String>,
}

impl Task {
    /// Creates a new task with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_days: 0,
            start_date: None,
            end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            progress: 0.0,
            status: TaskStatus::NotStarted,
            predecessors: Vec::new(),
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the planned duration in days.
    pub fn with_duration_days(mut self, days: i64) -> Self {
        self.duration_days = days;
        self
    }

    /// Sets the planned start and end dates.
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the planned start date only.
    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Records actual start and (optionally) finish dates.
    pub fn with_actual_dates(mut self, start: NaiveDate, end: Option<NaiveDate>) -> Self {
        self.actual_start_date = Some(start);
        self.actual_end_date = end;
        self
    }

    /// Sets percent complete and derives the status from it.
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self.status = TaskStatus::from_progress(progress);
        self
    }

    /// Overrides the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Adds a finish-to-start predecessor.
    pub fn with_predecessor(mut self, predecessor_id: impl Into<String>) -> Self {
        self.predecessors.push(predecessor_id.into());
        self
    }

    /// Progress as a fraction, clamped to `0.0..=1.0`.
    ///
    /// Non-finite progress counts as zero.
    pub fn progress_ratio(&self) -> f64 {
        if self.progress.is_finite() {
            (self.progress / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Incoming dependency edges of this task.
    pub fn dependencies(&self) -> impl Iterator<Item = Dependency> + '_ {
        self.predecessors.iter().map(move |pred| Dependency {
            predecessor_id: pred.clone(),
            successor_id: self.id.clone(),
            kind: DependencyKind::FinishToStart,
        })
    }

    /// Whether this task has no predecessors.
    pub fn is_start_task(&self) -> bool {
        self.predecessors.is_empty()
    }
}
