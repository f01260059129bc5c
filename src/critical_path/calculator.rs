//! Forward/backward pass critical path calculator.
//!
//! # Algorithm
//!
//! 1. Build successor/predecessor adjacency and in-degrees.
//! 2. Forward pass (Kahn): start tasks seed from their planned start date;
//!    every other task starts at the latest early finish of its predecessors.
//! 3. Project finish = max early finish.
//! 4. Backward pass (out-degree queue): end tasks finish at the project
//!    finish; every other task finishes at the earliest late start of its
//!    successors.
//! 5. Float = late finish - early finish. Float <= 0 marks a critical task.
//!
//! # Complexity
//! O(V + E).
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use std::collections::VecDeque;

use chrono::{NaiveDate, TimeDelta};

use super::graph::TaskGraph;
use super::result::{CriticalPathResult, TaskScheduleData};
use crate::error::{Result, ScheduleError};
use crate::models::Task;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Critical path calculator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use site_schedule::critical_path::CriticalPathCalculator;
/// use site_schedule::models::Task;
///
/// let day0 = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
/// let tasks = vec![
///     Task::new("A").with_duration_days(5).with_start_date(day0),
///     Task::new("B").with_duration_days(3).with_predecessor("A"),
/// ];
///
/// let result = CriticalPathCalculator::new().calculate(&tasks).unwrap();
/// assert!(result.is_critical("A"));
/// assert!(result.is_critical("B"));
/// assert_eq!(result.project_duration_days(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CriticalPathCalculator {
    anchor: Option<NaiveDate>,
}

impl CriticalPathCalculator {
    /// Creates a new calculator.
    pub fn new() -> Self {
        Self { anchor: None }
    }

    /// Sets the fallback start date for start tasks without a planned start.
    ///
    /// Without an anchor, such tasks start at the earliest planned start
    /// date found among all tasks.
    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Computes early/late windows, float and the critical task set.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidInput`] for duplicate IDs, unknown
    ///   predecessors or negative durations.
    /// - [`ScheduleError::CyclicDependency`] when the dependency graph has a cycle.
    /// - [`ScheduleError::MissingStartDate`] when a start task cannot be anchored.
    pub fn calculate(&self, tasks: &[Task]) -> Result<CriticalPathResult> {
        let graph = TaskGraph::build(tasks)?;
        if graph.len() == 0 {
            return Ok(CriticalPathResult::default());
        }

        let anchor = self
            .anchor
            .or_else(|| tasks.iter().filter_map(|t| t.start_date).min());

        let (early_start, early_finish) = forward_pass(&graph, anchor)?;

        let project_start = early_start.iter().copied().min();
        let project_finish = early_finish.iter().copied().max();
        let Some(finish) = project_finish else {
            return Ok(CriticalPathResult::default());
        };

        let (late_start, late_finish) = backward_pass(&graph, finish)?;

        let mut result = CriticalPathResult {
            project_start,
            project_finish,
            ..CriticalPathResult::default()
        };

        for i in 0..graph.len() {
            let data = TaskScheduleData {
                earliest_start: early_start[i],
                earliest_finish: early_finish[i],
                latest_start: late_start[i],
                latest_finish: late_finish[i],
                float: late_finish[i]
                    .signed_duration_since(early_finish[i])
                    .num_days(),
            };
            if data.is_critical() {
                result.critical_task_ids.insert(graph.id(i).to_string());
            }
            result.schedule_data.insert(graph.id(i).to_string(), data);
        }

        tracing::debug!(
            tasks = graph.len(),
            edges = graph.edge_count(),
            critical = result.critical_task_ids.len(),
            project_finish = %finish,
            "critical path computed"
        );

        Ok(result)
    }
}

/// Computes the critical path with default settings.
///
/// Shorthand for `CriticalPathCalculator::new().calculate(tasks)`.
pub fn compute_critical_path(tasks: &[Task]) -> Result<CriticalPathResult> {
    CriticalPathCalculator::new().calculate(tasks)
}

fn forward_pass(
    graph: &TaskGraph<'_>,
    anchor: Option<NaiveDate>,
) -> Result<(Vec<NaiveDate>, Vec<NaiveDate>)> {
    let n = graph.len();
    let mut in_degree: Vec<usize> = graph.predecessors.iter().map(Vec::len).collect();
    let mut early_start: Vec<Option<NaiveDate>> = vec![None; n];
    let mut early_finish: Vec<Option<NaiveDate>> = vec![None; n];
    let mut queue = VecDeque::new();

    for i in 0..n {
        if in_degree[i] == 0 {
            let task = &graph.tasks[i];
            let start = task
                .start_date
                .or(anchor)
                .ok_or_else(|| ScheduleError::MissingStartDate {
                    task_id: task.id.clone(),
                })?;
            let finish = add_days(start, task.duration_days, &task.id)?;
            early_start[i] = Some(start);
            early_finish[i] = Some(finish);
            queue.push_back((i, finish));
        }
    }

    // Queue entries carry the early finish of the dequeued task.
    let mut processed = 0;
    while let Some((i, finish)) = queue.pop_front() {
        processed += 1;

        for &succ in &graph.successors[i] {
            let start = early_start[succ].map_or(finish, |current| current.max(finish));
            early_start[succ] = Some(start);
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                let task = &graph.tasks[succ];
                let succ_finish = add_days(start, task.duration_days, &task.id)?;
                early_finish[succ] = Some(succ_finish);
                queue.push_back((succ, succ_finish));
            }
        }
    }

    if processed < n {
        let task_ids: Vec<String> = (0..n)
            .filter(|&i| in_degree[i] > 0)
            .map(|i| graph.id(i).to_string())
            .collect();
        tracing::warn!(tasks = ?task_ids, "cyclic dependency in forward pass");
        return Err(ScheduleError::CyclicDependency { task_ids });
    }

    Ok((collect_dates(graph, early_start)?, collect_dates(graph, early_finish)?))
}

fn backward_pass(
    graph: &TaskGraph<'_>,
    project_finish: NaiveDate,
) -> Result<(Vec<NaiveDate>, Vec<NaiveDate>)> {
    let n = graph.len();
    let mut out_degree: Vec<usize> = graph.successors.iter().map(Vec::len).collect();
    let mut late_start: Vec<Option<NaiveDate>> = vec![None; n];
    let mut late_finish: Vec<Option<NaiveDate>> = vec![None; n];
    let mut queue = VecDeque::new();

    for i in 0..n {
        if out_degree[i] == 0 {
            let task = &graph.tasks[i];
            let start = add_days(project_finish, -task.duration_days, &task.id)?;
            late_finish[i] = Some(project_finish);
            late_start[i] = Some(start);
            queue.push_back((i, start));
        }
    }

    // Queue entries carry the late start of the dequeued task.
    let mut processed = 0;
    while let Some((i, start)) = queue.pop_front() {
        processed += 1;

        for &pred in &graph.predecessors[i] {
            let finish = late_finish[pred].map_or(start, |current| current.min(start));
            late_finish[pred] = Some(finish);
            out_degree[pred] -= 1;
            if out_degree[pred] == 0 {
                let task = &graph.tasks[pred];
                let pred_start = add_days(finish, -task.duration_days, &task.id)?;
                late_start[pred] = Some(pred_start);
                queue.push_back((pred, pred_start));
            }
        }
    }

    if processed < n {
        let task_ids: Vec<String> = (0..n)
            .filter(|&i| out_degree[i] > 0)
            .map(|i| graph.id(i).to_string())
            .collect();
        tracing::warn!(tasks = ?task_ids, "cyclic dependency in backward pass");
        return Err(ScheduleError::CyclicDependency { task_ids });
    }

    Ok((collect_dates(graph, late_start)?, collect_dates(graph, late_finish)?))
}

fn add_days(date: NaiveDate, days: i64, task_id: &str) -> Result<NaiveDate> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
            ScheduleError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::DateOutOfRange,
                format!("Task '{task_id}' moves {date} by {days} days out of range"),
            )])
        })
}

/// Unwraps per-task dates after a complete pass.
fn collect_dates(graph: &TaskGraph<'_>, dates: Vec<Option<NaiveDate>>) -> Result<Vec<NaiveDate>> {
    dates
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            d.ok_or_else(|| ScheduleError::CyclicDependency {
                task_ids: vec![graph.id(i).to_string()],
            })
        })
        .collect()
}
