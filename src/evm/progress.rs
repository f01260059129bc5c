//! Actual vs. planned progress.

use chrono::NaiveDate;

use crate::models::Task;

/// Fraction of a task that should be complete on `as_of`.
///
/// - On or after the planned end: 1.0
/// - Before the planned start: 0.0
/// - In between: linear interpolation over calendar days
/// - Missing dates: 1.0 (assumed due)
pub fn planned_progress(task: &Task, as_of: NaiveDate) -> f64 {
    let (Some(start), Some(end)) = (task.start_date, task.end_date) else {
        return 1.0;
    };

    if as_of >= end {
        1.0
    } else if as_of < start {
        0.0
    } else {
        // start <= as_of < end, so the window is at least one day long.
        let window = end.signed_duration_since(start).num_days() as f64;
        let elapsed = as_of.signed_duration_since(start).num_days() as f64;
        elapsed / window
    }
}

/// Mean completion fraction across tasks. `None` for no tasks.
pub fn average_actual_progress(tasks: &[Task]) -> Option<f64> {
    mean(tasks.iter().map(Task::progress_ratio), tasks.len())
}

/// Mean planned completion fraction on `as_of`. `None` for no tasks.
pub fn average_planned_progress(tasks: &[Task], as_of: NaiveDate) -> Option<f64> {
    mean(tasks.iter().map(|t| planned_progress(t, as_of)), tasks.len())
}

fn mean(values: impl Iterator<Item = f64>, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(values.sum::<f64>() / count as f64)
}
