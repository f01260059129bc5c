//! Critical path output types.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Early/late window of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskScheduleData {
    /// Earliest date the task can start.
    pub earliest_start: NaiveDate,
    /// Earliest date the task can finish.
    pub earliest_finish: NaiveDate,
    /// Latest start that does not delay the project.
    pub latest_start: NaiveDate,
    /// Latest finish that does not delay the project.
    pub latest_finish: NaiveDate,
    /// Total float in days (`latest_finish - earliest_finish`).
    pub float: i64,
}

impl TaskScheduleData {
    /// Whether the task has no scheduling slack.
    pub fn is_critical(&self) -> bool {
        self.float <= 0
    }
}

/// Result of a critical path calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPathResult {
    /// Tasks with zero or negative float.
    pub critical_task_ids: BTreeSet<String>,
    /// Per-task early/late windows keyed by task ID.
    pub schedule_data: BTreeMap<String, TaskScheduleData>,
    /// Earliest start across all tasks. `None` for an empty project.
    pub project_start: Option<NaiveDate>,
    /// Latest early finish across all tasks. `None` for an empty project.
    pub project_finish: Option<NaiveDate>,
}

impl CriticalPathResult {
    /// Whether the task is on the critical path.
    pub fn is_critical(&self, task_id: &str) -> bool {
        self.critical_task_ids.contains(task_id)
    }

    /// Float of a task in days.
    pub fn float_of(&self, task_id: &str) -> Option<i64> {
        self.schedule_data.get(task_id).map(|d| d.float)
    }

    /// Critical tasks ordered by earliest start, then earliest finish.
    pub fn critical_chain(&self) -> Vec<&str> {
        let mut chain: Vec<(&str, &TaskScheduleData)> = self
            .critical_task_ids
            .iter()
            .filter_map(|id| self.schedule_data.get(id).map(|d| (id.as_str(), d)))
            .collect();
        chain.sort_by(|(a_id, a), (b_id, b)| {
            a.earliest_start
                .cmp(&b.earliest_start)
                .then(a.earliest_finish.cmp(&b.earliest_finish))
                .then(a_id.cmp(b_id))
        });
        chain.into_iter().map(|(id, _)| id).collect()
    }

    /// Project length in days from first start to last finish.
    pub fn project_duration_days(&self) -> i64 {
        match (self.project_start, self.project_finish) {
            (Some(start), Some(finish)) => finish.signed_duration_since(start).num_days(),
            _ => 0,
        }
    }

    /// Number of analysed tasks.
    pub fn task_count(&self) -> usize {
        self.schedule_data.len()
    }
}
