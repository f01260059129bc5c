//! Dense task graph.
//!
//! Tasks are addressed by their position in the input slice; string IDs
//! are resolved once while building the adjacency lists.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::models::Task;
use crate::validation::validate_tasks;

/// Successor and predecessor adjacency over a task slice.
#[derive(Debug)]
pub(crate) struct TaskGraph<'a> {
    pub(crate) tasks: &'a [Task],
    /// `successors[i]` = tasks that wait on task `i`.
    pub(crate) successors: Vec<Vec<usize>>,
    /// `predecessors[i]` = tasks that task `i` waits on.
    pub(crate) predecessors: Vec<Vec<usize>>,
}

impl<'a> TaskGraph<'a> {
    /// Validates the tasks and builds adjacency lists.
    ///
    /// Repeated predecessor entries on a task collapse into one edge.
    pub(crate) fn build(tasks: &'a [Task]) -> Result<Self> {
        validate_tasks(tasks)?;

        let index: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        let n = tasks.len();
        let mut successors = vec![Vec::new(); n];
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut seen = HashSet::new();

        for (succ, task) in tasks.iter().enumerate() {
            seen.clear();
            for pred_id in &task.predecessors {
                // References were checked by validate_tasks.
                let Some(&pred) = index.get(pred_id.as_str()) else {
                    continue;
                };
                if seen.insert(pred) {
                    predecessors[succ].push(pred);
                    successors[pred].push(succ);
                }
            }
        }

        Ok(Self {
            tasks,
            successors,
            predecessors,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.predecessors.iter().map(Vec::len).sum()
    }

    pub(crate) fn id(&self, i: usize) -> &'a str {
        &self.tasks[i].id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;

    #[test]
    fn test_build_adjacency() {
        let tasks = vec![
            Task::new("A"),
            Task::new("B").with_predecessor("A"),
            Task::new("C").with_predecessor("A").with_predecessor("B"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.successors[0], vec![1, 2]);
        assert_eq!(graph.predecessors[2], vec![0, 1]);
        assert_eq!(graph.id(1), "B");
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let tasks = vec![
            Task::new("A"),
            Task::new("B").with_predecessor("A").with_predecessor("A"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.successors[0], vec![1]);
    }

    #[test]
    fn test_interleaved_duplicates_keep_first_order() {
        let tasks = vec![
            Task::new("A"),
            Task::new("B"),
            Task::new("C")
                .with_predecessor("B")
                .with_predecessor("A")
                .with_predecessor("B")
                .with_predecessor("A"),
        ];
        let graph = TaskGraph::build(&tasks).unwrap();
        assert_eq!(graph.predecessors[2], vec![1, 0]);
        assert_eq!(graph.successors[0], vec![2]);
        assert_eq!(graph.successors[1], vec![2]);
    }

    #[test]
    fn test_invalid_reference_rejected() {
        let tasks = vec![Task::new("A").with_predecessor("Z")];
        let err = TaskGraph::build(&tasks).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput(_)));
    }
}
