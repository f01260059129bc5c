//! Data access for schedule analysis.
//!
//! The persistence layer (relational tables for projects, tasks, resource
//! assignments) is an external collaborator. [`ProjectStore`] is the seam:
//! backends implement it, the analysis core only reads through it.
//!
//! A single computation must see tasks and their dependency edges from one
//! consistent snapshot. Backends that read tasks and edges separately
//! should override [`ProjectStore::snapshot`] to do both inside one
//! transaction.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Result, ScheduleError};
use crate::models::{CostAggregate, Task};

/// Tasks and costs of one project, read together.
#[derive(Debug, Clone, Default)]
pub struct ProjectSnapshot {
    /// Tasks with their predecessor links.
    pub tasks: Vec<Task>,
    /// Budget and recorded spend.
    pub cost: CostAggregate,
}

/// Read access to project schedule data.
pub trait ProjectStore: Send + Sync {
    /// Lists a project's tasks with predecessor links.
    fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>>;

    /// Returns a project's budget and recorded actual cost.
    fn list_cost_aggregates(&self, project_id: &str) -> Result<CostAggregate>;

    /// Reads tasks and costs as one snapshot.
    fn snapshot(&self, project_id: &str) -> Result<ProjectSnapshot> {
        Ok(ProjectSnapshot {
            tasks: self.list_tasks(project_id)?,
            cost: self.list_cost_aggregates(project_id)?,
        })
    }
}

/// In-memory [`ProjectStore`] for embedding and tests.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    projects: RwLock<HashMap<String, ProjectSnapshot>>,
}

impl InMemoryProjectStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a project.
    pub fn upsert_project(
        &self,
        project_id: impl Into<String>,
        tasks: Vec<Task>,
        cost: CostAggregate,
    ) -> Result<()> {
        let mut projects = self.projects.write().map_err(|_| poisoned())?;
        projects.insert(project_id.into(), ProjectSnapshot { tasks, cost });
        Ok(())
    }

    /// Replaces one task of a project, or appends it if new.
    pub fn upsert_task(&self, project_id: &str, task: Task) -> Result<()> {
        let mut projects = self.projects.write().map_err(|_| poisoned())?;
        let project = projects
            .get_mut(project_id)
            .ok_or_else(|| ScheduleError::ProjectNotFound(project_id.to_string()))?;
        match project.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task,
            None => project.tasks.push(task),
        }
        Ok(())
    }

    /// Removes a project. Returns whether it existed.
    pub fn remove_project(&self, project_id: &str) -> Result<bool> {
        let mut projects = self.projects.write().map_err(|_| poisoned())?;
        Ok(projects.remove(project_id).is_some())
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn list_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self.snapshot(project_id)?.tasks)
    }

    fn list_cost_aggregates(&self, project_id: &str) -> Result<CostAggregate> {
        Ok(self.snapshot(project_id)?.cost)
    }

    fn snapshot(&self, project_id: &str) -> Result<ProjectSnapshot> {
        let projects = self.projects.read().map_err(|_| poisoned())?;
        projects
            .get(project_id)
            .cloned()
            .ok_or_else(|| ScheduleError::ProjectNotFound(project_id.to_string()))
    }
}

fn poisoned() -> ScheduleError {
    ScheduleError::Store("project store lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_project() {
        let store = InMemoryProjectStore::new();
        store
            .upsert_project(
                "P1",
                vec![Task::new("A"), Task::new("B").with_predecessor("A")],
                CostAggregate::budget_only(10_000.0),
            )
            .unwrap();

        let snap = store.snapshot("P1").unwrap();
        assert_eq!(snap.tasks.len(), 2);
        assert_eq!(snap.cost.bac, 10_000.0);
        assert_eq!(store.list_tasks("P1").unwrap()[1].predecessors, vec!["A"]);
        assert_eq!(store.list_cost_aggregates("P1").unwrap().bac, 10_000.0);
    }

    #[test]
    fn test_upsert_task() {
        let store = InMemoryProjectStore::new();
        store
            .upsert_project("P1", vec![Task::new("A")], CostAggregate::default())
            .unwrap();

        store
            .upsert_task("P1", Task::new("A").with_progress(30.0))
            .unwrap();
        store.upsert_task("P1", Task::new("B")).unwrap();

        let tasks = store.list_tasks("P1").unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].progress, 30.0);
        assert!(store.upsert_task("NOPE", Task::new("X")).is_err());
    }

    #[test]
    fn test_missing_project() {
        let store = InMemoryProjectStore::new();
        let err = store.snapshot("ghost").unwrap_err();
        assert!(matches!(err, ScheduleError::ProjectNotFound(id) if id == "ghost"));
    }

    #[test]
    fn test_remove_project() {
        let store = InMemoryProjectStore::new();
        store
            .upsert_project("P1", vec![], CostAggregate::default())
            .unwrap();
        assert!(store.remove_project("P1").unwrap());
        assert!(!store.remove_project("P1").unwrap());
    }

    struct SplitStore;

    impl ProjectStore for SplitStore {
        fn list_tasks(&self, _project_id: &str) -> Result<Vec<Task>> {
            Ok(vec![Task::new("only")])
        }

        fn list_cost_aggregates(&self, _project_id: &str) -> Result<CostAggregate> {
            Ok(CostAggregate::new(5.0, Some(1.0)))
        }
    }

    #[test]
    fn test_default_snapshot_combines_reads() {
        let snap = SplitStore.snapshot("any").unwrap();
        assert_eq!(snap.tasks.len(), 1);
        assert_eq!(snap.cost.actual_cost, Some(1.0));
    }
}
