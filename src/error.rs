//! Error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors raised by schedule analysis.
///
/// Degenerate arithmetic (zero planned value, zero actual cost, a finished
/// project) is never an error; those cases resolve to defined sentinel
/// values. Only structurally invalid input or collaborator failures end up
/// here.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The dependency graph contains a cycle.
    #[error("cyclic dependency detected among tasks: {}", .task_ids.join(", "))]
    CyclicDependency {
        /// Tasks that could not be ordered (cycle members and their dependents).
        task_ids: Vec<String>,
    },

    /// The project has no tasks to evaluate.
    #[error("project '{project_id}' has no tasks")]
    InsufficientData {
        /// Project identifier.
        project_id: String,
    },

    /// Task records failed validation.
    #[error("invalid task data: {}", format_validation(.0))]
    InvalidInput(Vec<ValidationError>),

    /// No start date is available to anchor a task without predecessors.
    #[error("no start date available to anchor task '{task_id}'")]
    MissingStartDate {
        /// Task that could not be anchored.
        task_id: String,
    },

    /// The requested project does not exist.
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    /// The persistence collaborator failed.
    #[error("project store error: {0}")]
    Store(String),

    /// Health configuration is inconsistent.
    #[error("invalid health configuration: {0}")]
    Config(String),
}

impl ScheduleError {
    /// Whether this is a dependency cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicDependency { .. })
    }

    /// Message suitable for a dashboard banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::CyclicDependency { task_ids } => format!(
                "unable to compute schedule health: cyclic dependency detected ({})",
                task_ids.join(", ")
            ),
            Self::InsufficientData { .. } => "no tasks to evaluate yet".to_string(),
            other => format!("unable to compute schedule health: {other}"),
        }
    }
}

impl From<Vec<ValidationError>> for ScheduleError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
