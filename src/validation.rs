//! Input validation for schedule analysis.
//!
//! Checks structural integrity of task records before the critical path
//! passes run. Detects:
//! - Duplicate task IDs
//! - Predecessor references to tasks that don't exist
//! - Negative durations
//!
//! Cycles are not checked here: the topological passes in
//! [`crate::critical_path`] detect them as a by-product of Kahn's algorithm.
//! Progress is not checked either; the health engine clamps it to 0..=100
//! and the passes never read it.

use crate::models::Task;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// A task references a predecessor that doesn't exist.
    InvalidPredecessor,
    /// A task has a negative duration.
    NegativeDuration,
    /// Date arithmetic left the representable calendar range.
    DateOutOfRange,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates task records for critical path analysis.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. All predecessor references point to existing tasks
/// 3. Durations are non-negative
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        if task.duration_days < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!(
                    "Task '{}' has negative duration {} days",
                    task.id, task.duration_days
                ),
            ));
        }
    }

    for task in tasks {
        for pred in &task.predecessors {
            if !task_ids.contains(pred.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!(
                        "Task '{}' references unknown predecessor '{}'",
                        task.id, pred
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
