//! Critical path method (CPM).
//!
//! Computes earliest/latest start and finish dates over a finish-to-start
//! task dependency graph, derives total float, and flags the tasks with no
//! slack as critical.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use site_schedule::critical_path::compute_critical_path;
//! use site_schedule::models::Task;
//!
//! let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
//! let tasks = vec![
//!     Task::new("excavation").with_duration_days(4).with_start_date(start),
//!     Task::new("footings").with_duration_days(6).with_predecessor("excavation"),
//!     Task::new("survey").with_duration_days(1).with_start_date(start),
//! ];
//!
//! let result = compute_critical_path(&tasks).unwrap();
//! assert_eq!(result.critical_chain(), vec!["excavation", "footings"]);
//! assert_eq!(result.float_of("survey"), Some(9));
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Kahn (1962), "Topological sorting of large networks"

mod calculator;
mod graph;
mod result;

pub use calculator::{compute_critical_path, CriticalPathCalculator};
pub use result::{CriticalPathResult, TaskScheduleData};
