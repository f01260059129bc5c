//! Schedule analytics for construction project management.
//!
//! Computes the critical path of a task dependency network and the earned
//! value health of a project. Both calculators are pure functions over
//! in-memory task records; data access is injected through
//! [`store::ProjectStore`].
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Dependency`, `CostAggregate`, `ResourceCost`
//! - **`critical_path`**: Forward/backward pass CPM, float, critical tasks
//! - **`evm`**: PV/EV/AC, SPI/CPI, EAC/ETC/VAC/TCPI, health scores
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling links, durations)
//! - **`config`**: Tunables of the health calculation
//! - **`store`** / **`service`**: Data access seam and request-level entry points
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - PMI (2019), "The Standard for Earned Value Management"

pub mod config;
pub mod critical_path;
pub mod error;
pub mod evm;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{Result, ScheduleError};
