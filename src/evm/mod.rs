//! Earned value management and schedule health.
//!
//! Derives PV/EV/AC, the performance indices and the cost forecast of a
//! project from task progress and cost aggregates, then folds them into a
//! 0-100 health score.
//!
//! # Components
//!
//! - [`EvmMetrics`]: raw EVM indicators with guarded divisions
//! - [`ActualCostEstimator`] / [`CostFallback`]: stand-in AC when no spend is booked
//! - [`ScoreCurve`] / [`ScoreWeights`]: index → score mapping
//! - [`HealthEngine`]: evaluation entry point producing a [`HealthReport`]
//!
//! # References
//!
//! - PMI (2019), "The Standard for Earned Value Management"
//! - Fleming & Koppelman (2010), "Earned Value Project Management"

mod engine;
mod estimator;
mod metrics;
mod progress;
mod score;
mod snapshot;

pub use engine::{HealthEngine, HealthReport};
pub use estimator::{ActualCostEstimator, CostFallback};
pub use metrics::{EvmInputs, EvmMetrics};
pub use progress::{average_actual_progress, average_planned_progress, planned_progress};
pub use score::{round_score, ScoreCurve, ScoreWeights};
pub use snapshot::{HealthSnapshot, HealthStatus, HealthThresholds};
