//! Schedule domain models.
//!
//! Plain typed records supplied by the persistence layer. Nothing here is
//! derived: computed schedule dates and EVM figures live in
//! [`crate::critical_path`] and [`crate::evm`].
//!
//! # Domain Mappings
//!
//! | site-schedule | Construction site |
//! |---------------|-------------------|
//! | Task | Work package / activity |
//! | Dependency | Finish-to-start logic link |
//! | ResourceCost | Crew, plant or material line |
//! | CostAggregate | Project budget vs. booked spend |

mod cost;
mod task;

pub(crate) use cost::non_negative;
pub use cost::{CostAggregate, ResourceCost};
pub use task::{Dependency, DependencyKind, Task, TaskStatus};
