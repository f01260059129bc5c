//! Project cost aggregates.
//!
//! Costs come from resource assignments (labour, plant, materials). The
//! health engine only needs two figures per project: the budget at
//! completion and the recorded actual spend.

use serde::{Deserialize, Serialize};

/// Cost record of one resource assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCost {
    /// Resource identifier (crew, machine, material line).
    pub resource_id: String,
    /// Estimated cost of the assignment.
    pub planned_cost: f64,
    /// Recorded spend. `None` = nothing booked yet.
    pub actual_cost: Option<f64>,
}

impl ResourceCost {
    /// Creates a cost row with no recorded actuals.
    pub fn planned(resource_id: impl Into<String>, planned_cost: f64) -> Self {
        Self {
            resource_id: resource_id.into(),
            planned_cost,
            actual_cost: None,
        }
    }

    /// Records the actual spend.
    pub fn with_actual(mut self, actual_cost: f64) -> Self {
        self.actual_cost = Some(actual_cost);
        self
    }
}

/// Per-project cost figures consumed by the EVM engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostAggregate {
    /// Budget at completion.
    pub bac: f64,
    /// Sum of recorded actual costs. `None` when no actuals exist.
    pub actual_cost: Option<f64>,
}

impl CostAggregate {
    /// Creates an aggregate from a budget and an optional actual spend.
    ///
    /// Negative or non-finite amounts are treated as zero.
    pub fn new(bac: f64, actual_cost: Option<f64>) -> Self {
        Self {
            bac: non_negative(bac),
            actual_cost: actual_cost.map(non_negative),
        }
    }

    /// Aggregate with a budget and no recorded actuals.
    pub fn budget_only(bac: f64) -> Self {
        Self::new(bac, None)
    }

    /// Sums resource cost rows into a project aggregate.
    ///
    /// BAC is the project budget when one is set and positive, otherwise
    /// the sum of planned resource costs. AC is the sum of recorded
    /// actuals, or `None` when no row has any.
    pub fn from_resource_costs(budget: Option<f64>, rows: &[ResourceCost]) -> Self {
        let planned_total: f64 = rows.iter().map(|r| non_negative(r.planned_cost)).sum();
        let bac = match budget.map(non_negative) {
            Some(b) if b > 0.0 => b,
            _ => planned_total,
        };

        let actual_cost = rows
            .iter()
            .filter_map(|r| r.actual_cost)
            .map(non_negative)
            .fold(None, |acc: Option<f64>, c| Some(acc.unwrap_or(0.0) + c));

        Self { bac, actual_cost }
    }

    /// Re-applies the non-negative clamp.
    ///
    /// Aggregates built by struct literal or deserialization bypass
    /// [`CostAggregate::new`]; this brings them back into range.
    pub fn normalized(self) -> Self {
        Self::new(self.bac, self.actual_cost)
    }

    /// Whether explicit actual costs were recorded.
    pub fn has_actuals(&self) -> bool {
        self.actual_cost.is_some()
    }
}

/// Monetary amount clamped to a finite, non-negative value.
pub(crate) fn non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_takes_precedence() {
        let rows = vec![
            ResourceCost::planned("crane", 20_000.0),
            ResourceCost::planned("crew", 30_000.0),
        ];
        let agg = CostAggregate::from_resource_costs(Some(100_000.0), &rows);
        assert_eq!(agg.bac, 100_000.0);
        assert_eq!(agg.actual_cost, None);
        assert!(!agg.has_actuals());
    }

    #[test]
    fn test_bac_falls_back_to_planned_sum() {
        let rows = vec![
            ResourceCost::planned("crane", 20_000.0).with_actual(5_000.0),
            ResourceCost::planned("crew", 30_000.0),
            ResourceCost::planned("rebar", 10_000.0).with_actual(2_500.0),
        ];
        let agg = CostAggregate::from_resource_costs(None, &rows);
        assert_eq!(agg.bac, 60_000.0);
        assert_eq!(agg.actual_cost, Some(7_500.0));

        let zero_budget = CostAggregate::from_resource_costs(Some(0.0), &rows);
        assert_eq!(zero_budget.bac, 60_000.0);
    }

    #[test]
    fn test_negative_amounts_clamped() {
        let agg = CostAggregate::new(-5.0, Some(-1.0));
        assert_eq!(agg.bac, 0.0);
        assert_eq!(agg.actual_cost, Some(0.0));

        let nan = CostAggregate::new(f64::NAN, None);
        assert_eq!(nan.bac, 0.0);
    }

    #[test]
    fn test_deserialized_negative_amounts_normalized() {
        let raw: CostAggregate =
            serde_json::from_str(r#"{"bac":-1000.0,"actual_cost":-10.0}"#).unwrap();
        assert_eq!(raw.bac, -1000.0);

        let agg = raw.normalized();
        assert_eq!(agg.bac, 0.0);
        assert_eq!(agg.actual_cost, Some(0.0));
        assert_eq!(CostAggregate::budget_only(500.0).normalized().bac, 500.0);
    }

    #[test]
    fn test_empty_rows() {
        let agg = CostAggregate::from_resource_costs(None, &[]);
        assert_eq!(agg, CostAggregate::default());
    }
}
