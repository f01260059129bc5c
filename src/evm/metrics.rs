//! Earned value metrics.
//!
//! Computes the standard EVM indicators from a budget, average progress
//! figures and an actual cost.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | PV | BAC × planned progress |
//! | EV | BAC × actual progress |
//! | SPI | EV / PV (0 when PV = 0) |
//! | CPI | EV / AC (0 when AC = 0) |
//! | SV / CV | EV − PV / EV − AC |
//! | EAC | BAC / CPI, or BAC when CPI is 0 or exactly 1 |
//! | ETC | max(0, EAC − AC) |
//! | VAC | BAC − EAC |
//! | TCPI | (BAC − EV) / (BAC − AC), or 1 when either term is ≤ 0 |
//! | SCI | SPI × CPI |
//!
//! # Reference
//! PMI (2019), "The Standard for Earned Value Management"

use serde::{Deserialize, Serialize};

use crate::models::non_negative;

/// Inputs to an EVM calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvmInputs {
    /// Budget at completion.
    pub bac: f64,
    /// Mean actual completion (0.0..=1.0).
    pub avg_actual_progress: f64,
    /// Mean planned completion (0.0..=1.0).
    pub avg_planned_progress: f64,
    /// Actual cost to date.
    pub actual_cost: f64,
    /// Whether `actual_cost` came from an estimator rather than records.
    pub actual_cost_estimated: bool,
}

/// Earned value indicators.
///
/// All monetary values are in project currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmMetrics {
    /// Budget at completion.
    pub bac: f64,
    /// Planned value.
    pub pv: f64,
    /// Earned value.
    pub ev: f64,
    /// Actual cost.
    pub ac: f64,
    /// Schedule performance index.
    pub spi: f64,
    /// Cost performance index.
    pub cpi: f64,
    /// Schedule-cost index (SPI × CPI).
    pub sci: f64,
    /// Schedule variance (EV − PV).
    pub schedule_variance: f64,
    /// Cost variance (EV − AC).
    pub cost_variance: f64,
    /// Estimate at completion.
    pub eac: f64,
    /// Estimate to complete.
    pub etc: f64,
    /// Variance at completion.
    pub vac: f64,
    /// To-complete performance index.
    pub tcpi: f64,
    /// Mean actual completion (0.0..=1.0).
    pub avg_actual_progress: f64,
    /// Mean planned completion (0.0..=1.0).
    pub avg_planned_progress: f64,
    /// Whether AC was estimated.
    pub actual_cost_estimated: bool,
}

impl EvmMetrics {
    /// Computes EVM metrics.
    ///
    /// Every division is guarded: a zero denominator yields 0 for SPI and
    /// CPI and 1 for TCPI, never NaN or infinity. Negative or non-finite
    /// amounts are read as 0 and progress is clamped to 0.0..=1.0.
    pub fn calculate(inputs: &EvmInputs) -> Self {
        let bac = non_negative(inputs.bac);
        let ac = non_negative(inputs.actual_cost);
        let avg_actual_progress = fraction(inputs.avg_actual_progress);
        let avg_planned_progress = fraction(inputs.avg_planned_progress);
        let pv = bac * avg_planned_progress;
        let ev = bac * avg_actual_progress;

        let spi = ratio_or_zero(ev, pv);
        let cpi = ratio_or_zero(ev, ac);

        let eac = if cpi > 0.0 && (cpi - 1.0).abs() > f64::EPSILON {
            bac / cpi
        } else {
            bac
        };

        let remaining_work = bac - ev;
        let remaining_budget = bac - ac;
        let tcpi = if remaining_work > 0.0 && remaining_budget > 0.0 {
            remaining_work / remaining_budget
        } else {
            1.0
        };

        Self {
            bac,
            pv,
            ev,
            ac,
            spi,
            cpi,
            sci: spi * cpi,
            schedule_variance: ev - pv,
            cost_variance: ev - ac,
            eac,
            etc: (eac - ac).max(0.0),
            vac: bac - eac,
            tcpi,
            avg_actual_progress,
            avg_planned_progress,
            actual_cost_estimated: inputs.actual_cost_estimated,
        }
    }

    /// Whether SPI has a non-zero denominator.
    pub fn spi_defined(&self) -> bool {
        self.pv > 0.0
    }

    /// Whether CPI has a non-zero denominator.
    pub fn cpi_defined(&self) -> bool {
        self.ac > 0.0
    }

    /// Ahead of (or on) schedule.
    pub fn is_ahead_of_schedule(&self) -> bool {
        self.schedule_variance >= 0.0
    }

    /// Under (or on) budget.
    pub fn is_under_budget(&self) -> bool {
        self.cost_variance >= 0.0
    }
}

fn fraction(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}
