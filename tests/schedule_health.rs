//! End-to-end schedule health scenarios through the public API.

use std::sync::Arc;

use chrono::NaiveDate;

use site_schedule::config::HealthConfig;
use site_schedule::evm::{
    ActualCostEstimator, CostFallback, EvmInputs, EvmMetrics, HealthEngine, HealthStatus,
};
use site_schedule::models::{CostAggregate, ResourceCost, Task};
use site_schedule::service::ScheduleService;
use site_schedule::store::InMemoryProjectStore;
use site_schedule::ScheduleError;

fn day(month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, d).unwrap()
}

fn midrise_tasks() -> Vec<Task> {
    vec![
        Task::new("site-prep")
            .with_name("Site preparation")
            .with_duration_days(10)
            .with_dates(day(3, 1), day(3, 11))
            .with_progress(100.0),
        Task::new("foundation")
            .with_name("Foundation")
            .with_duration_days(20)
            .with_dates(day(3, 11), day(3, 31))
            .with_predecessor("site-prep")
            .with_progress(60.0),
        Task::new("utilities")
            .with_name("Utility trenching")
            .with_duration_days(5)
            .with_dates(day(3, 11), day(3, 16))
            .with_predecessor("site-prep")
            .with_progress(100.0),
        Task::new("frame")
            .with_name("Structural frame")
            .with_duration_days(30)
            .with_dates(day(3, 31), day(4, 30))
            .with_predecessor("foundation")
            .with_predecessor("utilities"),
    ]
}

#[test]
fn evm_reference_figures() {
    let m = EvmMetrics::calculate(&EvmInputs {
        bac: 100_000.0,
        avg_actual_progress: 0.5,
        avg_planned_progress: 0.4,
        actual_cost: 45_000.0,
        actual_cost_estimated: false,
    });
    assert!((m.ev - 50_000.0).abs() < 1e-6);
    assert!((m.pv - 40_000.0).abs() < 1e-6);
    assert!((m.schedule_variance - 10_000.0).abs() < 1e-6);
    assert!((m.spi - 1.25).abs() < 1e-12);
}

#[test]
fn tcpi_is_one_when_fully_earned() {
    let m = EvmMetrics::calculate(&EvmInputs {
        bac: 100_000.0,
        avg_actual_progress: 1.0,
        avg_planned_progress: 1.0,
        actual_cost: 70_000.0,
        actual_cost_estimated: false,
    });
    assert!((m.ev - 100_000.0).abs() < 1e-6);
    assert_eq!(m.tcpi, 1.0);
}

#[test]
fn zero_denominators_never_produce_nan() {
    let m = EvmMetrics::calculate(&EvmInputs {
        bac: 0.0,
        avg_actual_progress: 0.0,
        avg_planned_progress: 0.0,
        actual_cost: 0.0,
        actual_cost_estimated: true,
    });
    for value in [m.spi, m.cpi, m.eac, m.etc, m.vac, m.tcpi, m.sci] {
        assert!(value.is_finite());
    }
    assert_eq!(m.spi, 0.0);
    assert_eq!(m.cpi, 0.0);
}

#[test]
fn midrise_project_dashboard() {
    let rows = vec![
        ResourceCost::planned("excavator", 40_000.0).with_actual(38_000.0),
        ResourceCost::planned("concrete-crew", 120_000.0).with_actual(70_000.0),
        ResourceCost::planned("steel-erectors", 240_000.0),
    ];
    let cost = CostAggregate::from_resource_costs(None, &rows);
    assert_eq!(cost.bac, 400_000.0);
    assert_eq!(cost.actual_cost, Some(108_000.0));

    let store = InMemoryProjectStore::new();
    store
        .upsert_project("midrise", midrise_tasks(), cost)
        .unwrap();
    let service = ScheduleService::new(store);

    let dash = service.dashboard("midrise", day(3, 21)).unwrap();

    let cp = &dash.critical_path;
    assert_eq!(
        cp.critical_chain(),
        vec!["site-prep", "foundation", "frame"]
    );
    assert_eq!(cp.float_of("utilities"), Some(15));
    assert_eq!(cp.project_finish, Some(day(4, 30)));

    // planned: 1, 0.5, 1, 0 → 0.625; actual: 1, 0.6, 1, 0 → 0.65
    let h = dash.health;
    assert!((h.spi - 0.65 / 0.625).abs() < 1e-9);
    assert!((h.cpi - 260_000.0 / 108_000.0).abs() < 1e-9);
    assert!(h.schedule_variance > 0.0);
    assert!(h.overall_score <= 100);
    assert!(!dash.actual_cost_estimated);
    assert_eq!(dash.task_count, 4);
}

#[test]
fn dashboard_json_matches_contract() {
    let store = InMemoryProjectStore::new();
    store
        .upsert_project(
            "midrise",
            midrise_tasks(),
            CostAggregate::budget_only(400_000.0),
        )
        .unwrap();
    let service = ScheduleService::new(store);

    let health = service
        .compute_schedule_health("midrise", day(3, 21))
        .unwrap();
    let json = serde_json::to_value(health).unwrap();
    for key in [
        "overallScore",
        "scheduleScore",
        "costScore",
        "resourceScore",
        "spi",
        "cpi",
        "scheduleVariance",
        "costVariance",
        "bac",
        "eac",
        "vac",
        "tcpi",
    ] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert!(json["overallScore"].is_u64());

    let cp = service.compute_critical_path("midrise").unwrap();
    let json = serde_json::to_value(&cp).unwrap();
    assert!(json["criticalTaskIds"].is_array());
    assert_eq!(json["scheduleData"]["utilities"]["float"], 15);
}

#[test]
fn cyclic_project_surfaces_error() {
    let mut tasks = midrise_tasks();
    tasks[0].predecessors.push("frame".into());

    let store = InMemoryProjectStore::new();
    store
        .upsert_project("loop", tasks, CostAggregate::budget_only(1_000.0))
        .unwrap();
    let service = ScheduleService::new(store);

    let err = service.compute_critical_path("loop").unwrap_err();
    assert!(err.is_cyclic());
    assert!(err.user_message().contains("cyclic dependency detected"));

    // Health alone does not depend on the graph.
    assert!(service.compute_schedule_health("loop", day(3, 21)).is_ok());
    assert!(service.dashboard("loop", day(3, 21)).is_err());
}

#[test]
fn configured_service_uses_fallback_strategy() {
    let store = InMemoryProjectStore::new();
    store
        .upsert_project(
            "midrise",
            midrise_tasks(),
            CostAggregate::budget_only(400_000.0),
        )
        .unwrap();

    let config = HealthConfig::from_json(r#"{"cost_fallback":{"strategy":"earned_value"}}"#)
        .unwrap();
    let service = ScheduleService::new(store)
        .with_health_config(config)
        .unwrap();

    let health = service
        .compute_schedule_health("midrise", day(3, 21))
        .unwrap();
    assert!((health.cpi - 1.0).abs() < 1e-12);
    assert_eq!(health.eac, health.bac);
}

#[derive(Debug)]
struct HalfBudget;

impl ActualCostEstimator for HalfBudget {
    fn name(&self) -> &'static str {
        "half_budget"
    }

    fn estimate(&self, bac: f64, _avg_progress: f64) -> f64 {
        bac / 2.0
    }
}

#[test]
fn custom_estimator_plugs_into_service() {
    let store = InMemoryProjectStore::new();
    store
        .upsert_project(
            "midrise",
            midrise_tasks(),
            CostAggregate::budget_only(400_000.0),
        )
        .unwrap();

    let engine = HealthEngine::with_config(HealthConfig::default())
        .unwrap()
        .with_estimator(Arc::new(HalfBudget));
    let service = ScheduleService::new(store).with_engine(engine);

    let health = service
        .compute_schedule_health("midrise", day(3, 21))
        .unwrap();
    // EV = 0.65 × 400k = 260k, AC = 200k
    assert!((health.cpi - 1.3).abs() < 1e-9);
}

#[test]
fn status_bands_follow_config() {
    let engine = HealthEngine::with_config(
        HealthConfig::default().with_cost_fallback(CostFallback::EarnedValue),
    )
    .unwrap();
    let tasks = vec![Task::new("A")
        .with_dates(day(1, 1), day(1, 11))
        .with_progress(100.0)];
    let report = engine
        .evaluate("p", &tasks, &CostAggregate::budget_only(10.0), day(1, 11))
        .unwrap();
    assert_eq!(report.status, HealthStatus::AtRisk);
    assert_eq!(report.snapshot.overall_score, 50);
}

#[test]
fn empty_project_has_no_errors() {
    let store = InMemoryProjectStore::new();
    store
        .upsert_project("new", vec![], CostAggregate::budget_only(0.0))
        .unwrap();
    let service = ScheduleService::new(store);

    let health = service.compute_schedule_health("new", day(1, 1)).unwrap();
    assert_eq!(health.overall_score, 0);
    let dash = service.dashboard("new", day(1, 1)).unwrap();
    assert_eq!(dash.status, HealthStatus::NoData);
    let cp = service.compute_critical_path("new").unwrap();
    assert!(cp.critical_task_ids.is_empty());

    let err = HealthEngine::new()
        .evaluate("new", &[], &CostAggregate::default(), day(1, 1))
        .unwrap_err();
    assert!(matches!(err, ScheduleError::InsufficientData { .. }));
}
