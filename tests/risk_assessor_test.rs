// ABOUTME: Integration tests for training load, injury risk and fatigue assessment
// ABOUTME: Exercises ACWR zones, load spikes, mileage jumps and trailing fatigue streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, Duration, Utc};
use pierre_training_planner::adaptation::{FatigueLevel, RiskAssessor, RiskLevel};
use pierre_training_planner::config::PlannerConfig;
use pierre_training_planner::models::{
    CompletedWorkout, LoadRiskZone, LoadTrend, RecoveryMetrics, WorkoutType,
};

use common::{daily_history, easy_run, plan_start};

fn assessor() -> RiskAssessor {
    RiskAssessor::with_config(PlannerConfig::default().risk)
}

fn now() -> DateTime<Utc> {
    plan_start() + Duration::weeks(8)
}

fn hard_day(now: DateTime<Utc>, days_ago: i64, tss: f64) -> CompletedWorkout {
    CompletedWorkout::new(
        format!("hard-{days_ago}"),
        now - Duration::days(days_ago),
        WorkoutType::Intervals,
        12.0,
        70.0,
    )
    .with_effort(8.0)
    .with_tss(tss)
}

#[test]
fn test_empty_history_has_zero_ratio() {
    let load = assessor().training_load(&[], now());
    assert!(load.acute.abs() < f64::EPSILON);
    assert!(load.chronic.abs() < f64::EPSILON);
    assert!(load.ratio.abs() < f64::EPSILON);
    assert_eq!(load.risk_zone, LoadRiskZone::Undertraining);
    assert_eq!(load.trend, LoadTrend::Stable);

    let risk = assessor().assess(&[], &RecoveryMetrics::default(), now());
    assert!(risk.injury_risk.components.ratio_risk.abs() < f64::EPSILON);
    assert_eq!(risk.fatigue.level, FatigueLevel::Low);
}

#[test]
fn test_ratio_zone_boundaries() {
    let assessor = assessor();
    assert_eq!(assessor.risk_zone(0.79), LoadRiskZone::Undertraining);
    assert_eq!(assessor.risk_zone(0.8), LoadRiskZone::Optimal);
    assert_eq!(assessor.risk_zone(1.3), LoadRiskZone::Optimal);
    assert_eq!(assessor.risk_zone(1.31), LoadRiskZone::High);
    assert_eq!(assessor.risk_zone(1.5), LoadRiskZone::High);
    assert_eq!(assessor.risk_zone(1.51), LoadRiskZone::VeryHigh);
}

#[test]
fn test_steady_training_is_optimal_and_stable() {
    let history = daily_history(now(), 56, 50.0);
    let load = assessor().training_load(&history, now());
    assert!((load.ratio - 1.0).abs() < 0.1, "ratio {}", load.ratio);
    assert_eq!(load.risk_zone, LoadRiskZone::Optimal);
    assert_eq!(load.trend, LoadTrend::Stable);
}

#[test]
fn test_load_spike_is_very_high_and_increasing() {
    let now = now();
    let mut history: Vec<CompletedWorkout> = (6..50).map(|d| easy_run(now, d, 30.0)).collect();
    history.extend((0..6).map(|d| hard_day(now, d, 150.0)));

    let risk = assessor().assess(&history, &RecoveryMetrics::default(), now);
    assert!(risk.training_load.ratio > 1.5, "ratio {}", risk.training_load.ratio);
    assert_eq!(risk.training_load.risk_zone, LoadRiskZone::VeryHigh);
    assert_eq!(risk.training_load.trend, LoadTrend::Increasing);
    assert!((risk.injury_risk.components.ratio_risk - 100.0).abs() < f64::EPSILON);
    assert!(risk.is_elevated());
}

#[test]
fn test_future_sessions_do_not_count() {
    let now = now();
    let mut history = daily_history(now, 56, 50.0);
    let baseline = assessor().training_load(&history, now);
    history.push(hard_day(now, -1, 300.0));
    let with_future = assessor().training_load(&history, now);
    assert!((baseline.ratio - with_future.ratio).abs() < f64::EPSILON);
}

#[test]
fn test_mileage_jump_and_poor_recovery_raise_injury_risk() {
    let now = now();
    // 20 km the week before, 40 km this week
    let mut history: Vec<CompletedWorkout> = (7..14)
        .step_by(3)
        .map(|d| CompletedWorkout::new(format!("prev-{d}"), now - Duration::days(d), WorkoutType::Easy, 20.0 / 3.0, 40.0))
        .collect();
    history.extend((0..7).step_by(3).map(|d| {
        CompletedWorkout::new(format!("curr-{d}"), now - Duration::days(d), WorkoutType::Easy, 40.0 / 3.0, 80.0)
    }));

    let risk = assessor().assess(&history, &RecoveryMetrics::with_score(40.0), now);
    let components = risk.injury_risk.components;
    assert!((components.mileage_increase_percent - 100.0).abs() < 1e-6);
    assert!((components.mileage_risk - 100.0).abs() < f64::EPSILON);
    assert!((components.recovery_risk - 60.0).abs() < f64::EPSILON);
    assert!(risk.injury_risk.score >= 48.0);
    assert!(risk.injury_risk.level >= RiskLevel::Moderate);
}

#[test]
fn test_small_mileage_increase_carries_no_mileage_risk() {
    let now = now();
    let history = vec![
        CompletedWorkout::new("prev", now - Duration::days(8), WorkoutType::Easy, 20.0, 120.0),
        CompletedWorkout::new("curr", now - Duration::days(1), WorkoutType::Easy, 21.0, 126.0),
    ];
    let risk = assessor().assess(&history, &RecoveryMetrics::with_score(100.0), now);
    assert!(risk.injury_risk.components.mileage_risk.abs() < f64::EPSILON);
    assert!(risk.injury_risk.components.recovery_risk.abs() < f64::EPSILON);
}

#[test]
fn test_acute_fatigue_grows_with_effort_and_load() {
    let now = now();
    let assessor = assessor();
    let light = vec![easy_run(now, 0, 40.0)];
    let harder = vec![easy_run(now, 0, 40.0).with_effort(7.0)];
    let heavier = vec![easy_run(now, 0, 90.0)];

    let base = assessor.fatigue(&light, now, 1.0).acute_fatigue;
    assert!(assessor.fatigue(&harder, now, 1.0).acute_fatigue > base);
    assert!(assessor.fatigue(&heavier, now, 1.0).acute_fatigue > base);

    // Sessions older than three days no longer count
    let old = vec![easy_run(now, 4, 90.0)];
    assert!(assessor.fatigue(&old, now, 1.0).acute_fatigue.abs() < f64::EPSILON);
}

#[test]
fn test_acute_fatigue_is_capped() {
    let now = now();
    let history: Vec<CompletedWorkout> = (0..3).map(|d| hard_day(now, d, 400.0)).collect();
    let fatigue = assessor().fatigue(&history, now, 1.0);
    assert!((fatigue.acute_fatigue - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_overload_streak_escalates_fatigue() {
    let now = now();
    let two_days: Vec<CompletedWorkout> = (0..2).map(|d| hard_day(now, d, 200.0)).collect();
    let fatigue = assessor().fatigue(&two_days, now, 1.0);
    assert_eq!(fatigue.overload_streak, 2);
    assert!(fatigue.overload_warning);
    assert_ne!(fatigue.level, FatigueLevel::Severe);

    let three_days: Vec<CompletedWorkout> = (0..3).map(|d| hard_day(now, d, 200.0)).collect();
    let fatigue = assessor().fatigue(&three_days, now, 1.0);
    assert_eq!(fatigue.overload_streak, 3);
    assert_eq!(fatigue.level, FatigueLevel::Severe);
}

#[test]
fn test_rest_day_breaks_overload_streak() {
    let now = now();
    let history = vec![
        hard_day(now, 0, 200.0),
        hard_day(now, 2, 200.0),
        hard_day(now, 3, 200.0),
    ];
    assert_eq!(assessor().fatigue(&history, now, 1.0).overload_streak, 1);
}

#[test]
fn test_stale_overload_block_does_not_count() {
    let now = now();
    let history: Vec<CompletedWorkout> = (40..43).map(|d| hard_day(now, d, 200.0)).collect();
    let fatigue = assessor().fatigue(&history, now, 1.0);
    assert_eq!(fatigue.overload_streak, 0);
    assert!(!fatigue.overload_warning);
    assert_eq!(fatigue.level, FatigueLevel::Low);

    // Rested since the block ended two days ago
    let recent: Vec<CompletedWorkout> = (2..5).map(|d| hard_day(now, d, 200.0)).collect();
    assert_eq!(assessor().fatigue(&recent, now, 1.0).overload_streak, 0);
}

#[test]
fn test_persistent_underperformance() {
    let now = now();
    let history: Vec<CompletedWorkout> = (0..5)
        .map(|d| {
            CompletedWorkout::new(format!("short-{d}"), now - Duration::days(d), WorkoutType::Tempo, 7.0, 40.0)
                .with_effort(8.0)
                .with_tss(60.0)
                .with_planned_distance(10.0)
        })
        .collect();
    let fatigue = assessor().fatigue(&history, now, 1.0);
    assert_eq!(fatigue.chronic_streak, 5);
    assert!(fatigue.persistent_underperformance);
    assert_eq!(fatigue.level, FatigueLevel::Severe);

    // Completing the plan at high effort is not underperformance
    let completed: Vec<CompletedWorkout> = history
        .into_iter()
        .map(|w| w.with_planned_distance(7.0))
        .collect();
    assert_eq!(assessor().fatigue(&completed, now, 1.0).chronic_streak, 0);
}

#[test]
fn test_high_ratio_alone_raises_fatigue_level() {
    let fatigue = assessor().fatigue(&[], now(), 1.6);
    assert_eq!(fatigue.level, FatigueLevel::High);
    let fatigue = assessor().fatigue(&[], now(), 1.4);
    assert_eq!(fatigue.level, FatigueLevel::Moderate);
}

#[test]
fn test_risk_level_thresholds() {
    assert_eq!(RiskLevel::from_score(39.9), RiskLevel::Low);
    assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Moderate);
    assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
}
