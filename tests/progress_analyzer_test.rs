// ABOUTME: Integration tests for progress analysis against a generated plan
// ABOUTME: Adherence, effort-normalized pace trend, weekly volume trend and intensity mix
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{DateTime, Duration, Utc};
use pierre_training_planner::adaptation::ProgressAnalyzer;
use pierre_training_planner::config::PlannerConfig;
use pierre_training_planner::models::{
    CompletedWorkout, Methodology, PerformanceTrend, VolumeProgress, WorkoutType,
};

use common::{fitness, marathon_plan, plan_start};

fn analyzer() -> ProgressAnalyzer {
    ProgressAnalyzer::with_config(PlannerConfig::default().adaptation)
}

/// Run of `distance_km` at `pace` min/km and the given perceived effort
fn run(date: DateTime<Utc>, distance_km: f64, pace: f64, effort: f64) -> CompletedWorkout {
    CompletedWorkout::new(
        format!("run-{}", date.timestamp()),
        date,
        WorkoutType::Easy,
        distance_km,
        distance_km * pace,
    )
    .with_effort(effort)
}

#[test]
fn test_no_history_before_plan_start() {
    let plan = marathon_plan(Methodology::Daniels);
    let snapshot = analyzer().analyze(&plan, &[], &fitness(2.0, 40.0), plan_start() - Duration::days(1));

    assert!((snapshot.adherence_rate - 1.0).abs() < f64::EPSILON);
    assert_eq!(snapshot.performance_trend, PerformanceTrend::Maintaining);
    assert_eq!(snapshot.volume_progress, VolumeProgress::Stable);
    assert!(snapshot.weekly_volumes.is_empty());
    assert_eq!(snapshot.completed_count, 0);
    assert_eq!(snapshot.past_due_count, 0);
}

#[test]
fn test_adherence_counts_past_due_sessions() {
    let plan = marathon_plan(Methodology::Daniels);
    let now = plan_start() + Duration::days(13);
    let past_due = plan.past_due_workouts(now);
    assert!(past_due.len() >= 4);

    let completed: Vec<CompletedWorkout> = past_due
        .iter()
        .take(past_due.len() / 2)
        .map(|w| run(w.date, w.targets.distance_km, 6.0, 5.0).with_planned_workout(w.id.clone()))
        .collect();
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), now);

    let expected = completed.len() as f64 / past_due.len() as f64;
    assert!((snapshot.adherence_rate - expected).abs() < 1e-9);
    assert!(snapshot.adherence_rate < 0.8);
}

#[test]
fn test_adherence_is_capped_at_one() {
    let plan = marathon_plan(Methodology::Daniels);
    let now = plan_start() + Duration::days(2);
    let completed: Vec<CompletedWorkout> = (0..10)
        .map(|i| run(plan_start() - Duration::days(i), 8.0, 6.0, 5.0))
        .collect();
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), now);
    assert!((snapshot.adherence_rate - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_future_completions_are_ignored() {
    let plan = marathon_plan(Methodology::Daniels);
    let now = plan_start() + Duration::days(7);
    let completed = vec![
        run(now - Duration::days(1), 8.0, 6.0, 5.0),
        run(now + Duration::days(1), 8.0, 6.0, 5.0),
    ];
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), now);
    assert_eq!(snapshot.completed_count, 1);
}

#[test]
fn test_faster_pace_at_same_effort_is_improving() {
    let plan = marathon_plan(Methodology::Daniels);
    let start = plan_start();
    let completed: Vec<CompletedWorkout> = (0..6)
        .map(|i| {
            let pace = if i < 3 { 6.0 } else { 5.4 };
            run(start + Duration::days(i * 2), 10.0, pace, 5.0)
        })
        .collect();
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), start + Duration::days(12));

    assert_eq!(snapshot.performance_trend, PerformanceTrend::Improving);
    assert!((snapshot.improvement_percentage - 10.0).abs() < 1e-6);
}

#[test]
fn test_slower_pace_at_same_effort_is_declining() {
    let plan = marathon_plan(Methodology::Daniels);
    let start = plan_start();
    let completed: Vec<CompletedWorkout> = (0..6)
        .map(|i| {
            let pace = if i < 3 { 6.0 } else { 6.6 };
            run(start + Duration::days(i * 2), 10.0, pace, 5.0)
        })
        .collect();
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), start + Duration::days(12));

    assert_eq!(snapshot.performance_trend, PerformanceTrend::Declining);
    assert!(snapshot.improvement_percentage < 0.0);
}

#[test]
fn test_trend_needs_enough_effort_reports() {
    let plan = marathon_plan(Methodology::Daniels);
    let start = plan_start();
    let mut completed: Vec<CompletedWorkout> = (0..4)
        .map(|i| run(start + Duration::days(i), 10.0, 6.0 - 0.5 * i as f64, 5.0))
        .collect();
    // Sessions without effort carry no trend signal
    completed.push(CompletedWorkout::new("no-effort", start + Duration::days(5), WorkoutType::Easy, 10.0, 40.0));
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), start + Duration::days(6));
    assert_eq!(snapshot.performance_trend, PerformanceTrend::Maintaining);
}

#[test]
fn test_weekly_volume_trend() {
    let plan = marathon_plan(Methodology::Daniels);
    let start = plan_start();
    let weekly_km = [20.0, 20.0, 25.0, 30.0, 40.0, 40.0];
    let completed: Vec<CompletedWorkout> = weekly_km
        .iter()
        .enumerate()
        .map(|(week, km)| run(start + Duration::weeks(week as i64), *km, 6.0, 5.0))
        .collect();
    let now = start + Duration::weeks(6);

    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), now);
    assert_eq!(snapshot.weekly_volumes, weekly_km.to_vec());
    assert_eq!(snapshot.volume_progress, VolumeProgress::Increasing);

    let reversed: Vec<CompletedWorkout> = weekly_km
        .iter()
        .rev()
        .enumerate()
        .map(|(week, km)| run(start + Duration::weeks(week as i64), *km, 6.0, 5.0))
        .collect();
    let snapshot = analyzer().analyze(&plan, &reversed, &fitness(2.0, 40.0), now);
    assert_eq!(snapshot.volume_progress, VolumeProgress::Decreasing);
}

#[test]
fn test_intensity_distribution_is_duration_weighted() {
    let plan = marathon_plan(Methodology::Daniels);
    let start = plan_start();
    let completed = vec![
        CompletedWorkout::new("easy", start, WorkoutType::Easy, 10.0, 60.0),
        CompletedWorkout::new("tempo", start + Duration::days(1), WorkoutType::Tempo, 5.0, 20.0),
        CompletedWorkout::new("intervals", start + Duration::days(2), WorkoutType::Intervals, 4.0, 20.0),
    ];
    let snapshot = analyzer().analyze(&plan, &completed, &fitness(2.0, 40.0), start + Duration::days(3));

    let mix = snapshot.intensity_distribution;
    assert!((mix.easy - 60.0).abs() < 1e-9);
    assert!((mix.moderate - 20.0).abs() < 1e-9);
    assert!((mix.hard - 20.0).abs() < 1e-9);
}
