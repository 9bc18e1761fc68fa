// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides fixed dates, fitness snapshots, plan configs and completed-workout builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `pierre_training_planner`
//!
//! This module provides common fixtures to reduce duplication across
//! integration tests.

use std::env;
use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, TimeZone, Utc};
use pierre_training_planner::config::PlannerConfig;
use pierre_training_planner::fitness::DanielsFitnessModel;
use pierre_training_planner::methodology::MethodologyFactory;
use pierre_training_planner::models::{
    CompletedWorkout, FitnessAssessment, Methodology, PeriodizationModel, TrainingEnvironment,
    TrainingGoal, TrainingPlan, TrainingPlanConfig, TrainingPreferences, WorkoutType,
};
use pierre_training_planner::planning::TrainingPlanGenerator;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // TEST_LOG controls the level; quiet by default
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Monday 2025-01-06 00:00 UTC
pub fn plan_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()
}

/// Fitness snapshot with the given training age (years) and weekly mileage (km)
pub fn fitness(training_age: f64, weekly_mileage: f64) -> FitnessAssessment {
    FitnessAssessment {
        vdot: 45.0,
        critical_speed: 3.8,
        lactate_threshold: 4.6,
        weekly_mileage,
        longest_recent_run: weekly_mileage * 0.35,
        training_age,
        recovery_rate: 1.0,
        overall_score: 55.0,
    }
}

/// Plan configuration starting at [`plan_start`] and lasting `weeks` weeks
pub fn plan_config(
    goal: TrainingGoal,
    weeks: i64,
    methodology: Methodology,
    fitness: FitnessAssessment,
) -> TrainingPlanConfig {
    TrainingPlanConfig {
        goal,
        start_date: plan_start(),
        target_date: plan_start() + Duration::weeks(weeks),
        current_fitness: fitness,
        preferences: TrainingPreferences::default(),
        environment: TrainingEnvironment::default(),
        methodology,
        intensity_distribution: None,
        periodization: PeriodizationModel::Linear,
    }
}

/// Generator for a methodology with default configuration and the Daniels fitness model
pub fn generator(methodology: Methodology) -> TrainingPlanGenerator {
    init_test_logging();
    TrainingPlanGenerator::with_config(
        MethodologyFactory::build(methodology),
        Arc::new(DanielsFitnessModel::new()),
        PlannerConfig::default(),
    )
}

/// Generate a plan from a configuration, stamped at the plan start
pub fn generate(config: TrainingPlanConfig) -> TrainingPlan {
    let methodology = config.methodology;
    generator(methodology)
        .generate_at(config, plan_start())
        .expect("plan generation should succeed")
}

/// 16-week marathon plan for an intermediate runner
pub fn marathon_plan(methodology: Methodology) -> TrainingPlan {
    generate(plan_config(
        TrainingGoal::Marathon,
        16,
        methodology,
        fitness(2.0, 40.0),
    ))
}

/// Completed easy run `days_ago` days before `now`
pub fn easy_run(now: DateTime<Utc>, days_ago: i64, tss: f64) -> CompletedWorkout {
    CompletedWorkout::new(
        format!("done-{days_ago}"),
        now - Duration::days(days_ago),
        WorkoutType::Easy,
        8.0,
        48.0,
    )
    .with_effort(4.0)
    .with_tss(tss)
}

/// One completed workout per day for `days` days ending at `now`, each with `tss`
pub fn daily_history(now: DateTime<Utc>, days: i64, tss: f64) -> Vec<CompletedWorkout> {
    (0..days).rev().map(|d| easy_run(now, d, tss)).collect()
}
