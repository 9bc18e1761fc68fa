// ABOUTME: Integration tests for end-to-end plan generation
// ABOUTME: Covers phase layout, weekly volume progression, scheduling, totals and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, Duration, Weekday};
use pierre_training_planner::config::{PlannerConfig, ResidualPolicy};
use pierre_training_planner::errors::ErrorCode;
use pierre_training_planner::fitness::{DanielsFitnessModel, FitnessModel};
use pierre_training_planner::methodology::{
    DanielsPhilosophy, MethodologyFactory, MethodologyPhilosophy, WorkoutTemplate,
};
use pierre_training_planner::models::{
    IntensityDistribution, IntensityZone, Methodology, TrainingGoal, TrainingPhase,
    WorkoutStructure, WorkoutType,
};
use pierre_training_planner::planning::{weekly_volume, TrainingPlanGenerator};

use common::{fitness, generate, generator, marathon_plan, plan_config, plan_start};

#[test]
fn test_sixteen_week_beginner_marathon_layout() {
    let plan = generate(plan_config(
        TrainingGoal::Marathon,
        16,
        Methodology::Daniels,
        fitness(0.5, 30.0),
    ));

    let phases: Vec<(TrainingPhase, u32)> = plan.blocks.iter().map(|b| (b.phase, b.weeks)).collect();
    assert_eq!(
        phases,
        vec![
            (TrainingPhase::Base, 5),
            (TrainingPhase::Build, 5),
            (TrainingPhase::Peak, 3),
            (TrainingPhase::Taper, 1),
        ]
    );
    assert_eq!(plan.summary.total_weeks, 14);
    assert_eq!(plan.summary.unallocated_weeks, 2);
    assert_eq!(plan.summary.phase_weeks.get(&TrainingPhase::Peak), Some(&3));
    assert_eq!(plan.revision, 0);
    assert!(plan.parent_plan_id.is_none());
    assert!(plan.adaptation_history.is_empty());
}

#[test]
fn test_weekly_volume_follows_progression_and_recovery_weeks() {
    let plan = generate(plan_config(
        TrainingGoal::Marathon,
        16,
        Methodology::Daniels,
        fitness(0.5, 30.0),
    ));
    let periodization = PlannerConfig::default().periodization;

    for block in &plan.blocks {
        for (week_in_phase, microcycle) in block.microcycles.iter().enumerate() {
            let week = u32::try_from(week_in_phase).unwrap();
            let expected = weekly_volume(30.0, block.phase, week, 0.05, &periodization);
            assert!(
                (microcycle.target_volume_km - expected).abs() < 1e-9,
                "week {} expected {expected} got {}",
                microcycle.week_number,
                microcycle.target_volume_km
            );
            assert_eq!(microcycle.is_recovery_week, week_in_phase == 3);
        }

        // Volume rises week over week inside a phase, except into a recovery week
        if block.phase != TrainingPhase::Taper {
            for pair in block.microcycles.windows(2) {
                if !pair[1].is_recovery_week && !pair[0].is_recovery_week {
                    assert!(pair[1].target_volume_km > pair[0].target_volume_km);
                }
            }
        }
    }

    let base_week_four = &plan.blocks[0].microcycles[3];
    assert!((base_week_four.target_volume_km - 30.0 * 1.15 * 0.7).abs() < 1e-9);
}

#[test]
fn test_microcycle_totals_match_workouts() {
    let plan = marathon_plan(Methodology::Pfitzinger);
    for microcycle in plan.microcycles() {
        let load: f64 = microcycle.workouts.iter().map(|w| w.targets.tss).sum();
        let distance: f64 = microcycle.workouts.iter().map(|w| w.targets.distance_km).sum();
        assert!((microcycle.total_load - load).abs() < 1e-6);
        assert!((microcycle.total_distance - distance).abs() < 1e-6);
        assert!(
            (distance - microcycle.target_volume_km).abs() < 1e-6,
            "week {} distance {distance} target {}",
            microcycle.week_number,
            microcycle.target_volume_km
        );
        assert!(microcycle.workouts.iter().all(|w| w.targets.distance_km >= 0.0));
    }
    let total: usize = plan.microcycles().map(|m| m.workouts.len()).sum();
    assert_eq!(plan.summary.total_workouts, total);
}

#[test]
fn test_blocks_are_contiguous_and_weeks_numbered_globally() {
    let plan = marathon_plan(Methodology::Lydiard);
    assert_eq!(plan.blocks[0].start_date, plan_start());
    for pair in plan.blocks.windows(2) {
        assert_eq!(pair[0].end_date, pair[1].start_date);
    }

    let numbers: Vec<u32> = plan.microcycles().map(|m| m.week_number).collect();
    let expected: Vec<u32> = (1..=plan.summary.total_weeks).collect();
    assert_eq!(numbers, expected);

    for block in &plan.blocks {
        for workout in block.microcycles.iter().flat_map(|m| m.workouts.iter()) {
            assert!(block.contains(workout.date), "{} outside its block", workout.id);
        }
    }
}

#[test]
fn test_long_run_lands_on_preferred_day() {
    let plan = marathon_plan(Methodology::Daniels);
    let available = plan.config.preferences.available_days.len();
    for microcycle in plan.microcycles() {
        assert!(microcycle.workouts.len() <= available);
        let last = microcycle.workouts.last().unwrap();
        assert_eq!(last.workout_type, WorkoutType::LongRun);
        assert_eq!(last.date.weekday(), Weekday::Sun);

        let days: HashSet<i64> = microcycle
            .workouts
            .iter()
            .map(|w| (w.date - plan_start()).num_days())
            .collect();
        assert_eq!(days.len(), microcycle.workouts.len(), "double-booked day");
    }
}

#[test]
fn test_workout_ids_are_unique_and_readable() {
    let plan = marathon_plan(Methodology::Hanson);
    let ids: HashSet<&str> = plan.workouts().map(|w| w.id.as_str()).collect();
    assert_eq!(ids.len(), plan.summary.total_workouts);
    let first = plan.workouts().next().unwrap();
    assert!(first.id.starts_with("w01-d"), "id {}", first.id);
}

#[test]
fn test_three_day_athlete_keeps_long_run() {
    let mut config = plan_config(TrainingGoal::HalfMarathon, 12, Methodology::Daniels, fitness(2.0, 30.0));
    config.preferences.available_days = vec![Weekday::Tue, Weekday::Thu, Weekday::Sun];
    let plan = generate(config);
    for microcycle in plan.microcycles() {
        assert!(microcycle.workouts.len() <= 3);
        assert!(microcycle
            .workouts
            .iter()
            .any(|w| w.workout_type == WorkoutType::LongRun));
    }
}

#[test]
fn test_repeated_available_days_are_collapsed() {
    let mut config = plan_config(TrainingGoal::HalfMarathon, 12, Methodology::Daniels, fitness(2.0, 30.0));
    config.preferences.available_days = vec![Weekday::Tue, Weekday::Thu, Weekday::Sun];
    let distinct = generate(config.clone());

    config.preferences.available_days = vec![
        Weekday::Tue,
        Weekday::Tue,
        Weekday::Thu,
        Weekday::Sun,
        Weekday::Sun,
    ];
    let repeated = generate(config);

    assert_eq!(
        repeated.config.preferences.available_days,
        vec![Weekday::Tue, Weekday::Thu, Weekday::Sun]
    );
    assert_eq!(repeated.summary.total_workouts, distinct.summary.total_workouts);
    for (a, b) in repeated.microcycles().zip(distinct.microcycles()) {
        assert_eq!(a.workouts.len(), b.workouts.len());
        assert!(a.workouts.len() <= 3);
        let types: Vec<_> = a.workouts.iter().map(|w| w.workout_type).collect();
        let expected: Vec<_> = b.workouts.iter().map(|w| w.workout_type).collect();
        assert_eq!(types, expected);
    }
}

#[test]
fn test_time_budget_caps_weekly_volume() {
    let mut config = plan_config(TrainingGoal::Marathon, 16, Methodology::Daniels, fitness(2.0, 60.0));
    config.preferences.max_weekly_hours = Some(3.0);
    let plan = generate(config);

    let easy_pace = DanielsFitnessModel::new().training_pace(45.0, WorkoutType::Easy);
    let cap = 3.0 * 60.0 / easy_pace;
    for microcycle in plan.microcycles() {
        assert!(microcycle.target_volume_km <= cap + 1e-9);
    }
}

#[test]
fn test_polarized_plan_avoids_moderate_zone_before_peak() {
    let plan = marathon_plan(Methodology::Polarized);
    for block in plan
        .blocks
        .iter()
        .filter(|b| matches!(b.phase, TrainingPhase::Base | TrainingPhase::Build))
    {
        for workout in block.microcycles.iter().flat_map(|m| m.workouts.iter()) {
            assert_ne!(workout.workout_type.zone(), IntensityZone::Moderate);
        }
    }
}

#[test]
fn test_every_methodology_generates_a_plan() {
    for methodology in [
        Methodology::Daniels,
        Methodology::Lydiard,
        Methodology::Pfitzinger,
        Methodology::Hanson,
        Methodology::Polarized,
    ] {
        let plan = marathon_plan(methodology);
        assert!(plan.summary.total_workouts > 0, "{methodology:?}");
        assert!(plan.summary.total_load > 0.0, "{methodology:?}");
        assert!(plan.blocks.iter().all(|b| !b.focus_areas.is_empty()));
    }
}

#[test]
fn test_extend_base_policy_uses_every_week() {
    let mut config = PlannerConfig::default();
    config.periodization.residual_policy = ResidualPolicy::ExtendBase;
    let mut generator = TrainingPlanGenerator::with_config(
        MethodologyFactory::build(Methodology::Daniels),
        Arc::new(DanielsFitnessModel::new()),
        config,
    );
    let plan = generator
        .generate_at(
            plan_config(TrainingGoal::Marathon, 16, Methodology::Daniels, fitness(2.0, 40.0)),
            plan_start(),
        )
        .unwrap();
    assert_eq!(plan.summary.total_weeks, 16);
    assert_eq!(plan.summary.unallocated_weeks, 0);
    assert_eq!(plan.blocks[0].weeks, 7);
}

#[test]
fn test_pace_cache_is_reused_across_weeks() {
    let mut generator = generator(Methodology::Daniels);
    generator
        .generate_at(
            plan_config(TrainingGoal::TenK, 10, Methodology::Daniels, fitness(2.0, 35.0)),
            plan_start(),
        )
        .unwrap();
    let stats = generator.pace_cache_stats();
    assert!(stats.hits > stats.misses, "{stats:?}");
}

#[test]
fn test_zero_mileage_starts_from_default_volume() {
    let plan = generate(plan_config(TrainingGoal::FiveK, 8, Methodology::Daniels, fitness(0.0, 0.0)));
    let first = plan.microcycles().next().unwrap();
    assert!((first.target_volume_km - 20.0).abs() < 1e-9);
}

#[test]
fn test_target_before_start_is_rejected() {
    let mut config = plan_config(TrainingGoal::Marathon, 16, Methodology::Daniels, fitness(2.0, 40.0));
    config.target_date = config.start_date - Duration::days(1);
    let error = generator(Methodology::Daniels)
        .generate_at(config, plan_start())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
}

#[test]
fn test_no_available_days_is_rejected() {
    let mut config = plan_config(TrainingGoal::Marathon, 16, Methodology::Daniels, fitness(2.0, 40.0));
    config.preferences.available_days.clear();
    let error = generator(Methodology::Daniels)
        .generate_at(config, plan_start())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
}

#[test]
fn test_negative_fitness_is_rejected() {
    let config = plan_config(TrainingGoal::Marathon, 16, Methodology::Daniels, fitness(2.0, -5.0));
    let error = generator(Methodology::Daniels)
        .generate_at(config, plan_start())
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
}

/// Daniels without any interval templates
#[derive(Debug)]
struct NoIntervalsPhilosophy;

impl MethodologyPhilosophy for NoIntervalsPhilosophy {
    fn methodology(&self) -> Methodology {
        Methodology::Daniels
    }

    fn intensity_distribution(&self) -> IntensityDistribution {
        DanielsPhilosophy.intensity_distribution()
    }

    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType] {
        DanielsPhilosophy.workout_priorities(phase)
    }

    fn select_workout(
        &self,
        workout_type: WorkoutType,
        phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate> {
        if workout_type == WorkoutType::Intervals {
            return None;
        }
        DanielsPhilosophy.select_workout(workout_type, phase, week)
    }

    fn customize_workout(
        &self,
        template: &WorkoutTemplate,
        phase: TrainingPhase,
        week: u32,
    ) -> WorkoutStructure {
        DanielsPhilosophy.customize_workout(template, phase, week)
    }
}

#[test]
fn test_sessions_without_a_template_are_dropped_not_replaced() {
    let config = plan_config(TrainingGoal::Marathon, 16, Methodology::Daniels, fitness(2.0, 40.0));
    let full = generate(config.clone());
    assert!(full.workouts().any(|w| w.workout_type == WorkoutType::Intervals));

    let mut generator = TrainingPlanGenerator::with_config(
        Arc::new(NoIntervalsPhilosophy),
        Arc::new(DanielsFitnessModel::new()),
        PlannerConfig::default(),
    );
    let plan = generator.generate_at(config, plan_start()).unwrap();

    let dropped = full
        .workouts()
        .filter(|w| w.workout_type == WorkoutType::Intervals)
        .count();
    assert!(plan.workouts().all(|w| w.workout_type != WorkoutType::Intervals));
    assert_eq!(plan.summary.total_workouts, full.summary.total_workouts - dropped);
    // Nothing was swapped in for the missing sessions
    assert_eq!(
        plan.workouts().filter(|w| w.template_id == "easy-45").count(),
        full.workouts().filter(|w| w.template_id == "easy-45").count()
    );
}
