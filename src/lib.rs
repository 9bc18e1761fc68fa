// ABOUTME: Main library entry point for the Pierre training planner
// ABOUTME: Periodized running plan generation and feedback-driven plan adaptation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Training Planner
//!
//! Generates periodized running plans and adapts them to athlete feedback.
//!
//! ## Features
//!
//! - **Periodization**: base, build, recovery, peak and taper phases sized to the plan
//! - **Methodologies**: Daniels, Lydiard, Pfitzinger, Hanson and polarized philosophies
//!   choose and shape the workouts
//! - **Adaptation**: adherence, performance trend, training load (ACWR), injury risk
//!   and fatigue drive rule-based modifications of the remaining plan
//! - **Deterministic**: value-in/value-out transforms with explicit evaluation time
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::{Duration, Utc};
//! use pierre_training_planner::errors::AppResult;
//! use pierre_training_planner::fitness::DanielsFitnessModel;
//! use pierre_training_planner::methodology::MethodologyFactory;
//! use pierre_training_planner::models::{
//!     FitnessAssessment, Methodology, PeriodizationModel, TrainingEnvironment, TrainingGoal,
//!     TrainingPlanConfig, TrainingPreferences,
//! };
//! use pierre_training_planner::planning::TrainingPlanGenerator;
//!
//! fn main() -> AppResult<()> {
//!     let philosophy = MethodologyFactory::build(Methodology::Daniels);
//!     let mut generator =
//!         TrainingPlanGenerator::new(philosophy, Arc::new(DanielsFitnessModel::new()));
//!
//!     let start = Utc::now();
//!     let plan = generator.generate(TrainingPlanConfig {
//!         goal: TrainingGoal::Marathon,
//!         start_date: start,
//!         target_date: start + Duration::weeks(16),
//!         current_fitness: FitnessAssessment {
//!             vdot: 45.0,
//!             critical_speed: 3.8,
//!             lactate_threshold: 4.6,
//!             weekly_mileage: 40.0,
//!             longest_recent_run: 18.0,
//!             training_age: 2.0,
//!             recovery_rate: 1.0,
//!             overall_score: 60.0,
//!         },
//!         preferences: TrainingPreferences::default(),
//!         environment: TrainingEnvironment::default(),
//!         methodology: Methodology::Daniels,
//!         intensity_distribution: None,
//!         periodization: PeriodizationModel::Linear,
//!     })?;
//!
//!     println!("{} workouts over {} weeks", plan.summary.total_workouts, plan.summary.total_weeks);
//!     Ok(())
//! }
//! ```

/// Feedback-driven plan adaptation
pub mod adaptation;

/// Memoization caches with pluggable backends
pub mod cache;

/// Planner configuration with environment overrides
pub mod config;

/// Fitness model seam and the default Daniels model
pub mod fitness;

/// Production logging and structured output
pub mod logging;

/// Coaching methodology philosophies and the workout library
pub mod methodology;

/// Plan generation
pub mod planning;

pub use pierre_core::{constants, errors, models};
