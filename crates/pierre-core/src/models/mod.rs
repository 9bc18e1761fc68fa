// ABOUTME: Core data models for periodized training plans and their adaptation
// ABOUTME: Re-exports plan, workout, fitness, analysis and modification types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! This module contains the data structures shared by plan generation and plan
//! adaptation.
//!
//! ## Design Principles
//!
//! - **Tree ownership**: a `TrainingPlan` owns its blocks, microcycles and workouts;
//!   nothing else holds references into it
//! - **Derived values are detached**: `ProgressSnapshot`, `TrainingLoad` and
//!   `PlanModification` carry no back-reference to the plan
//! - **Serializable**: all models support JSON serialization for reporting layers
//!
//! ## Core Models
//!
//! - `TrainingPlan`: blocks of weekly microcycles of planned workouts
//! - `TrainingPlanConfig`: goal inputs, never mutated after generation
//! - `FitnessAssessment`: scalar fitness snapshot
//! - `CompletedWorkout` / `RecoveryMetrics`: athlete feedback
//! - `PlanModification`: consume-once change proposal

// Domain modules
mod analysis;
mod fitness;
mod modification;
mod plan;
mod workout;

pub use analysis::{
    LoadRiskZone, LoadTrend, PerformanceTrend, ProgressSnapshot, TrainingLoad, VolumeProgress,
};
pub use fitness::{ExperienceLevel, FitnessAssessment, InjuryStatus, RecoveryMetrics};
pub use modification::{
    ModificationPriority, ModificationSource, ModificationType, PlanModification,
    SuggestedChanges,
};
pub use plan::{
    AppliedModification, IntensityDistribution, Methodology, PeriodizationModel, PlanComparison,
    PlanSummary, Terrain, TrainingBlock, TrainingEnvironment, TrainingGoal, TrainingPhase,
    TrainingPlan, TrainingPlanConfig, TrainingPreferences, WeeklyMicrocycle,
};
pub use workout::{
    estimate_tss, CompletedWorkout, IntensityZone, PlannedWorkout, SegmentKind, WorkoutSegment,
    WorkoutStructure, WorkoutTargets, WorkoutType,
};
