// ABOUTME: Training plan generation: phase scheduling, weekly microcycles and block assembly
// ABOUTME: TrainingPlanGenerator wires the pieces together around an injected philosophy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Generation
//!
//! A plan is produced in three steps:
//!
//! 1. [`PhaseScheduler`] splits the weeks between start and target date into base,
//!    build, recovery, peak and taper phases.
//! 2. [`MicrocycleBuilder`] builds each week: target volume from the phase progression,
//!    a weekly pattern matched to the intensity distribution, and concrete workouts
//!    chosen and customized by the methodology philosophy.
//! 3. [`PlanAssembler`] groups weeks into contiguous blocks and computes the summary.

mod assembler;
mod generator;
mod microcycle;
mod phase_scheduler;

pub use assembler::PlanAssembler;
pub use generator::TrainingPlanGenerator;
pub use microcycle::{
    is_recovery_week, pattern_hard_share, phase_patterns, progression_factor, select_pattern,
    weekly_volume, MicrocycleBuilder, PlanContext, WeekSlot, RECOVERY_WEEK_PATTERN,
};
pub use phase_scheduler::{PhaseDistribution, PhaseScheduler};
