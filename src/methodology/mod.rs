// ABOUTME: Coaching methodology plug-ins: one fixed trait, one implementation per methodology
// ABOUTME: Philosophies choose and shape workouts; the planner never subclasses them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Methodologies
//!
//! A [`MethodologyPhilosophy`] decides *which* workout fills a slot and *how*
//! the library template is shaped for a phase and week. The plan generator
//! receives one by injection; [`MethodologyFactory`] resolves the closed
//! [`Methodology`] enum to an implementation and memoizes it in an injectable
//! cache.

mod daniels;
/// Methodology factory with injectable cache
pub mod factory;
mod hanson;
mod lydiard;
mod pfitzinger;
mod polarized;
/// Static workout template library
pub mod templates;

use std::fmt;

use pierre_core::models::{
    IntensityDistribution, Methodology, SegmentKind, TrainingPhase, WorkoutSegment, WorkoutStructure,
    WorkoutType,
};

pub use daniels::DanielsPhilosophy;
pub use factory::{MethodologyCache, MethodologyFactory};
pub use hanson::HansonPhilosophy;
pub use lydiard::LydiardPhilosophy;
pub use pfitzinger::PfitzingerPhilosophy;
pub use polarized::PolarizedPhilosophy;
pub use templates::{WorkoutTemplate, WORKOUT_LIBRARY};

/// Coaching philosophy used to populate weekly microcycles
pub trait MethodologyPhilosophy: Send + Sync + fmt::Debug {
    /// Which methodology this is
    fn methodology(&self) -> Methodology;

    /// Target share of training time per intensity zone
    fn intensity_distribution(&self) -> IntensityDistribution;

    /// Quality workout types for a phase, most important first (never empty)
    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType];

    /// Library template to use for a requested workout type, `None` when the library has none
    fn select_workout(
        &self,
        workout_type: WorkoutType,
        phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate>;

    /// Shape a template for a phase and week within the phase (0-based)
    fn customize_workout(
        &self,
        template: &WorkoutTemplate,
        phase: TrainingPhase,
        week: u32,
    ) -> WorkoutStructure;

    /// Training emphasis of a phase
    fn focus_areas(&self, phase: TrainingPhase) -> Vec<String> {
        let areas: &[&str] = match phase {
            TrainingPhase::Base => &["aerobic endurance", "running economy"],
            TrainingPhase::Build => &["lactate threshold", "aerobic power"],
            TrainingPhase::Peak => &["race-specific fitness", "VO2max"],
            TrainingPhase::Taper => &["freshness", "race sharpness"],
            TrainingPhase::Recovery => &["adaptation", "injury prevention"],
        };
        areas.iter().map(|&a| a.to_owned()).collect()
    }
}

/// Duration multiplier applied to templates for a phase and week within the phase
///
/// Taper shrinks week by week; other phases grow 3% per week up to +15%.
#[must_use]
pub fn phase_duration_scale(phase: TrainingPhase, week: u32) -> f64 {
    let growth = (f64::from(week) * 0.03).min(0.15);
    match phase {
        TrainingPhase::Base => 0.9 + growth,
        TrainingPhase::Build => 1.0 + growth,
        TrainingPhase::Peak => 1.05 + growth / 2.0,
        TrainingPhase::Recovery => 0.8,
        TrainingPhase::Taper => 0.1f64.mul_add(-f64::from(week), 0.75).max(0.5),
    }
}

/// Cap the intensity of every non-interval segment
pub(crate) fn cap_steady_intensity(structure: &mut WorkoutStructure, ceiling: f64) {
    for segment in &mut structure.segments {
        if !matches!(segment.kind, SegmentKind::Interval) {
            segment.intensity = segment.intensity.min(ceiling);
        }
    }
}

/// Scale the main (non warm-up/cool-down) segments so the workout lasts at most `max_minutes`
pub(crate) fn cap_duration(structure: &mut WorkoutStructure, max_minutes: f64) {
    let total = structure.total_minutes();
    if total <= max_minutes || total <= 0.0 {
        return;
    }
    let fixed: f64 = structure
        .segments
        .iter()
        .filter(|s| matches!(s.kind, SegmentKind::WarmUp | SegmentKind::CoolDown))
        .map(WorkoutSegment::total_minutes)
        .sum();
    let flexible = total - fixed;
    if flexible <= 0.0 {
        return;
    }
    let factor = ((max_minutes - fixed) / flexible).clamp(0.0, 1.0);
    for segment in &mut structure.segments {
        if !matches!(segment.kind, SegmentKind::WarmUp | SegmentKind::CoolDown) {
            segment.duration_minutes *= factor;
        }
    }
}
