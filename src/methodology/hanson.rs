// ABOUTME: Hanson methodology: cumulative fatigue from frequent moderate work and a capped long run
// ABOUTME: Speed, strength and tempo sessions with long runs held to about 2.5 hours
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{
    IntensityDistribution, Methodology, TrainingPhase, WorkoutStructure, WorkoutType,
};

use super::templates::{rotating_template, WorkoutTemplate};
use super::{cap_duration, phase_duration_scale, MethodologyPhilosophy};

/// Hanson long runs never exceed this many minutes
const LONG_RUN_CAP_MINUTES: f64 = 150.0;

/// Hansons Marathon Method
#[derive(Debug, Clone, Copy, Default)]
pub struct HansonPhilosophy;

impl MethodologyPhilosophy for HansonPhilosophy {
    fn methodology(&self) -> Methodology {
        Methodology::Hanson
    }

    fn intensity_distribution(&self) -> IntensityDistribution {
        IntensityDistribution::new(70.0, 20.0, 10.0)
    }

    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType] {
        match phase {
            TrainingPhase::Base => &[WorkoutType::Speed],
            TrainingPhase::Build => &[WorkoutType::Intervals, WorkoutType::RacePace],
            TrainingPhase::Peak => &[WorkoutType::Threshold, WorkoutType::RacePace],
            TrainingPhase::Taper => &[WorkoutType::RacePace],
            TrainingPhase::Recovery => &[WorkoutType::Fartlek],
        }
    }

    fn select_workout(
        &self,
        workout_type: WorkoutType,
        _phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate> {
        let resolved = match workout_type {
            WorkoutType::Vo2Max => WorkoutType::Intervals,
            other => other,
        };
        rotating_template(resolved, week)
    }

    fn customize_workout(
        &self,
        template: &WorkoutTemplate,
        phase: TrainingPhase,
        week: u32,
    ) -> WorkoutStructure {
        let mut structure = template.to_structure(phase_duration_scale(phase, week));
        if template.workout_type == WorkoutType::LongRun {
            cap_duration(&mut structure, LONG_RUN_CAP_MINUTES);
        }
        structure
    }

    fn focus_areas(&self, phase: TrainingPhase) -> Vec<String> {
        let areas: &[&str] = match phase {
            TrainingPhase::Base => &["frequency", "cumulative fatigue"],
            TrainingPhase::Build => &["speed", "strength"],
            TrainingPhase::Peak => &["strength", "marathon tempo"],
            TrainingPhase::Taper => &["marathon tempo", "freshness"],
            TrainingPhase::Recovery => &["consistency"],
        };
        areas.iter().map(|&a| a.to_owned()).collect()
    }
}
