// ABOUTME: Arthur Lydiard methodology: long aerobic base, hill strength, late anaerobic sharpening
// ABOUTME: Keeps hard intervals out of the base phase and lengthens base-phase long runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{
    IntensityDistribution, Methodology, TrainingPhase, WorkoutStructure, WorkoutType,
};

use super::templates::{rotating_template, WorkoutTemplate};
use super::{phase_duration_scale, MethodologyPhilosophy};

/// Extra long-run duration during the aerobic base
const BASE_LONG_RUN_BONUS: f64 = 0.10;

/// Lydiard periodization
#[derive(Debug, Clone, Copy, Default)]
pub struct LydiardPhilosophy;

impl MethodologyPhilosophy for LydiardPhilosophy {
    fn methodology(&self) -> Methodology {
        Methodology::Lydiard
    }

    fn intensity_distribution(&self) -> IntensityDistribution {
        IntensityDistribution::new(85.0, 10.0, 5.0)
    }

    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType] {
        match phase {
            TrainingPhase::Base => &[WorkoutType::Hill, WorkoutType::Fartlek],
            TrainingPhase::Build => &[WorkoutType::Hill, WorkoutType::Intervals],
            TrainingPhase::Peak => &[
                WorkoutType::Intervals,
                WorkoutType::Speed,
                WorkoutType::RacePace,
            ],
            TrainingPhase::Taper => &[WorkoutType::Speed],
            TrainingPhase::Recovery => &[WorkoutType::Fartlek],
        }
    }

    fn select_workout(
        &self,
        workout_type: WorkoutType,
        phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate> {
        let resolved = match (workout_type, phase) {
            (
                WorkoutType::Intervals | WorkoutType::Vo2Max | WorkoutType::Speed,
                TrainingPhase::Base,
            ) => WorkoutType::Hill,
            (other, _) => other,
        };
        rotating_template(resolved, week)
    }

    fn customize_workout(
        &self,
        template: &WorkoutTemplate,
        phase: TrainingPhase,
        week: u32,
    ) -> WorkoutStructure {
        let mut scale = phase_duration_scale(phase, week);
        if template.workout_type == WorkoutType::LongRun && phase == TrainingPhase::Base {
            scale += BASE_LONG_RUN_BONUS;
        }
        template.to_structure(scale)
    }

    fn focus_areas(&self, phase: TrainingPhase) -> Vec<String> {
        let areas: &[&str] = match phase {
            TrainingPhase::Base => &["aerobic conditioning", "mileage"],
            TrainingPhase::Build => &["hill strength", "leg speed"],
            TrainingPhase::Peak => &["anaerobic development", "coordination"],
            TrainingPhase::Taper => &["freshness", "sharpening"],
            TrainingPhase::Recovery => &["absorption", "aerobic maintenance"],
        };
        areas.iter().map(|&a| a.to_owned()).collect()
    }
}
