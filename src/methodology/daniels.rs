// ABOUTME: Jack Daniels methodology: VDOT-paced quality sessions in four phases
// ABOUTME: Repetitions early, intervals and cruise intervals in build, threshold and race pace late
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{
    IntensityDistribution, Methodology, TrainingPhase, WorkoutStructure, WorkoutType,
};

use super::templates::{rotating_template, WorkoutTemplate};
use super::{phase_duration_scale, MethodologyPhilosophy};

/// Daniels' Running Formula
#[derive(Debug, Clone, Copy, Default)]
pub struct DanielsPhilosophy;

impl MethodologyPhilosophy for DanielsPhilosophy {
    fn methodology(&self) -> Methodology {
        Methodology::Daniels
    }

    fn intensity_distribution(&self) -> IntensityDistribution {
        IntensityDistribution::new(80.0, 10.0, 10.0)
    }

    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType] {
        match phase {
            TrainingPhase::Base => &[WorkoutType::Speed],
            TrainingPhase::Build => &[WorkoutType::Intervals, WorkoutType::Threshold],
            TrainingPhase::Peak => &[
                WorkoutType::Threshold,
                WorkoutType::Intervals,
                WorkoutType::RacePace,
            ],
            TrainingPhase::Taper => &[WorkoutType::Threshold],
            TrainingPhase::Recovery => &[WorkoutType::Fartlek],
        }
    }

    fn select_workout(
        &self,
        workout_type: WorkoutType,
        phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate> {
        // Daniels replaces unstructured fartlek with cruise intervals once quality starts
        let resolved = match (workout_type, phase) {
            (WorkoutType::Fartlek, TrainingPhase::Build | TrainingPhase::Peak) => {
                WorkoutType::Threshold
            }
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
        template.to_structure(phase_duration_scale(phase, week))
    }
}
