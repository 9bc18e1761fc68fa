// ABOUTME: Pete Pfitzinger methodology: lactate threshold emphasis and medium-long runs
// ABOUTME: Tempo slots become LT runs and build-phase easy runs are extended
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{
    IntensityDistribution, Methodology, TrainingPhase, WorkoutStructure, WorkoutType,
};

use super::templates::{rotating_template, WorkoutTemplate};
use super::{phase_duration_scale, MethodologyPhilosophy};

/// Easy runs in build and peak become medium-long runs
const MEDIUM_LONG_BONUS: f64 = 0.15;

/// Pfitzinger "Advanced Marathoning"
#[derive(Debug, Clone, Copy, Default)]
pub struct PfitzingerPhilosophy;

impl MethodologyPhilosophy for PfitzingerPhilosophy {
    fn methodology(&self) -> Methodology {
        Methodology::Pfitzinger
    }

    fn intensity_distribution(&self) -> IntensityDistribution {
        IntensityDistribution::new(75.0, 15.0, 10.0)
    }

    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType] {
        match phase {
            TrainingPhase::Base => &[WorkoutType::Threshold],
            TrainingPhase::Build => &[WorkoutType::Threshold, WorkoutType::Vo2Max],
            TrainingPhase::Peak => &[
                WorkoutType::Vo2Max,
                WorkoutType::RacePace,
                WorkoutType::Threshold,
            ],
            TrainingPhase::Taper => &[WorkoutType::RacePace],
            TrainingPhase::Recovery => &[WorkoutType::Tempo],
        }
    }

    fn select_workout(
        &self,
        workout_type: WorkoutType,
        _phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate> {
        let resolved = match workout_type {
            WorkoutType::Tempo => WorkoutType::Threshold,
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
        let mut scale = phase_duration_scale(phase, week);
        if template.workout_type == WorkoutType::Easy
            && matches!(phase, TrainingPhase::Build | TrainingPhase::Peak)
        {
            scale += MEDIUM_LONG_BONUS;
        }
        template.to_structure(scale)
    }
}
