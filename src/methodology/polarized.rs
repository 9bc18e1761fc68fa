// ABOUTME: Polarized (80/20) methodology: easy running plus high-intensity intervals, no grey zone
// ABOUTME: Moderate-zone requests are replaced by intervals and easy segments are kept truly easy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{
    IntensityDistribution, IntensityZone, Methodology, TrainingPhase, WorkoutStructure,
    WorkoutType,
};

use super::templates::{rotating_template, WorkoutTemplate};
use super::{cap_steady_intensity, phase_duration_scale, MethodologyPhilosophy};

/// Ceiling for steady running so low-intensity days stay below the first threshold
const LOW_ZONE_CEILING: f64 = 70.0;

/// Seiler-style polarized training
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarizedPhilosophy;

impl MethodologyPhilosophy for PolarizedPhilosophy {
    fn methodology(&self) -> Methodology {
        Methodology::Polarized
    }

    fn intensity_distribution(&self) -> IntensityDistribution {
        IntensityDistribution::new(80.0, 0.0, 20.0)
    }

    fn workout_priorities(&self, phase: TrainingPhase) -> &'static [WorkoutType] {
        match phase {
            TrainingPhase::Build => &[WorkoutType::Intervals, WorkoutType::Vo2Max],
            TrainingPhase::Peak => &[WorkoutType::Vo2Max, WorkoutType::Intervals],
            TrainingPhase::Base | TrainingPhase::Taper | TrainingPhase::Recovery => {
                &[WorkoutType::Intervals]
            }
        }
    }

    fn select_workout(
        &self,
        workout_type: WorkoutType,
        phase: TrainingPhase,
        week: u32,
    ) -> Option<&'static WorkoutTemplate> {
        let race_specific = matches!(phase, TrainingPhase::Peak | TrainingPhase::Taper);
        let resolved = match workout_type {
            WorkoutType::RacePace if race_specific => WorkoutType::RacePace,
            other if other.zone() == IntensityZone::Moderate => WorkoutType::Intervals,
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
        if template.workout_type.zone() == IntensityZone::Low {
            cap_steady_intensity(&mut structure, LOW_ZONE_CEILING);
        }
        structure
    }
}
