// ABOUTME: Assembles contiguous training blocks from a phase distribution
// ABOUTME: Global 1-based week numbering, per-phase focus areas and the plan summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use pierre_core::constants::units::DAYS_PER_WEEK;
use pierre_core::models::{PlanSummary, TrainingBlock, TrainingGoal, TrainingPhase};

use super::microcycle::{MicrocycleBuilder, WeekSlot};
use super::phase_scheduler::PhaseDistribution;
use crate::methodology::MethodologyPhilosophy;

/// Goal-specific emphasis added to build and peak blocks
fn goal_focus(goal: TrainingGoal, phase: TrainingPhase) -> Option<&'static str> {
    if !matches!(phase, TrainingPhase::Build | TrainingPhase::Peak) {
        return None;
    }
    match goal {
        TrainingGoal::FiveK | TrainingGoal::TenK => Some("speed endurance"),
        TrainingGoal::HalfMarathon | TrainingGoal::Marathon => Some("race-pace endurance"),
        TrainingGoal::Ultra => Some("time on feet"),
        TrainingGoal::GeneralFitness => None,
    }
}

/// Block and summary assembly
pub struct PlanAssembler<'a> {
    philosophy: &'a dyn MethodologyPhilosophy,
    goal: TrainingGoal,
    start_date: DateTime<Utc>,
}

impl<'a> PlanAssembler<'a> {
    /// Create an assembler for a plan starting at `start_date`
    #[must_use]
    pub fn new(
        philosophy: &'a dyn MethodologyPhilosophy,
        goal: TrainingGoal,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            philosophy,
            goal,
            start_date,
        }
    }

    /// Build blocks in plan order; `end_date[i] == start_date[i + 1]`
    pub fn assemble_blocks(
        &self,
        distribution: &PhaseDistribution,
        builder: &mut MicrocycleBuilder<'_>,
    ) -> Vec<TrainingBlock> {
        let mut blocks = Vec::new();
        let mut weeks_elapsed = 0_u32;

        for (phase, weeks) in distribution.in_plan_order() {
            let block_start = self.week_start(weeks_elapsed);
            let microcycles = (0..weeks)
                .map(|week_in_phase| {
                    builder.build_week(WeekSlot {
                        week_number: weeks_elapsed + week_in_phase + 1,
                        week_in_phase,
                        phase,
                        start_date: self.week_start(weeks_elapsed + week_in_phase),
                    })
                })
                .collect();

            let mut focus_areas = self.philosophy.focus_areas(phase);
            if let Some(extra) = goal_focus(self.goal, phase) {
                focus_areas.push(extra.to_owned());
            }

            weeks_elapsed += weeks;
            blocks.push(TrainingBlock {
                id: Uuid::new_v4(),
                phase,
                start_date: block_start,
                end_date: self.week_start(weeks_elapsed),
                weeks,
                focus_areas,
                microcycles,
            });
            tracing::debug!(phase = phase.as_str(), weeks, "Assembled training block");
        }
        blocks
    }

    /// Summary statistics for assembled blocks
    #[must_use]
    pub fn summarize(blocks: &[TrainingBlock], distribution: &PhaseDistribution) -> PlanSummary {
        PlanSummary::from_blocks(blocks, distribution.residual_weeks)
    }

    fn week_start(&self, weeks_elapsed: u32) -> DateTime<Utc> {
        self.start_date + Duration::days(i64::from(weeks_elapsed) * DAYS_PER_WEEK)
    }
}
