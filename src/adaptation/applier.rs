// ABOUTME: Applies plan modifications to the future part of a plan, producing a new revision
// ABOUTME: Workouts dated on or before `now` are frozen; totals are recomputed afterwards
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use pierre_core::constants::modification::{
    INJURY_PROTOCOL_RECOVERY_DAYS, INJURY_PROTOCOL_WINDOW_DAYS, SEVERE_INJURY_VOLUME_REDUCTION,
};
use pierre_core::constants::workout_intensity::{
    HARD_SEGMENT_THRESHOLD, RECOVERY_CONVERSION_THRESHOLD, RECOVERY_STUB_DURATION_MINUTES,
    RECOVERY_STUB_MAX_INTENSITY,
};
use pierre_core::models::{
    estimate_tss, AppliedModification, ModificationType, PlanModification, PlannedWorkout,
    SegmentKind, SuggestedChanges, TrainingPlan, WorkoutSegment, WorkoutStructure, WorkoutType,
};

use crate::logging::PlannerLogger;
use crate::methodology::templates::rotating_template;

/// Template used for converted recovery sessions
const RECOVERY_STUB_TEMPLATE: &str = "recovery-30";

/// Modification applier
///
/// Not idempotent: applying the same modification twice compounds it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModificationApplier;

impl ModificationApplier {
    /// Create an applier
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Apply `modifications` to the workouts of `plan` dated after `now`
    ///
    /// Modifications run high priority first; ties keep their input order. The
    /// result is a new revision whose parent is `plan`.
    #[must_use]
    pub fn apply(
        &self,
        plan: &TrainingPlan,
        modifications: &[PlanModification],
        now: DateTime<Utc>,
    ) -> TrainingPlan {
        let mut revised = plan.clone();
        revised.id = Uuid::new_v4();
        revised.revision = plan.revision + 1;
        revised.parent_plan_id = Some(plan.id);
        revised.generated_at = now;

        let mut ordered: Vec<&PlanModification> = modifications.iter().collect();
        ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

        for modification in ordered {
            let affected = apply_one(&mut revised, modification, now);
            PlannerLogger::log_modification_applied(
                &revised.id.to_string(),
                modification.modification_type,
                affected,
            );
            revised.adaptation_history.push(AppliedModification {
                modification_type: modification.modification_type,
                reason: modification.reason.clone(),
                priority: modification.priority,
                applied_at: now,
                affected_workouts: affected,
            });
        }

        revised.refresh_totals();
        tracing::info!(
            plan.id = %revised.id,
            plan.parent = %plan.id,
            plan.revision = revised.revision,
            modifications = modifications.len(),
            "Plan revision produced"
        );
        revised
    }
}

/// Apply one modification; returns the number of workouts it touched
fn apply_one(plan: &mut TrainingPlan, modification: &PlanModification, now: DateTime<Utc>) -> usize {
    let changes = &modification.suggested_changes;
    match modification.modification_type {
        ModificationType::ReduceVolume => {
            let mut touched = reduce_volume(plan, changes, now);
            if let Some(days) = changes.delay_days {
                touched.extend(delay(plan, days, now));
            }
            touched.len()
        }
        ModificationType::ReduceIntensity => reduce_intensity(plan, changes, now).len(),
        ModificationType::AddRecovery => {
            add_recovery(plan, changes, changes.recovery_days.unwrap_or(0), now).len()
        }
        ModificationType::SubstituteWorkout => substitute(plan, changes, now),
        ModificationType::DelayProgression => {
            let mut touched = delay(plan, changes.delay_days.unwrap_or(0), now);
            touched.extend(reduce_intensity(plan, changes, now));
            touched.len()
        }
        ModificationType::InjuryProtocol => injury_protocol(plan, changes, now),
    }
}

/// Future workouts passing the id and type filters, in chronological order
fn targets<'p>(
    plan: &'p mut TrainingPlan,
    changes: &'p SuggestedChanges,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'p mut PlannedWorkout> {
    plan.blocks
        .iter_mut()
        .flat_map(|b| b.microcycles.iter_mut())
        .flat_map(|m| m.workouts.iter_mut())
        .filter(move |w| !w.is_frozen(now))
        .filter(move |w| changes.workout_ids.is_empty() || changes.workout_ids.contains(&w.id))
        .filter(move |w| changes.targets_type(w.workout_type))
}

/// Every future workout, ignoring filters
fn future<'p>(
    plan: &'p mut TrainingPlan,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'p mut PlannedWorkout> {
    plan.blocks
        .iter_mut()
        .flat_map(|b| b.microcycles.iter_mut())
        .flat_map(|m| m.workouts.iter_mut())
        .filter(move |w| !w.is_frozen(now))
}

fn reduction_factor(percent: f64) -> f64 {
    (1.0 - percent / 100.0).clamp(0.0, 1.0)
}

fn reduce_volume(
    plan: &mut TrainingPlan,
    changes: &SuggestedChanges,
    now: DateTime<Utc>,
) -> HashSet<String> {
    let Some(percent) = changes.volume_reduction.filter(|p| *p > 0.0) else {
        return HashSet::new();
    };
    let factor = reduction_factor(percent);
    targets(plan, changes, now)
        .map(|workout| {
            workout.targets.duration_minutes *= factor;
            workout.targets.distance_km *= factor;
            workout.targets.tss *= factor;
            for segment in &mut workout.structure.segments {
                segment.duration_minutes *= factor;
            }
            workout.id.clone()
        })
        .collect()
}

/// Scale segments above the hard threshold; warm-ups are never touched
fn reduce_intensity(
    plan: &mut TrainingPlan,
    changes: &SuggestedChanges,
    now: DateTime<Utc>,
) -> HashSet<String> {
    let Some(percent) = changes.intensity_reduction.filter(|p| *p > 0.0) else {
        return HashSet::new();
    };
    let factor = reduction_factor(percent);
    targets(plan, changes, now)
        .filter_map(|workout| {
            let mut changed = false;
            for segment in &mut workout.structure.segments {
                if segment.kind != SegmentKind::WarmUp && segment.intensity > HARD_SEGMENT_THRESHOLD
                {
                    segment.intensity *= factor;
                    changed = true;
                }
            }
            changed.then(|| {
                refresh_targets(workout);
                workout.id.clone()
            })
        })
        .collect()
}

/// Convert up to `days` hard future sessions into short recovery runs
///
/// A session is hard when its main set is prescribed above the conversion threshold.
fn add_recovery(
    plan: &mut TrainingPlan,
    changes: &SuggestedChanges,
    days: u32,
    now: DateTime<Utc>,
) -> HashSet<String> {
    let mut touched: HashSet<String> = targets(plan, changes, now)
        .filter(|w| w.prescribed_intensity() > RECOVERY_CONVERSION_THRESHOLD)
        .take(days as usize)
        .map(|workout| {
            convert_to_recovery(workout);
            workout.id.clone()
        })
        .collect();
    touched.extend(reduce_intensity(plan, changes, now));
    touched
}

fn convert_to_recovery(workout: &mut PlannedWorkout) {
    let duration = workout
        .targets
        .duration_minutes
        .min(RECOVERY_STUB_DURATION_MINUTES);
    let intensity = WorkoutType::Recovery
        .default_intensity()
        .min(RECOVERY_STUB_MAX_INTENSITY);
    let distance = if workout.targets.duration_minutes > 0.0 {
        workout.targets.distance_km * duration / workout.targets.duration_minutes
    } else {
        0.0
    };

    workout.workout_type = WorkoutType::Recovery;
    workout.template_id = RECOVERY_STUB_TEMPLATE.to_owned();
    workout.structure = WorkoutStructure {
        name: "Recovery run".to_owned(),
        segments: vec![WorkoutSegment {
            kind: SegmentKind::Steady,
            duration_minutes: duration,
            intensity,
            repetitions: 1,
            description: "very easy recovery running".to_owned(),
        }],
    };
    workout.targets.duration_minutes = duration;
    workout.targets.distance_km = distance;
    workout.targets.intensity = intensity;
    workout.targets.tss = estimate_tss(duration, intensity);
}

/// Rewrite workout types, rebuilding the structure from the library at the same duration
fn substitute(plan: &mut TrainingPlan, changes: &SuggestedChanges, now: DateTime<Utc>) -> usize {
    let Some(substitute_type) = changes.substitute_type else {
        tracing::warn!("Substitution without a replacement type ignored");
        return 0;
    };
    let Some(template) = rotating_template(substitute_type, 0) else {
        tracing::warn!(substitute_type = ?substitute_type, "No library template for substitution; ignored");
        return 0;
    };
    let mut count = 0;
    for workout in targets(plan, changes, now) {
        let duration = workout.targets.duration_minutes;
        let mut structure = template.to_structure(1.0);
        let natural = structure.total_minutes();
        if natural > 0.0 {
            let factor = duration / natural;
            for segment in &mut structure.segments {
                segment.duration_minutes *= factor;
            }
        }
        workout.workout_type = substitute_type;
        workout.template_id = template.id.to_owned();
        workout.structure = structure;
        refresh_targets(workout);
        count += 1;
    }
    count
}

/// Shift every future workout `days` later
fn delay(plan: &mut TrainingPlan, days: i64, now: DateTime<Utc>) -> HashSet<String> {
    if days == 0 {
        return HashSet::new();
    }
    future(plan, now)
        .map(|workout| {
            workout.date += Duration::days(days);
            workout.id.clone()
        })
        .collect()
}

/// Severe: clear the next week of training. Otherwise: an extended recovery block.
fn injury_protocol(plan: &mut TrainingPlan, changes: &SuggestedChanges, now: DateTime<Utc>) -> usize {
    let severe = changes
        .volume_reduction
        .is_some_and(|p| p >= SEVERE_INJURY_VOLUME_REDUCTION);
    if !severe {
        let days = changes.recovery_days.unwrap_or(0) + INJURY_PROTOCOL_RECOVERY_DAYS;
        return add_recovery(plan, changes, days, now).len();
    }

    let window_end = now + Duration::days(INJURY_PROTOCOL_WINDOW_DAYS);
    let mut removed = 0;
    for microcycle in plan.blocks.iter_mut().flat_map(|b| b.microcycles.iter_mut()) {
        let before = microcycle.workouts.len();
        microcycle
            .workouts
            .retain(|w| w.date <= now || w.date > window_end);
        removed += before - microcycle.workouts.len();
    }
    removed
}

fn refresh_targets(workout: &mut PlannedWorkout) {
    workout.targets.intensity = workout.structure.mean_intensity();
    workout.targets.tss = estimate_tss(workout.targets.duration_minutes, workout.targets.intensity);
}
