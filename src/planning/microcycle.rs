// ABOUTME: Builds one week of training: volume progression, pattern choice, scheduling and targets
// ABOUTME: Workouts come from the injected philosophy; paces come from the fitness model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

use pierre_core::models::{
    estimate_tss, IntensityDistribution, PeriodizationModel, PlannedWorkout, TrainingPhase,
    TrainingPreferences, WeeklyMicrocycle, WorkoutStructure, WorkoutTargets, WorkoutType,
};

use crate::cache::{PaceCache, PaceKey};
use crate::config::PeriodizationConfig;
use crate::fitness::FitnessModel;
use crate::methodology::MethodologyPhilosophy;

/// Token standing for "the next quality workout the philosophy prioritizes"
const QUALITY_TOKEN: &str = "Q";

/// Pattern used for every recovery (down) week
pub const RECOVERY_WEEK_PATTERN: &str = "R-E-R-E-L";

/// Weekly patterns per phase, least to most demanding
const BASE_PATTERNS: &[&str] = &["E-E-R-E-L", "E-Q-E-E-R-L", "E-Q-E-R-L"];
const BUILD_PATTERNS: &[&str] = &["E-Q-E-R-L", "E-Q-R-Q-E-L", "Q-E-Q-R-Q-L"];
const PEAK_PATTERNS: &[&str] = &["E-Q-E-M-L", "E-Q-R-Q-L", "Q-E-Q-R-M-L"];
const TAPER_PATTERNS: &[&str] = &["E-R-E-E-L", "E-Q-R-E-L", "E-M-R-Q-L"];
const RECOVERY_PATTERNS: &[&str] = &["E-R-E-R-L", "E-F-E-R-L"];

/// Progression factor for week `week` (0-based) of a phase at weekly rate `rate`
///
/// Monotonically increasing in every phase except taper, which decreases to a 0.4 floor.
#[must_use]
pub fn progression_factor(phase: TrainingPhase, week: u32, rate: f64) -> f64 {
    let w = f64::from(week);
    match phase {
        TrainingPhase::Base => rate.mul_add(w, 1.0),
        TrainingPhase::Build => rate.mul_add(w, 1.1),
        TrainingPhase::Peak => (0.5 * rate).mul_add(w, 1.2),
        TrainingPhase::Recovery => (0.5 * rate).mul_add(w, 0.8),
        TrainingPhase::Taper => 0.15f64.mul_add(-w, 0.75).max(0.4),
    }
}

/// Whether week `week` (0-based) of a phase is a recovery week
#[must_use]
pub const fn is_recovery_week(week: u32, interval: u32) -> bool {
    interval > 0 && (week + 1) % interval == 0
}

/// Target weekly volume in kilometers
#[must_use]
pub fn weekly_volume(
    base_volume_km: f64,
    phase: TrainingPhase,
    week: u32,
    rate: f64,
    config: &PeriodizationConfig,
) -> f64 {
    let volume = base_volume_km * progression_factor(phase, week, rate);
    if is_recovery_week(week, config.recovery_week_interval) {
        volume * config.recovery_week_factor
    } else {
        volume
    }
}

/// Share of non-rest sessions in a pattern that are quality sessions
#[must_use]
pub fn pattern_hard_share(pattern: &str) -> f64 {
    let mut sessions = 0_u32;
    let mut quality = 0_u32;
    for token in pattern.split('-') {
        if token == QUALITY_TOKEN {
            sessions += 1;
            quality += 1;
            continue;
        }
        match token.chars().next().and_then(WorkoutType::from_token) {
            Some(WorkoutType::Rest) | None => {}
            Some(workout_type) => {
                sessions += 1;
                if workout_type.is_quality() {
                    quality += 1;
                }
            }
        }
    }
    if sessions == 0 {
        0.0
    } else {
        f64::from(quality) / f64::from(sessions)
    }
}

/// Candidate patterns for a phase
#[must_use]
pub const fn phase_patterns(phase: TrainingPhase) -> &'static [&'static str] {
    match phase {
        TrainingPhase::Base => BASE_PATTERNS,
        TrainingPhase::Build => BUILD_PATTERNS,
        TrainingPhase::Peak => PEAK_PATTERNS,
        TrainingPhase::Taper => TAPER_PATTERNS,
        TrainingPhase::Recovery => RECOVERY_PATTERNS,
    }
}

/// Choose the weekly pattern
///
/// The pattern whose quality share is closest to the distribution's non-easy share
/// wins. Block periodization loads build and peak with the most demanding pattern;
/// undulating periodization drops to the next lighter pattern every other week.
#[must_use]
pub fn select_pattern(
    phase: TrainingPhase,
    week: u32,
    recovery_week: bool,
    distribution: &IntensityDistribution,
    model: PeriodizationModel,
) -> &'static str {
    if recovery_week {
        return RECOVERY_WEEK_PATTERN;
    }
    let patterns = phase_patterns(phase);
    let mut ranked: Vec<&'static str> = patterns.to_vec();
    ranked.sort_by(|a, b| pattern_hard_share(a).total_cmp(&pattern_hard_share(b)));

    let target = distribution.non_easy() / 100.0;
    let closest = ranked
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            (pattern_hard_share(a) - target)
                .abs()
                .total_cmp(&(pattern_hard_share(b) - target).abs())
        })
        .map_or(0, |(index, _)| index);

    let index = match model {
        PeriodizationModel::Linear => closest,
        PeriodizationModel::Block
            if matches!(phase, TrainingPhase::Build | TrainingPhase::Peak) =>
        {
            ranked.len() - 1
        }
        PeriodizationModel::Block => closest,
        PeriodizationModel::Undulating if week % 2 == 1 => closest.saturating_sub(1),
        PeriodizationModel::Undulating => closest,
    };
    ranked.get(index).copied().unwrap_or(RECOVERY_WEEK_PATTERN)
}

/// Per-plan inputs shared by every week
#[derive(Debug, Clone)]
pub struct PlanContext {
    /// Weekly volume the progression starts from
    pub base_volume_km: f64,
    /// Weekly progression rate
    pub progression_rate: f64,
    /// Target intensity distribution
    pub distribution: IntensityDistribution,
    /// Periodization model
    pub periodization: PeriodizationModel,
    /// Scheduling preferences
    pub preferences: TrainingPreferences,
    /// Athlete VDOT (0 when unknown)
    pub vdot: f64,
    /// Environmental pace slowdown (>= 1)
    pub pace_adjustment: f64,
}

/// Position of a week inside the plan
#[derive(Debug, Clone, Copy)]
pub struct WeekSlot {
    /// 1-based week number across the plan
    pub week_number: u32,
    /// 0-based week within the phase
    pub week_in_phase: u32,
    /// Phase
    pub phase: TrainingPhase,
    /// First day of the week
    pub start_date: DateTime<Utc>,
}

/// A workout before distances are assigned
struct DraftWorkout {
    workout_type: WorkoutType,
    template_id: &'static str,
    structure: WorkoutStructure,
    pace_min_per_km: f64,
    day_offset: i64,
}

/// Builds weekly microcycles
pub struct MicrocycleBuilder<'a> {
    philosophy: &'a dyn MethodologyPhilosophy,
    fitness_model: &'a dyn FitnessModel,
    pace_cache: &'a mut PaceCache,
    config: &'a PeriodizationConfig,
    context: &'a PlanContext,
}

impl<'a> MicrocycleBuilder<'a> {
    /// Create a builder
    pub fn new(
        philosophy: &'a dyn MethodologyPhilosophy,
        fitness_model: &'a dyn FitnessModel,
        pace_cache: &'a mut PaceCache,
        config: &'a PeriodizationConfig,
        context: &'a PlanContext,
    ) -> Self {
        Self {
            philosophy,
            fitness_model,
            pace_cache,
            config,
            context,
        }
    }

    /// Build the microcycle for one week
    pub fn build_week(&mut self, slot: WeekSlot) -> WeeklyMicrocycle {
        let context = self.context;
        let recovery_week = is_recovery_week(slot.week_in_phase, self.config.recovery_week_interval);
        let mut volume = weekly_volume(
            context.base_volume_km,
            slot.phase,
            slot.week_in_phase,
            context.progression_rate,
            self.config,
        );

        let pattern = select_pattern(
            slot.phase,
            slot.week_in_phase,
            recovery_week,
            &context.distribution,
            context.periodization,
        );
        let workout_types = fit_to_days(
            self.resolve_pattern(pattern, slot),
            context.preferences.available_days.len(),
        );
        let day_offsets = schedule_days(&context.preferences, slot.start_date, workout_types.len());

        let drafts: Vec<DraftWorkout> = workout_types
            .into_iter()
            .zip(day_offsets)
            .filter_map(|(workout_type, day_offset)| self.draft(workout_type, day_offset, slot))
            .collect();

        if let Some(max_hours) = context.preferences.max_weekly_hours {
            let easy_pace = self.pace(WorkoutType::Easy);
            let cap = max_hours * 60.0 / easy_pace;
            if volume > cap {
                tracing::debug!(week = slot.week_number, volume, cap, "Weekly volume capped by time budget");
                volume = cap;
            }
        }

        let workouts = allocate_distances(drafts, volume, slot);
        tracing::debug!(
            week = slot.week_number,
            phase = slot.phase.as_str(),
            pattern,
            recovery_week,
            volume_km = volume,
            "Built microcycle"
        );
        WeeklyMicrocycle::from_workouts(slot.week_number, pattern, recovery_week, volume, workouts)
    }

    /// Turn pattern tokens into workout types, filling quality slots from the philosophy
    fn resolve_pattern(&self, pattern: &str, slot: WeekSlot) -> Vec<WorkoutType> {
        let priorities = self.philosophy.workout_priorities(slot.phase);
        let mut quality_index = slot.week_number as usize;
        let mut resolved = Vec::new();
        for token in pattern.split('-') {
            if token == QUALITY_TOKEN {
                if let Some(workout_type) = priorities.get(quality_index % priorities.len().max(1)) {
                    resolved.push(*workout_type);
                }
                quality_index += 1;
                continue;
            }
            match token.chars().next().and_then(WorkoutType::from_token) {
                Some(WorkoutType::Rest) => {}
                Some(workout_type) => resolved.push(workout_type),
                None => tracing::warn!(token, pattern, "Ignoring unknown pattern token"),
            }
        }
        resolved
    }

    /// Draft one session; `None` (logged) when the philosophy has no template for it
    fn draft(
        &mut self,
        workout_type: WorkoutType,
        day_offset: i64,
        slot: WeekSlot,
    ) -> Option<DraftWorkout> {
        let Some(template) = self
            .philosophy
            .select_workout(workout_type, slot.phase, slot.week_in_phase)
        else {
            tracing::warn!(
                workout_type = ?workout_type,
                week = slot.week_number,
                "No library template for workout type; session dropped"
            );
            return None;
        };
        let structure = self
            .philosophy
            .customize_workout(template, slot.phase, slot.week_in_phase);
        Some(DraftWorkout {
            workout_type: template.workout_type,
            template_id: template.id,
            structure,
            pace_min_per_km: self.pace(template.workout_type),
            day_offset,
        })
    }

    /// Environment-adjusted training pace (min/km), memoized
    fn pace(&mut self, workout_type: WorkoutType) -> f64 {
        let key = PaceKey::new(self.context.vdot, workout_type);
        let base = if let Some(cached) = self.pace_cache.get(&key) {
            cached
        } else {
            let pace = self.fitness_model.training_pace(self.context.vdot, workout_type);
            self.pace_cache.set(key, pace);
            pace
        };
        base * self.context.pace_adjustment
    }
}

/// Drop sessions until the week fits the available days
///
/// Easy and recovery runs go first; the final session (the long run) is always kept.
fn fit_to_days(mut workout_types: Vec<WorkoutType>, available_days: usize) -> Vec<WorkoutType> {
    while workout_types.len() > available_days.max(1) {
        let last = workout_types.len() - 1;
        let removable = workout_types[..last]
            .iter()
            .rposition(|t| t.is_easy_or_recovery())
            .unwrap_or(0);
        workout_types.remove(removable);
    }
    workout_types
}

/// Day offsets (from the week start) for `count` sessions, final session on the long-run day
///
/// Sessions other than the last are placed by scanning the available days in calendar
/// order without double-booking.
fn schedule_days(preferences: &TrainingPreferences, week_start: DateTime<Utc>, count: usize) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    let offset_of = |day: Weekday| -> i64 {
        let start = i64::from(week_start.weekday().num_days_from_monday());
        (i64::from(day.num_days_from_monday()) - start).rem_euclid(7)
    };

    let mut offsets: Vec<i64> = preferences.available_days.iter().map(|d| offset_of(*d)).collect();
    offsets.sort_unstable();
    offsets.dedup();
    if offsets.is_empty() {
        offsets.push(0);
    }

    let long_run_offset = preferences
        .long_run_day
        .map(offset_of)
        .filter(|offset| offsets.contains(offset))
        .or_else(|| offsets.last().copied())
        .unwrap_or(0);

    let mut scheduled: Vec<i64> = offsets
        .into_iter()
        .filter(|offset| *offset != long_run_offset)
        .take(count - 1)
        .collect();
    scheduled.push(long_run_offset);
    scheduled
}

/// Assign distances against the weekly volume and produce planned workouts
///
/// Each session but the last gets `min(natural distance, remaining / sessions left)`;
/// the last absorbs the remainder.
fn allocate_distances(drafts: Vec<DraftWorkout>, volume_km: f64, slot: WeekSlot) -> Vec<PlannedWorkout> {
    let count = drafts.len();
    let mut remaining = volume_km.max(0.0);
    let mut workouts = Vec::with_capacity(count);

    for (index, draft) in drafts.into_iter().enumerate() {
        let natural_km = if draft.pace_min_per_km > 0.0 {
            draft.structure.total_minutes() / draft.pace_min_per_km
        } else {
            0.0
        };
        let distance_km = if index + 1 == count {
            remaining
        } else {
            let slots_left = (count - index) as f64;
            let capped = natural_km.min(remaining / slots_left);
            (capped * 10.0).floor() / 10.0
        };
        remaining = (remaining - distance_km).max(0.0);
        workouts.push(finalize(draft, distance_km, slot));
    }
    workouts
}

/// Stretch or shrink the structure to the assigned distance and compute targets
fn finalize(draft: DraftWorkout, distance_km: f64, slot: WeekSlot) -> PlannedWorkout {
    let mut structure = draft.structure;
    let duration = distance_km * draft.pace_min_per_km;
    let current = structure.total_minutes();
    if current > 0.0 {
        let factor = duration / current;
        for segment in &mut structure.segments {
            segment.duration_minutes *= factor;
        }
    }
    let intensity = structure.mean_intensity();

    PlannedWorkout {
        id: format!(
            "w{:02}-d{}-{}",
            slot.week_number,
            draft.day_offset,
            draft.workout_type.token()
        ),
        date: slot.start_date + Duration::days(draft.day_offset),
        workout_type: draft.workout_type,
        template_id: draft.template_id.to_owned(),
        targets: WorkoutTargets {
            duration_minutes: duration,
            distance_km,
            tss: estimate_tss(duration, intensity),
            intensity,
        },
        structure,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_recovery_week_every_fourth_week() {
        let flags: Vec<bool> = (0..8).map(|w| is_recovery_week(w, 4)).collect();
        assert_eq!(flags, vec![false, false, false, true, false, false, false, true]);
        assert!(!is_recovery_week(3, 0));
    }

    #[test]
    fn test_pattern_hard_share_counts_quality_slots() {
        assert!(pattern_hard_share("E-E-R-E-L").abs() < f64::EPSILON);
        assert!((pattern_hard_share("E-Q-E-R-L") - 0.2).abs() < 1e-9);
        assert!((pattern_hard_share("E-M-X-Q-L") - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_days_keeps_long_run_and_quality() {
        let types = vec![
            WorkoutType::Intervals,
            WorkoutType::Easy,
            WorkoutType::Threshold,
            WorkoutType::Recovery,
            WorkoutType::LongRun,
        ];
        let fitted = fit_to_days(types, 3);
        assert_eq!(
            fitted,
            vec![WorkoutType::Intervals, WorkoutType::Threshold, WorkoutType::LongRun]
        );
    }

    #[test]
    fn test_schedule_days_puts_long_run_on_preferred_day() {
        // 2025-01-06 is a Monday
        let monday = DateTime::parse_from_rfc3339("2025-01-06T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let preferences = TrainingPreferences::default();
        let offsets = schedule_days(&preferences, monday, 5);
        assert_eq!(offsets, vec![0, 1, 3, 5, 6]);

        let wednesday = monday + Duration::days(2);
        let offsets = schedule_days(&preferences, wednesday, 3);
        assert_eq!(offsets.last(), Some(&4));
        let mut unique = offsets.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), offsets.len());
    }
}
