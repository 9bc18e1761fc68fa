// ABOUTME: Training plan aggregate: config, phases, blocks, weekly microcycles and summary
// ABOUTME: The plan owns its blocks, microcycles and workouts as a tree with revision lineage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::fitness::{ExperienceLevel, FitnessAssessment};
use super::modification::{ModificationPriority, ModificationType};
use super::workout::{IntensityZone, PlannedWorkout};
use crate::constants::units::DAYS_PER_WEEK;
use crate::errors::{AppError, AppResult};

/// Race or training goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingGoal {
    /// 5 kilometers
    FiveK,
    /// 10 kilometers
    TenK,
    /// 21.0975 kilometers
    HalfMarathon,
    /// 42.195 kilometers
    Marathon,
    /// Anything beyond the marathon
    Ultra,
    /// No race; general aerobic fitness
    GeneralFitness,
}

impl TrainingGoal {
    /// Race distance in kilometers, if the goal is a race
    #[must_use]
    pub const fn race_distance_km(self) -> Option<f64> {
        match self {
            Self::FiveK => Some(5.0),
            Self::TenK => Some(10.0),
            Self::HalfMarathon => Some(21.0975),
            Self::Marathon => Some(42.195),
            Self::Ultra => Some(50.0),
            Self::GeneralFitness => None,
        }
    }

    /// Whether the goal is endurance-dominated (half marathon and longer)
    #[must_use]
    pub const fn is_endurance(self) -> bool {
        matches!(self, Self::HalfMarathon | Self::Marathon | Self::Ultra)
    }
}

/// Periodization phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhase {
    /// Aerobic base building
    Base,
    /// Specific strength and threshold development
    Build,
    /// Race-specific sharpening
    Peak,
    /// Volume reduction before the race
    Taper,
    /// Consolidation block between build and peak in long plans
    Recovery,
}

impl TrainingPhase {
    /// Order in which phases appear in an assembled plan
    pub const PLAN_ORDER: [Self; 5] = [
        Self::Base,
        Self::Build,
        Self::Recovery,
        Self::Peak,
        Self::Taper,
    ];

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Build => "build",
            Self::Peak => "peak",
            Self::Taper => "taper",
            Self::Recovery => "recovery",
        }
    }
}

/// Coaching methodology; a closed set resolved to a philosophy by a factory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Methodology {
    /// Jack Daniels: VDOT-paced quality sessions
    #[default]
    Daniels,
    /// Arthur Lydiard: long aerobic base, hills, late sharpening
    Lydiard,
    /// Pete Pfitzinger: high mileage, lactate threshold, medium-long runs
    Pfitzinger,
    /// Hanson brothers: cumulative fatigue, capped long run
    Hanson,
    /// Seiler-style 80/20 polarized training
    Polarized,
}

impl Methodology {
    /// Every methodology
    pub const ALL: [Self; 5] = [
        Self::Daniels,
        Self::Lydiard,
        Self::Pfitzinger,
        Self::Hanson,
        Self::Polarized,
    ];
}

/// Target share of training time per intensity zone (percentages)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntensityDistribution {
    /// Low intensity percentage
    pub easy: f64,
    /// Moderate ("grey zone") percentage
    pub moderate: f64,
    /// High intensity percentage
    pub hard: f64,
}

impl Default for IntensityDistribution {
    fn default() -> Self {
        Self::new(80.0, 10.0, 10.0)
    }
}

impl IntensityDistribution {
    /// Build a distribution from percentages
    #[must_use]
    pub const fn new(easy: f64, moderate: f64, hard: f64) -> Self {
        Self {
            easy,
            moderate,
            hard,
        }
    }

    /// Share of training outside the low zone (moderate + hard)
    #[must_use]
    pub fn non_easy(&self) -> f64 {
        self.moderate + self.hard
    }

    /// Sum of the three shares
    #[must_use]
    pub fn total(&self) -> f64 {
        self.easy + self.moderate + self.hard
    }

    /// Share of a zone
    #[must_use]
    pub const fn share(&self, zone: IntensityZone) -> f64 {
        match zone {
            IntensityZone::Low => self.easy,
            IntensityZone::Moderate => self.moderate,
            IntensityZone::High => self.hard,
        }
    }

    /// Distribution from per-zone minutes; all zeros when there are no minutes
    #[must_use]
    pub fn from_minutes(low: f64, moderate: f64, high: f64) -> Self {
        let total = low + moderate + high;
        if total <= 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }
        Self::new(
            low / total * 100.0,
            moderate / total * 100.0,
            high / total * 100.0,
        )
    }
}

/// How load varies week to week inside a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PeriodizationModel {
    /// Same pattern all block, volume climbs linearly
    #[default]
    Linear,
    /// Concentrated loading per block
    Block,
    /// Alternating emphasis week to week
    Undulating,
}

/// Typical training terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    /// Flat roads or track
    #[default]
    Flat,
    /// Rolling hills
    Rolling,
    /// Sustained climbs
    Hilly,
    /// Technical trail
    Trail,
}

/// Environmental conditions the athlete trains in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingEnvironment {
    /// Training altitude in meters
    pub altitude_meters: f64,
    /// Typical temperature in Celsius
    pub typical_temperature_celsius: f64,
    /// Typical terrain
    pub terrain: Terrain,
}

impl Default for TrainingEnvironment {
    fn default() -> Self {
        Self {
            altitude_meters: 0.0,
            typical_temperature_celsius: 15.0,
            terrain: Terrain::Flat,
        }
    }
}

impl TrainingEnvironment {
    /// Pace slowdown multiplier (>= 1.0) for heat, altitude and terrain
    ///
    /// Heat: +0.4% per degree above 15°C. Altitude: +1% per 300 m above 1000 m.
    #[must_use]
    pub fn pace_adjustment_factor(&self) -> f64 {
        let heat = (self.typical_temperature_celsius - 15.0).max(0.0) * 0.004;
        let altitude = ((self.altitude_meters - 1000.0).max(0.0) / 300.0) * 0.01;
        let terrain = match self.terrain {
            Terrain::Flat => 0.0,
            Terrain::Rolling => 0.02,
            Terrain::Hilly => 0.05,
            Terrain::Trail => 0.08,
        };
        1.0 + heat + altitude + terrain
    }
}

/// Scheduling preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPreferences {
    /// Days the athlete can train, in preference order
    pub available_days: Vec<Weekday>,
    /// Preferred long-run day
    pub long_run_day: Option<Weekday>,
    /// Explicit experience level; derived from training age when absent
    pub experience_level: Option<ExperienceLevel>,
    /// Weekly time budget in hours
    pub max_weekly_hours: Option<f64>,
}

impl TrainingPreferences {
    /// Drop repeated weekdays, keeping the first occurrence of each
    pub fn dedup_available_days(&mut self) {
        let mut seen = HashSet::new();
        self.available_days.retain(|day| seen.insert(*day));
    }
}

impl Default for TrainingPreferences {
    fn default() -> Self {
        Self {
            available_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Thu,
                Weekday::Sat,
                Weekday::Sun,
            ],
            long_run_day: Some(Weekday::Sun),
            experience_level: None,
            max_weekly_hours: None,
        }
    }
}

/// Goal inputs for plan generation; never mutated after generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlanConfig {
    /// Goal
    pub goal: TrainingGoal,
    /// First day of the plan
    pub start_date: DateTime<Utc>,
    /// Race / end date
    pub target_date: DateTime<Utc>,
    /// Fitness snapshot at generation time
    pub current_fitness: FitnessAssessment,
    /// Scheduling preferences
    pub preferences: TrainingPreferences,
    /// Environment
    pub environment: TrainingEnvironment,
    /// Coaching methodology
    pub methodology: Methodology,
    /// Override of the methodology's intensity distribution
    pub intensity_distribution: Option<IntensityDistribution>,
    /// Periodization model
    pub periodization: PeriodizationModel,
}

impl TrainingPlanConfig {
    /// Plan length in whole weeks (rounded up, at least one)
    #[must_use]
    pub fn total_weeks(&self) -> u32 {
        let days = (self.target_date - self.start_date).num_days().max(1);
        let weeks = (days + DAYS_PER_WEEK - 1) / DAYS_PER_WEEK;
        u32::try_from(weeks).unwrap_or(u32::MAX).max(1)
    }

    /// Experience level: explicit preference, else derived from training age
    #[must_use]
    pub fn experience_level(&self) -> ExperienceLevel {
        self.preferences
            .experience_level
            .unwrap_or_else(|| self.current_fitness.experience_level())
    }

    /// Validate caller-supplied inputs
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the target date does not follow the start date, no
    /// training day is available, or fitness / distribution values are negative or
    /// inconsistent.
    pub fn validate(&self) -> AppResult<()> {
        if self.target_date <= self.start_date {
            return Err(AppError::invalid_input(
                "target date must be after the start date",
            ));
        }
        if self.preferences.available_days.is_empty() {
            return Err(AppError::missing_field("preferences.available_days"));
        }
        let fitness = &self.current_fitness;
        if fitness.weekly_mileage < 0.0 || fitness.vdot < 0.0 || fitness.longest_recent_run < 0.0
        {
            return Err(AppError::out_of_range(
                "fitness values must not be negative",
            ));
        }
        if let Some(distribution) = self.intensity_distribution {
            if (distribution.total() - 100.0).abs() > 1.0 {
                return Err(AppError::out_of_range(format!(
                    "intensity distribution must sum to 100, got {:.1}",
                    distribution.total()
                )));
            }
        }
        Ok(())
    }
}

/// One week of structured training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMicrocycle {
    /// 1-based week number across the whole plan
    pub week_number: u32,
    /// Workout-type pattern string the week was built from
    pub pattern: String,
    /// Whether this is a down week
    pub is_recovery_week: bool,
    /// Target weekly volume in kilometers
    pub target_volume_km: f64,
    /// Scheduled workouts, ordered by date
    pub workouts: Vec<PlannedWorkout>,
    /// Sum of workout TSS
    pub total_load: f64,
    /// Sum of workout distance in kilometers
    pub total_distance: f64,
    /// Easy + recovery workouts over all workouts
    pub recovery_ratio: f64,
}

impl WeeklyMicrocycle {
    /// Build a microcycle and compute its totals from the workouts
    #[must_use]
    pub fn from_workouts(
        week_number: u32,
        pattern: impl Into<String>,
        is_recovery_week: bool,
        target_volume_km: f64,
        workouts: Vec<PlannedWorkout>,
    ) -> Self {
        let mut microcycle = Self {
            week_number,
            pattern: pattern.into(),
            is_recovery_week,
            target_volume_km,
            workouts,
            total_load: 0.0,
            total_distance: 0.0,
            recovery_ratio: 0.0,
        };
        microcycle.recompute_totals();
        microcycle
    }

    /// Recompute load, distance and recovery ratio from the workouts
    pub fn recompute_totals(&mut self) {
        self.workouts.sort_by_key(|w| w.date);
        self.total_load = self.workouts.iter().map(|w| w.targets.tss).sum();
        self.total_distance = self.workouts.iter().map(|w| w.targets.distance_km).sum();
        let easy = self
            .workouts
            .iter()
            .filter(|w| w.workout_type.is_easy_or_recovery())
            .count();
        self.recovery_ratio = if self.workouts.is_empty() {
            0.0
        } else {
            easy as f64 / self.workouts.len() as f64
        };
    }
}

/// Contiguous run of weeks sharing a phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingBlock {
    /// Block identifier
    pub id: Uuid,
    /// Phase
    pub phase: TrainingPhase,
    /// First day of the block
    pub start_date: DateTime<Utc>,
    /// Day after the last day of the block (start of the next block)
    pub end_date: DateTime<Utc>,
    /// Number of weeks
    pub weeks: u32,
    /// Training emphasis for the block
    pub focus_areas: Vec<String>,
    /// Weekly microcycles
    pub microcycles: Vec<WeeklyMicrocycle>,
}

impl TrainingBlock {
    /// Whether the date falls within `[start_date, end_date)`
    #[must_use]
    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        date >= self.start_date && date < self.end_date
    }
}

/// Aggregate statistics of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Weeks covered by blocks
    pub total_weeks: u32,
    /// Number of scheduled workouts
    pub total_workouts: usize,
    /// Total planned kilometers
    pub total_distance_km: f64,
    /// Total planned TSS
    pub total_load: f64,
    /// Mean weekly kilometers
    pub average_weekly_distance_km: f64,
    /// Highest weekly kilometers
    pub peak_weekly_distance_km: f64,
    /// Mean microcycle recovery ratio
    pub average_recovery_ratio: f64,
    /// Planned duration-weighted intensity distribution
    pub intensity_distribution: IntensityDistribution,
    /// Weeks per phase
    pub phase_weeks: BTreeMap<TrainingPhase, u32>,
    /// Weeks between start and target not allocated to any phase
    pub unallocated_weeks: u32,
}

impl PlanSummary {
    /// Compute summary statistics from blocks
    #[must_use]
    pub fn from_blocks(blocks: &[TrainingBlock], unallocated_weeks: u32) -> Self {
        let microcycles: Vec<&WeeklyMicrocycle> =
            blocks.iter().flat_map(|b| b.microcycles.iter()).collect();
        let week_count = microcycles.len();

        let total_distance_km: f64 = microcycles.iter().map(|m| m.total_distance).sum();
        let total_load: f64 = microcycles.iter().map(|m| m.total_load).sum();
        let peak_weekly_distance_km = microcycles
            .iter()
            .map(|m| m.total_distance)
            .fold(0.0, f64::max);
        let (average_weekly_distance_km, average_recovery_ratio) = if week_count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_distance_km / week_count as f64,
                microcycles.iter().map(|m| m.recovery_ratio).sum::<f64>() / week_count as f64,
            )
        };

        let mut zone_minutes = [0.0_f64; 3];
        let mut total_workouts = 0;
        for workout in microcycles.iter().flat_map(|m| m.workouts.iter()) {
            total_workouts += 1;
            let slot = match workout.workout_type.zone() {
                IntensityZone::Low => 0,
                IntensityZone::Moderate => 1,
                IntensityZone::High => 2,
            };
            zone_minutes[slot] += workout.targets.duration_minutes;
        }

        let mut phase_weeks = BTreeMap::new();
        for block in blocks {
            *phase_weeks.entry(block.phase).or_insert(0) += block.weeks;
        }

        Self {
            total_weeks: blocks.iter().map(|b| b.weeks).sum(),
            total_workouts,
            total_distance_km,
            total_load,
            average_weekly_distance_km,
            peak_weekly_distance_km,
            average_recovery_ratio,
            intensity_distribution: IntensityDistribution::from_minutes(
                zone_minutes[0],
                zone_minutes[1],
                zone_minutes[2],
            ),
            phase_weeks,
            unallocated_weeks,
        }
    }
}

/// Record of a modification that was applied to produce a plan revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedModification {
    /// Modification type
    pub modification_type: ModificationType,
    /// Why it was applied
    pub reason: String,
    /// Priority it was applied with
    pub priority: ModificationPriority,
    /// The "now" the modification was applied relative to
    pub applied_at: DateTime<Utc>,
    /// Number of workouts changed, moved or removed
    pub affected_workouts: usize,
}

/// Periodized training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Plan identifier (new for every revision)
    pub id: Uuid,
    /// Revision number, 0 for a freshly generated plan
    pub revision: u32,
    /// Plan this revision was derived from
    pub parent_plan_id: Option<Uuid>,
    /// When this revision was produced
    pub generated_at: DateTime<Utc>,
    /// Generation inputs
    pub config: TrainingPlanConfig,
    /// Blocks in chronological order
    pub blocks: Vec<TrainingBlock>,
    /// Summary statistics
    pub summary: PlanSummary,
    /// Modifications applied across all revisions, oldest first
    pub adaptation_history: Vec<AppliedModification>,
}

impl TrainingPlan {
    /// Iterate over every workout in chronological block order
    pub fn workouts(&self) -> impl Iterator<Item = &PlannedWorkout> {
        self.blocks
            .iter()
            .flat_map(|b| b.microcycles.iter())
            .flat_map(|m| m.workouts.iter())
    }

    /// Iterate over every microcycle
    pub fn microcycles(&self) -> impl Iterator<Item = &WeeklyMicrocycle> {
        self.blocks.iter().flat_map(|b| b.microcycles.iter())
    }

    /// Workouts dated on or before `now`
    #[must_use]
    pub fn past_due_workouts(&self, now: DateTime<Utc>) -> Vec<&PlannedWorkout> {
        self.workouts().filter(|w| w.is_frozen(now)).collect()
    }

    /// Workouts dated after `now`
    #[must_use]
    pub fn future_workouts(&self, now: DateTime<Utc>) -> Vec<&PlannedWorkout> {
        self.workouts().filter(|w| !w.is_frozen(now)).collect()
    }

    /// Find a workout by id
    #[must_use]
    pub fn find_workout(&self, id: &str) -> Option<&PlannedWorkout> {
        self.workouts().find(|w| w.id == id)
    }

    /// Block whose stored date range contains `date`
    #[must_use]
    pub fn block_for_date(&self, date: DateTime<Utc>) -> Option<&TrainingBlock> {
        self.blocks.iter().find(|b| b.contains(date))
    }

    /// Phase the athlete is in at `now`
    #[must_use]
    pub fn current_phase(&self, now: DateTime<Utc>) -> Option<TrainingPhase> {
        self.block_for_date(now).map(|b| b.phase)
    }

    /// Last day covered by the plan
    #[must_use]
    pub fn end_date(&self) -> DateTime<Utc> {
        self.blocks
            .last()
            .map_or(self.config.start_date, |b| b.end_date)
    }

    /// Recompute all microcycle totals and the summary
    pub fn refresh_totals(&mut self) {
        for microcycle in self
            .blocks
            .iter_mut()
            .flat_map(|b| b.microcycles.iter_mut())
        {
            microcycle.recompute_totals();
        }
        self.summary = PlanSummary::from_blocks(&self.blocks, self.summary.unallocated_weeks);
    }

    /// Compare this plan against a later revision
    #[must_use]
    pub fn compare(&self, revised: &Self) -> PlanComparison {
        let changed = revised
            .workouts()
            .filter(|w| self.find_workout(&w.id).is_some_and(|orig| orig != *w))
            .count();
        let removed = self
            .workouts()
            .filter(|w| revised.find_workout(&w.id).is_none())
            .count();
        PlanComparison {
            revision_from: self.revision,
            revision_to: revised.revision,
            distance_delta_km: revised.summary.total_distance_km - self.summary.total_distance_km,
            load_delta: revised.summary.total_load - self.summary.total_load,
            workouts_changed: changed,
            workouts_removed: removed,
        }
    }
}

/// Differences between two revisions of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanComparison {
    /// Revision compared from
    pub revision_from: u32,
    /// Revision compared to
    pub revision_to: u32,
    /// Change in total planned kilometers
    pub distance_delta_km: f64,
    /// Change in total planned TSS
    pub load_delta: f64,
    /// Workouts present in both revisions but different
    pub workouts_changed: usize,
    /// Workouts dropped in the later revision
    pub workouts_removed: usize,
}
