// ABOUTME: Workout models for planned and completed running sessions
// ABOUTME: WorkoutType taxonomy, segments, targets, TSS estimation, and CompletedWorkout builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{units::MINUTES_PER_HOUR, workout_intensity};

/// Running workout taxonomy
///
/// Each type maps to a single-character token used in weekly pattern strings
/// (e.g. `"E-T-E-R-L"`):
///
/// | token | type | token | type |
/// |---|---|---|---|
/// | `E` | easy | `S` | speed |
/// | `R` | recovery | `H` | hill |
/// | `L` | long run | `F` | fartlek |
/// | `T` | tempo | `P` | progression |
/// | `Z` | threshold | `M` | race pace |
/// | `I` | intervals | `C` | cross-training |
/// | `V` | VO2max | `X` | rest |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Conversational aerobic running
    Easy,
    /// Very easy running between hard days
    Recovery,
    /// Weekly long aerobic run
    LongRun,
    /// Sustained comfortably-hard running
    Tempo,
    /// Lactate threshold work (cruise intervals, LT runs)
    Threshold,
    /// Aerobic-power intervals
    Intervals,
    /// VO2max intervals
    Vo2Max,
    /// Short repetitions for speed and economy
    Speed,
    /// Hill repeats
    Hill,
    /// Unstructured speed play
    Fartlek,
    /// Run that finishes faster than it starts
    Progression,
    /// Goal race pace work
    RacePace,
    /// Non-running aerobic work
    CrossTraining,
    /// Scheduled day off
    Rest,
}

/// Coarse intensity zone used for distribution analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntensityZone {
    /// Below the first ventilatory threshold
    Low,
    /// Between the thresholds ("grey zone")
    Moderate,
    /// Above the second ventilatory threshold
    High,
}

impl WorkoutType {
    /// Parse a pattern token
    #[must_use]
    pub const fn from_token(token: char) -> Option<Self> {
        match token {
            'E' => Some(Self::Easy),
            'R' => Some(Self::Recovery),
            'L' => Some(Self::LongRun),
            'T' => Some(Self::Tempo),
            'Z' => Some(Self::Threshold),
            'I' => Some(Self::Intervals),
            'V' => Some(Self::Vo2Max),
            'S' => Some(Self::Speed),
            'H' => Some(Self::Hill),
            'F' => Some(Self::Fartlek),
            'P' => Some(Self::Progression),
            'M' => Some(Self::RacePace),
            'C' => Some(Self::CrossTraining),
            'X' => Some(Self::Rest),
            _ => None,
        }
    }

    /// Pattern token for this type
    #[must_use]
    pub const fn token(self) -> char {
        match self {
            Self::Easy => 'E',
            Self::Recovery => 'R',
            Self::LongRun => 'L',
            Self::Tempo => 'T',
            Self::Threshold => 'Z',
            Self::Intervals => 'I',
            Self::Vo2Max => 'V',
            Self::Speed => 'S',
            Self::Hill => 'H',
            Self::Fartlek => 'F',
            Self::Progression => 'P',
            Self::RacePace => 'M',
            Self::CrossTraining => 'C',
            Self::Rest => 'X',
        }
    }

    /// Default target intensity (percent of threshold effort)
    #[must_use]
    pub const fn default_intensity(self) -> f64 {
        match self {
            Self::Easy => workout_intensity::EASY,
            Self::Recovery => workout_intensity::RECOVERY,
            Self::LongRun => workout_intensity::LONG_RUN,
            Self::Tempo => workout_intensity::TEMPO,
            Self::Threshold => workout_intensity::THRESHOLD,
            Self::Intervals => workout_intensity::INTERVALS,
            Self::Vo2Max => workout_intensity::VO2_MAX,
            Self::Speed => workout_intensity::SPEED,
            Self::Hill => workout_intensity::HILL,
            Self::Fartlek => workout_intensity::FARTLEK,
            Self::Progression => workout_intensity::PROGRESSION,
            Self::RacePace => workout_intensity::RACE_PACE,
            Self::CrossTraining => workout_intensity::CROSS_TRAINING,
            Self::Rest => 0.0,
        }
    }

    /// Intensity zone this workout type trains in
    #[must_use]
    pub const fn zone(self) -> IntensityZone {
        match self {
            Self::Easy | Self::Recovery | Self::LongRun | Self::CrossTraining | Self::Rest => {
                IntensityZone::Low
            }
            Self::Tempo | Self::Fartlek | Self::Progression | Self::RacePace => {
                IntensityZone::Moderate
            }
            Self::Threshold | Self::Intervals | Self::Vo2Max | Self::Speed | Self::Hill => {
                IntensityZone::High
            }
        }
    }

    /// Whether the session counts toward a microcycle's recovery ratio
    #[must_use]
    pub const fn is_easy_or_recovery(self) -> bool {
        matches!(self, Self::Easy | Self::Recovery)
    }

    /// Whether the session is a quality (non-low-zone) workout
    #[must_use]
    pub const fn is_quality(self) -> bool {
        !matches!(self.zone(), IntensityZone::Low)
    }
}

/// Kind of a workout segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// Warm-up; never touched by intensity reductions
    WarmUp,
    /// Continuous running at a single effort
    Steady,
    /// Work interval
    Interval,
    /// Recovery between intervals
    Recovery,
    /// Cool-down
    CoolDown,
}

impl SegmentKind {
    /// Whether the segment belongs to the main set rather than the easy running around it
    #[must_use]
    pub const fn is_main_set(self) -> bool {
        matches!(self, Self::Steady | Self::Interval)
    }
}

/// One segment of a structured workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSegment {
    /// Segment kind
    pub kind: SegmentKind,
    /// Duration of one repetition in minutes
    pub duration_minutes: f64,
    /// Target intensity (percent of threshold effort)
    pub intensity: f64,
    /// Number of repetitions (1 for continuous segments)
    pub repetitions: u32,
    /// Short description ("6 x 3 min @ interval pace")
    pub description: String,
}

impl WorkoutSegment {
    /// Total minutes across all repetitions
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.duration_minutes * f64::from(self.repetitions.max(1))
    }
}

/// Segment breakdown of a workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStructure {
    /// Display name
    pub name: String,
    /// Ordered segments
    pub segments: Vec<WorkoutSegment>,
}

impl WorkoutStructure {
    /// Total structured minutes
    #[must_use]
    pub fn total_minutes(&self) -> f64 {
        self.segments.iter().map(WorkoutSegment::total_minutes).sum()
    }

    /// Duration-weighted mean intensity, 0 for an empty structure
    #[must_use]
    pub fn mean_intensity(&self) -> f64 {
        let minutes = self.total_minutes();
        if minutes <= 0.0 {
            return 0.0;
        }
        self.segments
            .iter()
            .map(|s| s.total_minutes() * s.intensity)
            .sum::<f64>()
            / minutes
    }

    /// Duration-weighted intensity of the main set (steady and interval segments)
    ///
    /// Warm-ups, cool-downs and recovery jogs are excluded. Returns `None` when the
    /// structure has no main-set minutes.
    #[must_use]
    pub fn main_set_intensity(&self) -> Option<f64> {
        let (minutes, weighted) = self
            .segments
            .iter()
            .filter(|s| s.kind.is_main_set())
            .fold((0.0, 0.0), |(minutes, weighted), s| {
                let segment_minutes = s.total_minutes();
                (minutes + segment_minutes, s.intensity.mul_add(segment_minutes, weighted))
            });
        (minutes > 0.0).then_some(weighted / minutes)
    }
}

/// Quantitative targets for a planned workout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkoutTargets {
    /// Planned duration in minutes
    pub duration_minutes: f64,
    /// Planned distance in kilometers
    pub distance_km: f64,
    /// Estimated Training Stress Score
    pub tss: f64,
    /// Target intensity (percent of threshold effort)
    pub intensity: f64,
}

/// A workout scheduled in a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedWorkout {
    /// Stable identifier
    pub id: String,
    /// Scheduled date
    pub date: DateTime<Utc>,
    /// Workout type
    pub workout_type: WorkoutType,
    /// Library template the workout was built from
    pub template_id: String,
    /// Quantitative targets
    pub targets: WorkoutTargets,
    /// Segment breakdown
    pub structure: WorkoutStructure,
}

impl PlannedWorkout {
    /// Whether the workout is frozen (already happened) relative to `now`
    #[must_use]
    pub fn is_frozen(&self, now: DateTime<Utc>) -> bool {
        self.date <= now
    }

    /// Intensity the session is prescribed at
    ///
    /// The main-set intensity, so warm-ups and recovery jogs do not dilute a hard
    /// session. Falls back to the target intensity for unstructured workouts.
    #[must_use]
    pub fn prescribed_intensity(&self) -> f64 {
        self.structure
            .main_set_intensity()
            .unwrap_or(self.targets.intensity)
    }
}

/// Estimate TSS from duration and intensity: `hours x IF² x 100`, IF = intensity / 100
#[must_use]
pub fn estimate_tss(duration_minutes: f64, intensity: f64) -> f64 {
    if duration_minutes <= 0.0 || intensity <= 0.0 {
        return 0.0;
    }
    let intensity_factor = intensity / 100.0;
    (duration_minutes / MINUTES_PER_HOUR) * intensity_factor * intensity_factor * 100.0
}

/// A workout the athlete reported as done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedWorkout {
    /// Identifier of the completed session
    pub id: String,
    /// Planned workout this session fulfils, if any
    pub planned_workout_id: Option<String>,
    /// Date performed
    pub date: DateTime<Utc>,
    /// Type performed
    pub workout_type: WorkoutType,
    /// Distance covered in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_minutes: f64,
    /// Perceived effort on a 1-10 scale
    pub perceived_effort: Option<f64>,
    /// Reported TSS (estimated when absent)
    pub tss: Option<f64>,
    /// Distance that was planned for the session
    pub planned_distance_km: Option<f64>,
    /// Average heart rate in BPM
    pub average_heart_rate: Option<u32>,
}

impl CompletedWorkout {
    /// Create a completed workout with the required fields
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        date: DateTime<Utc>,
        workout_type: WorkoutType,
        distance_km: f64,
        duration_minutes: f64,
    ) -> Self {
        Self {
            id: id.into(),
            planned_workout_id: None,
            date,
            workout_type,
            distance_km,
            duration_minutes,
            perceived_effort: None,
            tss: None,
            planned_distance_km: None,
            average_heart_rate: None,
        }
    }

    /// Set perceived effort (1-10)
    #[must_use]
    pub const fn with_effort(mut self, effort: f64) -> Self {
        self.perceived_effort = Some(effort);
        self
    }

    /// Set reported TSS
    #[must_use]
    pub const fn with_tss(mut self, tss: f64) -> Self {
        self.tss = Some(tss);
        self
    }

    /// Set planned distance for completion tracking
    #[must_use]
    pub const fn with_planned_distance(mut self, planned_km: f64) -> Self {
        self.planned_distance_km = Some(planned_km);
        self
    }

    /// Link to the planned workout this session fulfils
    #[must_use]
    pub fn with_planned_workout(mut self, planned_id: impl Into<String>) -> Self {
        self.planned_workout_id = Some(planned_id.into());
        self
    }

    /// Set average heart rate
    #[must_use]
    pub const fn with_heart_rate(mut self, bpm: u32) -> Self {
        self.average_heart_rate = Some(bpm);
        self
    }

    /// Completion percentage versus the planned distance, if one was planned
    #[must_use]
    pub fn completion_percentage(&self) -> Option<f64> {
        self.planned_distance_km
            .filter(|planned| *planned > 0.0)
            .map(|planned| self.distance_km / planned * 100.0)
    }

    /// Reported TSS, or an estimate from effort (or the type's default intensity)
    #[must_use]
    pub fn resolved_tss(&self) -> f64 {
        if let Some(tss) = self.tss {
            return tss.max(0.0);
        }
        let intensity = self.perceived_effort.map_or_else(
            || self.workout_type.default_intensity(),
            |effort| effort.clamp(0.0, 10.0) * 10.0,
        );
        estimate_tss(self.duration_minutes, intensity)
    }

    /// Pace in minutes per kilometer, `None` when distance is zero
    #[must_use]
    pub fn pace_min_per_km(&self) -> Option<f64> {
        (self.distance_km > 0.0).then(|| self.duration_minutes / self.distance_km)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_tokens_round_trip_for_every_type() {
        for token in "ERLTZIVSHFPMCX".chars() {
            let workout_type = WorkoutType::from_token(token).unwrap();
            assert_eq!(workout_type.token(), token);
        }
        assert!(WorkoutType::from_token('-').is_none());
    }

    #[test]
    fn test_estimate_tss_one_hour_at_threshold() {
        assert!((estimate_tss(60.0, 100.0) - 100.0).abs() < 1e-9);
        assert!((estimate_tss(30.0, 0.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_completion_percentage_guards_zero_plan() {
        let date = Utc::now();
        let done = CompletedWorkout::new("a", date, WorkoutType::Easy, 8.0, 48.0)
            .with_planned_distance(10.0);
        assert!((done.completion_percentage().unwrap() - 80.0).abs() < 1e-9);

        let unplanned = CompletedWorkout::new("b", date, WorkoutType::Easy, 8.0, 48.0)
            .with_planned_distance(0.0);
        assert!(unplanned.completion_percentage().is_none());
    }

    #[test]
    fn test_resolved_tss_prefers_reported_value() {
        let date = Utc::now();
        let reported = CompletedWorkout::new("a", date, WorkoutType::Tempo, 10.0, 50.0)
            .with_tss(77.0)
            .with_effort(9.0);
        assert!((reported.resolved_tss() - 77.0).abs() < f64::EPSILON);

        let from_effort =
            CompletedWorkout::new("b", date, WorkoutType::Tempo, 10.0, 60.0).with_effort(8.0);
        assert!((from_effort.resolved_tss() - 64.0).abs() < 1e-9);
    }

    fn segment(kind: SegmentKind, minutes: f64, intensity: f64, repetitions: u32) -> WorkoutSegment {
        WorkoutSegment {
            kind,
            duration_minutes: minutes,
            intensity,
            repetitions,
            description: String::new(),
        }
    }

    #[test]
    fn test_main_set_intensity_ignores_easy_running_around_the_work() {
        let structure = WorkoutStructure {
            name: "1 km repeats".to_owned(),
            segments: vec![
                segment(SegmentKind::WarmUp, 15.0, 60.0, 1),
                segment(SegmentKind::Interval, 4.0, 95.0, 5),
                segment(SegmentKind::Recovery, 2.0, 55.0, 4),
                segment(SegmentKind::CoolDown, 10.0, 60.0, 1),
            ],
        };
        assert!(structure.mean_intensity() < 75.0);
        assert!((structure.main_set_intensity().unwrap() - 95.0).abs() < 1e-9);

        let jog_only = WorkoutStructure {
            name: "warm-up".to_owned(),
            segments: vec![segment(SegmentKind::WarmUp, 15.0, 60.0, 1)],
        };
        assert!(jog_only.main_set_intensity().is_none());
        assert!(WorkoutStructure::default().main_set_intensity().is_none());
    }
}
