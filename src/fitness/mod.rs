// ABOUTME: Fitness model seam: run history in, fitness metrics and training paces out
// ABOUTME: The planner only depends on the FitnessModel trait; Daniels is the default model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Fitness Models
//!
//! Plan generation needs two things from physiology: a fitness snapshot to size
//! volume and a training pace per workout type to turn durations into distances.
//! Both come through [`FitnessModel`] so alternative formula libraries can be
//! plugged in without touching the planner.

/// Daniels VDOT-based fitness model
pub mod daniels;
/// Exponentially weighted training load
pub mod load;
/// Recovery scoring from load balance and wellness signals
pub mod recovery;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pierre_core::models::{CompletedWorkout, FitnessAssessment, WorkoutType};

pub use daniels::DanielsFitnessModel;
pub use load::TssPoint;

/// One run from the athlete's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// When the run happened
    pub date: DateTime<Utc>,
    /// Distance in kilometers
    pub distance_km: f64,
    /// Duration in minutes
    pub duration_minutes: f64,
    /// Training Stress Score
    pub tss: f64,
}

impl RunRecord {
    /// Create a run record
    #[must_use]
    pub const fn new(date: DateTime<Utc>, distance_km: f64, duration_minutes: f64, tss: f64) -> Self {
        Self {
            date,
            distance_km,
            duration_minutes,
            tss,
        }
    }

    /// Average velocity in meters per minute, `None` for degenerate records
    #[must_use]
    pub fn velocity_m_per_min(&self) -> Option<f64> {
        (self.distance_km > 0.0 && self.duration_minutes > 0.0)
            .then(|| self.distance_km * 1000.0 / self.duration_minutes)
    }
}

impl From<&CompletedWorkout> for RunRecord {
    fn from(workout: &CompletedWorkout) -> Self {
        Self::new(
            workout.date,
            workout.distance_km,
            workout.duration_minutes,
            workout.resolved_tss(),
        )
    }
}

/// Metrics a fitness model derives from run history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessMetrics {
    /// VDOT, 0 when no run allowed an estimate
    pub vdot: f64,
    /// Critical speed in meters per second, 0 when unknown
    pub critical_speed: f64,
    /// Lactate threshold pace in minutes per kilometer
    pub lactate_threshold_pace: f64,
    /// Mean weekly kilometers over the last four weeks
    pub weekly_mileage: f64,
    /// Longest run in the recent window
    pub longest_recent_run: f64,
    /// Acute exponentially weighted load
    pub acute_load: f64,
    /// Chronic exponentially weighted load
    pub chronic_load: f64,
    /// Recovery score from load balance (0-100)
    pub recovery_score: f64,
}

impl FitnessMetrics {
    /// Build the immutable assessment a plan is generated against
    #[must_use]
    pub fn into_assessment(self, training_age: f64) -> FitnessAssessment {
        let vdot_score = ((self.vdot - 30.0) / 55.0 * 100.0).clamp(0.0, 100.0);
        let volume_score = (self.weekly_mileage / 80.0 * 100.0).clamp(0.0, 100.0);
        FitnessAssessment {
            vdot: self.vdot,
            critical_speed: self.critical_speed,
            lactate_threshold: self.lactate_threshold_pace,
            weekly_mileage: self.weekly_mileage,
            longest_recent_run: self.longest_recent_run,
            training_age: training_age.max(0.0),
            recovery_rate: (self.recovery_score / 80.0).clamp(0.5, 1.5),
            overall_score: vdot_score.mul_add(0.6, volume_score * 0.4),
        }
    }
}

/// Physiological model consumed by the planner
pub trait FitnessModel: Send + Sync {
    /// Derive fitness metrics from run history as of `now`
    fn assess(&self, history: &[RunRecord], now: DateTime<Utc>) -> FitnessMetrics;

    /// Training pace in minutes per kilometer for a workout type at a VDOT
    fn training_pace(&self, vdot: f64, workout_type: WorkoutType) -> f64;
}
