// ABOUTME: Athlete fitness and recovery models consumed by plan generation and adaptation
// ABOUTME: FitnessAssessment snapshot, experience levels, recovery metrics and injury status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::periodization::{
    ADVANCED_PROGRESSION_RATE, BEGINNER_MAX_TRAINING_AGE, BEGINNER_PROGRESSION_RATE,
    INTERMEDIATE_MAX_TRAINING_AGE, INTERMEDIATE_PROGRESSION_RATE,
};

/// Scalar fitness snapshot, immutable for the lifetime of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessAssessment {
    /// Daniels VDOT
    pub vdot: f64,
    /// Critical speed in meters per second
    pub critical_speed: f64,
    /// Lactate threshold pace in minutes per kilometer
    pub lactate_threshold: f64,
    /// Current weekly mileage in kilometers
    pub weekly_mileage: f64,
    /// Longest recent run in kilometers
    pub longest_recent_run: f64,
    /// Years of consistent training
    pub training_age: f64,
    /// Recovery rate multiplier (1.0 = typical)
    pub recovery_rate: f64,
    /// Overall fitness score (0-100)
    pub overall_score: f64,
}

impl FitnessAssessment {
    /// Experience level implied by training age
    #[must_use]
    pub fn experience_level(&self) -> ExperienceLevel {
        ExperienceLevel::from_training_age(self.training_age)
    }
}

/// Runner experience level, drives weekly progression rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// Less than a year of consistent training
    Beginner,
    /// One to three years
    Intermediate,
    /// More than three years
    Advanced,
}

impl ExperienceLevel {
    /// Classify a training age in years
    #[must_use]
    pub fn from_training_age(years: f64) -> Self {
        if years < BEGINNER_MAX_TRAINING_AGE {
            Self::Beginner
        } else if years < INTERMEDIATE_MAX_TRAINING_AGE {
            Self::Intermediate
        } else {
            Self::Advanced
        }
    }

    /// Default weekly progression rate for this level
    #[must_use]
    pub const fn default_progression_rate(self) -> f64 {
        match self {
            Self::Beginner => BEGINNER_PROGRESSION_RATE,
            Self::Intermediate => INTERMEDIATE_PROGRESSION_RATE,
            Self::Advanced => ADVANCED_PROGRESSION_RATE,
        }
    }
}

/// Injury status reported by the athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InjuryStatus {
    /// No injury
    #[default]
    Healthy,
    /// Niggle that allows training
    Minor,
    /// Injury that limits training
    Moderate,
    /// Injury that stops training
    Severe,
}

impl InjuryStatus {
    /// Whether training must be suspended
    #[must_use]
    pub const fn is_severe(self) -> bool {
        matches!(self, Self::Severe)
    }
}

/// Recovery signals reported alongside completed workouts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryMetrics {
    /// Holistic recovery score (0-100)
    pub recovery_score: f64,
    /// Injury status
    pub injury_status: InjuryStatus,
    /// Sleep quality (0-100)
    pub sleep_quality: Option<f64>,
    /// HRV relative to personal baseline (1.0 = baseline)
    pub hrv_ratio: Option<f64>,
    /// Muscle soreness (0-10)
    pub soreness: Option<f64>,
}

impl Default for RecoveryMetrics {
    fn default() -> Self {
        Self {
            recovery_score: 80.0,
            injury_status: InjuryStatus::Healthy,
            sleep_quality: None,
            hrv_ratio: None,
            soreness: None,
        }
    }
}

impl RecoveryMetrics {
    /// Recovery metrics with only a score
    #[must_use]
    pub fn with_score(recovery_score: f64) -> Self {
        Self {
            recovery_score: recovery_score.clamp(0.0, 100.0),
            ..Self::default()
        }
    }

    /// Set injury status
    #[must_use]
    pub const fn injured(mut self, status: InjuryStatus) -> Self {
        self.injury_status = status;
        self
    }
}
