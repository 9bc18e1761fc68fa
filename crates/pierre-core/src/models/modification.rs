// ABOUTME: Plan modification value objects produced by the planner and consumed once by the applier
// ABOUTME: Modification types, priorities, suggested changes and their rule source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::plan::Methodology;
use super::workout::WorkoutType;

/// Kind of change to make to the future part of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationType {
    /// Scale duration, distance and TSS down
    ReduceVolume,
    /// Scale hard-segment intensity down
    ReduceIntensity,
    /// Convert hard sessions into recovery sessions
    AddRecovery,
    /// Change the workout type of sessions
    SubstituteWorkout,
    /// Shift future sessions later
    DelayProgression,
    /// Suspend or de-load training for an injury
    InjuryProtocol,
}

impl ModificationType {
    /// Wire name (`reduce_volume`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ReduceVolume => "reduce_volume",
            Self::ReduceIntensity => "reduce_intensity",
            Self::AddRecovery => "add_recovery",
            Self::SubstituteWorkout => "substitute_workout",
            Self::DelayProgression => "delay_progression",
            Self::InjuryProtocol => "injury_protocol",
        }
    }
}

/// Application priority; higher priorities are applied first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModificationPriority {
    /// Nice to have
    Low,
    /// Should be applied
    Medium,
    /// Safety-relevant
    High,
}

/// Concrete parameters of a modification; unused fields stay empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestedChanges {
    /// Volume cut in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_reduction: Option<f64>,
    /// Intensity cut in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_reduction: Option<f64>,
    /// Number of recovery days to add
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_days: Option<u32>,
    /// Days to shift future workouts by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_days: Option<i64>,
    /// Restrict the change to these workout ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workout_ids: Vec<String>,
    /// Restrict the change to these workout types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target_workout_types: Vec<WorkoutType>,
    /// Replacement type for substitutions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitute_type: Option<WorkoutType>,
}

impl SuggestedChanges {
    /// Whether a workout type passes the type filter (no filter = all pass)
    #[must_use]
    pub fn targets_type(&self, workout_type: WorkoutType) -> bool {
        self.target_workout_types.is_empty() || self.target_workout_types.contains(&workout_type)
    }
}

/// Which rule table produced a modification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "methodology")]
pub enum ModificationSource {
    /// Methodology-independent base rules
    Base,
    /// Methodology overlay rules
    Methodology(Methodology),
}

/// A transient, consume-once proposal to change a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanModification {
    /// Kind of change
    pub modification_type: ModificationType,
    /// Human-readable reason
    pub reason: String,
    /// Application priority
    pub priority: ModificationPriority,
    /// Parameters
    pub suggested_changes: SuggestedChanges,
    /// Rule table that produced it
    pub source: ModificationSource,
    /// Philosophy-alignment confidence (0-1); 1 for base rules
    pub confidence: f64,
}

impl PlanModification {
    /// Create a base-rule modification
    pub fn new(
        modification_type: ModificationType,
        priority: ModificationPriority,
        reason: impl Into<String>,
        suggested_changes: SuggestedChanges,
    ) -> Self {
        Self {
            modification_type,
            reason: reason.into(),
            priority,
            suggested_changes,
            source: ModificationSource::Base,
            confidence: 1.0,
        }
    }

    /// Mark as a methodology overlay modification with an alignment confidence
    #[must_use]
    pub fn attributed_to(mut self, methodology: Methodology, confidence: f64) -> Self {
        self.source = ModificationSource::Methodology(methodology);
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Whether the modification came from a methodology overlay
    #[must_use]
    pub const fn is_methodology_specific(&self) -> bool {
        matches!(self.source, ModificationSource::Methodology(_))
    }
}
