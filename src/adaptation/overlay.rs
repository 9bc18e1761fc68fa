// ABOUTME: Methodology-specific modification rules layered on top of the base rule table
// ABOUTME: Each rule carries a philosophy-alignment confidence; merge puts overlay results first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Methodology Overlay
//!
//! Base rules react to generic load and recovery signals. Overlay rules react to the
//! same signals the way a given coaching philosophy would:
//!
//! | Methodology | Trigger | Response |
//! |---|---|---|
//! | Polarized | hard share > 25% and recovery < 70 | reduce intensity 15% on intervals/tempo |
//! | Polarized | moderate share > 10% | substitute tempo/fartlek with easy runs |
//! | Daniels | performance declining | reduce intensity 10% on threshold/intervals |
//! | Lydiard | ratio > 1.3 during base or build | substitute intervals/VO2max with hills |
//! | Pfitzinger | adherence < 0.8 | reduce volume 10% on easy/recovery runs |
//! | Hanson | recovery < 65 | delay progression 3 days |

use chrono::{DateTime, Utc};

use pierre_core::models::{
    Methodology, ModificationPriority, ModificationType, PerformanceTrend, PlanModification,
    ProgressSnapshot, RecoveryMetrics, SuggestedChanges, TrainingLoad, TrainingPhase,
    TrainingPlan, WorkoutType,
};

use crate::config::{PlannerConfig, RiskConfig};

/// Hard-zone share (%) above which a polarized athlete is over-reaching
const POLARIZED_MAX_HARD_SHARE: f64 = 25.0;
/// Recovery score below which the polarized intensity rule fires
const POLARIZED_RECOVERY_THRESHOLD: f64 = 70.0;
/// Intensity cut (%) of the polarized rule
const POLARIZED_INTENSITY_REDUCTION: f64 = 15.0;
/// Moderate-zone share (%) a polarized plan tolerates
const POLARIZED_MAX_MODERATE_SHARE: f64 = 10.0;
/// Intensity cut (%) for a declining Daniels athlete
const DANIELS_DECLINE_INTENSITY_REDUCTION: f64 = 10.0;
/// Adherence below which Pfitzinger trims easy mileage
const PFITZINGER_ADHERENCE_THRESHOLD: f64 = 0.8;
/// Easy-run volume cut (%) of the Pfitzinger rule
const PFITZINGER_EASY_VOLUME_REDUCTION: f64 = 10.0;
/// Recovery score below which Hanson delays progression
const HANSON_RECOVERY_THRESHOLD: f64 = 65.0;
/// Delay (days) of the Hanson rule
const HANSON_DELAY_DAYS: i64 = 3;

/// Methodology-specific rule overlay
#[derive(Debug, Clone)]
pub struct MethodologyModificationOverlay {
    risk: RiskConfig,
}

impl Default for MethodologyModificationOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodologyModificationOverlay {
    /// Create an overlay using the global configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::global())
    }

    /// Create an overlay with explicit configuration
    #[must_use]
    pub fn with_config(config: &PlannerConfig) -> Self {
        Self {
            risk: config.risk.clone(),
        }
    }

    /// Evaluate the rules of the plan's methodology
    #[must_use]
    pub fn plan_modifications(
        &self,
        plan: &TrainingPlan,
        snapshot: &ProgressSnapshot,
        training_load: &TrainingLoad,
        recovery: &RecoveryMetrics,
        now: DateTime<Utc>,
    ) -> Vec<PlanModification> {
        let methodology = plan.config.methodology;
        let modifications = match methodology {
            Methodology::Polarized => polarized_rules(snapshot, recovery),
            Methodology::Daniels => daniels_rules(snapshot),
            Methodology::Lydiard => {
                self.lydiard_rules(plan.current_phase(now), training_load.ratio)
            }
            Methodology::Pfitzinger => pfitzinger_rules(snapshot),
            Methodology::Hanson => hanson_rules(recovery),
        };
        tracing::debug!(
            methodology = ?methodology,
            count = modifications.len(),
            "Evaluated methodology overlay rules"
        );
        modifications
    }

    fn lydiard_rules(&self, phase: Option<TrainingPhase>, ratio: f64) -> Vec<PlanModification> {
        let early_phase = matches!(phase, Some(TrainingPhase::Base | TrainingPhase::Build));
        if !early_phase || ratio <= self.risk.optimal_ratio_max {
            return Vec::new();
        }
        vec![PlanModification::new(
            ModificationType::SubstituteWorkout,
            ModificationPriority::Medium,
            "Load is climbing during aerobic development; swap speed work for hills",
            SuggestedChanges {
                target_workout_types: vec![WorkoutType::Intervals, WorkoutType::Vo2Max],
                substitute_type: Some(WorkoutType::Hill),
                ..SuggestedChanges::default()
            },
        )
        .attributed_to(Methodology::Lydiard, 0.8)]
    }
}

/// Order overlay results before base results
///
/// Overlay modifications sort by confidence then priority (both descending); base
/// modifications sort by priority descending. Both sorts are stable.
#[must_use]
pub fn merge_modifications(
    mut overlay: Vec<PlanModification>,
    mut base: Vec<PlanModification>,
) -> Vec<PlanModification> {
    overlay.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.priority.cmp(&a.priority))
    });
    base.sort_by(|a, b| b.priority.cmp(&a.priority));
    overlay.extend(base);
    overlay
}

fn polarized_rules(snapshot: &ProgressSnapshot, recovery: &RecoveryMetrics) -> Vec<PlanModification> {
    let distribution = snapshot.intensity_distribution;
    let mut modifications = Vec::new();

    if distribution.hard > POLARIZED_MAX_HARD_SHARE
        && recovery.recovery_score < POLARIZED_RECOVERY_THRESHOLD
    {
        modifications.push(
            PlanModification::new(
                ModificationType::ReduceIntensity,
                ModificationPriority::High,
                format!(
                    "High-intensity share {:.0}% exceeds the polarized target while recovery is {:.0}",
                    distribution.hard, recovery.recovery_score
                ),
                SuggestedChanges {
                    intensity_reduction: Some(POLARIZED_INTENSITY_REDUCTION),
                    target_workout_types: vec![WorkoutType::Intervals, WorkoutType::Tempo],
                    ..SuggestedChanges::default()
                },
            )
            .attributed_to(Methodology::Polarized, 0.9),
        );
    }

    if distribution.moderate > POLARIZED_MAX_MODERATE_SHARE {
        modifications.push(
            PlanModification::new(
                ModificationType::SubstituteWorkout,
                ModificationPriority::Low,
                format!(
                    "Moderate-zone share {:.0}% drifts into the grey zone",
                    distribution.moderate
                ),
                SuggestedChanges {
                    target_workout_types: vec![WorkoutType::Tempo, WorkoutType::Fartlek],
                    substitute_type: Some(WorkoutType::Easy),
                    ..SuggestedChanges::default()
                },
            )
            .attributed_to(Methodology::Polarized, 0.7),
        );
    }
    modifications
}

fn daniels_rules(snapshot: &ProgressSnapshot) -> Vec<PlanModification> {
    if snapshot.performance_trend != PerformanceTrend::Declining {
        return Vec::new();
    }
    vec![PlanModification::new(
        ModificationType::ReduceIntensity,
        ModificationPriority::Medium,
        "Paces no longer match current fitness; ease threshold and interval targets",
        SuggestedChanges {
            intensity_reduction: Some(DANIELS_DECLINE_INTENSITY_REDUCTION),
            target_workout_types: vec![WorkoutType::Threshold, WorkoutType::Intervals],
            ..SuggestedChanges::default()
        },
    )
    .attributed_to(Methodology::Daniels, 0.85)]
}

fn pfitzinger_rules(snapshot: &ProgressSnapshot) -> Vec<PlanModification> {
    if snapshot.adherence_rate >= PFITZINGER_ADHERENCE_THRESHOLD {
        return Vec::new();
    }
    vec![PlanModification::new(
        ModificationType::ReduceVolume,
        ModificationPriority::Low,
        "Missed sessions; trim general aerobic mileage and protect the quality days",
        SuggestedChanges {
            volume_reduction: Some(PFITZINGER_EASY_VOLUME_REDUCTION),
            target_workout_types: vec![WorkoutType::Easy, WorkoutType::Recovery],
            ..SuggestedChanges::default()
        },
    )
    .attributed_to(Methodology::Pfitzinger, 0.75)]
}

fn hanson_rules(recovery: &RecoveryMetrics) -> Vec<PlanModification> {
    if recovery.recovery_score >= HANSON_RECOVERY_THRESHOLD {
        return Vec::new();
    }
    vec![PlanModification::new(
        ModificationType::DelayProgression,
        ModificationPriority::Medium,
        "Cumulative fatigue is outpacing recovery; hold the current week a little longer",
        SuggestedChanges {
            delay_days: Some(HANSON_DELAY_DAYS),
            ..SuggestedChanges::default()
        },
    )
    .attributed_to(Methodology::Hanson, 0.8)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_puts_overlay_first_by_confidence() {
        let base_low = PlanModification::new(
            ModificationType::ReduceVolume,
            ModificationPriority::Low,
            "base low",
            SuggestedChanges::default(),
        );
        let base_high = PlanModification::new(
            ModificationType::AddRecovery,
            ModificationPriority::High,
            "base high",
            SuggestedChanges::default(),
        );
        let overlay_weak = PlanModification::new(
            ModificationType::SubstituteWorkout,
            ModificationPriority::High,
            "overlay weak",
            SuggestedChanges::default(),
        )
        .attributed_to(Methodology::Polarized, 0.5);
        let overlay_strong = PlanModification::new(
            ModificationType::ReduceIntensity,
            ModificationPriority::Low,
            "overlay strong",
            SuggestedChanges::default(),
        )
        .attributed_to(Methodology::Polarized, 0.9);

        let merged = merge_modifications(
            vec![overlay_weak, overlay_strong],
            vec![base_low, base_high],
        );
        let reasons: Vec<&str> = merged.iter().map(|m| m.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec!["overlay strong", "overlay weak", "base high", "base low"]
        );
    }
}
