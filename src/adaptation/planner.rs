// ABOUTME: Methodology-independent rule table turning progress and risk into plan modifications
// ABOUTME: Every applicable rule fires; rules do not suppress each other
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::constants::modification::{
    DECLINE_DELAY_DAYS, DECLINE_INTENSITY_REDUCTION, HIGH_RATIO_INTENSITY_REDUCTION,
    INJURY_VOLUME_REDUCTION, LOW_ADHERENCE_DELAY_DAYS, LOW_ADHERENCE_VOLUME_REDUCTION,
    LOW_RECOVERY_EXTRA_DAYS, LOW_RECOVERY_INTENSITY_REDUCTION, SEVERE_INJURY_VOLUME_REDUCTION,
    VERY_HIGH_RATIO_VOLUME_REDUCTION,
};
use pierre_core::models::{
    InjuryStatus, ModificationPriority, ModificationType, PerformanceTrend, PlanModification,
    ProgressSnapshot, RecoveryMetrics, SuggestedChanges, TrainingLoad,
};

use crate::config::{AdaptationConfig, PlannerConfig, RiskConfig};

/// Base modification planner
#[derive(Debug, Clone)]
pub struct ModificationPlanner {
    adaptation: AdaptationConfig,
    risk: RiskConfig,
}

impl Default for ModificationPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl ModificationPlanner {
    /// Create a planner using the global configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::global())
    }

    /// Create a planner with explicit configuration
    #[must_use]
    pub fn with_config(config: &PlannerConfig) -> Self {
        Self {
            adaptation: config.adaptation.clone(),
            risk: config.risk.clone(),
        }
    }

    /// Evaluate every rule and collect the modifications that fire
    #[must_use]
    pub fn plan_modifications(
        &self,
        snapshot: &ProgressSnapshot,
        training_load: &TrainingLoad,
        recovery: &RecoveryMetrics,
    ) -> Vec<PlanModification> {
        let mut modifications = Vec::new();
        modifications.extend(self.load_rule(training_load));
        modifications.extend(self.recovery_rule(recovery));
        modifications.extend(injury_rule(recovery.injury_status));
        modifications.extend(self.adherence_rule(snapshot));
        modifications.extend(decline_rule(snapshot));

        tracing::debug!(
            count = modifications.len(),
            ratio = training_load.ratio,
            adherence = snapshot.adherence_rate,
            recovery = recovery.recovery_score,
            "Evaluated base modification rules"
        );
        modifications
    }

    fn load_rule(&self, training_load: &TrainingLoad) -> Option<PlanModification> {
        let ratio = training_load.ratio;
        if ratio > self.risk.high_ratio_max {
            Some(PlanModification::new(
                ModificationType::ReduceVolume,
                ModificationPriority::High,
                format!("Acute:chronic workload ratio {ratio:.2} indicates a load spike"),
                SuggestedChanges {
                    volume_reduction: Some(VERY_HIGH_RATIO_VOLUME_REDUCTION),
                    ..SuggestedChanges::default()
                },
            ))
        } else if ratio > self.risk.optimal_ratio_max {
            Some(PlanModification::new(
                ModificationType::ReduceIntensity,
                ModificationPriority::Medium,
                format!("Acute:chronic workload ratio {ratio:.2} is above the optimal range"),
                SuggestedChanges {
                    intensity_reduction: Some(HIGH_RATIO_INTENSITY_REDUCTION),
                    ..SuggestedChanges::default()
                },
            ))
        } else {
            None
        }
    }

    fn recovery_rule(&self, recovery: &RecoveryMetrics) -> Option<PlanModification> {
        let score = recovery.recovery_score;
        (score < self.adaptation.low_recovery_score).then(|| {
            PlanModification::new(
                ModificationType::AddRecovery,
                ModificationPriority::High,
                format!("Recovery score {score:.0} is low"),
                SuggestedChanges {
                    recovery_days: Some(LOW_RECOVERY_EXTRA_DAYS),
                    intensity_reduction: Some(LOW_RECOVERY_INTENSITY_REDUCTION),
                    ..SuggestedChanges::default()
                },
            )
        })
    }

    fn adherence_rule(&self, snapshot: &ProgressSnapshot) -> Option<PlanModification> {
        let adherence = snapshot.adherence_rate;
        (adherence < self.adaptation.low_adherence_rate).then(|| {
            PlanModification::new(
                ModificationType::ReduceVolume,
                ModificationPriority::Medium,
                format!("Adherence {:.0}% is below target", adherence * 100.0),
                SuggestedChanges {
                    volume_reduction: Some(LOW_ADHERENCE_VOLUME_REDUCTION),
                    delay_days: Some(LOW_ADHERENCE_DELAY_DAYS),
                    ..SuggestedChanges::default()
                },
            )
        })
    }
}

fn injury_rule(status: InjuryStatus) -> Option<PlanModification> {
    if status == InjuryStatus::Healthy {
        return None;
    }
    let reduction = if status.is_severe() {
        SEVERE_INJURY_VOLUME_REDUCTION
    } else {
        INJURY_VOLUME_REDUCTION
    };
    Some(PlanModification::new(
        ModificationType::InjuryProtocol,
        ModificationPriority::High,
        format!("Injury reported ({status:?})"),
        SuggestedChanges {
            volume_reduction: Some(reduction),
            ..SuggestedChanges::default()
        },
    ))
}

fn decline_rule(snapshot: &ProgressSnapshot) -> Option<PlanModification> {
    (snapshot.performance_trend == PerformanceTrend::Declining).then(|| {
        PlanModification::new(
            ModificationType::DelayProgression,
            ModificationPriority::Medium,
            format!(
                "Performance declined {:.1}% against earlier sessions",
                -snapshot.improvement_percentage
            ),
            SuggestedChanges {
                delay_days: Some(DECLINE_DELAY_DAYS),
                intensity_reduction: Some(DECLINE_INTENSITY_REDUCTION),
                ..SuggestedChanges::default()
            },
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_injury_rule_scales_with_severity() {
        assert!(injury_rule(InjuryStatus::Healthy).is_none());
        let minor = injury_rule(InjuryStatus::Minor).unwrap();
        assert_eq!(minor.suggested_changes.volume_reduction, Some(50.0));
        let severe = injury_rule(InjuryStatus::Severe).unwrap();
        assert_eq!(severe.suggested_changes.volume_reduction, Some(100.0));
        assert_eq!(severe.priority, ModificationPriority::High);
    }
}
