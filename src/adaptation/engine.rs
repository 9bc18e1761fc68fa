// ABOUTME: Adaptation pipeline: progress analysis, risk assessment, rule planning and application
// ABOUTME: One athlete per call; independent athletes can be adapted in parallel with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use pierre_core::models::{
    CompletedWorkout, FitnessAssessment, PlanModification, ProgressSnapshot, RecoveryMetrics,
    TrainingPlan,
};

use super::applier::ModificationApplier;
use super::overlay::{merge_modifications, MethodologyModificationOverlay};
use super::planner::ModificationPlanner;
use super::progress::ProgressAnalyzer;
use super::risk::{RiskAssessment, RiskAssessor};
use crate::config::PlannerConfig;
use crate::fitness::{FitnessModel, RunRecord};
use crate::logging::PlannerLogger;

/// Inputs for adapting one athlete's plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationRequest {
    /// Current plan revision
    pub plan: TrainingPlan,
    /// Completed workouts
    pub completed: Vec<CompletedWorkout>,
    /// Latest recovery signals
    pub recovery: RecoveryMetrics,
    /// Evaluation time; workouts on or before it are frozen
    pub now: DateTime<Utc>,
}

/// Result of one adaptation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationOutcome {
    /// Revised plan, or the input plan when no rule fired
    pub plan: TrainingPlan,
    /// Progress at evaluation time
    pub snapshot: ProgressSnapshot,
    /// Load, injury and fatigue picture
    pub risk: RiskAssessment,
    /// Modifications in application order
    pub modifications: Vec<PlanModification>,
}

impl AdaptationOutcome {
    /// Whether a new revision was produced
    #[must_use]
    pub fn plan_changed(&self) -> bool {
        !self.modifications.is_empty()
    }
}

/// Plan adaptation engine
pub struct PlanAdaptationEngine {
    fitness_model: Arc<dyn FitnessModel>,
    analyzer: ProgressAnalyzer,
    assessor: RiskAssessor,
    planner: ModificationPlanner,
    overlay: MethodologyModificationOverlay,
    applier: ModificationApplier,
    overlay_enabled: bool,
}

impl PlanAdaptationEngine {
    /// Create an engine using the global configuration
    #[must_use]
    pub fn new(fitness_model: Arc<dyn FitnessModel>) -> Self {
        Self::with_config(fitness_model, PlannerConfig::global())
    }

    /// Create an engine with explicit configuration
    #[must_use]
    pub fn with_config(fitness_model: Arc<dyn FitnessModel>, config: &PlannerConfig) -> Self {
        Self {
            fitness_model,
            analyzer: ProgressAnalyzer::with_config(config.adaptation.clone()),
            assessor: RiskAssessor::with_config(config.risk.clone()),
            planner: ModificationPlanner::with_config(config),
            overlay: MethodologyModificationOverlay::with_config(config),
            applier: ModificationApplier::new(),
            overlay_enabled: config.adaptation.methodology_overlay_enabled,
        }
    }

    /// Adapt one plan to the athlete's feedback
    #[must_use]
    pub fn adapt(
        &self,
        plan: &TrainingPlan,
        completed: &[CompletedWorkout],
        recovery: &RecoveryMetrics,
        now: DateTime<Utc>,
    ) -> AdaptationOutcome {
        let fitness = self.current_fitness(plan, completed, now);
        let snapshot = self.analyzer.analyze(plan, completed, &fitness, now);
        let risk = self.assessor.assess(completed, recovery, now);
        tracing::debug!(
            plan.id = %plan.id,
            adherence = snapshot.adherence_rate,
            trend = ?snapshot.performance_trend,
            ratio = risk.training_load.ratio,
            "Analyzed athlete feedback"
        );
        if risk.is_elevated() {
            PlannerLogger::log_risk_alert(
                &plan.id.to_string(),
                risk.training_load.ratio,
                risk.injury_risk.score,
                risk.fatigue.level.as_str(),
            );
        }

        let base = self
            .planner
            .plan_modifications(&snapshot, &risk.training_load, recovery);
        let overlay = if self.overlay_enabled {
            self.overlay
                .plan_modifications(plan, &snapshot, &risk.training_load, recovery, now)
        } else {
            Vec::new()
        };
        let modifications = merge_modifications(overlay, base);

        let revised = if modifications.is_empty() {
            plan.clone()
        } else {
            self.applier.apply(plan, &modifications, now)
        };
        tracing::info!(
            plan.id = %plan.id,
            plan.revision = revised.revision,
            modifications = modifications.len(),
            "Plan adaptation complete"
        );

        AdaptationOutcome {
            plan: revised,
            snapshot,
            risk,
            modifications,
        }
    }

    /// Adapt many independent athletes in parallel
    #[must_use]
    pub fn adapt_batch(&self, requests: &[AdaptationRequest]) -> Vec<AdaptationOutcome> {
        requests
            .par_iter()
            .map(|request| {
                self.adapt(
                    &request.plan,
                    &request.completed,
                    &request.recovery,
                    request.now,
                )
            })
            .collect()
    }

    /// Fitness re-assessed from history; the plan's snapshot when there is none
    fn current_fitness(
        &self,
        plan: &TrainingPlan,
        completed: &[CompletedWorkout],
        now: DateTime<Utc>,
    ) -> FitnessAssessment {
        let history: Vec<RunRecord> = completed
            .iter()
            .filter(|w| w.date <= now)
            .map(RunRecord::from)
            .collect();
        if history.is_empty() {
            return plan.config.current_fitness.clone();
        }
        let metrics = self.fitness_model.assess(&history, now);
        let mut fitness = metrics.into_assessment(plan.config.current_fitness.training_age);
        if fitness.vdot <= 0.0 {
            fitness.vdot = plan.config.current_fitness.vdot;
        }
        fitness
    }
}
