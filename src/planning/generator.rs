// ABOUTME: Training plan generator orchestrating phase scheduling, microcycles and assembly
// ABOUTME: Takes an injected methodology philosophy and fitness model; produces revision 0 of a plan
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pierre_core::constants::periodization::DEFAULT_BASE_VOLUME_KM;
use pierre_core::errors::AppResult;
use pierre_core::models::{TrainingPlan, TrainingPlanConfig};

use super::assembler::PlanAssembler;
use super::microcycle::{MicrocycleBuilder, PlanContext};
use super::phase_scheduler::PhaseScheduler;
use crate::cache::{boxed_cache, CacheStats, PaceCache};
use crate::config::PlannerConfig;
use crate::fitness::FitnessModel;
use crate::logging::PlannerLogger;
use crate::methodology::MethodologyPhilosophy;

/// Plan generator
pub struct TrainingPlanGenerator {
    philosophy: Arc<dyn MethodologyPhilosophy>,
    fitness_model: Arc<dyn FitnessModel>,
    config: PlannerConfig,
    pace_cache: PaceCache,
}

impl TrainingPlanGenerator {
    /// Create a generator using the global planner configuration
    #[must_use]
    pub fn new(
        philosophy: Arc<dyn MethodologyPhilosophy>,
        fitness_model: Arc<dyn FitnessModel>,
    ) -> Self {
        Self::with_config(philosophy, fitness_model, PlannerConfig::global().clone())
    }

    /// Create a generator with explicit configuration
    #[must_use]
    pub fn with_config(
        philosophy: Arc<dyn MethodologyPhilosophy>,
        fitness_model: Arc<dyn FitnessModel>,
        config: PlannerConfig,
    ) -> Self {
        let pace_cache = boxed_cache(config.cache.enabled, config.cache.pace_capacity);
        Self::with_pace_cache(philosophy, fitness_model, config, pace_cache)
    }

    /// Create a generator with an injected pace cache
    #[must_use]
    pub fn with_pace_cache(
        philosophy: Arc<dyn MethodologyPhilosophy>,
        fitness_model: Arc<dyn FitnessModel>,
        config: PlannerConfig,
        pace_cache: PaceCache,
    ) -> Self {
        Self {
            philosophy,
            fitness_model,
            config,
            pace_cache,
        }
    }

    /// Philosophy used to populate microcycles
    #[must_use]
    pub fn philosophy(&self) -> &Arc<dyn MethodologyPhilosophy> {
        &self.philosophy
    }

    /// Pace cache counters
    #[must_use]
    pub fn pace_cache_stats(&self) -> CacheStats {
        self.pace_cache.stats()
    }

    /// Generate a plan stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the plan configuration fails validation
    pub fn generate(&mut self, plan_config: TrainingPlanConfig) -> AppResult<TrainingPlan> {
        self.generate_at(plan_config, Utc::now())
    }

    /// Generate a plan stamped with `generated_at`
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the target date does not follow the start date, no
    /// training day is available, or fitness and distribution inputs are invalid.
    /// Repeated available days are collapsed before validation.
    pub fn generate_at(
        &mut self,
        mut plan_config: TrainingPlanConfig,
        generated_at: DateTime<Utc>,
    ) -> AppResult<TrainingPlan> {
        plan_config.preferences.dedup_available_days();
        plan_config.validate()?;

        if plan_config.methodology != self.philosophy.methodology() {
            tracing::warn!(
                requested = ?plan_config.methodology,
                injected = ?self.philosophy.methodology(),
                "Plan methodology differs from the injected philosophy; using the philosophy"
            );
        }

        let total_weeks = plan_config.total_weeks();
        let distribution = PhaseScheduler::with_policy(self.config.periodization.residual_policy)
            .schedule(total_weeks);
        tracing::debug!(
            total_weeks,
            base = distribution.base,
            build = distribution.build,
            peak = distribution.peak,
            taper = distribution.taper,
            recovery = distribution.recovery,
            residual = distribution.residual_weeks,
            "Scheduled phases"
        );

        let context = self.plan_context(&plan_config);
        let philosophy = Arc::clone(&self.philosophy);
        let fitness_model = Arc::clone(&self.fitness_model);
        let mut builder = MicrocycleBuilder::new(
            philosophy.as_ref(),
            fitness_model.as_ref(),
            &mut self.pace_cache,
            &self.config.periodization,
            &context,
        );
        let assembler =
            PlanAssembler::new(philosophy.as_ref(), plan_config.goal, plan_config.start_date);
        let blocks = assembler.assemble_blocks(&distribution, &mut builder);
        let summary = PlanAssembler::summarize(&blocks, &distribution);

        let plan = TrainingPlan {
            id: Uuid::new_v4(),
            revision: 0,
            parent_plan_id: None,
            generated_at,
            config: plan_config,
            blocks,
            summary,
            adaptation_history: Vec::new(),
        };
        PlannerLogger::log_plan_generated(
            &plan.id.to_string(),
            plan.config.goal,
            plan.summary.total_weeks,
            plan.summary.total_workouts,
            plan.summary.unallocated_weeks,
        );
        Ok(plan)
    }

    fn plan_context(&self, plan_config: &TrainingPlanConfig) -> PlanContext {
        let fitness = &plan_config.current_fitness;
        let base_volume_km = if fitness.weekly_mileage > 0.0 {
            fitness.weekly_mileage
        } else {
            tracing::warn!("No current weekly mileage; starting from the default base volume");
            DEFAULT_BASE_VOLUME_KM
        };
        let periodization = &self.config.periodization;
        let progression_rate = periodization
            .progression_rate_override
            .unwrap_or_else(|| plan_config.experience_level().default_progression_rate())
            .min(periodization.max_progression_rate);

        PlanContext {
            base_volume_km,
            progression_rate,
            distribution: plan_config
                .intensity_distribution
                .unwrap_or_else(|| self.philosophy.intensity_distribution()),
            periodization: plan_config.periodization,
            preferences: plan_config.preferences.clone(),
            vdot: fitness.vdot,
            pace_adjustment: plan_config.environment.pace_adjustment_factor(),
        }
    }
}
