// ABOUTME: Splits a plan's total weeks into periodization phases
// ABOUTME: Three length regimes with floor division and an explicit residual-week policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use pierre_core::constants::periodization::{
    LONG_BASE_SHARE, LONG_BUILD_SHARE, LONG_PEAK_SHARE, LONG_RECOVERY_SHARE, LONG_TAPER_SHARE,
    MEDIUM_BASE_SHARE, MEDIUM_BUILD_SHARE, MEDIUM_PEAK_SHARE, MEDIUM_PLAN_MAX_WEEKS,
    MEDIUM_TAPER_SHARE, SHORT_BASE_SHARE, SHORT_BUILD_SHARE, SHORT_PLAN_MAX_WEEKS,
    SHORT_TAPER_SHARE,
};
use pierre_core::models::TrainingPhase;

use crate::config::{PlannerConfig, ResidualPolicy};

/// Weeks allocated to each phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PhaseDistribution {
    /// Base weeks
    pub base: u32,
    /// Build weeks
    pub build: u32,
    /// Peak weeks
    pub peak: u32,
    /// Taper weeks
    pub taper: u32,
    /// Recovery weeks (long plans only)
    pub recovery: u32,
    /// Weeks lost to floor division and not allocated to any phase
    pub residual_weeks: u32,
}

impl PhaseDistribution {
    /// Weeks allocated to a phase
    #[must_use]
    pub const fn weeks(&self, phase: TrainingPhase) -> u32 {
        match phase {
            TrainingPhase::Base => self.base,
            TrainingPhase::Build => self.build,
            TrainingPhase::Peak => self.peak,
            TrainingPhase::Taper => self.taper,
            TrainingPhase::Recovery => self.recovery,
        }
    }

    /// Sum of allocated weeks
    #[must_use]
    pub const fn allocated_weeks(&self) -> u32 {
        self.base + self.build + self.peak + self.taper + self.recovery
    }

    /// Phases with at least one week, in plan order
    pub fn in_plan_order(&self) -> impl Iterator<Item = (TrainingPhase, u32)> + '_ {
        TrainingPhase::PLAN_ORDER
            .into_iter()
            .map(|phase| (phase, self.weeks(phase)))
            .filter(|(_, weeks)| *weeks > 0)
    }
}

/// Phase scheduler
#[derive(Debug, Clone, Copy)]
pub struct PhaseScheduler {
    policy: ResidualPolicy,
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseScheduler {
    /// Create a scheduler using the globally configured residual policy
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(PlannerConfig::global().periodization.residual_policy)
    }

    /// Create a scheduler with an explicit residual policy
    #[must_use]
    pub const fn with_policy(policy: ResidualPolicy) -> Self {
        Self { policy }
    }

    /// Residual policy in effect
    #[must_use]
    pub const fn policy(&self) -> ResidualPolicy {
        self.policy
    }

    /// Allocate `total_weeks` to phases
    ///
    /// Never fails: short plans may leave phases at zero weeks.
    #[must_use]
    pub fn schedule(&self, total_weeks: u32) -> PhaseDistribution {
        let share = |fraction: f64| floor_share(total_weeks, fraction);

        let mut distribution = if total_weeks <= SHORT_PLAN_MAX_WEEKS {
            PhaseDistribution {
                base: share(SHORT_BASE_SHARE),
                build: share(SHORT_BUILD_SHARE),
                taper: share(SHORT_TAPER_SHARE),
                ..PhaseDistribution::default()
            }
        } else if total_weeks <= MEDIUM_PLAN_MAX_WEEKS {
            PhaseDistribution {
                base: share(MEDIUM_BASE_SHARE),
                build: share(MEDIUM_BUILD_SHARE),
                peak: share(MEDIUM_PEAK_SHARE),
                taper: share(MEDIUM_TAPER_SHARE),
                ..PhaseDistribution::default()
            }
        } else {
            PhaseDistribution {
                base: share(LONG_BASE_SHARE),
                build: share(LONG_BUILD_SHARE),
                peak: share(LONG_PEAK_SHARE),
                taper: share(LONG_TAPER_SHARE),
                recovery: share(LONG_RECOVERY_SHARE),
                residual_weeks: 0,
            }
        };

        let residual = total_weeks.saturating_sub(distribution.allocated_weeks());
        match self.policy {
            ResidualPolicy::Drop => distribution.residual_weeks = residual,
            ResidualPolicy::ExtendBase => distribution.base += residual,
        }
        distribution
    }
}

/// `floor(total x fraction)` using whole percentages to avoid float drift
fn floor_share(total_weeks: u32, fraction: f64) -> u32 {
    let percent = (fraction * 100.0).round() as u32;
    total_weeks.saturating_mul(percent) / 100
}
