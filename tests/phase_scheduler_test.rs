// ABOUTME: Integration tests for phase scheduling across plan lengths
// ABOUTME: Validates the three length regimes, floor rounding and both residual policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_training_planner::config::ResidualPolicy;
use pierre_training_planner::models::TrainingPhase;
use pierre_training_planner::planning::{PhaseDistribution, PhaseScheduler};

fn drop_policy() -> PhaseScheduler {
    PhaseScheduler::with_policy(ResidualPolicy::Drop)
}

#[test]
fn test_sixteen_week_plan_drops_two_residual_weeks() {
    let distribution = drop_policy().schedule(16);
    assert_eq!(
        distribution,
        PhaseDistribution {
            base: 5,
            build: 5,
            peak: 3,
            taper: 1,
            recovery: 0,
            residual_weeks: 2,
        }
    );
}

#[test]
fn test_short_plan_has_no_peak_or_recovery() {
    let distribution = drop_policy().schedule(8);
    assert_eq!(distribution.base, 3);
    assert_eq!(distribution.build, 3);
    assert_eq!(distribution.taper, 1);
    assert_eq!(distribution.peak, 0);
    assert_eq!(distribution.recovery, 0);
    assert_eq!(distribution.residual_weeks, 1);
}

#[test]
fn test_long_plan_includes_recovery_phase() {
    let distribution = drop_policy().schedule(20);
    assert_eq!(distribution.base, 6);
    assert_eq!(distribution.build, 6);
    assert_eq!(distribution.peak, 4);
    assert_eq!(distribution.taper, 2);
    assert_eq!(distribution.recovery, 2);
    assert_eq!(distribution.residual_weeks, 0);
}

#[test]
fn test_regime_boundaries() {
    // 9 weeks is the first medium plan, 17 the first long plan
    assert_eq!(drop_policy().schedule(9).peak, 1);
    assert_eq!(drop_policy().schedule(16).recovery, 0);
    assert_eq!(drop_policy().schedule(17).recovery, 1);
}

#[test]
fn test_single_week_plan_is_all_residual() {
    let distribution = drop_policy().schedule(1);
    assert_eq!(distribution.allocated_weeks(), 0);
    assert_eq!(distribution.residual_weeks, 1);
    assert_eq!(distribution.in_plan_order().count(), 0);
}

#[test]
fn test_drop_policy_never_allocates_more_than_total() {
    for total in 1..=60 {
        let distribution = drop_policy().schedule(total);
        assert!(distribution.allocated_weeks() <= total, "total {total}");
        assert_eq!(
            distribution.allocated_weeks() + distribution.residual_weeks,
            total,
            "total {total}"
        );
    }
}

#[test]
fn test_extend_base_policy_allocates_every_week() {
    let scheduler = PhaseScheduler::with_policy(ResidualPolicy::ExtendBase);
    for total in 1..=60 {
        let distribution = scheduler.schedule(total);
        assert_eq!(distribution.allocated_weeks(), total, "total {total}");
        assert_eq!(distribution.residual_weeks, 0);
    }
    assert_eq!(scheduler.schedule(16).base, 7);
}

#[test]
fn test_plan_order_puts_recovery_between_build_and_peak() {
    let phases: Vec<TrainingPhase> = drop_policy()
        .schedule(24)
        .in_plan_order()
        .map(|(phase, _)| phase)
        .collect();
    assert_eq!(
        phases,
        vec![
            TrainingPhase::Base,
            TrainingPhase::Build,
            TrainingPhase::Recovery,
            TrainingPhase::Peak,
            TrainingPhase::Taper,
        ]
    );
}
