// ABOUTME: Unit tests for planner configuration defaults, validation and environment overrides
// ABOUTME: Environment-mutating tests run serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use pierre_training_planner::config::{ConfigError, PlannerConfig, ResidualPolicy};
use pierre_training_planner::errors::{AppError, ErrorCode};
use serial_test::serial;

#[test]
fn test_default_config_validation() {
    let config = PlannerConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.periodization.residual_policy, ResidualPolicy::Drop);
    assert_eq!(config.periodization.recovery_week_interval, 4);
    assert!(config.adaptation.methodology_overlay_enabled);
}

#[test]
fn test_invalid_weights_sum() {
    let mut config = PlannerConfig::default();
    config.risk.ratio_weight = 0.8;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));
}

#[test]
fn test_ratio_thresholds_must_ascend() {
    let mut config = PlannerConfig::default();
    config.risk.optimal_ratio_max = 1.6;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_acute_window_must_be_shorter_than_chronic() {
    let mut config = PlannerConfig::default();
    config.risk.acute_window_days = 28;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_progression_override_is_capped() {
    let mut config = PlannerConfig::default();
    config.periodization.progression_rate_override = Some(0.25);
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    config.periodization.progression_rate_override = Some(0.12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_recovery_week_settings_are_checked() {
    let mut config = PlannerConfig::default();
    config.periodization.recovery_week_interval = 1;
    assert!(config.validate().is_err());

    let mut config = PlannerConfig::default();
    config.periodization.recovery_week_factor = 1.2;
    assert!(config.validate().is_err());
}

#[test]
fn test_residual_policy_parsing() {
    assert_eq!("drop".parse::<ResidualPolicy>().unwrap(), ResidualPolicy::Drop);
    assert_eq!(
        " Extend-Base ".parse::<ResidualPolicy>().unwrap(),
        ResidualPolicy::ExtendBase
    );
    assert!("spread".parse::<ResidualPolicy>().is_err());
}

#[test]
fn test_config_error_converts_to_app_error() {
    let error: AppError = ConfigError::ValueOutOfRange("bad").into();
    assert_eq!(error.code, ErrorCode::ConfigInvalid);
    assert!(error.message.contains("bad"));
}

#[test]
#[serial]
fn test_environment_variable_override() {
    env::set_var("PIERRE_PLANNER_RESIDUAL_POLICY", "extend_base");
    env::set_var("PIERRE_PLANNER_RECOVERY_WEEK_INTERVAL", "3");
    env::set_var("PIERRE_PLANNER_LOW_ADHERENCE", "0.6");
    env::set_var("PIERRE_PLANNER_METHODOLOGY_OVERLAY", "false");

    let config = PlannerConfig::load().unwrap();

    assert_eq!(config.periodization.residual_policy, ResidualPolicy::ExtendBase);
    assert_eq!(config.periodization.recovery_week_interval, 3);
    assert!((config.adaptation.low_adherence_rate - 0.6).abs() < 0.001);
    assert!(!config.adaptation.methodology_overlay_enabled);

    // Clean up
    env::remove_var("PIERRE_PLANNER_RESIDUAL_POLICY");
    env::remove_var("PIERRE_PLANNER_RECOVERY_WEEK_INTERVAL");
    env::remove_var("PIERRE_PLANNER_LOW_ADHERENCE");
    env::remove_var("PIERRE_PLANNER_METHODOLOGY_OVERLAY");
}

#[test]
#[serial]
fn test_unparsable_override_is_rejected() {
    env::set_var("PIERRE_PLANNER_PACE_CACHE_CAPACITY", "lots");
    let result = PlannerConfig::load();
    env::remove_var("PIERRE_PLANNER_PACE_CACHE_CAPACITY");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
#[serial]
fn test_override_failing_validation_is_rejected() {
    env::set_var("PIERRE_PLANNER_CHRONIC_WINDOW_DAYS", "5");
    let result = PlannerConfig::load();
    env::remove_var("PIERRE_PLANNER_CHRONIC_WINDOW_DAYS");

    assert!(matches!(result, Err(ConfigError::InvalidRange(_))));
}
