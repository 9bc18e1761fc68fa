// ABOUTME: Planner configuration: periodization, risk thresholds, adaptation rules and caches
// ABOUTME: Environment-only overrides with validation and a lazily-initialized global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Planner Configuration
//!
//! Defaults come from `pierre_core::constants`. Every value can be overridden
//! through `PIERRE_PLANNER_*` environment variables. Components read
//! [`PlannerConfig::global`] by default and accept an explicit configuration
//! through their `with_config` constructors, which is what tests use.

/// Configuration error types
pub mod error;

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use pierre_core::constants::{fatigue, modification, periodization, progress, training_load};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// What to do with weeks lost to floor division when splitting a plan into phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResidualPolicy {
    /// Leave leftover weeks unallocated and report them (phase weeks sum <= total)
    #[default]
    Drop,
    /// Append leftover weeks to the base phase (phase weeks sum == total)
    ExtendBase,
}

impl FromStr for ResidualPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(Self::Drop),
            "extend_base" | "extend-base" => Ok(Self::ExtendBase),
            other => Err(ConfigError::Parse(format!("unknown residual policy: {other}"))),
        }
    }
}

/// Periodization and volume progression settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodizationConfig {
    /// Residual week handling for the phase scheduler
    pub residual_policy: ResidualPolicy,
    /// Every Nth week of a block is a recovery week
    pub recovery_week_interval: u32,
    /// Volume multiplier for recovery weeks
    pub recovery_week_factor: f64,
    /// Replaces the experience-derived progression rate when set
    pub progression_rate_override: Option<f64>,
    /// Hard cap on weekly progression
    pub max_progression_rate: f64,
}

impl Default for PeriodizationConfig {
    fn default() -> Self {
        Self {
            residual_policy: ResidualPolicy::Drop,
            recovery_week_interval: periodization::RECOVERY_WEEK_INTERVAL,
            recovery_week_factor: periodization::RECOVERY_WEEK_VOLUME_FACTOR,
            progression_rate_override: None,
            max_progression_rate: periodization::MAX_PROGRESSION_RATE,
        }
    }
}

/// Training load and injury risk settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Acute EWMA window in days
    pub acute_window_days: i64,
    /// Chronic EWMA window in days
    pub chronic_window_days: i64,
    /// ACWR below which the athlete is undertraining
    pub undertraining_ratio: f64,
    /// Upper bound of the optimal ACWR band
    pub optimal_ratio_max: f64,
    /// Upper bound of the high ACWR band
    pub high_ratio_max: f64,
    /// Injury risk weight of the ratio component
    pub ratio_weight: f64,
    /// Injury risk weight of the mileage increase component
    pub mileage_weight: f64,
    /// Injury risk weight of the recovery component
    pub recovery_weight: f64,
    /// Daily TSS above which a day counts as overload
    pub daily_tss_overload: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            acute_window_days: training_load::ACUTE_WINDOW_DAYS,
            chronic_window_days: training_load::CHRONIC_WINDOW_DAYS,
            undertraining_ratio: training_load::UNDERTRAINING_RATIO,
            optimal_ratio_max: training_load::OPTIMAL_RATIO_MAX,
            high_ratio_max: training_load::HIGH_RATIO_MAX,
            ratio_weight: training_load::RATIO_RISK_WEIGHT,
            mileage_weight: training_load::MILEAGE_RISK_WEIGHT,
            recovery_weight: training_load::RECOVERY_RISK_WEIGHT,
            daily_tss_overload: fatigue::DAILY_TSS_OVERLOAD,
        }
    }
}

/// Progress analysis and modification rule settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// Adherence below which volume is reduced
    pub low_adherence_rate: f64,
    /// Recovery score below which recovery days are added
    pub low_recovery_score: f64,
    /// Minimum completed workouts for a performance trend
    pub min_workouts_for_trend: usize,
    /// Improvement threshold (%) for the performance trend
    pub trend_threshold_percent: f64,
    /// Stable band (%) for weekly volume progress
    pub volume_stable_band_percent: f64,
    /// Whether methodology overlay rules run
    pub methodology_overlay_enabled: bool,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            low_adherence_rate: modification::LOW_ADHERENCE_RATE,
            low_recovery_score: modification::LOW_RECOVERY_SCORE,
            min_workouts_for_trend: progress::MIN_WORKOUTS_FOR_TREND,
            trend_threshold_percent: progress::TREND_THRESHOLD_PERCENT,
            volume_stable_band_percent: progress::VOLUME_STABLE_BAND_PERCENT,
            methodology_overlay_enabled: true,
        }
    }
}

/// Capacities of the injectable caches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether caches are used at all
    pub enabled: bool,
    /// Maximum cached methodology philosophies
    pub methodology_capacity: usize,
    /// Maximum cached pace lookups
    pub pace_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            methodology_capacity: 8,
            pace_capacity: 512,
        }
    }
}

/// Root planner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Periodization settings
    pub periodization: PeriodizationConfig,
    /// Risk settings
    pub risk: RiskConfig,
    /// Adaptation settings
    pub adaptation: AdaptationConfig,
    /// Cache settings
    pub cache: CacheConfig,
}

/// Global configuration singleton
static PLANNER_CONFIG: OnceLock<PlannerConfig> = OnceLock::new();

impl PlannerConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        PLANNER_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                tracing::warn!("Failed to load planner config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from environment variables and validate it
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(policy) = env_override("PIERRE_PLANNER_RESIDUAL_POLICY")? {
            self.periodization.residual_policy = policy;
        }
        if let Some(interval) = env_override("PIERRE_PLANNER_RECOVERY_WEEK_INTERVAL")? {
            self.periodization.recovery_week_interval = interval;
        }
        if let Some(factor) = env_override("PIERRE_PLANNER_RECOVERY_WEEK_FACTOR")? {
            self.periodization.recovery_week_factor = factor;
        }
        if let Some(rate) = env_override("PIERRE_PLANNER_PROGRESSION_RATE")? {
            self.periodization.progression_rate_override = Some(rate);
        }

        // Risk overrides
        if let Some(days) = env_override("PIERRE_PLANNER_ACUTE_WINDOW_DAYS")? {
            self.risk.acute_window_days = days;
        }
        if let Some(days) = env_override("PIERRE_PLANNER_CHRONIC_WINDOW_DAYS")? {
            self.risk.chronic_window_days = days;
        }

        // Adaptation overrides
        if let Some(rate) = env_override("PIERRE_PLANNER_LOW_ADHERENCE")? {
            self.adaptation.low_adherence_rate = rate;
        }
        if let Some(score) = env_override("PIERRE_PLANNER_LOW_RECOVERY_SCORE")? {
            self.adaptation.low_recovery_score = score;
        }
        if let Some(enabled) = env_override("PIERRE_PLANNER_METHODOLOGY_OVERLAY")? {
            self.adaptation.methodology_overlay_enabled = enabled;
        }

        if let Some(enabled) = env_override("PIERRE_PLANNER_CACHE_ENABLED")? {
            self.cache.enabled = enabled;
        }
        if let Some(capacity) = env_override("PIERRE_PLANNER_PACE_CACHE_CAPACITY")? {
            self.cache.pace_capacity = capacity;
        }

        Ok(self)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periodization = &self.periodization;
        if periodization.recovery_week_interval < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "recovery_week_interval must be at least 2",
            ));
        }
        if periodization.recovery_week_factor <= 0.0 || periodization.recovery_week_factor > 1.0 {
            return Err(ConfigError::ValueOutOfRange(
                "recovery_week_factor must be in (0, 1]",
            ));
        }
        if periodization.max_progression_rate <= 0.0
            || periodization.max_progression_rate > periodization::MAX_PROGRESSION_RATE
        {
            return Err(ConfigError::ValueOutOfRange(
                "max_progression_rate must be in (0, 0.2]",
            ));
        }
        if let Some(rate) = periodization.progression_rate_override {
            if rate <= 0.0 || rate > periodization.max_progression_rate {
                return Err(ConfigError::ValueOutOfRange(
                    "progression_rate_override must be in (0, max_progression_rate]",
                ));
            }
        }

        let risk = &self.risk;
        if risk.acute_window_days <= 0 || risk.acute_window_days >= risk.chronic_window_days {
            return Err(ConfigError::InvalidRange(
                "acute window must be positive and shorter than the chronic window",
            ));
        }
        if !(risk.undertraining_ratio < risk.optimal_ratio_max
            && risk.optimal_ratio_max < risk.high_ratio_max)
        {
            return Err(ConfigError::InvalidRange(
                "ACWR thresholds must be strictly ascending",
            ));
        }
        let weight_sum = risk.ratio_weight + risk.mileage_weight + risk.recovery_weight;
        if (weight_sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidWeights(
                "injury risk weights must sum to 1.0",
            ));
        }

        let adaptation = &self.adaptation;
        if !(0.0..=1.0).contains(&adaptation.low_adherence_rate) {
            return Err(ConfigError::ValueOutOfRange(
                "low_adherence_rate must be in [0, 1]",
            ));
        }
        if !(0.0..=100.0).contains(&adaptation.low_recovery_score) {
            return Err(ConfigError::ValueOutOfRange(
                "low_recovery_score must be in [0, 100]",
            ));
        }
        if adaptation.min_workouts_for_trend < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_workouts_for_trend must be at least 2",
            ));
        }

        if self.cache.enabled && (self.cache.methodology_capacity == 0 || self.cache.pace_capacity == 0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "cache capacities must be positive when caching is enabled",
            ));
        }

        Ok(())
    }
}

/// Parse an optional environment override
fn env_override<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    env::var(key).map_or(Ok(None), |raw| {
        raw.trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("Invalid {key}")))
    })
}
