// ABOUTME: Training load, injury risk and fatigue assessment from completed workouts
// ABOUTME: EWMA acute:chronic workload ratio, weighted injury risk and streak-based fatigue levels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Risk Assessment
//!
//! - **Training load**: exponentially weighted acute (7 day) and chronic (28 day)
//!   daily TSS, and their ratio (ACWR)
//! - **Injury risk**: weighted blend of ACWR risk, week-over-week mileage jump and
//!   poor recovery
//! - **Fatigue**: recent effort and stress, plus streaks of underperformance and
//!   overload days
//!
//! ## References
//!
//! - Gabbett, T.J. (2016). The training-injury prevention paradox. *British Journal of
//!   Sports Medicine*, 50(5), 273-280.
//! - Williams, S. et al. (2017). Better way to determine the acute:chronic workload
//!   ratio? *British Journal of Sports Medicine*, 51(3), 209-210.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use pierre_core::constants::fatigue::{
    ACUTE_FATIGUE_WINDOW_DAYS, CHRONIC_STREAK_DAYS, EFFORT_WEIGHT, HIGH_ACUTE_FATIGUE,
    HIGH_EFFORT, MAX_ACUTE_FATIGUE, MODERATE_ACUTE_FATIGUE, OVERLOAD_SEVERE_STREAK,
    OVERLOAD_WARNING_STREAK, SHORTFALL_WEIGHT, TSS_WEIGHT, UNDERPERFORMANCE_COMPLETION_PERCENT,
};
use pierre_core::constants::training_load::{
    HIGH_INJURY_RISK_SCORE, MILEAGE_INCREASE_RISK_SPAN, MODERATE_INJURY_RISK_SCORE,
    SAFE_MILEAGE_INCREASE_PERCENT, TREND_CHANGE_THRESHOLD,
};
use pierre_core::constants::units::DAYS_PER_WEEK;
use pierre_core::models::{
    CompletedWorkout, LoadRiskZone, LoadTrend, RecoveryMetrics, TrainingLoad,
};

use crate::config::{PlannerConfig, RiskConfig};
use crate::fitness::load::acute_chronic;
use crate::fitness::TssPoint;

/// Risk assigned to the ratio component when the athlete is undertraining
const UNDERTRAINING_RATIO_RISK: f64 = 20.0;

/// Three-level risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Below 40
    Low,
    /// 40 to 70
    Moderate,
    /// 70 and above
    High,
}

impl RiskLevel {
    /// Classify an injury risk score (0-100)
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_INJURY_RISK_SCORE {
            Self::High
        } else if score >= MODERATE_INJURY_RISK_SCORE {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// The weighted inputs of an injury risk score, each 0-100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjuryRiskComponents {
    /// Risk from the acute:chronic ratio
    pub ratio_risk: f64,
    /// Risk from the week-over-week mileage increase
    pub mileage_risk: f64,
    /// Risk from poor recovery (`100 - recovery score`)
    pub recovery_risk: f64,
    /// Week-over-week mileage change in percent
    pub mileage_increase_percent: f64,
}

/// Injury risk estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InjuryRisk {
    /// Score 0-100
    pub score: f64,
    /// Classification of the score
    pub level: RiskLevel,
    /// Score inputs
    pub components: InjuryRiskComponents,
}

/// Fatigue classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatigueLevel {
    /// Normal training fatigue
    Low,
    /// Noticeable fatigue
    Moderate,
    /// Reduce load
    High,
    /// Stop and recover
    Severe,
}

impl FatigueLevel {
    /// Lowercase name for logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Severe => "severe",
        }
    }
}

/// Fatigue estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueAssessment {
    /// Fatigue from the last three days, 0-100
    pub acute_fatigue: f64,
    /// Trailing days of high effort with poor completion
    pub chronic_streak: u32,
    /// Trailing days above the daily TSS overload threshold
    pub overload_streak: u32,
    /// Overall level
    pub level: FatigueLevel,
    /// Chronic streak reached the persistent-underperformance threshold
    pub persistent_underperformance: bool,
    /// Overload streak reached the warning threshold
    pub overload_warning: bool,
}

/// Combined risk picture for one athlete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Acute vs chronic load
    pub training_load: TrainingLoad,
    /// Injury risk
    pub injury_risk: InjuryRisk,
    /// Fatigue
    pub fatigue: FatigueAssessment,
}

impl RiskAssessment {
    /// Whether anything in the assessment warrants an alert
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        matches!(
            self.training_load.risk_zone,
            LoadRiskZone::High | LoadRiskZone::VeryHigh
        ) || self.injury_risk.level == RiskLevel::High
            || self.fatigue.level >= FatigueLevel::High
    }
}

/// Risk assessor
#[derive(Debug, Clone)]
pub struct RiskAssessor {
    config: RiskConfig,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAssessor {
    /// Create an assessor using the global configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::global().risk.clone())
    }

    /// Create an assessor with explicit configuration
    #[must_use]
    pub const fn with_config(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Run every assessment at `now`
    #[must_use]
    pub fn assess(
        &self,
        completed: &[CompletedWorkout],
        recovery: &RecoveryMetrics,
        now: DateTime<Utc>,
    ) -> RiskAssessment {
        let training_load = self.training_load(completed, now);
        let injury_risk = self.injury_risk(&training_load, completed, recovery, now);
        let fatigue = self.fatigue(completed, now, training_load.ratio);
        RiskAssessment {
            training_load,
            injury_risk,
            fatigue,
        }
    }

    /// Acute and chronic EWMA load, their ratio, trend and risk zone
    #[must_use]
    pub fn training_load(&self, completed: &[CompletedWorkout], now: DateTime<Utc>) -> TrainingLoad {
        let points = tss_points(completed, now);
        let (acute, chronic) = acute_chronic(
            &points,
            now,
            self.config.acute_window_days,
            self.config.chronic_window_days,
        );
        let ratio = if chronic > 0.0 { acute / chronic } else { 0.0 };

        let (previous_acute, _) = acute_chronic(
            &points,
            now - Duration::days(self.config.acute_window_days),
            self.config.acute_window_days,
            self.config.chronic_window_days,
        );
        let risk_zone = self.risk_zone(ratio);

        TrainingLoad {
            acute,
            chronic,
            ratio,
            trend: load_trend(acute, previous_acute),
            risk_zone,
            recommendation: recommendation(risk_zone).to_owned(),
        }
    }

    /// Classify an acute:chronic ratio
    #[must_use]
    pub fn risk_zone(&self, ratio: f64) -> LoadRiskZone {
        if ratio < self.config.undertraining_ratio {
            LoadRiskZone::Undertraining
        } else if ratio <= self.config.optimal_ratio_max {
            LoadRiskZone::Optimal
        } else if ratio <= self.config.high_ratio_max {
            LoadRiskZone::High
        } else {
            LoadRiskZone::VeryHigh
        }
    }

    /// Weighted injury risk
    #[must_use]
    pub fn injury_risk(
        &self,
        training_load: &TrainingLoad,
        completed: &[CompletedWorkout],
        recovery: &RecoveryMetrics,
        now: DateTime<Utc>,
    ) -> InjuryRisk {
        let ratio_risk = self.ratio_risk(training_load.ratio);
        let mileage_increase_percent = mileage_increase_percent(completed, now);
        let mileage_risk = ((mileage_increase_percent - SAFE_MILEAGE_INCREASE_PERCENT)
            / MILEAGE_INCREASE_RISK_SPAN
            * 100.0)
            .clamp(0.0, 100.0);
        let recovery_risk = (100.0 - recovery.recovery_score).clamp(0.0, 100.0);

        let score = self
            .config
            .ratio_weight
            .mul_add(
                ratio_risk,
                self.config
                    .mileage_weight
                    .mul_add(mileage_risk, self.config.recovery_weight * recovery_risk),
            )
            .clamp(0.0, 100.0);

        InjuryRisk {
            score,
            level: RiskLevel::from_score(score),
            components: InjuryRiskComponents {
                ratio_risk,
                mileage_risk,
                recovery_risk,
                mileage_increase_percent,
            },
        }
    }

    /// Fatigue from recent sessions and trailing streaks
    #[must_use]
    pub fn fatigue(
        &self,
        completed: &[CompletedWorkout],
        now: DateTime<Utc>,
        ratio: f64,
    ) -> FatigueAssessment {
        let window_start = now - Duration::days(ACUTE_FATIGUE_WINDOW_DAYS);
        let acute_fatigue = completed
            .iter()
            .filter(|w| w.date > window_start && w.date <= now)
            .map(session_fatigue)
            .sum::<f64>()
            .min(MAX_ACUTE_FATIGUE);

        let days = daily_summaries(completed, now);
        let today = now.date_naive();
        let chronic_streak = trailing_streak(&days, today, |day| day.underperformed);
        let overload_streak =
            trailing_streak(&days, today, |day| day.tss > self.config.daily_tss_overload);

        let level = if chronic_streak >= CHRONIC_STREAK_DAYS
            || overload_streak >= OVERLOAD_SEVERE_STREAK
        {
            FatigueLevel::Severe
        } else if acute_fatigue > HIGH_ACUTE_FATIGUE || ratio > self.config.high_ratio_max {
            FatigueLevel::High
        } else if acute_fatigue > MODERATE_ACUTE_FATIGUE || ratio > self.config.optimal_ratio_max
        {
            FatigueLevel::Moderate
        } else {
            FatigueLevel::Low
        };

        FatigueAssessment {
            acute_fatigue,
            chronic_streak,
            overload_streak,
            level,
            persistent_underperformance: chronic_streak >= CHRONIC_STREAK_DAYS,
            overload_warning: overload_streak >= OVERLOAD_WARNING_STREAK,
        }
    }

    fn ratio_risk(&self, ratio: f64) -> f64 {
        if ratio < self.config.undertraining_ratio {
            return if ratio > 0.0 {
                UNDERTRAINING_RATIO_RISK
            } else {
                0.0
            };
        }
        ((ratio - 1.0) / 0.5 * 100.0).clamp(0.0, 100.0)
    }
}

fn tss_points(completed: &[CompletedWorkout], now: DateTime<Utc>) -> Vec<TssPoint> {
    completed
        .iter()
        .filter(|w| w.date <= now)
        .map(|w| TssPoint {
            date: w.date,
            tss: w.resolved_tss(),
        })
        .collect()
}

fn load_trend(acute: f64, previous_acute: f64) -> LoadTrend {
    if previous_acute <= 0.0 {
        return if acute > 0.0 {
            LoadTrend::Increasing
        } else {
            LoadTrend::Stable
        };
    }
    let change = (acute - previous_acute) / previous_acute;
    if change > TREND_CHANGE_THRESHOLD {
        LoadTrend::Increasing
    } else if change < -TREND_CHANGE_THRESHOLD {
        LoadTrend::Decreasing
    } else {
        LoadTrend::Stable
    }
}

const fn recommendation(zone: LoadRiskZone) -> &'static str {
    match zone {
        LoadRiskZone::Undertraining => {
            "Training load is below your recent average; build volume gradually"
        }
        LoadRiskZone::Optimal => "Training load is in the optimal range; continue as planned",
        LoadRiskZone::High => "Training load is rising quickly; hold intensity steady",
        LoadRiskZone::VeryHigh => "Training load spike detected; reduce volume and prioritize recovery",
    }
}

/// Last 7 days against the 7 before, in percent; 0 when the earlier week is empty
fn mileage_increase_percent(completed: &[CompletedWorkout], now: DateTime<Utc>) -> f64 {
    let week = Duration::days(DAYS_PER_WEEK);
    let distance_between = |from: DateTime<Utc>, to: DateTime<Utc>| -> f64 {
        completed
            .iter()
            .filter(|w| w.date > from && w.date <= to)
            .map(|w| w.distance_km)
            .sum()
    };
    let current = distance_between(now - week, now);
    let previous = distance_between(now - week - week, now - week);
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Acute fatigue points for one session; increases with effort, TSS and shortfall
fn session_fatigue(workout: &CompletedWorkout) -> f64 {
    let effort = workout.perceived_effort.unwrap_or(0.0).clamp(0.0, 10.0);
    let shortfall = workout
        .completion_percentage()
        .map_or(0.0, |completion| (100.0 - completion).max(0.0));
    SHORTFALL_WEIGHT.mul_add(
        shortfall,
        EFFORT_WEIGHT.mul_add(effort, TSS_WEIGHT * workout.resolved_tss()),
    )
}

#[derive(Debug, Default, Clone, Copy)]
struct DaySummary {
    tss: f64,
    underperformed: bool,
}

/// Per-calendar-day totals for workouts on or before `now`
fn daily_summaries(
    completed: &[CompletedWorkout],
    now: DateTime<Utc>,
) -> BTreeMap<NaiveDate, DaySummary> {
    let mut days: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();
    for workout in completed.iter().filter(|w| w.date <= now) {
        let day = days.entry(workout.date.date_naive()).or_default();
        day.tss += workout.resolved_tss();
        let hard = workout.perceived_effort.is_some_and(|e| e >= HIGH_EFFORT);
        let short = workout
            .completion_percentage()
            .is_some_and(|c| c < UNDERPERFORMANCE_COMPLETION_PERCENT);
        day.underperformed |= hard && short;
    }
    days
}

/// Consecutive calendar days matching `predicate`, ending on `today`
///
/// While `today` has no training yet the streak may end on the day before. Any
/// other day without training breaks the streak.
fn trailing_streak(
    days: &BTreeMap<NaiveDate, DaySummary>,
    today: NaiveDate,
    predicate: impl Fn(&DaySummary) -> bool,
) -> u32 {
    let mut expected = if days.contains_key(&today) {
        Some(today)
    } else {
        today.pred_opt()
    };
    let mut streak = 0;
    for (date, summary) in days.range(..=today).rev() {
        if expected != Some(*date) || !predicate(summary) {
            break;
        }
        streak += 1;
        expected = date.pred_opt();
    }
    streak
}
