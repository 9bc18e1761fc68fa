// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Periodization, load-management, fatigue and adaptation constants for training plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain. Values that callers may want to tune are
//! only defaults here; the planner's `PlannerConfig` carries the effective
//! values and falls back to these.

/// Periodization constants: phase shares, progression rates, recovery weeks
///
/// References:
/// - Bompa, T. & Haff, G. (2009). Periodization: Theory and Methodology of Training
/// - Issurin, V. (2010). New horizons for the methodology and physiology of training periodization
pub mod periodization {
    /// Plans up to this many weeks use the short (base/build/taper) layout
    pub const SHORT_PLAN_MAX_WEEKS: u32 = 8;
    /// Plans up to this many weeks add a peak phase; longer plans add recovery
    pub const MEDIUM_PLAN_MAX_WEEKS: u32 = 16;

    /// Short plan: base share
    pub const SHORT_BASE_SHARE: f64 = 0.4;
    /// Short plan: build share
    pub const SHORT_BUILD_SHARE: f64 = 0.4;
    /// Short plan: taper share
    pub const SHORT_TAPER_SHARE: f64 = 0.2;

    /// Medium plan: base share
    pub const MEDIUM_BASE_SHARE: f64 = 0.35;
    /// Medium plan: build share
    pub const MEDIUM_BUILD_SHARE: f64 = 0.35;
    /// Medium plan: peak share
    pub const MEDIUM_PEAK_SHARE: f64 = 0.2;
    /// Medium plan: taper share
    pub const MEDIUM_TAPER_SHARE: f64 = 0.1;

    /// Long plan: base share
    pub const LONG_BASE_SHARE: f64 = 0.3;
    /// Long plan: build share
    pub const LONG_BUILD_SHARE: f64 = 0.3;
    /// Long plan: peak share
    pub const LONG_PEAK_SHARE: f64 = 0.2;
    /// Long plan: taper share
    pub const LONG_TAPER_SHARE: f64 = 0.1;
    /// Long plan: recovery share
    pub const LONG_RECOVERY_SHARE: f64 = 0.1;

    /// Every Nth week of a block is a recovery (down) week
    pub const RECOVERY_WEEK_INTERVAL: u32 = 4;
    /// Volume multiplier applied to recovery weeks
    pub const RECOVERY_WEEK_VOLUME_FACTOR: f64 = 0.7;

    /// Weekly progression rate for beginners (5%/week)
    pub const BEGINNER_PROGRESSION_RATE: f64 = 0.05;
    /// Weekly progression rate for intermediate runners (8%/week)
    pub const INTERMEDIATE_PROGRESSION_RATE: f64 = 0.08;
    /// Weekly progression rate for advanced runners (10%/week)
    pub const ADVANCED_PROGRESSION_RATE: f64 = 0.10;
    /// Hard ceiling on any weekly progression rate
    pub const MAX_PROGRESSION_RATE: f64 = 0.20;

    /// Training age (years) below which a runner is treated as a beginner
    pub const BEGINNER_MAX_TRAINING_AGE: f64 = 1.0;
    /// Training age (years) below which a runner is treated as intermediate
    pub const INTERMEDIATE_MAX_TRAINING_AGE: f64 = 3.0;

    /// Weekly volume (km) assumed when the assessment reports none
    pub const DEFAULT_BASE_VOLUME_KM: f64 = 20.0;
    /// Pace (min/km) assumed when no usable fitness data exists
    pub const DEFAULT_PACE_MIN_PER_KM: f64 = 6.5;
}

/// Workout intensity scale, expressed as percent of threshold effort
///
/// Intensity factor used for TSS is `intensity / 100`.
/// Reference: Coggan, A. & Allen, H. (2010). Training and Racing with a Power Meter
pub mod workout_intensity {
    /// Recovery jog intensity
    pub const RECOVERY: f64 = 55.0;
    /// Easy aerobic running intensity
    pub const EASY: f64 = 65.0;
    /// Long run intensity
    pub const LONG_RUN: f64 = 70.0;
    /// Fartlek (mixed) intensity
    pub const FARTLEK: f64 = 78.0;
    /// Marathon / race pace intensity
    pub const RACE_PACE: f64 = 82.0;
    /// Progression run intensity
    pub const PROGRESSION: f64 = 80.0;
    /// Tempo intensity
    pub const TEMPO: f64 = 86.0;
    /// Lactate threshold intensity
    pub const THRESHOLD: f64 = 90.0;
    /// Hill repeat intensity
    pub const HILL: f64 = 92.0;
    /// Interval intensity
    pub const INTERVALS: f64 = 95.0;
    /// VO2max intensity
    pub const VO2_MAX: f64 = 100.0;
    /// Speed / repetition intensity
    pub const SPEED: f64 = 105.0;
    /// Cross-training intensity
    pub const CROSS_TRAINING: f64 = 60.0;

    /// Segments above this intensity are "hard" and eligible for intensity cuts
    pub const HARD_SEGMENT_THRESHOLD: f64 = 80.0;
    /// Workouts whose main set is above this intensity may be converted into recovery sessions
    pub const RECOVERY_CONVERSION_THRESHOLD: f64 = 75.0;
    /// Ceiling applied to recovery stubs created during adaptation
    pub const RECOVERY_STUB_MAX_INTENSITY: f64 = 60.0;
    /// Duration (minutes) of a recovery stub created during adaptation
    pub const RECOVERY_STUB_DURATION_MINUTES: f64 = 30.0;
}

/// Acute:chronic workload ratio constants
///
/// References:
/// - Gabbett, T.J. (2016). The training-injury prevention paradox
///   <https://bjsm.bmj.com/content/50/5/273>
/// - Williams, S. et al. (2017). Better way to determine the acute:chronic workload ratio?
pub mod training_load {
    /// Acute load window (days)
    pub const ACUTE_WINDOW_DAYS: i64 = 7;
    /// Chronic load window (days)
    pub const CHRONIC_WINDOW_DAYS: i64 = 28;
    /// Ratio below which the athlete is undertraining
    pub const UNDERTRAINING_RATIO: f64 = 0.8;
    /// Upper bound of the optimal ("sweet spot") ratio band
    pub const OPTIMAL_RATIO_MAX: f64 = 1.3;
    /// Upper bound of the high-risk band; above this is very high risk
    pub const HIGH_RATIO_MAX: f64 = 1.5;
    /// Relative change in acute load that counts as a trend
    pub const TREND_CHANGE_THRESHOLD: f64 = 0.10;

    /// Injury risk weight of the ACWR component
    pub const RATIO_RISK_WEIGHT: f64 = 0.4;
    /// Injury risk weight of the weekly mileage increase component
    pub const MILEAGE_RISK_WEIGHT: f64 = 0.3;
    /// Injury risk weight of the recovery component
    pub const RECOVERY_RISK_WEIGHT: f64 = 0.3;
    /// Weekly mileage increase tolerated before it contributes risk (%)
    pub const SAFE_MILEAGE_INCREASE_PERCENT: f64 = 10.0;
    /// Mileage increase (%) above the safe limit that maps to full risk
    pub const MILEAGE_INCREASE_RISK_SPAN: f64 = 20.0;
    /// Injury risk score at or above which risk is high
    pub const HIGH_INJURY_RISK_SCORE: f64 = 70.0;
    /// Injury risk score at or above which risk is moderate
    pub const MODERATE_INJURY_RISK_SCORE: f64 = 40.0;
}

/// Fatigue classification constants
///
/// Reference: Meeusen, R. et al. (2013). Prevention, diagnosis, and treatment of the
/// overtraining syndrome. *European Journal of Sport Science*, 13(1), 1-24.
pub mod fatigue {
    /// Window (days) for acute fatigue accumulation
    pub const ACUTE_FATIGUE_WINDOW_DAYS: i64 = 3;
    /// Acute fatigue ceiling
    pub const MAX_ACUTE_FATIGUE: f64 = 100.0;
    /// Acute fatigue points per unit of perceived effort
    pub const EFFORT_WEIGHT: f64 = 3.0;
    /// Acute fatigue points per TSS point
    pub const TSS_WEIGHT: f64 = 0.08;
    /// Acute fatigue points per percent of completion shortfall
    pub const SHORTFALL_WEIGHT: f64 = 0.2;
    /// Perceived effort (1-10) considered high
    pub const HIGH_EFFORT: f64 = 7.0;
    /// Completion percentage below which a session counts as underperformed
    pub const UNDERPERFORMANCE_COMPLETION_PERCENT: f64 = 85.0;
    /// Consecutive underperforming days that signal chronic fatigue
    pub const CHRONIC_STREAK_DAYS: u32 = 5;
    /// Daily TSS above which a day counts as overload
    pub const DAILY_TSS_OVERLOAD: f64 = 150.0;
    /// Consecutive overload days that raise a warning
    pub const OVERLOAD_WARNING_STREAK: u32 = 2;
    /// Consecutive overload days that make fatigue severe
    pub const OVERLOAD_SEVERE_STREAK: u32 = 3;
    /// Acute fatigue above which fatigue is high
    pub const HIGH_ACUTE_FATIGUE: f64 = 70.0;
    /// Acute fatigue above which fatigue is moderate
    pub const MODERATE_ACUTE_FATIGUE: f64 = 50.0;
}

/// Progress analysis constants
pub mod progress {
    /// Minimum completed workouts before a performance trend is computed
    pub const MIN_WORKOUTS_FOR_TREND: usize = 5;
    /// Improvement (%) beyond which performance is improving or declining
    pub const TREND_THRESHOLD_PERCENT: f64 = 2.0;
    /// Volume change (%) band treated as stable
    pub const VOLUME_STABLE_BAND_PERCENT: f64 = 10.0;
}

/// Rule-table constants for plan modifications
pub mod modification {
    /// Volume cut (%) when ACWR is very high
    pub const VERY_HIGH_RATIO_VOLUME_REDUCTION: f64 = 30.0;
    /// Intensity cut (%) when ACWR is high
    pub const HIGH_RATIO_INTENSITY_REDUCTION: f64 = 20.0;
    /// Recovery score below which recovery days are added
    pub const LOW_RECOVERY_SCORE: f64 = 60.0;
    /// Recovery days added on low recovery
    pub const LOW_RECOVERY_EXTRA_DAYS: u32 = 2;
    /// Intensity cut (%) accompanying added recovery
    pub const LOW_RECOVERY_INTENSITY_REDUCTION: f64 = 30.0;
    /// Volume cut (%) for a non-severe injury
    pub const INJURY_VOLUME_REDUCTION: f64 = 50.0;
    /// Volume cut (%) for a severe injury (training suspended)
    pub const SEVERE_INJURY_VOLUME_REDUCTION: f64 = 100.0;
    /// Window (days) cleared by the severe injury protocol
    pub const INJURY_PROTOCOL_WINDOW_DAYS: i64 = 7;
    /// Extra recovery days granted by the non-severe injury protocol
    pub const INJURY_PROTOCOL_RECOVERY_DAYS: u32 = 7;
    /// Adherence below which volume is reduced
    pub const LOW_ADHERENCE_RATE: f64 = 0.7;
    /// Volume cut (%) on low adherence
    pub const LOW_ADHERENCE_VOLUME_REDUCTION: f64 = 20.0;
    /// Delay (days) on low adherence
    pub const LOW_ADHERENCE_DELAY_DAYS: i64 = 7;
    /// Delay (days) when performance declines
    pub const DECLINE_DELAY_DAYS: i64 = 7;
    /// Intensity cut (%) when performance declines
    pub const DECLINE_INTENSITY_REDUCTION: f64 = 15.0;
}

/// Unit conversions
pub mod units {
    /// Minutes per hour
    pub const MINUTES_PER_HOUR: f64 = 60.0;
    /// Meters per kilometer
    pub const METERS_PER_KM: f64 = 1000.0;
    /// Days per week
    pub const DAYS_PER_WEEK: i64 = 7;
}
