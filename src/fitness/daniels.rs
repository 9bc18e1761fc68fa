// ABOUTME: Daniels VDOT fitness model with two-point critical speed and EWMA load
// ABOUTME: VO2 = -4.60 + 0.182258xv + 0.000104xv² for VDOT and its quadratic inversion for paces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};

use pierre_core::constants::{periodization::DEFAULT_PACE_MIN_PER_KM, training_load};
use pierre_core::models::{InjuryStatus, WorkoutType};

use super::load::{acute_chronic, TssPoint};
use super::recovery::recovery_from_signals;
use super::{FitnessMetrics, FitnessModel, RunRecord};

/// Jack Daniels' VO2 formula coefficient for velocity squared term
const DANIELS_A: f64 = 0.000_104;
/// Jack Daniels' VO2 formula coefficient for velocity term
const DANIELS_B: f64 = 0.182_258;
/// Jack Daniels' VO2 formula constant term
const DANIELS_C: f64 = -4.60;

/// Minimum velocity for VDOT calculation (m/min)
const MIN_VELOCITY: f64 = 100.0;
/// Maximum velocity for VDOT calculation (m/min)
const MAX_VELOCITY: f64 = 500.0;
/// Lower end of the typical VDOT range
const MIN_VDOT: f64 = 30.0;
/// Upper end of the typical VDOT range
const MAX_VDOT: f64 = 85.0;

/// Runs older than this are ignored for VDOT and critical speed
const PERFORMANCE_WINDOW_DAYS: i64 = 90;
/// Window for weekly mileage and longest run
const VOLUME_WINDOW_DAYS: i64 = 28;
/// Efforts up to this duration count as the short point of the critical speed model
const SHORT_EFFORT_MAX_MINUTES: f64 = 20.0;
/// Shortest effort considered for critical speed
const MIN_EFFORT_MINUTES: f64 = 3.0;

/// Daniels-based fitness model
#[derive(Debug, Clone, Copy, Default)]
pub struct DanielsFitnessModel;

impl DanielsFitnessModel {
    /// Create the model
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// VDOT from a single performance, `None` outside the valid velocity range
    #[must_use]
    pub fn vdot_from_performance(distance_meters: f64, time_seconds: f64) -> Option<f64> {
        if distance_meters <= 0.0 || time_seconds <= 0.0 {
            return None;
        }
        let velocity = (distance_meters / time_seconds) * 60.0;
        if !(MIN_VELOCITY..=MAX_VELOCITY).contains(&velocity) {
            return None;
        }
        let vo2 = (DANIELS_A * velocity).mul_add(velocity, DANIELS_B.mul_add(velocity, DANIELS_C));
        Some(vo2 / Self::percent_max_adjustment(time_seconds))
    }

    /// Velocity at VO2max (m/min) for a VDOT, solving the VO2 quadratic
    #[must_use]
    pub fn velocity_at_vdot(vdot: f64) -> Option<f64> {
        if vdot <= 0.0 {
            return None;
        }
        let c = -(vdot - DANIELS_C);
        let discriminant = DANIELS_B.mul_add(DANIELS_B, -(4.0 * DANIELS_A * c));
        if discriminant < 0.0 {
            return None;
        }
        Some((-DANIELS_B + discriminant.sqrt()) / (2.0 * DANIELS_A))
    }

    /// Share of VO2max a race of this duration is run at
    fn percent_max_adjustment(time_seconds: f64) -> f64 {
        let time_minutes = time_seconds / 60.0;
        if time_minutes < 5.0 {
            0.97
        } else if time_minutes < 15.0 {
            0.99
        } else if time_minutes < 30.0 {
            1.00
        } else if time_minutes < 90.0 {
            0.98
        } else {
            0.95
        }
    }

    /// Share of velocity at VO2max each workout type is run at
    const fn velocity_share(workout_type: WorkoutType) -> f64 {
        match workout_type {
            WorkoutType::Recovery | WorkoutType::CrossTraining | WorkoutType::Rest => 0.65,
            WorkoutType::Easy => 0.70,
            WorkoutType::LongRun => 0.72,
            WorkoutType::Progression => 0.80,
            WorkoutType::Fartlek => 0.82,
            WorkoutType::RacePace => 0.84,
            WorkoutType::Tempo | WorkoutType::Threshold => 0.88,
            WorkoutType::Hill => 0.90,
            WorkoutType::Intervals | WorkoutType::Vo2Max => 0.98,
            WorkoutType::Speed => 1.05,
        }
    }

    fn best_vdot(recent: &[&RunRecord]) -> f64 {
        recent
            .iter()
            .filter_map(|run| {
                Self::vdot_from_performance(run.distance_km * 1000.0, run.duration_minutes * 60.0)
            })
            .fold(0.0, f64::max)
            .clamp(0.0, MAX_VDOT)
    }

    /// Two-point critical speed (m/s) from the fastest short and long efforts
    fn critical_speed(recent: &[&RunRecord]) -> f64 {
        let fastest = |short: bool| {
            recent
                .iter()
                .filter(|run| {
                    run.duration_minutes >= MIN_EFFORT_MINUTES
                        && (run.duration_minutes <= SHORT_EFFORT_MAX_MINUTES) == short
                })
                .filter_map(|run| run.velocity_m_per_min().map(|v| (v, *run)))
                .max_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(_, run)| run)
        };

        match (fastest(true), fastest(false)) {
            (Some(short), Some(long)) => {
                let distance_delta = (long.distance_km - short.distance_km) * 1000.0;
                let time_delta = (long.duration_minutes - short.duration_minutes) * 60.0;
                if time_delta > 0.0 && distance_delta > 0.0 {
                    distance_delta / time_delta
                } else {
                    long.velocity_m_per_min().map_or(0.0, |v| v / 60.0)
                }
            }
            (None, Some(only)) | (Some(only), None) => {
                only.velocity_m_per_min().map_or(0.0, |v| v / 60.0)
            }
            (None, None) => 0.0,
        }
    }
}

impl FitnessModel for DanielsFitnessModel {
    fn assess(&self, history: &[RunRecord], now: DateTime<Utc>) -> FitnessMetrics {
        let performance_start = now - Duration::days(PERFORMANCE_WINDOW_DAYS);
        let volume_start = now - Duration::days(VOLUME_WINDOW_DAYS);

        let recent: Vec<&RunRecord> = history
            .iter()
            .filter(|run| run.date > performance_start && run.date <= now)
            .collect();
        let volume_runs: Vec<&RunRecord> = recent
            .iter()
            .copied()
            .filter(|run| run.date > volume_start)
            .collect();

        let vdot = Self::best_vdot(&recent);
        let vdot = if vdot >= MIN_VDOT { vdot } else { 0.0 };

        #[allow(clippy::cast_precision_loss)]
        let weeks_in_window = (VOLUME_WINDOW_DAYS / 7) as f64;
        let weekly_mileage =
            volume_runs.iter().map(|run| run.distance_km).sum::<f64>() / weeks_in_window;
        let longest_recent_run = volume_runs
            .iter()
            .map(|run| run.distance_km)
            .fold(0.0, f64::max);

        let points: Vec<TssPoint> = history
            .iter()
            .map(|run| TssPoint {
                date: run.date,
                tss: run.tss,
            })
            .collect();
        let (acute_load, chronic_load) = acute_chronic(
            &points,
            now,
            training_load::ACUTE_WINDOW_DAYS,
            training_load::CHRONIC_WINDOW_DAYS,
        );
        let recovery =
            recovery_from_signals(acute_load, chronic_load, None, None, InjuryStatus::Healthy);

        FitnessMetrics {
            vdot,
            critical_speed: Self::critical_speed(&recent),
            lactate_threshold_pace: self.training_pace(vdot, WorkoutType::Threshold),
            weekly_mileage,
            longest_recent_run,
            acute_load,
            chronic_load,
            recovery_score: recovery.recovery_score,
        }
    }

    fn training_pace(&self, vdot: f64, workout_type: WorkoutType) -> f64 {
        let share = Self::velocity_share(workout_type);
        Self::velocity_at_vdot(vdot)
            .filter(|_| vdot >= MIN_VDOT)
            .map_or_else(
                || DEFAULT_PACE_MIN_PER_KM * Self::velocity_share(WorkoutType::Easy) / share,
                |velocity_max| 1000.0 / (velocity_max * share),
            )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_vdot_round_trips_through_velocity() {
        // 5K in 20:00 falls in the 15-30 minute band run at 100% of VO2max
        let vdot = DanielsFitnessModel::vdot_from_performance(5000.0, 20.0 * 60.0).unwrap();
        assert!(vdot > 45.0 && vdot < 55.0, "vdot {vdot}");
        let velocity = DanielsFitnessModel::velocity_at_vdot(vdot).unwrap();
        assert!((velocity - 250.0).abs() < 1.0, "velocity {velocity}");
    }

    #[test]
    fn test_faster_workouts_have_faster_paces() {
        let model = DanielsFitnessModel::new();
        let easy = model.training_pace(50.0, WorkoutType::Easy);
        let threshold = model.training_pace(50.0, WorkoutType::Threshold);
        let speed = model.training_pace(50.0, WorkoutType::Speed);
        assert!(easy > threshold && threshold > speed);
    }

    #[test]
    fn test_unknown_vdot_uses_default_easy_pace() {
        let model = DanielsFitnessModel::new();
        let pace = model.training_pace(0.0, WorkoutType::Easy);
        assert!((pace - DEFAULT_PACE_MIN_PER_KM).abs() < 1e-9);
    }

    #[test]
    fn test_assess_empty_history_is_degenerate_but_valid() {
        let metrics = DanielsFitnessModel::new().assess(&[], Utc::now());
        assert!(metrics.vdot.abs() < f64::EPSILON);
        assert!(metrics.weekly_mileage.abs() < f64::EPSILON);
        assert!(metrics.acute_load.abs() < f64::EPSILON);
        assert!(metrics.recovery_score > 0.0);
    }
}
