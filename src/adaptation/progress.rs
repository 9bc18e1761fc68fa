// ABOUTME: Measures athlete progress against a plan from completed workouts
// ABOUTME: Adherence, effort-normalized pace trend, weekly volume trend and actual intensity mix
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};

use pierre_core::constants::units::DAYS_PER_WEEK;
use pierre_core::models::{
    CompletedWorkout, FitnessAssessment, IntensityDistribution, IntensityZone, PerformanceTrend,
    ProgressSnapshot, TrainingPlan, VolumeProgress,
};

use crate::config::{AdaptationConfig, PlannerConfig};

/// Progress analyzer
#[derive(Debug, Clone)]
pub struct ProgressAnalyzer {
    config: AdaptationConfig,
}

impl Default for ProgressAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressAnalyzer {
    /// Create an analyzer using the global configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PlannerConfig::global().adaptation.clone())
    }

    /// Create an analyzer with explicit configuration
    #[must_use]
    pub const fn with_config(config: AdaptationConfig) -> Self {
        Self { config }
    }

    /// Analyze progress at `now`
    ///
    /// Completed workouts dated after `now` are ignored. With no history the snapshot
    /// reports full adherence, a maintaining trend and stable volume.
    #[must_use]
    pub fn analyze(
        &self,
        plan: &TrainingPlan,
        completed: &[CompletedWorkout],
        current_fitness: &FitnessAssessment,
        now: DateTime<Utc>,
    ) -> ProgressSnapshot {
        let mut history: Vec<&CompletedWorkout> =
            completed.iter().filter(|w| w.date <= now).collect();
        history.sort_by_key(|w| w.date);

        let past_due_count = plan.past_due_workouts(now).len();
        let (performance_trend, improvement_percentage) = self.performance_trend(&history);
        let weekly_volumes = weekly_volumes(&history);

        ProgressSnapshot {
            adherence_rate: adherence_rate(history.len(), past_due_count),
            performance_trend,
            improvement_percentage,
            volume_progress: self.volume_progress(&weekly_volumes),
            weekly_volumes,
            intensity_distribution: intensity_distribution(&history),
            current_fitness: current_fitness.clone(),
            completed_count: history.len(),
            past_due_count,
        }
    }

    /// Compare effort-normalized pace of the older and recent halves of the history
    ///
    /// Sessions without a perceived effort or distance carry no signal and are skipped.
    fn performance_trend(&self, history: &[&CompletedWorkout]) -> (PerformanceTrend, f64) {
        let relative_paces: Vec<f64> = history
            .iter()
            .filter_map(|workout| {
                let effort = workout.perceived_effort.filter(|e| *e > 0.0)?;
                let pace = workout.pace_min_per_km()?;
                Some(pace / (effort / 10.0))
            })
            .collect();

        if relative_paces.len() < self.config.min_workouts_for_trend {
            return (PerformanceTrend::Maintaining, 0.0);
        }

        let (older, recent) = relative_paces.split_at(relative_paces.len() / 2);
        let older_mean = mean(older);
        if older_mean <= 0.0 {
            return (PerformanceTrend::Maintaining, 0.0);
        }
        let improvement = (older_mean - mean(recent)) / older_mean * 100.0;

        let threshold = self.config.trend_threshold_percent;
        let trend = if improvement > threshold {
            PerformanceTrend::Improving
        } else if improvement < -threshold {
            PerformanceTrend::Declining
        } else {
            PerformanceTrend::Maintaining
        };
        (trend, improvement)
    }

    /// First third of the weeks against the last third
    fn volume_progress(&self, weekly_volumes: &[f64]) -> VolumeProgress {
        if weekly_volumes.len() < 2 {
            return VolumeProgress::Stable;
        }
        let third = (weekly_volumes.len() / 3).max(1);
        let early = mean(&weekly_volumes[..third]);
        let late = mean(&weekly_volumes[weekly_volumes.len() - third..]);

        if early <= 0.0 {
            return if late > 0.0 {
                VolumeProgress::Increasing
            } else {
                VolumeProgress::Stable
            };
        }
        let change = (late - early) / early * 100.0;
        let band = self.config.volume_stable_band_percent;
        if change > band {
            VolumeProgress::Increasing
        } else if change < -band {
            VolumeProgress::Decreasing
        } else {
            VolumeProgress::Stable
        }
    }
}

/// Completed over past-due sessions, capped at 1; 1 when nothing is due yet
fn adherence_rate(completed: usize, past_due: usize) -> f64 {
    if past_due == 0 {
        return 1.0;
    }
    (completed as f64 / past_due as f64).min(1.0)
}

/// Kilometers per 7-day bucket counted from the first workout (history sorted by date)
fn weekly_volumes(history: &[&CompletedWorkout]) -> Vec<f64> {
    let Some(first) = history.first() else {
        return Vec::new();
    };
    let mut volumes: Vec<f64> = Vec::new();
    for workout in history {
        let bucket = ((workout.date - first.date).num_days() / DAYS_PER_WEEK).max(0) as usize;
        if volumes.len() <= bucket {
            volumes.resize(bucket + 1, 0.0);
        }
        volumes[bucket] += workout.distance_km;
    }
    volumes
}

/// Duration-weighted share of training time per zone
fn intensity_distribution(history: &[&CompletedWorkout]) -> IntensityDistribution {
    let (mut low, mut moderate, mut high) = (0.0, 0.0, 0.0);
    for workout in history {
        let minutes = workout.duration_minutes.max(0.0);
        match workout.workout_type.zone() {
            IntensityZone::Low => low += minutes,
            IntensityZone::Moderate => moderate += minutes,
            IntensityZone::High => high += minutes,
        }
    }
    IntensityDistribution::from_minutes(low, moderate, high)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adherence_is_capped_and_zero_guarded() {
        assert!((adherence_rate(0, 0) - 1.0).abs() < f64::EPSILON);
        assert!((adherence_rate(12, 10) - 1.0).abs() < f64::EPSILON);
        assert!((adherence_rate(7, 10) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_mean_of_empty_slice_is_zero() {
        assert!(mean(&[]).abs() < f64::EPSILON);
        assert!((mean(&[2.0, 4.0]) - 3.0).abs() < f64::EPSILON);
    }
}
