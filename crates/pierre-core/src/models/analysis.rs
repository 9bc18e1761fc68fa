// ABOUTME: Derived analysis values: progress snapshots and acute:chronic training load
// ABOUTME: Never persisted and hold no back-reference to the plan they were computed from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::fitness::FitnessAssessment;
use super::plan::IntensityDistribution;

/// Direction of recent performance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceTrend {
    /// Relative pace improved by more than the threshold
    Improving,
    /// Within the threshold either way
    Maintaining,
    /// Relative pace worsened by more than the threshold
    Declining,
}

/// Direction of weekly volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolumeProgress {
    /// Last third of weeks above the first third by more than the band
    Increasing,
    /// Within the band
    Stable,
    /// Last third of weeks below the first third by more than the band
    Decreasing,
}

/// Athlete progress against the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Completed / past-due planned sessions (1.0 when nothing is past due)
    pub adherence_rate: f64,
    /// Performance trend
    pub performance_trend: PerformanceTrend,
    /// Pace improvement in percent behind the trend (0 when not computed)
    pub improvement_percentage: f64,
    /// Weekly volume trend
    pub volume_progress: VolumeProgress,
    /// Weekly kilometers, oldest bucket first
    pub weekly_volumes: Vec<f64>,
    /// Actual duration-weighted intensity distribution
    pub intensity_distribution: IntensityDistribution,
    /// Fitness snapshot the analysis was made against
    pub current_fitness: FitnessAssessment,
    /// Completed sessions considered
    pub completed_count: usize,
    /// Planned sessions already due
    pub past_due_count: usize,
}

/// Direction of acute load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadTrend {
    /// Acute load rising
    Increasing,
    /// Acute load roughly flat
    Stable,
    /// Acute load falling
    Decreasing,
}

/// Acute:chronic workload ratio band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadRiskZone {
    /// Ratio < 0.8
    Undertraining,
    /// 0.8 <= ratio <= 1.3
    Optimal,
    /// 1.3 < ratio <= 1.5
    High,
    /// Ratio > 1.5
    VeryHigh,
}

/// Acute vs chronic training load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingLoad {
    /// Acute (~7 day) exponentially weighted load
    pub acute: f64,
    /// Chronic (~28 day) exponentially weighted load
    pub chronic: f64,
    /// Acute / chronic (0 when chronic is 0)
    pub ratio: f64,
    /// Acute load direction
    pub trend: LoadTrend,
    /// Ratio band
    pub risk_zone: LoadRiskZone,
    /// Guidance for the ratio band
    pub recommendation: String,
}
