// ABOUTME: Recovery scoring from training stress balance, sleep and HRV signals
// ABOUTME: Produces the 0-100 recovery score consumed by risk assessment and adaptation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::{InjuryStatus, RecoveryMetrics};

/// TSB below which the athlete is highly fatigued
const HIGHLY_FATIGUED_TSB: f64 = -15.0;
/// TSB below which the athlete is fatigued
const FATIGUED_TSB: f64 = -10.0;
/// Lower bound of the fresh TSB band
const FRESH_TSB_MIN: f64 = 5.0;
/// Upper bound of the fresh TSB band
const FRESH_TSB_MAX: f64 = 15.0;
/// TSB above which fitness is being lost
const DETRAINING_TSB: f64 = 25.0;

/// Weight of the TSB score when sleep and HRV are both present
const TSB_WEIGHT: f64 = 0.4;
/// Weight of the sleep score when sleep and HRV are both present
const SLEEP_WEIGHT: f64 = 0.35;
/// Weight of the HRV score when sleep and HRV are both present
const HRV_WEIGHT: f64 = 0.25;

/// Score training stress balance (chronic - acute) on a 0-100 scale
///
/// Fresh (5 to 15) scores 100; fatigue and detraining both reduce the score.
#[must_use]
pub fn score_tsb(tsb: f64) -> f64 {
    let score = if (FRESH_TSB_MIN..=FRESH_TSB_MAX).contains(&tsb) {
        100.0
    } else if tsb > DETRAINING_TSB {
        100.0 - ((tsb - DETRAINING_TSB) * 2.0).min(30.0)
    } else if tsb > FRESH_TSB_MAX {
        ((tsb - FRESH_TSB_MAX) / (DETRAINING_TSB - FRESH_TSB_MAX)).mul_add(-10.0, 100.0)
    } else if tsb >= 0.0 {
        (tsb / FRESH_TSB_MIN).mul_add(15.0, 85.0)
    } else if tsb >= FATIGUED_TSB {
        ((tsb - FATIGUED_TSB) / FATIGUED_TSB.abs()).mul_add(25.0, 60.0)
    } else if tsb >= HIGHLY_FATIGUED_TSB {
        ((tsb - HIGHLY_FATIGUED_TSB) / (FATIGUED_TSB - HIGHLY_FATIGUED_TSB)).mul_add(30.0, 30.0)
    } else {
        ((tsb.abs() - HIGHLY_FATIGUED_TSB.abs()) / HIGHLY_FATIGUED_TSB.abs()).mul_add(-30.0, 30.0)
    };
    score.clamp(0.0, 100.0)
}

/// Score an HRV ratio against baseline (1.0 = baseline scores 80)
#[must_use]
pub fn score_hrv(hrv_ratio: f64) -> f64 {
    (hrv_ratio - 1.0).mul_add(200.0, 80.0).clamp(0.0, 100.0)
}

/// Blend available recovery signals into recovery metrics
///
/// Missing sleep or HRV signals are left out and the remaining weights renormalized.
#[must_use]
pub fn recovery_from_signals(
    acute_load: f64,
    chronic_load: f64,
    sleep_quality: Option<f64>,
    hrv_ratio: Option<f64>,
    injury_status: InjuryStatus,
) -> RecoveryMetrics {
    let mut weighted = score_tsb(chronic_load - acute_load) * TSB_WEIGHT;
    let mut weights = TSB_WEIGHT;
    if let Some(sleep) = sleep_quality {
        weighted += sleep.clamp(0.0, 100.0) * SLEEP_WEIGHT;
        weights += SLEEP_WEIGHT;
    }
    if let Some(hrv) = hrv_ratio {
        weighted += score_hrv(hrv) * HRV_WEIGHT;
        weights += HRV_WEIGHT;
    }

    RecoveryMetrics {
        recovery_score: (weighted / weights).clamp(0.0, 100.0),
        injury_status,
        sleep_quality,
        hrv_ratio,
        soreness: None,
    }
}
