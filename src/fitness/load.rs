// ABOUTME: Exponentially weighted training load over a zero-filled daily TSS series
// ABOUTME: Shared by the fitness model and the risk assessor for acute and chronic load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// TSS data point with timestamp
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TssPoint {
    /// Date of the session
    pub date: DateTime<Utc>,
    /// Training Stress Score of the session
    pub tss: f64,
}

/// Daily TSS totals for the `days` days ending on `end` (oldest first, zero-filled)
///
/// Points after `end` or before the window are ignored.
#[must_use]
pub fn daily_series(points: &[TssPoint], end: DateTime<Utc>, days: i64) -> Vec<f64> {
    if days <= 0 {
        return Vec::new();
    }
    let end_day = end.date_naive();
    let first_day = end_day - Duration::days(days - 1);

    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();
    for point in points {
        let day = point.date.date_naive();
        if day >= first_day && day <= end_day {
            *by_day.entry(day).or_insert(0.0) += point.tss.max(0.0);
        }
    }

    (0..days)
        .map(|offset| {
            by_day
                .get(&(first_day + Duration::days(offset)))
                .copied()
                .unwrap_or(0.0)
        })
        .collect()
}

/// Exponential moving average over a daily series
///
/// Formula: `α = 2/(N+1)`, `EMA_t = α x TSS_t + (1-α) x EMA_{t-1}`, starting from zero
#[must_use]
pub fn ewma(series: &[f64], window_days: i64) -> f64 {
    if window_days <= 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let alpha = 2.0 / (window_days as f64 + 1.0);
    series
        .iter()
        .fold(0.0, |ema, daily| daily.mul_add(alpha, ema * (1.0 - alpha)))
}

/// Acute and chronic load at `now`
///
/// The series spans twice the chronic window so the chronic average is warmed up.
#[must_use]
pub fn acute_chronic(
    points: &[TssPoint],
    now: DateTime<Utc>,
    acute_window_days: i64,
    chronic_window_days: i64,
) -> (f64, f64) {
    let series = daily_series(points, now, chronic_window_days.max(acute_window_days) * 2);
    (
        ewma(&series, acute_window_days),
        ewma(&series, chronic_window_days),
    )
}
