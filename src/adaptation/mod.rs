// ABOUTME: Plan adaptation from athlete feedback: progress, risk, modification rules and application
// ABOUTME: PlanAdaptationEngine runs the pipeline; each stage is usable on its own
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Plan Adaptation
//!
//! ```text
//! completed workouts ─┬─> ProgressAnalyzer ──> ProgressSnapshot ─┐
//! recovery metrics ───┴─> RiskAssessor ──────> RiskAssessment ───┤
//!                                                                ├─> ModificationPlanner ────────────┐
//!                                                                └─> MethodologyModificationOverlay ─┤
//!                                                  plan ──> ModificationApplier <── merged ──────────┘
//! ```
//!
//! The applier never touches workouts dated on or before the evaluation time and
//! always produces a new revision that points back to its parent.

mod applier;
mod engine;
mod overlay;
mod planner;
mod progress;
mod risk;

pub use applier::ModificationApplier;
pub use engine::{AdaptationOutcome, AdaptationRequest, PlanAdaptationEngine};
pub use overlay::{merge_modifications, MethodologyModificationOverlay};
pub use planner::ModificationPlanner;
pub use progress::ProgressAnalyzer;
pub use risk::{
    FatigueAssessment, FatigueLevel, InjuryRisk, InjuryRiskComponents, RiskAssessment,
    RiskAssessor, RiskLevel,
};
