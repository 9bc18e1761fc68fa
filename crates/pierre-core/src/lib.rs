// ABOUTME: Core types and constants for the Pierre training planner
// ABOUTME: Foundation crate with error handling, domain constants, and the plan data model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Core
//!
//! Foundation crate providing shared types and constants for the Pierre training
//! planner. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **constants**: Periodization, load-management, fatigue and rule-table constants
//! - **models**: Training plans, workouts, fitness snapshots and modifications

/// Unified error handling system with standard error codes
pub mod errors;

/// Domain constants organized by concern
pub mod constants;

/// Core data models (TrainingPlan, PlannedWorkout, FitnessAssessment, etc.)
pub mod models;
