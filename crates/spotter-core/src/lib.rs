// ABOUTME: Core crate shared by the Spotter server and its tooling
// ABOUTME: Hosts the athlete domain models and the unified application error type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Spotter Core
//!
//! Domain types that every layer of the server agrees on:
//!
//! - [`models`]: athletes, identifiers and geographic points
//! - [`errors`]: [`errors::AppError`] with stable [`errors::ErrorCode`]s and
//!   their HTTP mapping (behind the `http-response` feature)

/// Unified error handling with standard error codes
pub mod errors;

/// Athlete domain models
pub mod models;
