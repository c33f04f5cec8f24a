// ABOUTME: Re-exports the unified error types from spotter-core
// ABOUTME: Lets server modules write crate::errors::AppError like the rest of the codebase
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use spotter_core::errors::{AppError, AppResult, ErrorBody, ErrorCode, ErrorResponse};
