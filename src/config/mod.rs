// ABOUTME: Configuration module root
// ABOUTME: Environment-only configuration; no config files are read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Server configuration loaded from environment variables
pub mod environment;
