// ABOUTME: Helper modules shared by route integration tests
// ABOUTME: Exposes the in-process axum request builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod axum_test;
