// ABOUTME: Re-exports the athlete domain models from spotter-core
// ABOUTME: Single import path for models across the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use spotter_core::models::{
    Athlete, AthleteId, BoundingBox, GeoError, GeoPoint, Sex, EARTH_RADIUS_METERS,
};
