// ABOUTME: Domain model re-exports for athletes and geographic points
// ABOUTME: Shared by the discovery engine, the store and the HTTP layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Athlete entity, identifier and quota logic
pub mod athlete;
/// Geographic points and great-circle distance
pub mod geo;

pub use athlete::{Athlete, AthleteId, Sex};
pub use geo::{BoundingBox, GeoError, GeoPoint, EARTH_RADIUS_METERS};
