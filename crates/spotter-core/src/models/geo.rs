// ABOUTME: Geographic point type with coordinate validation and haversine distance
// ABOUTME: Also derives the lat/lon bounding box used to prefilter radius searches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius used for great-circle distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Meters covered by one degree of latitude
const METERS_PER_DEGREE_LATITUDE: f64 = 111_000.0;

/// Stored coordinates keep 6 decimal places (~11 cm)
const COORDINATE_SCALE: f64 = 1_000_000.0;

/// Coordinate validation failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude outside [-90, 90] or not finite
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    /// Longitude outside [-180, 180] or not finite
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Validate coordinates and round them to 6 decimal places
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is out of range or not finite
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude: round_coordinate(latitude),
            longitude: round_coordinate(longitude),
        })
    }

    /// Great-circle distance to `other` in meters (haversine)
    #[must_use]
    pub fn distance_meters(&self, other: &Self) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = (other.latitude - self.latitude).to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();
        EARTH_RADIUS_METERS * c
    }

    /// Bounding box that contains every point within `radius_meters`
    #[must_use]
    pub fn bounding_box(&self, radius_meters: f64) -> BoundingBox {
        // Slightly widened so the exact haversine pass never loses boundary points
        let lat_change = radius_meters / METERS_PER_DEGREE_LATITUDE * 1.01;
        let min_latitude = (self.latitude - lat_change).max(-90.0);
        let max_latitude = (self.latitude + lat_change).min(90.0);

        let cos_lat = self
            .latitude
            .abs()
            .max(min_latitude.abs())
            .max(max_latitude.abs())
            .to_radians()
            .cos();

        let longitude_range = if cos_lat < 1e-6 {
            None
        } else {
            let lon_change = lat_change / cos_lat;
            let min_longitude = self.longitude - lon_change;
            let max_longitude = self.longitude + lon_change;
            // Boxes crossing the antimeridian fall back to latitude-only bounds
            if min_longitude < -180.0 || max_longitude > 180.0 {
                None
            } else {
                Some((min_longitude, max_longitude))
            }
        };

        BoundingBox {
            min_latitude,
            max_latitude,
            longitude_range,
        }
    }
}

/// Latitude/longitude window used as a coarse index prefilter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern bound
    pub min_latitude: f64,
    /// Northern bound
    pub max_latitude: f64,
    /// Western and eastern bounds; `None` when the box spans all longitudes
    pub longitude_range: Option<(f64, f64)>,
}

fn round_coordinate(value: f64) -> f64 {
    (value * COORDINATE_SCALE).round() / COORDINATE_SCALE
}
