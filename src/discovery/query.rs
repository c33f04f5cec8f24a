// ABOUTME: Candidate query composed from the requester and a normalized filter
// ABOUTME: Holds the exclusion set, equality constraints and the optional radius predicate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::{BTreeMap, BTreeSet};

use super::errors::DiscoveryError;
use super::filter::{FilterValue, NormalizedFilter, DISTANCE_KEYS};
use crate::constants::discovery::METERS_PER_KILOMETER;
use crate::models::{Athlete, AthleteId, GeoPoint};

/// Candidates must lie within `max_distance_meters` of `origin`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialPredicate {
    /// Requester location
    pub origin: GeoPoint,
    /// Search radius in meters
    pub max_distance_meters: f64,
}

impl SpatialPredicate {
    /// Build a predicate from a radius given in kilometers
    #[must_use]
    pub fn from_kilometers(origin: GeoPoint, distance_km: f64) -> Self {
        Self {
            origin,
            max_distance_meters: distance_km * METERS_PER_KILOMETER,
        }
    }

    /// Distance from the origin if `point` is inside the radius
    #[must_use]
    pub fn distance_to(&self, point: &GeoPoint) -> Option<f64> {
        let distance = self.origin.distance_meters(point);
        (distance <= self.max_distance_meters).then_some(distance)
    }
}

/// Everything the store needs for one bounded candidate search
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    /// Ids that must not be returned (requester and everyone it evaluated)
    pub excluded: BTreeSet<AthleteId>,
    /// Attribute equality constraints, verbatim from the filter
    pub equality: BTreeMap<String, FilterValue>,
    /// Optional radius around the requester
    pub spatial: Option<SpatialPredicate>,
}

impl CandidateQuery {
    /// Compose the query for `requester`
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidFilter`] if a radius is requested but
    /// the requester never shared a location
    pub fn compose(requester: &Athlete, filter: NormalizedFilter) -> Result<Self, DiscoveryError> {
        let spatial = match filter.distance_km {
            Some(distance_km) => {
                let origin = requester.location.ok_or_else(|| DiscoveryError::InvalidFilter {
                    key: DISTANCE_KEYS[0].to_owned(),
                    reason: format!(
                        "athlete {} has no location to measure distance from",
                        requester.id
                    ),
                })?;
                Some(SpatialPredicate::from_kilometers(origin, distance_km))
            }
            None => None,
        };

        Ok(Self {
            excluded: requester.discovery_exclusions(),
            equality: filter.equality,
            spatial,
        })
    }

    /// Whether `athlete` satisfies the exclusion and radius predicates.
    ///
    /// Equality constraints are not re-checked: their meaning belongs to the store.
    #[must_use]
    pub fn admits(&self, athlete: &Athlete) -> bool {
        if self.excluded.contains(&athlete.id) {
            return false;
        }
        match (&self.spatial, &athlete.location) {
            (None, _) => true,
            (Some(spatial), Some(location)) => spatial.distance_to(location).is_some(),
            (Some(_), None) => false,
        }
    }
}
