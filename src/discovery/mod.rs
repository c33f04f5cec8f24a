// ABOUTME: Discovery engine selecting a small batch of candidate athletes for a requester
// ABOUTME: Enforces the like quota, exclusions, radius conversion and the result limit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Discovery
//!
//! [`DiscoveryEngine::select`] is the only entry point. One call performs:
//!
//! 1. requester lookup and quota check (before any search is issued)
//! 2. filter normalization
//! 3. query composition: exclusion set, equality constraints, radius in meters
//! 4. a single bounded store search
//! 5. re-validation of the store output and projection
//!
//! The engine keeps no state of its own and never writes. Dropping the
//! returned future cancels the in-flight store call.
//!
//! Quota and interaction reads are only as fresh as the store makes them: a
//! stale `remaining_likes` read lets a requester see one more batch than the
//! counter allows.

/// Discovery error taxonomy
pub mod errors;
/// Raw and normalized filters
pub mod filter;
/// Outward candidate shape
pub mod projection;
/// Candidate query composition
pub mod query;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

pub use errors::DiscoveryError;
pub use filter::{
    FilterInput, FilterNormalizer, FilterSyntaxError, FilterValue, NormalizedFilter,
    QueryFilterNormalizer,
};
pub use projection::CandidateProjection;
pub use query::{CandidateQuery, SpatialPredicate};

use crate::constants::discovery::RESULT_LIMIT;
use crate::database::repositories::CandidateStore;
use crate::models::AthleteId;

/// Selects discovery candidates for athletes
#[derive(Clone)]
pub struct DiscoveryEngine {
    store: Arc<dyn CandidateStore>,
    normalizer: Arc<dyn FilterNormalizer>,
}

impl DiscoveryEngine {
    /// Create an engine over the given store and normalizer
    #[must_use]
    pub fn new(store: Arc<dyn CandidateStore>, normalizer: Arc<dyn FilterNormalizer>) -> Self {
        Self { store, normalizer }
    }

    /// Select up to [`RESULT_LIMIT`] candidates for `requester_id`.
    ///
    /// Candidates come back in store order: nearest first when a radius is
    /// given, otherwise by id.
    ///
    /// # Errors
    ///
    /// - [`DiscoveryError::NotFound`] if the requester does not exist
    /// - [`DiscoveryError::QuotaExhausted`] if it has no likes left
    /// - [`DiscoveryError::InvalidFilter`] if the filter is malformed, names an
    ///   attribute the store cannot match, or asks for a radius without a location
    /// - [`DiscoveryError::TransientStore`] if the store fails
    #[instrument(skip(self, raw_filter), fields(requester_id = %requester_id))]
    pub async fn select(
        &self,
        raw_filter: &FilterInput,
        requester_id: AthleteId,
    ) -> Result<Vec<CandidateProjection>, DiscoveryError> {
        let requester = self
            .store
            .find_by_id(requester_id)
            .await
            .map_err(DiscoveryError::from_store)?
            .ok_or_else(|| {
                warn!("Discovery requested by unknown athlete");
                DiscoveryError::NotFound { requester_id }
            })?;

        if !requester.has_remaining_likes() {
            warn!(
                remaining_likes = ?requester.remaining_likes,
                "Athlete has reached the like limit"
            );
            return Err(DiscoveryError::QuotaExhausted { requester_id });
        }

        let filter = self.normalizer.normalize(raw_filter)?;
        let query = CandidateQuery::compose(&requester, filter)?;
        debug!(
            excluded = query.excluded.len(),
            constraints = query.equality.len(),
            max_distance_meters = query.spatial.map(|s| s.max_distance_meters),
            "Composed candidate query"
        );

        let athletes = self
            .store
            .search(&query, RESULT_LIMIT)
            .await
            .map_err(DiscoveryError::from_store)?;

        let returned = athletes.len();
        let admitted: Vec<_> = athletes
            .into_iter()
            .filter(|athlete| query.admits(athlete))
            .collect();

        let rejected = returned - admitted.len();
        if rejected > 0 {
            warn!(
                returned,
                rejected, "Candidate store returned athletes outside the query"
            );
        }

        let candidates: Vec<CandidateProjection> = admitted
            .into_iter()
            .take(RESULT_LIMIT)
            .map(CandidateProjection::from)
            .collect();

        info!(candidates = candidates.len(), "Discovery completed");
        Ok(candidates)
    }
}
