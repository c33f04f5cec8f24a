// ABOUTME: Error taxonomy for discovery: not found, quota, invalid filter, store failure
// ABOUTME: Converts store and normalizer failures and maps everything onto AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use super::filter::FilterSyntaxError;
use crate::database::DatabaseError;
use crate::errors::AppError;
use crate::models::AthleteId;

/// Why a discovery call produced no candidates
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The requesting athlete does not exist
    #[error("athlete {requester_id} not found")]
    NotFound {
        /// Requested athlete
        requester_id: AthleteId,
    },

    /// The requester has no likes left
    #[error("athlete {requester_id} has no remaining likes")]
    QuotaExhausted {
        /// Requesting athlete
        requester_id: AthleteId,
    },

    /// The filter is malformed or cannot be applied
    #[error("invalid filter `{key}`: {reason}")]
    InvalidFilter {
        /// Offending filter key
        key: String,
        /// What is wrong with it
        reason: String,
    },

    /// The candidate store failed; never retried here
    #[error("candidate store failure: {source}")]
    TransientStore {
        /// Underlying store error
        #[source]
        source: DatabaseError,
    },
}

impl DiscoveryError {
    /// Classify a store failure: filters the store cannot evaluate are the
    /// caller's fault, everything else propagates as a store error
    #[must_use]
    pub fn from_store(error: DatabaseError) -> Self {
        match error {
            DatabaseError::UnsupportedFilter { key, reason } => Self::InvalidFilter { key, reason },
            source => Self::TransientStore { source },
        }
    }
}

impl From<FilterSyntaxError> for DiscoveryError {
    fn from(error: FilterSyntaxError) -> Self {
        Self::InvalidFilter {
            key: error.key,
            reason: error.reason,
        }
    }
}

impl From<DiscoveryError> for AppError {
    fn from(error: DiscoveryError) -> Self {
        match &error {
            DiscoveryError::NotFound { .. } => Self::not_found(error.to_string()),
            DiscoveryError::QuotaExhausted { .. } => Self::quota_exceeded(error.to_string()),
            DiscoveryError::InvalidFilter { .. } => Self::invalid_filter(error.to_string()),
            DiscoveryError::TransientStore { .. } => Self::unavailable(error.to_string()),
        }
    }
}
