// ABOUTME: Repository trait definitions for database abstraction
// ABOUTME: Discovery reads athletes through the narrow CandidateStore seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;

use crate::database::DatabaseError;
use crate::discovery::CandidateQuery;
use crate::models::{Athlete, AthleteId};

// Repository implementations
/// Discovery candidate repository implementation
pub mod candidate_repository;

// Re-export implementations
pub use candidate_repository::CandidateRepositoryImpl;

/// Read access to athletes for discovery
///
/// Implementations must honor every exclusion, equality and radius predicate
/// of the query, return at most `limit` athletes, and order them nearest first
/// when a radius is present (by id otherwise).
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Get athlete by ID
    async fn find_by_id(&self, id: AthleteId) -> Result<Option<Athlete>, DatabaseError>;

    /// Run one bounded candidate search
    async fn search(
        &self,
        query: &CandidateQuery,
        limit: usize,
    ) -> Result<Vec<Athlete>, DatabaseError>;
}
