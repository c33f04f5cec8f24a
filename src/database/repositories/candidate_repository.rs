// ABOUTME: SQLite implementation of the discovery candidate store
// ABOUTME: Delegates athlete lookups and filtered searches to AthletesManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::CandidateStore;
use crate::database::{AthletesManager, DatabaseError};
use crate::discovery::CandidateQuery;
use crate::models::{Athlete, AthleteId};
use async_trait::async_trait;

/// SQLite implementation of `CandidateStore`
#[derive(Clone)]
pub struct CandidateRepositoryImpl {
    athletes: AthletesManager,
}

impl CandidateRepositoryImpl {
    /// Create a new `CandidateStore` over the given athletes manager
    #[must_use]
    pub const fn new(athletes: AthletesManager) -> Self {
        Self { athletes }
    }
}

#[async_trait]
impl CandidateStore for CandidateRepositoryImpl {
    async fn find_by_id(&self, id: AthleteId) -> Result<Option<Athlete>, DatabaseError> {
        self.athletes.get(id).await
    }

    async fn search(
        &self,
        query: &CandidateQuery,
        limit: usize,
    ) -> Result<Vec<Athlete>, DatabaseError> {
        self.athletes.search_candidates(query, limit).await
    }
}
