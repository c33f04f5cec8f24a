// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Builds the athletes manager and discovery engine once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::environment::ServerConfig;
use crate::database::repositories::CandidateRepositoryImpl;
use crate::database::AthletesManager;
use crate::discovery::{DiscoveryEngine, QueryFilterNormalizer};
use crate::health::HealthChecker;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Athlete persistence
    pub athletes: AthletesManager,
    /// Candidate selection
    pub discovery: Arc<DiscoveryEngine>,
    /// Health reporting
    pub health: HealthChecker,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources over an open, migrated pool
    #[must_use]
    pub fn new(pool: SqlitePool, config: ServerConfig) -> Self {
        let health = HealthChecker::new(pool.clone());
        let athletes = AthletesManager::new(pool);
        let discovery = DiscoveryEngine::new(
            Arc::new(CandidateRepositoryImpl::new(athletes.clone())),
            Arc::new(QueryFilterNormalizer),
        );

        Self {
            athletes,
            discovery: Arc::new(discovery),
            health,
            config: Arc::new(config),
        }
    }
}
