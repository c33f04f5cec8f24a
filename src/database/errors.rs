// ABOUTME: Database error type shared by the athlete store and its repositories
// ABOUTME: Separates unavailable backends from failed queries and rejected filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

use crate::errors::AppError;

/// Database operation failures
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Entity lookup failed
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity
        entity_type: &'static str,
        /// Id that was looked up
        entity_id: String,
    },

    /// Unique constraint hit
    #[error("{entity_type} already exists: {context}")]
    AlreadyExists {
        /// Kind of entity
        entity_type: &'static str,
        /// Conflicting value
        context: String,
    },

    /// A filter key or value the store cannot evaluate
    #[error("unsupported filter `{key}`: {reason}")]
    UnsupportedFilter {
        /// Offending key
        key: String,
        /// Why it cannot be evaluated
        reason: String,
    },

    /// The athlete has no likes left to spend
    #[error("athlete {athlete_id} has no remaining likes")]
    QuotaExhausted {
        /// Athlete id
        athlete_id: String,
    },

    /// Write rejected by a domain rule
    #[error("invalid data: {context}")]
    InvalidData {
        /// What was rejected
        context: String,
    },

    /// Connection pool exhausted, closed, or I/O failure
    #[error("database unavailable: {context}")]
    Unavailable {
        /// Driver message
        context: String,
    },

    /// Migration failed
    #[error("migration failed: {context}")]
    Migration {
        /// Driver message
        context: String,
    },

    /// Query failed
    #[error("query failed: {context}")]
    QueryError {
        /// Driver message
        context: String,
    },
}

/// Result alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

impl DatabaseError {
    /// Whether retrying later may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Unavailable {
                    context: error.to_string(),
                }
            }
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        Self::Migration {
            context: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for DatabaseError {
    fn from(error: serde_json::Error) -> Self {
        Self::InvalidData {
            context: format!("JSON column could not be processed: {error}"),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        match &error {
            DatabaseError::NotFound { .. } => Self::not_found(error.to_string()),
            DatabaseError::AlreadyExists { .. } => Self::already_exists(error.to_string()),
            DatabaseError::UnsupportedFilter { .. } => Self::invalid_filter(error.to_string()),
            DatabaseError::QuotaExhausted { .. } => Self::quota_exceeded(error.to_string()),
            DatabaseError::InvalidData { .. } => Self::invalid_input(error.to_string()),
            DatabaseError::Unavailable { .. } => Self::unavailable(error.to_string()),
            DatabaseError::Migration { .. } | DatabaseError::QueryError { .. } => {
                Self::database(error.to_string())
            }
        }
    }
}
