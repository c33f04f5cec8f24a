// ABOUTME: Database module root: connection pool setup, migrations and managers
// ABOUTME: SQLite persistence for athletes, their interactions and candidate search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Athlete profile, interaction and candidate search operations
pub mod athletes;
/// Database error type
pub mod errors;
/// Repository traits consumed by the discovery engine
pub mod repositories;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

pub use athletes::{AthleteProfileUpdate, AthletesManager, InteractionKind, NewAthlete};
pub use errors::{DatabaseError, DatabaseResult};

/// Pool size for file-backed databases
const MAX_CONNECTIONS: u32 = 8;

/// How long a request waits for a free connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Open a connection pool, creating the database file if needed
///
/// In-memory databases get a single connection that is never recycled,
/// otherwise every connection would see its own empty database.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the database cannot be opened
pub async fn connect(database_url: &str) -> DatabaseResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let in_memory = database_url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    let pool = pool_options
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_with(options)
        .await?;
    info!(in_memory, "Connected to SQLite database");
    Ok(pool)
}

/// Apply embedded schema migrations
///
/// # Errors
///
/// Returns an error if a migration fails
pub async fn migrate(pool: &SqlitePool) -> DatabaseResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}

/// Check that the database answers queries
///
/// # Errors
///
/// Returns an error if the ping query fails
pub async fn ping(pool: &SqlitePool) -> DatabaseResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
