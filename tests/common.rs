// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, server resources and athlete builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `spotter_server`

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use sqlx::SqlitePool;

use spotter_server::config::environment::ServerConfig;
use spotter_server::database::{self, AthletesManager, NewAthlete};
use spotter_server::models::{Athlete, AthleteId, GeoPoint};
use spotter_server::resources::ServerResources;

/// Open a migrated in-memory database
pub async fn create_test_pool() -> SqlitePool {
    let pool = database::connect("sqlite::memory:").await.unwrap();
    database::migrate(&pool).await.unwrap();
    pool
}

/// Server resources over a fresh in-memory database
pub async fn create_test_server_resources() -> Arc<ServerResources> {
    let config = ServerConfig {
        database_url: "sqlite::memory:".to_owned(),
        ..ServerConfig::default()
    };
    Arc::new(ServerResources::new(create_test_pool().await, config))
}

/// Registration data with a unique email derived from `name`
pub fn new_athlete(name: &str) -> NewAthlete {
    NewAthlete {
        full_name: name.to_owned(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        remaining_likes: Some(5),
        ..NewAthlete::default()
    }
}

/// Register an athlete, optionally at a position
pub async fn create_athlete(
    athletes: &AthletesManager,
    name: &str,
    location: Option<(f64, f64)>,
) -> Athlete {
    let mut athlete = new_athlete(name);
    athlete.location = location.map(|(latitude, longitude)| GeoPoint::new(latitude, longitude).unwrap());
    athletes.create(&athlete).await.unwrap()
}

/// In-memory athlete for engine tests that bypass the database
pub fn athlete(remaining_likes: Option<u32>) -> Athlete {
    let now = Utc::now();
    let id = AthleteId::new();
    Athlete {
        id,
        full_name: format!("Athlete {id}"),
        email: format!("{id}@example.com"),
        image_url: None,
        birth_date: None,
        sex: None,
        languages: Vec::new(),
        training_days: Vec::new(),
        training_experience: None,
        gym_id: None,
        location: None,
        remaining_likes,
        interacted_with: BTreeSet::new(),
        can_see_personal_trainers: false,
        is_premium: false,
        created_at: now,
        updated_at: now,
    }
}

/// In-memory athlete placed at a position
pub fn athlete_at(latitude: f64, longitude: f64) -> Athlete {
    Athlete {
        location: Some(GeoPoint::new(latitude, longitude).unwrap()),
        ..athlete(Some(5))
    }
}
