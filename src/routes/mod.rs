// ABOUTME: Route module organization for Spotter HTTP endpoints
// ABOUTME: Merges health, athlete and discovery routes behind the request tracing layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Spotter server
//!
//! Each domain module contains only route definitions and thin handler
//! functions that delegate to the athletes manager or the discovery engine.
//! The acting athlete is taken from the path; there is no authentication.

/// Athlete registration and profile routes
pub mod athletes;
/// Candidate discovery routes
pub mod discovery;
/// Health check routes
pub mod health;

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

pub use athletes::AthleteRoutes;
pub use discovery::DiscoveryRoutes;
pub use health::HealthRoutes;

use crate::errors::AppError;
use crate::models::AthleteId;
use crate::resources::ServerResources;

/// Build the complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AthleteRoutes::routes(resources.clone()))
        .merge(DiscoveryRoutes::routes(resources))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}

/// Parse an athlete id path segment
pub(crate) fn parse_athlete_id(raw: &str) -> Result<AthleteId, AppError> {
    raw.parse()
        .map_err(|_| AppError::invalid_input(format!("'{raw}' is not a valid athlete id")))
}

/// Unwrap a JSON body, reporting malformed input in the standard error shape
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}
