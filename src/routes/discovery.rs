// ABOUTME: Route handlers for athlete discovery
// ABOUTME: Accepts filters from the query string or a JSON object and returns candidate projections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Discovery routes
//!
//! `GET /api/athletes/:id/discovery?gym=...&distanceKm=5` and the equivalent
//! `POST` with a JSON object body both run one discovery call for athlete `id`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::parse_athlete_id;
use crate::discovery::{CandidateProjection, FilterInput};
use crate::errors::AppError;
use crate::resources::ServerResources;

/// Discovery result
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    /// Candidates, nearest first when a radius was given
    pub candidates: Vec<CandidateProjection>,
}

/// Discovery routes handler
pub struct DiscoveryRoutes;

impl DiscoveryRoutes {
    /// Create all discovery routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/athletes/:id/discovery",
                get(Self::handle_discover_query).post(Self::handle_discover_body),
            )
            .with_state(resources)
    }

    /// Handle GET /api/athletes/:id/discovery - filter from the query string
    async fn handle_discover_query(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Response, AppError> {
        let filter: FilterInput = params
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Self::discover(&resources, &id, &filter).await
    }

    /// Handle POST /api/athletes/:id/discovery - filter as a JSON object
    async fn handle_discover_body(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        body: Result<Json<FilterInput>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(filter) = body.map_err(|rejection| {
            AppError::invalid_filter(format!(
                "filter must be a JSON object: {}",
                rejection.body_text()
            ))
        })?;
        Self::discover(&resources, &id, &filter).await
    }

    async fn discover(
        resources: &ServerResources,
        id: &str,
        filter: &FilterInput,
    ) -> Result<Response, AppError> {
        let requester_id = parse_athlete_id(id)?;
        let candidates = resources.discovery.select(filter, requester_id).await?;

        Ok((StatusCode::OK, Json(DiscoveryResponse { candidates })).into_response())
    }
}
