// ABOUTME: Route handlers for athlete registration, profile, location and interactions
// ABOUTME: Validates request bodies and delegates persistence to AthletesManager
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Athlete routes
//!
//! Registration grants the configured like quota. Recording an interaction
//! spends one like and hides the target from future discovery calls.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{json_body, parse_athlete_id};
use crate::database::{AthleteProfileUpdate, InteractionKind, NewAthlete};
use crate::errors::AppError;
use crate::models::{Athlete, AthleteId, GeoPoint, Sex};
use crate::resources::ServerResources;

/// Request body for athlete registration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAthleteRequest {
    /// Display name
    #[serde(alias = "name")]
    pub full_name: String,
    /// Login email
    pub email: String,
    /// Profile photo URL
    pub image_url: Option<String>,
    /// Date of birth (`YYYY-MM-DD`)
    #[serde(alias = "birthday")]
    pub birth_date: Option<NaiveDate>,
    /// Sex
    #[serde(alias = "gender")]
    pub sex: Option<Sex>,
    /// Spoken languages
    #[serde(default)]
    pub languages: Vec<String>,
    /// Training days
    #[serde(default, alias = "workoutDays")]
    pub training_days: Vec<String>,
    /// Training experience level
    pub training_experience: Option<String>,
    /// Gym the athlete goes to
    #[serde(alias = "gym")]
    pub gym_id: Option<String>,
    /// Latitude of the initial position
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    /// Longitude of the initial position
    #[serde(alias = "lng")]
    pub longitude: Option<f64>,
    /// Subscription grants access to personal trainers
    #[serde(default)]
    pub can_see_personal_trainers: bool,
    /// Premium subscription active
    #[serde(default)]
    pub is_premium: bool,
}

/// Request body for profile updates
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Display name
    #[serde(alias = "name")]
    pub full_name: String,
    /// Login email
    pub email: String,
    /// Date of birth (`YYYY-MM-DD`)
    #[serde(alias = "birthday")]
    pub birth_date: Option<NaiveDate>,
    /// Sex
    #[serde(alias = "gender")]
    pub sex: Option<Sex>,
    /// Spoken languages
    #[serde(default)]
    pub languages: Vec<String>,
    /// Training days
    #[serde(default, alias = "workoutDays")]
    pub training_days: Vec<String>,
    /// Training experience level
    pub training_experience: Option<String>,
    /// Gym the athlete goes to
    #[serde(alias = "gym")]
    pub gym_id: Option<String>,
}

/// Request body for location updates
#[derive(Debug, Deserialize)]
pub struct UpdateLocationRequest {
    /// Latitude in degrees
    #[serde(alias = "lat")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(alias = "lng")]
    pub longitude: f64,
}

/// Request body for recording a like or a pass
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInteractionRequest {
    /// Evaluated athlete
    pub target_id: AthleteId,
    /// Like or pass
    #[serde(default = "default_interaction_kind")]
    pub kind: InteractionKind,
}

const fn default_interaction_kind() -> InteractionKind {
    InteractionKind::Like
}

/// Response after recording an interaction
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionResponse {
    /// Evaluated athlete
    pub target_id: AthleteId,
    /// Likes left after this interaction
    pub remaining_likes: u32,
}

/// An athlete's own profile, including private fields
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteResponse {
    /// Unique identifier
    pub id: AthleteId,
    /// Display name
    pub full_name: String,
    /// Login email
    pub email: String,
    /// Profile photo URL
    pub image_url: Option<String>,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Sex
    pub sex: Option<Sex>,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Training days
    pub training_days: Vec<String>,
    /// Training experience level
    pub training_experience: Option<String>,
    /// Gym the athlete goes to
    pub gym_id: Option<String>,
    /// Current position
    pub location: Option<GeoPoint>,
    /// Likes left
    pub remaining_likes: u32,
    /// Athletes already evaluated
    pub interacted_with: Vec<AthleteId>,
    /// Subscription grants access to personal trainers
    pub can_see_personal_trainers: bool,
    /// Premium subscription active
    pub is_premium: bool,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Athlete> for AthleteResponse {
    fn from(athlete: Athlete) -> Self {
        Self {
            id: athlete.id,
            full_name: athlete.full_name,
            email: athlete.email,
            image_url: athlete.image_url,
            birth_date: athlete.birth_date,
            sex: athlete.sex,
            languages: athlete.languages,
            training_days: athlete.training_days,
            training_experience: athlete.training_experience,
            gym_id: athlete.gym_id,
            location: athlete.location,
            remaining_likes: athlete.remaining_likes.unwrap_or(0),
            interacted_with: athlete.interacted_with.into_iter().collect(),
            can_see_personal_trainers: athlete.can_see_personal_trainers,
            is_premium: athlete.is_premium,
            created_at: athlete.created_at,
            updated_at: athlete.updated_at,
        }
    }
}

/// Athlete routes handler
pub struct AthleteRoutes;

impl AthleteRoutes {
    /// Create all athlete routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/athletes", post(Self::handle_register))
            .route("/api/athletes/:id", get(Self::handle_get))
            .route("/api/athletes/:id", put(Self::handle_update_profile))
            .route("/api/athletes/:id/location", put(Self::handle_update_location))
            .route(
                "/api/athletes/:id/interactions",
                post(Self::handle_record_interaction),
            )
            .with_state(resources)
    }

    /// Handle POST /api/athletes - Register a new athlete
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<RegisterAthleteRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(body)?;

        let location = match (body.latitude, body.longitude) {
            (Some(latitude), Some(longitude)) => Some(Self::validate_location(latitude, longitude)?),
            (None, None) => None,
            _ => {
                return Err(AppError::invalid_input(
                    "latitude and longitude must be given together",
                ))
            }
        };

        let athlete = NewAthlete {
            full_name: body.full_name,
            email: body.email,
            image_url: body.image_url,
            birth_date: body.birth_date,
            sex: body.sex,
            languages: body.languages,
            training_days: body.training_days,
            training_experience: body.training_experience,
            gym_id: body.gym_id,
            location,
            remaining_likes: Some(resources.config.default_remaining_likes),
            can_see_personal_trainers: body.can_see_personal_trainers,
            is_premium: body.is_premium,
        };

        let created = resources.athletes.create(&athlete).await?;
        let response: AthleteResponse = created.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/athletes/:id - Get an athlete's own profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id = parse_athlete_id(&id)?;
        let athlete = resources
            .athletes
            .get(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Athlete {id}")))?;

        let response: AthleteResponse = athlete.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/athletes/:id - Replace editable profile fields
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        body: Result<Json<UpdateProfileRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = parse_athlete_id(&id)?;
        let body = json_body(body)?;

        let update = AthleteProfileUpdate {
            full_name: body.full_name,
            email: body.email,
            birth_date: body.birth_date,
            sex: body.sex,
            languages: body.languages,
            training_days: body.training_days,
            training_experience: body.training_experience,
            gym_id: body.gym_id,
        };

        let athlete = resources.athletes.update_profile(id, &update).await?;
        let response: AthleteResponse = athlete.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/athletes/:id/location - Set the current position
    async fn handle_update_location(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        body: Result<Json<UpdateLocationRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = parse_athlete_id(&id)?;
        let body = json_body(body)?;
        let location = Self::validate_location(body.latitude, body.longitude)?;

        let athlete = resources.athletes.update_location(id, location).await?;
        let response: AthleteResponse = athlete.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/athletes/:id/interactions - Like or pass on another athlete
    async fn handle_record_interaction(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        body: Result<Json<RecordInteractionRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id = parse_athlete_id(&id)?;
        let body = json_body(body)?;

        let remaining_likes = resources
            .athletes
            .record_interaction(id, body.target_id, body.kind)
            .await?;

        let response = InteractionResponse {
            target_id: body.target_id,
            remaining_likes,
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    fn validate_location(latitude: f64, longitude: f64) -> Result<GeoPoint, AppError> {
        GeoPoint::new(latitude, longitude).map_err(|e| AppError::invalid_input(e.to_string()))
    }
}
