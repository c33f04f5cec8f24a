// ABOUTME: Integration tests for the athlete and discovery route handlers
// ABOUTME: Tests registration, discovery flows, interactions and HTTP error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::create_test_server_resources;
use helpers::axum_test::AxumTestRequest;
use spotter_server::errors::{ErrorCode, ErrorResponse};
use spotter_server::routes::athletes::{AthleteResponse, InteractionResponse};
use spotter_server::routes::discovery::DiscoveryResponse;
use spotter_server::routes;

// ============================================================================
// Test Helpers
// ============================================================================

async fn setup_router() -> axum::Router {
    routes::router(create_test_server_resources().await)
}

async fn register(router: &axum::Router, body: Value) -> AthleteResponse {
    let response = AxumTestRequest::post("/api/athletes")
        .json(&body)
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED, "{}", response.text());
    response.json()
}

async fn register_named(router: &axum::Router, name: &str, location: Option<(f64, f64)>) -> AthleteResponse {
    let mut body = json!({
        "fullName": name,
        "email": format!("{}@example.com", name.to_lowercase()),
    });
    if let Some((lat, lng)) = location {
        body["lat"] = json!(lat);
        body["lng"] = json!(lng);
    }
    register(router, body).await
}

fn error_code(response: &helpers::axum_test::AxumTestResponse) -> ErrorCode {
    let body: ErrorResponse = response.json();
    body.error.code
}

// ============================================================================
// Athlete Routes
// ============================================================================

#[tokio::test]
async fn test_register_athlete() {
    let router = setup_router().await;

    let athlete = register(
        &router,
        json!({
            "fullName": "Ada Runner",
            "email": "ada@example.com",
            "birthday": "1994-05-17",
            "gender": "female",
            "languages": ["en"],
            "workoutDays": ["monday", "thursday"],
            "gym": "gym-1",
            "latitude": 41.0,
            "longitude": 29.0
        }),
    )
    .await;

    assert_eq!(athlete.full_name, "Ada Runner");
    assert_eq!(athlete.gym_id.as_deref(), Some("gym-1"));
    assert_eq!(athlete.training_days, vec!["monday", "thursday"]);
    assert_eq!(athlete.remaining_likes, 10);
    assert!(athlete.location.is_some());

    let response = AxumTestRequest::get(&format!("/api/athletes/{}", athlete.id))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let fetched: AthleteResponse = response.json();
    assert_eq!(fetched.id, athlete.id);
    assert_eq!(fetched.email, "ada@example.com");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let router = setup_router().await;
    register_named(&router, "Twin", None).await;

    let response = AxumTestRequest::post("/api/athletes")
        .json(&json!({"fullName": "Twin Again", "email": "twin@example.com"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    assert_eq!(error_code(&response), ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let router = setup_router().await;

    for body in [
        json!({"fullName": "Half", "email": "half@example.com", "latitude": 41.0}),
        json!({"fullName": "Pole", "email": "pole@example.com", "latitude": 95.0, "longitude": 0.0}),
        json!({"fullName": "", "email": "empty@example.com"}),
        json!({"email": "nameless@example.com"}),
    ] {
        let response = AxumTestRequest::post("/api/athletes")
            .json(&body)
            .send(router.clone())
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(error_code(&response), ErrorCode::InvalidInput);
    }
}

#[tokio::test]
async fn test_get_unknown_and_malformed_ids() {
    let router = setup_router().await;

    let response = AxumTestRequest::get(&format!("/api/athletes/{}", uuid::Uuid::new_v4()))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = AxumTestRequest::get("/api/athletes/not-a-uuid")
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_and_location() {
    let router = setup_router().await;
    let athlete = register_named(&router, "Mover", None).await;

    let response = AxumTestRequest::put(&format!("/api/athletes/{}", athlete.id))
        .json(&json!({
            "fullName": "Mover Renamed",
            "email": "mover@example.com",
            "trainingExperience": "beginner"
        }))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: AthleteResponse = response.json();
    assert_eq!(updated.full_name, "Mover Renamed");
    assert_eq!(updated.training_experience.as_deref(), Some("beginner"));

    let response = AxumTestRequest::put(&format!("/api/athletes/{}/location", athlete.id))
        .json(&json!({"lat": 41.0082, "lng": 28.9784}))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let moved: AthleteResponse = response.json();
    let location = moved.location.unwrap();
    assert!((location.latitude - 41.0082).abs() < 1e-9);

    let response = AxumTestRequest::put(&format!("/api/athletes/{}/location", athlete.id))
        .json(&json!({"latitude": 0.0, "longitude": 200.0}))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Discovery Routes
// ============================================================================

#[tokio::test]
async fn test_discovery_returns_two_candidates() {
    let router = setup_router().await;
    let requester = register_named(&router, "Seeker", None).await;
    for name in ["Alpha", "Bravo", "Charlie"] {
        register_named(&router, name, None).await;
    }

    let response = AxumTestRequest::get(&format!("/api/athletes/{}/discovery", requester.id))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: DiscoveryResponse = response.json();
    assert_eq!(body.candidates.len(), 2);
    assert!(body.candidates.iter().all(|c| c.id != requester.id));

    let raw: Value = response.json();
    let first = raw["candidates"][0].as_object().unwrap();
    assert!(first.contains_key("displayName"));
    assert!(!first.contains_key("email"));
    assert!(!first.contains_key("remainingLikes"));
}

#[tokio::test]
async fn test_discovery_with_query_string_radius() {
    let router = setup_router().await;
    let requester = register_named(&router, "Center", Some((41.0, 29.0))).await;
    let near = register_named(&router, "Near", Some((41.01, 29.0))).await;
    register_named(&router, "Far", Some((41.5, 29.0))).await;
    register_named(&router, "Nowhere", None).await;

    let response = AxumTestRequest::get(&format!(
        "/api/athletes/{}/discovery?distanceKm=10",
        requester.id
    ))
    .send(router)
    .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: DiscoveryResponse = response.json();
    let ids: Vec<_> = body.candidates.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![near.id]);
}

#[tokio::test]
async fn test_discovery_with_json_filter() {
    let router = setup_router().await;
    let requester = register_named(&router, "Seeker", None).await;
    let member = register(
        &router,
        json!({"fullName": "Member", "email": "member@example.com", "gymId": "gym-3"}),
    )
    .await;
    register(
        &router,
        json!({"fullName": "Outsider", "email": "outsider@example.com", "gymId": "gym-4"}),
    )
    .await;

    let response = AxumTestRequest::post(&format!("/api/athletes/{}/discovery", requester.id))
        .json(&json!({"gym": "gym-3"}))
        .send(router)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: DiscoveryResponse = response.json();
    assert_eq!(body.candidates.len(), 1);
    assert_eq!(body.candidates[0].id, member.id);
    assert_eq!(body.candidates[0].gym.as_deref(), Some("gym-3"));
}

#[tokio::test]
async fn test_discovery_error_mapping() {
    let router = setup_router().await;
    let located = register_named(&router, "Located", Some((41.0, 29.0))).await;
    let unlocated = register_named(&router, "Unlocated", None).await;

    let cases = [
        (
            format!("/api/athletes/{}/discovery", uuid::Uuid::new_v4()),
            StatusCode::NOT_FOUND,
            ErrorCode::ResourceNotFound,
        ),
        (
            format!("/api/athletes/{}/discovery?distanceKm=5", unlocated.id),
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidFilter,
        ),
        (
            format!("/api/athletes/{}/discovery?distanceKm=-1", located.id),
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidFilter,
        ),
        (
            format!("/api/athletes/{}/discovery?favouriteColour=red", located.id),
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidFilter,
        ),
    ];

    for (uri, status, code) in cases {
        let response = AxumTestRequest::get(&uri).send(router.clone()).await;
        assert_eq!(response.status_code(), status, "{uri}: {}", response.text());
        assert_eq!(error_code(&response), code, "{uri}");
    }

    let response = AxumTestRequest::post(&format!("/api/athletes/{}/discovery", located.id))
        .json(&json!(["not", "an", "object"]))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response), ErrorCode::InvalidFilter);
}

#[tokio::test]
async fn test_interactions_hide_targets_and_exhaust_quota() {
    let router = setup_router().await;
    let requester = register(
        &router,
        json!({"fullName": "Picky", "email": "picky@example.com"}),
    )
    .await;
    let target = register_named(&router, "Target", None).await;
    let other = register_named(&router, "Other", None).await;

    let response = AxumTestRequest::post(&format!("/api/athletes/{}/interactions", requester.id))
        .json(&json!({"targetId": target.id, "kind": "pass"}))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let recorded: InteractionResponse = response.json();
    assert_eq!(recorded.remaining_likes, 9);

    let response = AxumTestRequest::get(&format!("/api/athletes/{}/discovery", requester.id))
        .send(router.clone())
        .await;
    let body: DiscoveryResponse = response.json();
    let ids: Vec<_> = body.candidates.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![other.id]);

    let response = AxumTestRequest::post(&format!("/api/athletes/{}/interactions", requester.id))
        .json(&json!({"targetId": target.id}))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    for _ in 0..9 {
        let filler = register_named(&router, &format!("Filler{}", uuid::Uuid::new_v4().simple()), None).await;
        let response =
            AxumTestRequest::post(&format!("/api/athletes/{}/interactions", requester.id))
                .json(&json!({"targetId": filler.id}))
                .send(router.clone())
                .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let response = AxumTestRequest::get(&format!("/api/athletes/{}/discovery", requester.id))
        .send(router.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(error_code(&response), ErrorCode::QuotaExceeded);

    let response = AxumTestRequest::post(&format!("/api/athletes/{}/interactions", requester.id))
        .json(&json!({"targetId": other.id}))
        .send(router)
        .await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_health_reports_database() {
    let router = setup_router().await;

    let response = AxumTestRequest::get("/health").send(router).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"][0]["name"], "database");
}
