use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use catalog_cell::router::catalog_routes;
use shared_database::test_utils::{test_state, user_id, JwtTestUtils, TestUser};
use shared_models::auth::Role;
use shared_utils::state::AppState;

async fn call(state: Arc<AppState>, request: Request<Body>) -> (StatusCode, Value) {
    let response = catalog_routes(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn create_department(token: &str, name: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/departments")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "name": name, "description": "New unit" }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_admin_can_create_department_over_http() {
    let state = test_state().await;
    let admin = user_id(&state.db, "admin").await;
    let token = JwtTestUtils::session_token(&state, admin, Role::Admin).await;

    let (status, body) = call(state.clone(), create_department(&token, "Dermatology")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Dermatology");

    let (status, body) = call(state, create_department(&token, "Dermatology")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["category"], "conflict");
}

#[tokio::test]
async fn test_patient_session_is_forbidden_from_creating_departments() {
    let state = test_state().await;
    let patient = TestUser::patient("pat").insert(&state.db).await;
    let token = JwtTestUtils::session_token(&state, patient, Role::Patient).await;

    let (status, body) = call(state, create_department(&token, "Dermatology")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["category"], "permission");
}

#[tokio::test]
async fn test_listing_requires_a_session() {
    let state = test_state().await;

    let request = Request::builder().uri("/treatments").body(Body::empty()).unwrap();
    let (status, _) = call(state, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_any_session_can_list_treatments() {
    let state = test_state().await;
    let doctor = user_id(&state.db, "doctor").await;
    let token = JwtTestUtils::session_token(&state, doctor, Role::Doctor).await;

    let request = Request::builder()
        .uri("/treatments")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Consultation", "EKG", "MRI Scan", "Knee Surgery"]);
}

#[tokio::test]
async fn test_department_body_without_name_is_a_validation_error() {
    let state = test_state().await;
    let admin = user_id(&state.db, "admin").await;
    let token = JwtTestUtils::session_token(&state, admin, Role::Admin).await;

    let request = Request::builder()
        .method("POST")
        .uri("/departments")
        .header("authorization", format!("Bearer {}", token))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "description": "No name" }).to_string()))
        .unwrap();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["category"], "validation");
}
