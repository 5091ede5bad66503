use assert_matches::assert_matches;

use auth_cell::models::RegisterPatientRequest;
use auth_cell::services::IdentityService;
use shared_database::test_utils::{test_state, user_id};
use shared_models::auth::Role;
use shared_models::error::AppError;
use shared_utils::extractor::current_session;

fn registration(username: &str, email: &str) -> RegisterPatientRequest {
    RegisterPatientRequest::new("Jane", "Doe", username, email, "correct horse")
}

async fn user_count(service_state: &shared_utils::state::AppState) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&service_state.db)
        .await
        .unwrap();
    n
}

#[tokio::test]
async fn test_seeded_accounts_authenticate() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    let admin_id = service.authenticate("admin", "admin").await.unwrap();
    assert_eq!(admin_id, user_id(&state.db, "admin").await);

    let doctor_id = service.authenticate("doctor", "doctor").await.unwrap();
    assert_eq!(doctor_id, user_id(&state.db, "doctor").await);
}

#[tokio::test]
async fn test_authenticate_rejects_wrong_password_and_unknown_user() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    assert_matches!(service.authenticate("admin", "Admin").await, Err(AppError::InvalidCredentials));
    assert_matches!(service.authenticate("nobody", "admin").await, Err(AppError::InvalidCredentials));
    assert_matches!(service.authenticate("", "").await, Err(AppError::InvalidCredentials));
}

#[tokio::test]
async fn test_register_then_authenticate_round_trip() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    let id = service
        .register_patient(registration("jane", "jane@example.com"))
        .await
        .unwrap();

    assert_eq!(service.authenticate("jane", "correct horse").await.unwrap(), id);
    assert_matches!(
        service.authenticate("jane", "battery staple").await,
        Err(AppError::InvalidCredentials)
    );

    let user = service.find_user(id).await.unwrap().unwrap();
    assert_eq!(user.role, Role::Patient);
    assert_eq!(user.specialization_id, None);
    assert_ne!(user.password_hash, "correct horse");
}

#[tokio::test]
async fn test_duplicate_username_fails_without_creating_a_row() {
    let state = test_state().await;
    let service = IdentityService::new(&state);
    service
        .register_patient(registration("jane", "jane@example.com"))
        .await
        .unwrap();
    let before = user_count(&state).await;

    let result = service
        .register_patient(registration("jane", "other@example.com"))
        .await;

    assert_matches!(result, Err(AppError::DuplicateUsername(name)) if name == "jane");
    assert_eq!(user_count(&state).await, before);
}

#[tokio::test]
async fn test_duplicate_email_fails_across_roles() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    // The seeded doctor owns doc@gmail.com.
    let result = service
        .register_patient(registration("newcomer", "doc@gmail.com"))
        .await;

    assert_matches!(result, Err(AppError::DuplicateEmail(_)));
}

#[tokio::test]
async fn test_registration_validates_required_fields() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    let blank_name = RegisterPatientRequest::new("  ", "Doe", "jane", "jane@example.com", "pw");
    assert_matches!(service.register_patient(blank_name).await, Err(AppError::InvalidInput(_)));

    let bad_email = RegisterPatientRequest::new("Jane", "Doe", "jane", "not-an-email", "pw");
    assert_matches!(service.register_patient(bad_email).await, Err(AppError::InvalidInput(_)));

    let no_password = RegisterPatientRequest::new("Jane", "Doe", "jane", "jane@example.com", "");
    assert_matches!(service.register_patient(no_password).await, Err(AppError::InvalidInput(_)));
}

#[tokio::test]
async fn test_login_issues_a_token_that_logout_revokes() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    let response = service.login("doctor", "doctor").await.unwrap();
    assert_eq!(response.role, Role::Doctor);

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        "authorization",
        format!("Bearer {}", response.token).parse().unwrap(),
    );

    let session = current_session(&state, &headers).await.unwrap();
    assert_eq!(session.user_id, response.user_id);
    assert_eq!(session.role, Role::Doctor);

    service.logout(&session).await.unwrap();

    assert_matches!(
        current_session(&state, &headers).await,
        Err(AppError::Unauthenticated(_))
    );
}

#[tokio::test]
async fn test_login_with_bad_password_opens_no_session() {
    let state = test_state().await;
    let service = IdentityService::new(&state);

    assert_matches!(service.login("admin", "wrong").await, Err(AppError::InvalidCredentials));

    let (sessions,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(&state.db)
        .await
        .unwrap();
    assert_eq!(sessions, 0);
}
