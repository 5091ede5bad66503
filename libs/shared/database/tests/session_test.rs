use assert_matches::assert_matches;

use shared_database::test_utils::{test_pool, user_id};
use shared_models::auth::Role;
use shared_models::error::AppError;
use shared_utils::session::SessionStore;

#[tokio::test]
async fn test_session_lifetime_out_of_range_is_refused() {
    let pool = test_pool().await;
    let admin = user_id(&pool, "admin").await;
    let store = SessionStore::new(&pool);

    for ttl_hours in [i64::MAX, i64::MIN, 0, -1] {
        assert_matches!(store.create(admin, Role::Admin, ttl_hours).await, Err(AppError::Internal(_)));
    }

    let (stored,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_created_session_is_active_until_revoked() {
    let pool = test_pool().await;
    let admin = user_id(&pool, "admin").await;
    let store = SessionStore::new(&pool);

    let session = store.create(admin, Role::Admin, 2).await.unwrap();
    let active = store.find_active(session.session_id).await.unwrap().unwrap();
    assert_eq!(active.user_id, admin);
    assert_eq!(active.role, Role::Admin);

    assert!(store.revoke(session.session_id).await.unwrap());
    assert_eq!(store.find_active(session.session_id).await.unwrap(), None);
}
