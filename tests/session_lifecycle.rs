//! Session lifecycle integration tests
//!
//! Exercises the full login -> authorized traffic -> logout flow against a
//! mocked backend, including persistence through the file store.

mod common;

use common::{MockBackend, MockData, helpers};
use edlearn_client::{
    Error,
    session::{FileStore, SessionManager, SessionStore},
    types::{LoginRequest, RegisterRequest},
};
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn credentials() -> LoginRequest {
    LoginRequest::new("student@example.edu", "hunter2")
}

#[tokio::test]
async fn test_login_then_logout_leaves_clean_checked_state() {
    let server = MockServer::start().await;
    MockBackend::mount_login(&server, "acc-1", "ref-1").await;
    MockBackend::mount_logout(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let session_path = temp_dir.path().join("session.json");

    let mut settings = helpers::test_settings(&server);
    settings.storage.session_file = Some(session_path.clone());
    let manager = SessionManager::new(settings).unwrap();

    let user = manager.login(&credentials()).await.unwrap();
    assert_eq!(user.email, "student@example.edu");
    assert!(manager.is_authenticated().await);
    assert!(session_path.exists(), "login should persist the session");

    manager.logout().await;

    let state = manager.state_snapshot().await;
    assert!(state.access_token().is_none());
    assert!(state.refresh_token().is_none());
    assert!(state.user().is_none());
    assert!(
        state.auth_checked(),
        "logout must not reset the checked flag"
    );

    // The persisted entries are gone as well
    let store = FileStore::new(session_path);
    let stored = store.load().await.unwrap();
    assert!(stored.is_empty(), "logout should empty the session file");
}

#[tokio::test]
async fn test_session_survives_process_restart() {
    let server = MockServer::start().await;
    MockBackend::mount_login(&server, "acc-1", "ref-1").await;
    MockBackend::mount_check_ok(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let session_path = temp_dir.path().join("session.json");

    // First run: log in and drop the manager
    {
        let mut settings = helpers::test_settings(&server);
        settings.storage.session_file = Some(session_path.clone());
        let manager = SessionManager::new(settings).unwrap();
        manager.login(&credentials()).await.unwrap();
    }

    // Second run: restore from the same file
    let mut settings = helpers::test_settings(&server);
    settings.storage.session_file = Some(session_path);
    let manager = SessionManager::new(settings).unwrap();

    assert!(!manager.is_authenticated().await);
    manager.restore_session().await;

    assert!(manager.is_authenticated().await);
    assert!(manager.auth_checked().await);
    assert_eq!(
        manager.current_user().await.unwrap().email,
        "student@example.edu"
    );
}

#[tokio::test]
async fn test_register_logs_the_new_account_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register/"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockData::auth_payload("acc-new", "ref-new")),
        )
        .mount(&server)
        .await;

    let manager = helpers::manager_with_memory_store(&server);
    let request = RegisterRequest::new("student@example.edu", "hunter2", "Ada", "Lovelace");

    let user = manager.register(&request).await.unwrap();

    assert_eq!(user.email, "student@example.edu");
    assert!(manager.is_authenticated().await);
    assert_eq!(
        manager.state_snapshot().await.access_token(),
        Some("acc-new")
    );
}

#[tokio::test]
async fn test_logout_without_refresh_token_stays_local() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manager = helpers::manager_with_memory_store(&server);
    manager.logout().await;

    let state = manager.state_snapshot().await;
    assert!(!state.is_authenticated());
    assert!(state.access_token().is_none());
}

#[tokio::test]
async fn test_login_ok_without_access_token_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "refresh": "ref-only",
            "user": MockData::user_json()
        })))
        .mount(&server)
        .await;

    let manager = helpers::manager_with_memory_store(&server);
    let result = manager.login(&credentials()).await;

    assert!(matches!(result, Err(Error::Auth { .. })));
    assert!(!manager.is_authenticated().await);
}

#[tokio::test]
async fn test_rejected_credentials_surface_the_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let manager = helpers::manager_with_memory_store(&server);
    let result = manager.login(&credentials()).await;

    match result {
        Err(Error::Auth { reason, endpoint }) => {
            assert_eq!(reason, "Invalid credentials");
            assert_eq!(endpoint.as_deref(), Some("/auth/login/"));
        }
        other => panic!("Expected auth error, got {:?}", other),
    }
}
