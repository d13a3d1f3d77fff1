//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use edlearn_client::{
    config::Settings,
    session::{MemoryStore, SessionManager, StoredSession},
    types::UserRecord,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// Test helper functions
pub mod helpers {
    use super::*;

    /// Create settings pointed at a mock backend
    pub fn test_settings(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = server.uri();
        settings
    }

    /// Create a session manager backed by an empty in-memory store
    pub fn manager_with_memory_store(server: &MockServer) -> SessionManager {
        SessionManager::with_store(test_settings(server), Box::new(MemoryStore::new()))
            .expect("manager construction should succeed")
    }

    /// Create a session manager with a pre-seeded in-memory store
    pub fn manager_with_session(server: &MockServer, session: StoredSession) -> SessionManager {
        SessionManager::with_store(
            test_settings(server),
            Box::new(MemoryStore::with_session(session)),
        )
        .expect("manager construction should succeed")
    }
}

/// Test data factory
pub struct MockData;

impl MockData {
    /// Sample user record as the backend serializes it
    pub fn user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "email": "student@example.edu",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "full_name": "Ada Lovelace",
            "role": "student",
            "is_approved": true,
            "rating": 4.5,
            "current_module": null,
            "weaknesses": null,
            "subscription_type": "free",
            "subscription_expiry": null
        })
    }

    /// Sample user record DTO
    pub fn user() -> UserRecord {
        serde_json::from_value(Self::user_json()).expect("sample user should deserialize")
    }

    /// Successful auth payload with the given token pair
    pub fn auth_payload(access: &str, refresh: &str) -> serde_json::Value {
        json!({
            "access": access,
            "refresh": refresh,
            "user": Self::user_json()
        })
    }

    /// A stored session carrying all three entries
    pub fn stored_session(access: &str, refresh: &str) -> StoredSession {
        StoredSession {
            access_token: Some(access.to_string()),
            refresh_token: Some(refresh.to_string()),
            user: Some(Self::user()),
            saved_at: None,
        }
    }
}

/// Mock endpoint factory
pub struct MockBackend;

impl MockBackend {
    /// Mount a successful login endpoint
    pub async fn mount_login(server: &MockServer, access: &str, refresh: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/login/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(MockData::auth_payload(access, refresh)),
            )
            .mount(server)
            .await;
    }

    /// Mount a verification endpoint confirming the session
    pub async fn mount_check_ok(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/auth/check/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "isAuthenticated": true,
                "user": MockData::user_json()
            })))
            .mount(server)
            .await;
    }

    /// Mount a verification endpoint rejecting the session
    pub async fn mount_check_rejected(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/auth/check/"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Token is invalid or expired"})),
            )
            .mount(server)
            .await;
    }

    /// Mount a logout endpoint accepting any refresh token
    pub async fn mount_logout(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/auth/logout/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "ok"})))
            .mount(server)
            .await;
    }

    /// Mount a refresh endpoint returning the given access token
    pub async fn mount_refresh(server: &MockServer, access: &str) {
        Mock::given(method("POST"))
            .and(path("/auth/token/refresh/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": access})))
            .mount(server)
            .await;
    }
}
