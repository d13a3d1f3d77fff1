//! # Session Management Module
//!
//! This module provides the core session handling for the platform client.
//! It owns the access/refresh token pair and the authenticated user record,
//! and coordinates persistence and network access.
//!
//! ## Architecture
//!
//! The session module is built around the [`SessionManager`] which
//! orchestrates:
//! - Login, registration, and logout against the auth endpoints
//! - Session restore from the store at startup
//! - Request dispatch with bearer attachment and a single silent
//!   refresh-retry on 401
//!
//! ## Examples
//!
//! ```no_run
//! use edlearn_client::config::Settings;
//! use edlearn_client::session::SessionManager;
//! use edlearn_client::types::LoginRequest;
//!
//! # tokio_test::block_on(async {
//! let manager = SessionManager::new(Settings::default())?;
//!
//! let user = manager
//!     .login(&LoginRequest::new("ada@example.com", "secret"))
//!     .await?;
//! println!("Logged in as {}", user.display_name());
//! # Ok::<(), edlearn_client::Error>(())
//! # });
//! ```
//!
//! ## Refresh policy
//!
//! A 401 on a non-auth endpoint triggers one refresh followed by one retry
//! of the original request; the retried outcome is returned as-is. A 401
//! from an auth endpoint, or on an already-retried request, passes through.
//! Startup restore is different on purpose: a stored token that fails
//! verification leads to logout, not refresh.

use crate::{
    Error, Result,
    config::Settings,
    session::{
        network::{self, ApiRequest, ApiTransport},
        state::SessionState,
        store::{FileStore, SessionStore, StoredSession, default_session_path},
    },
    types::{
        AuthCheckResponse, AuthResponse, LoginRequest, LogoutRequest, RegisterRequest,
        TokenRefreshRequest, TokenRefreshResponse, UserRecord,
    },
};
use reqwest::StatusCode;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Main session manager for the platform client
#[derive(Debug)]
pub struct SessionManager {
    /// Configuration settings
    settings: Arc<Settings>,
    /// HTTP transport, built once at construction
    transport: ApiTransport,
    /// Persisted session entries
    store: Box<dyn SessionStore>,
    /// Live session state cell
    state: RwLock<SessionState>,
}

impl SessionManager {
    /// Creates a session manager with file-backed persistence.
    ///
    /// The session file lives at the configured path, or under the XDG
    /// state directory when none is configured.
    pub fn new(settings: Settings) -> Result<Self> {
        let session_path = match &settings.storage.session_file {
            Some(path) => path.clone(),
            None => default_session_path()
                .map_err(|e| Error::storage("session_path", e.to_string()))?,
        };

        Self::with_store(settings, Box::new(FileStore::new(session_path)))
    }

    /// Creates a session manager on top of an explicit store
    pub fn with_store(settings: Settings, store: Box<dyn SessionStore>) -> Result<Self> {
        let transport = ApiTransport::new(&settings)?;

        Ok(Self {
            settings: Arc::new(settings),
            transport,
            store,
            state: RwLock::new(SessionState::new()),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Authenticate with email and password.
    ///
    /// Stale tokens are removed from the store before the attempt so the
    /// login request goes out bare. On success the new token pair and user
    /// record are persisted and applied to the live state. On any failure
    /// every session entry is cleared, store and state both.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserRecord> {
        info!(email = %credentials.email, "Logging in");
        self.set_loading(true).await;

        let result = self.perform_login(credentials).await;

        self.set_loading(false).await;
        match result {
            Ok(user) => {
                info!(email = %user.email, "Login succeeded");
                Ok(user)
            }
            Err(e) => {
                debug!("Login failed: {}", e);
                self.cleanup_failed_auth().await;
                Err(e)
            }
        }
    }

    /// Create a new account and adopt the returned session.
    ///
    /// Same contract as [`login`](Self::login) apart from the pre-clear:
    /// registration is assumed to start logged out.
    pub async fn register(&self, user_data: &RegisterRequest) -> Result<UserRecord> {
        info!(email = %user_data.email, "Registering new account");
        self.set_loading(true).await;

        let result = self.perform_register(user_data).await;

        self.set_loading(false).await;
        match result {
            Ok(user) => Ok(user),
            Err(e) => {
                debug!("Registration failed: {}", e);
                self.cleanup_failed_auth().await;
                Err(e)
            }
        }
    }

    /// End the session. Local state is cleared first; the server-side
    /// invalidation is best-effort and any failure there is swallowed.
    /// With no refresh token present this performs no network call at all.
    pub async fn logout(&self) {
        let refresh = {
            let from_store = self.store.load().await.unwrap_or_default().refresh_token;
            match from_store {
                Some(token) => Some(token),
                None => self.state.read().await.refresh_token().map(str::to_string),
            }
        };

        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear session store during logout: {}", e);
        }
        self.state.write().await.clear();

        let Some(refresh) = refresh else {
            debug!("Logout without refresh token, nothing to invalidate server-side");
            return;
        };

        let body = match serde_json::to_value(LogoutRequest::new(refresh)) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to encode logout request: {}", e);
                return;
            }
        };

        let request = ApiRequest::post("/auth/logout/").with_body(body);
        match self.transport.execute(&request, None).await {
            Ok(response) if response.status().is_success() => {
                debug!("Server-side logout acknowledged");
            }
            Ok(response) => {
                warn!("Server-side logout rejected: HTTP {}", response.status());
            }
            Err(e) => {
                warn!("Server-side logout failed: {}", e);
            }
        }

        info!("Logged out");
    }

    /// Restore a persisted session at startup.
    ///
    /// Runs at most once per manager: after the first completion the
    /// `auth_checked` guard makes further calls no-ops. A stored token that
    /// fails verification leads to [`logout`](Self::logout); refresh is
    /// deliberately not attempted here.
    pub async fn restore_session(&self) {
        if self.state.read().await.auth_checked() {
            debug!("Session restore already completed, skipping");
            return;
        }

        self.set_loading(true).await;
        self.try_restore().await;

        let mut state = self.state.write().await;
        state.mark_checked();
        state.set_loading(false);
    }

    async fn try_restore(&self) {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to read stored session: {}", e);
                return;
            }
        };

        let (Some(access), Some(user)) = (stored.access_token, stored.user) else {
            debug!("No stored session to restore");
            return;
        };

        let request = ApiRequest::get("/auth/check/");
        let verified = match self.transport.execute(&request, Some(&access)).await {
            Ok(response) if response.status().is_success() => {
                match response.json::<AuthCheckResponse>().await {
                    Ok(check) => check.is_authenticated,
                    Err(e) => {
                        warn!("Malformed session verification response: {}", e);
                        false
                    }
                }
            }
            Ok(response) => {
                debug!("Session verification rejected: HTTP {}", response.status());
                false
            }
            Err(e) => {
                warn!("Session verification failed: {}", e);
                false
            }
        };

        if verified {
            info!(email = %user.email, "Session restored");
            self.state
                .write()
                .await
                .apply_success(access, stored.refresh_token, user);
        } else {
            self.logout().await;
        }
    }

    /// Dispatch a request with the current credentials attached.
    ///
    /// On a 401 from a non-auth endpoint the manager silently exchanges the
    /// refresh token for a new access token and retries the request exactly
    /// once; the caller only ever sees the final outcome. Without a usable
    /// refresh token the session is torn down and the call fails with
    /// [`Error::SessionExpired`].
    pub async fn dispatch(&self, request: ApiRequest) -> Result<reqwest::Response> {
        if self.settings.logging.log_requests {
            debug!(method = %request.method(), path = %request.path(), "Dispatching API request");
        }

        let bearer = self.state.read().await.access_token().map(str::to_string);
        let response = self.transport.execute(&request, bearer.as_deref()).await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status != StatusCode::UNAUTHORIZED
            || request.is_auth_endpoint()
            || request.is_retried()
        {
            return Err(network::api_error_for(response).await);
        }

        self.refresh_and_retry(request).await
    }

    /// Dispatch and deserialize the JSON body of a successful response
    pub async fn dispatch_json<T>(&self, request: ApiRequest) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self.dispatch(request).await?;
        Ok(response.json::<T>().await?)
    }

    /// One refresh, one retry. Any failure on the refresh leg tears the
    /// session down.
    async fn refresh_and_retry(&self, request: ApiRequest) -> Result<reqwest::Response> {
        let retried = request.mark_retried();

        let mut refresh = self.state.read().await.refresh_token().map(str::to_string);
        if refresh.is_none() {
            refresh = self.store.load().await.unwrap_or_default().refresh_token;
        }
        let Some(refresh) = refresh else {
            debug!("401 with no refresh token available");
            self.logout().await;
            return Err(Error::session_expired("No refresh token available"));
        };

        info!(path = %retried.path(), "Access token rejected, attempting silent refresh");
        match self.refresh_access_token(&refresh).await {
            Ok(access) => {
                let response = self.transport.execute(&retried, Some(&access)).await?;
                if response.status().is_success() {
                    Ok(response)
                } else {
                    Err(network::api_error_for(response).await)
                }
            }
            Err(e) => {
                warn!("Token refresh failed: {}", e);
                self.logout().await;
                Err(Error::session_expired(format!("Token refresh failed: {}", e)))
            }
        }
    }

    /// Exchange the refresh token for a new access token. On success only
    /// the access entry is rewritten; refresh token and user stay put.
    async fn refresh_access_token(&self, refresh: &str) -> Result<String> {
        let body = serde_json::to_value(TokenRefreshRequest::new(refresh))?;
        let request = ApiRequest::post("/auth/token/refresh/").with_body(body);

        let response = self.transport.execute(&request, None).await?;
        if !response.status().is_success() {
            return Err(network::api_error_for(response).await);
        }

        let refreshed: TokenRefreshResponse = response.json().await?;
        let access = refreshed.access.ok_or_else(|| {
            Error::auth_at(
                "Refresh response carried no access token",
                "/auth/token/refresh/",
            )
        })?;

        self.store.set_access_token(&access).await?;
        self.state.write().await.set_access_token(access.clone());

        debug!("Access token refreshed");
        Ok(access)
    }

    async fn perform_login(&self, credentials: &LoginRequest) -> Result<UserRecord> {
        // Stale tokens must not survive into a new login attempt
        let mut stored = self.store.load().await.unwrap_or_default();
        if stored.access_token.is_some() || stored.refresh_token.is_some() {
            stored.access_token = None;
            stored.refresh_token = None;
            self.store.save(&stored).await?;
        }

        let request =
            ApiRequest::post("/auth/login/").with_body(serde_json::to_value(credentials)?);
        let response = self.transport.execute(&request, None).await?;
        let auth = self.read_auth_response(response, "/auth/login/").await?;
        self.adopt_auth_response(auth, "/auth/login/").await
    }

    async fn perform_register(&self, user_data: &RegisterRequest) -> Result<UserRecord> {
        let request =
            ApiRequest::post("/auth/register/").with_body(serde_json::to_value(user_data)?);
        let response = self.transport.execute(&request, None).await?;
        let auth = self.read_auth_response(response, "/auth/register/").await?;
        self.adopt_auth_response(auth, "/auth/register/").await
    }

    /// Read an auth endpoint response, mapping credential rejections to
    /// [`Error::Auth`]
    async fn read_auth_response(
        &self,
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<AuthResponse> {
        if !response.status().is_success() {
            let err = network::api_error_for(response).await;
            return Err(match err {
                Error::Api {
                    status: 400 | 401,
                    detail,
                } => Error::auth_at(detail, endpoint),
                other => other,
            });
        }

        Ok(response.json::<AuthResponse>().await?)
    }

    /// Persist and adopt a successful auth response. A nominally OK body
    /// still needs both an access token and a user record to be usable.
    async fn adopt_auth_response(
        &self,
        auth: AuthResponse,
        endpoint: &str,
    ) -> Result<UserRecord> {
        let access = auth.access.ok_or_else(|| {
            Error::auth_at("Authentication response carried no access token", endpoint)
        })?;
        let user = auth.user.ok_or_else(|| {
            Error::auth_at("Authentication response carried no user record", endpoint)
        })?;

        let stored = StoredSession {
            access_token: Some(access.clone()),
            refresh_token: auth.refresh.clone(),
            user: Some(user.clone()),
            saved_at: None,
        };
        self.store.save(&stored).await?;

        self.state
            .write()
            .await
            .apply_success(access, auth.refresh, user.clone());

        Ok(user)
    }

    /// Every failed login/registration leaves nothing behind: the three
    /// stored entries and the live state are cleared together.
    async fn cleanup_failed_auth(&self) {
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear session store after auth failure: {}", e);
        }
        self.state.write().await.clear();
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.set_loading(loading);
    }

    /// Current user record, if authenticated
    pub async fn current_user(&self) -> Option<UserRecord> {
        self.state.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn auth_checked(&self) -> bool {
        self.state.read().await.auth_checked()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading()
    }

    /// Copy of the live state, for inspection
    pub async fn state_snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }
}
