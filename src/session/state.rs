//! Live session state
//!
//! A single owned cell holding the token pair and the authenticated user.
//! All mutation goes through the transition methods below; nothing outside
//! this module writes the fields directly. That keeps the pairing rule in
//! one place: an access token is never resident without its user record.

use crate::types::UserRecord;

/// Authentication state for one [`SessionManager`](super::SessionManager).
///
/// `auth_checked` records whether the startup restore attempt has completed.
/// It moves false to true exactly once and never back, so callers can tell
/// "not logged in" apart from "not checked yet".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserRecord>,
    auth_checked: bool,
    loading: bool,
}

impl SessionState {
    /// Empty state: no credentials, restore not yet attempted
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a full credential set after a successful login, registration,
    /// or restore. Tokens and user land together, and the restore guard is
    /// considered satisfied from this point on.
    pub fn apply_success(
        &mut self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
        user: UserRecord,
    ) {
        self.access_token = Some(access_token.into());
        self.refresh_token = refresh_token;
        self.user = Some(user);
        self.auth_checked = true;
        self.loading = false;
    }

    /// Drop credentials and user together. `auth_checked` survives: logging
    /// out does not undo the fact that the startup check ran.
    pub fn clear(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.user = None;
        self.loading = false;
    }

    /// Swap in a refreshed access token. The refresh token and user record
    /// stay as they are.
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = Some(token.into());
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Record that the startup restore attempt has completed. One-way.
    pub fn mark_checked(&mut self) {
        self.auth_checked = true;
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.user.as_ref()
    }

    pub fn auth_checked(&self) -> bool {
        self.auth_checked
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a usable credential set is resident
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }
}
