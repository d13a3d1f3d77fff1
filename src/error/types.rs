//! Error classification for the client
//!
//! Provides the error taxonomy surfaced to callers: authentication
//! failures, session expiry, API errors, and the usual transport and
//! serialization pass-throughs.

use thiserror::Error;

/// Main error type for the client library
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Rejected credentials or a malformed authentication response
    #[error("Authentication failed: {reason}")]
    Auth {
        /// The reason why authentication failed
        reason: String,
        /// The endpoint where authentication was attempted
        endpoint: Option<String>,
    },

    /// Unrecoverable mid-session expiry: a 401 with no usable refresh
    /// token, or a refresh attempt that itself failed
    #[error("Session expired: {reason}")]
    SessionExpired {
        /// What made the session unrecoverable
        reason: String,
    },

    /// Non-auth HTTP error passed through from the backend
    #[error("API error ({status}): {detail}")]
    Api {
        /// HTTP status code returned by the backend
        status: u16,
        /// Detail message from the response body, or the status text
        detail: String,
    },

    /// Session storage errors
    #[error("Storage error during {operation}: {details}")]
    Storage {
        /// The storage operation that failed
        operation: String,
        /// Detailed error description
        details: String,
    },

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Validation errors
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Error message describing the validation failure
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an authentication error
    pub fn auth<S: Into<String>>(reason: S) -> Self {
        Self::Auth {
            reason: reason.into(),
            endpoint: None,
        }
    }

    /// Create an authentication error tagged with the endpoint
    pub fn auth_at(reason: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::Auth {
            reason: reason.into(),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a session-expired error
    pub fn session_expired<S: Into<String>>(reason: S) -> Self {
        Self::SessionExpired {
            reason: reason.into(),
        }
    }

    /// Create an API error from a status code and detail message
    pub fn api<S: Into<String>>(status: u16, detail: S) -> Self {
        Self::Api {
            status,
            detail: detail.into(),
        }
    }

    /// Create a storage error
    pub fn storage(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Storage {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create a configuration error
    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check whether this failure should send the user back to login
    ///
    /// True for credential rejections, session expiry, and raw 401s that
    /// were not intercepted (auth endpoints, already-retried requests).
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Error::Auth { .. } => true,
            Error::SessionExpired { .. } => true,
            Error::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
            Error::Auth { .. } => "auth",
            Error::SessionExpired { .. } => "session_expired",
            Error::Api { .. } => "api",
            Error::Storage { .. } => "storage",
            Error::Config { .. } => "config",
            Error::Validation { .. } => "validation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::config("field", "test config error");
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error in field: test config error"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_auth_error() {
        let err = Error::auth_at("Invalid credentials", "/auth/login/");
        assert!(matches!(err, Error::Auth { .. }));
        assert!(err.to_string().contains("Invalid credentials"));
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_session_expired_error() {
        let err = Error::session_expired("refresh token rejected");
        assert!(matches!(err, Error::SessionExpired { .. }));
        assert!(err.to_string().contains("Session expired"));
        assert!(err.is_auth_failure());
        assert_eq!(err.category(), "session_expired");
    }

    #[test]
    fn test_api_error_classification() {
        let unauthorized = Error::api(401, "Unauthorized");
        assert!(unauthorized.is_auth_failure());

        let not_found = Error::api(404, "Not found");
        assert!(!not_found.is_auth_failure());
        assert_eq!(not_found.to_string(), "API error (404): Not found");
    }

    #[test]
    fn test_storage_error() {
        let err = Error::storage("save", "disk full");
        assert!(matches!(err, Error::Storage { .. }));
        assert!(err.to_string().contains("Storage error during save"));
        assert!(!err.is_auth_failure());
    }
}
