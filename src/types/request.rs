//! Request type definitions
//!
//! Defines the payloads sent to the platform backend.

use serde::{Deserialize, Serialize};

/// Credentials for the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email address
    pub email: String,
    /// Account password
    pub password: String,
}

impl LoginRequest {
    /// Create a new login request
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Payload for the registration endpoint
///
/// The backend requires both password fields and rejects the request when
/// they differ; `new` fills both from the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Account email address
    pub email: String,
    /// Account password
    pub password: String,
    /// Password confirmation, must match `password`
    pub password2: String,
    /// Given name, required by the backend
    pub first_name: String,
    /// Family name, required by the backend
    pub last_name: String,
    /// Platform role; the backend applies its default when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl RegisterRequest {
    /// Create a new registration request
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            email: email.into(),
            password2: password.clone(),
            password,
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: None,
        }
    }

    /// Set the platform role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Override the confirmation password
    pub fn with_password_confirmation(mut self, password2: impl Into<String>) -> Self {
        self.password2 = password2.into();
        self
    }
}

/// Payload for the token refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshRequest {
    /// The refresh token to exchange
    pub refresh: String,
}

impl TokenRefreshRequest {
    /// Create a new refresh request
    pub fn new(refresh: impl Into<String>) -> Self {
        Self {
            refresh: refresh.into(),
        }
    }
}

/// Payload for the logout endpoint (server-side token invalidation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// The refresh token to invalidate
    pub refresh: String,
}

impl LogoutRequest {
    /// Create a new logout request
    pub fn new(refresh: impl Into<String>) -> Self {
        Self {
            refresh: refresh.into(),
        }
    }
}

/// Partial profile update; absent fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New given name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// New bio text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the given name
    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    /// Set the family name
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the bio text
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    /// Whether the update carries no fields
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.bio.is_none()
    }
}

/// Payload for the math answer checking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathAnswerRequest {
    /// The learner's answer as entered
    pub user_answer: String,
    /// Problem category: expression, equation, or numeric
    pub problem_type: String,
    /// The reference answer to check against
    pub correct_answer: String,
    /// Variable bindings for symbolic evaluation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
    /// Numeric comparison tolerance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl MathAnswerRequest {
    /// Create a new math answer check request
    pub fn new(
        user_answer: impl Into<String>,
        problem_type: impl Into<String>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            user_answer: user_answer.into(),
            problem_type: problem_type.into(),
            correct_answer: correct_answer.into(),
            variables: None,
            tolerance: None,
        }
    }

    /// Set variable bindings
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Set the numeric tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}
