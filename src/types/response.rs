//! Response type definitions
//!
//! Defines the payload structures returned by the platform API. Fields that
//! older backend revisions omit are optional or defaulted so a partial body
//! still deserializes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Response for login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Short-lived bearer token. Optional because a 200 body without it
    /// must be detectable and rejected by the session manager.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,

    /// Long-lived token used to mint new access tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh: Option<String>,

    /// The authenticated account record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}

impl AuthResponse {
    /// Create a new auth response
    pub fn new(
        access: impl Into<String>,
        refresh: impl Into<String>,
        user: UserRecord,
    ) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
            user: Some(user),
        }
    }
}

/// Response for the token refresh endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    /// Replacement access token. Absent means the refresh did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

impl TokenRefreshResponse {
    /// Create a new token refresh response
    pub fn new(access: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
        }
    }
}

/// Response for the session verification endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthCheckResponse {
    /// Whether the presented access token identifies a live session
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,

    /// Fresh copy of the account record, when authenticated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserRecord>,
}

/// Account record as serialized by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,

    pub email: String,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    /// Server-computed "first last" convenience field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    /// Account role, e.g. "STUDENT" or "EDUCATOR"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(default)]
    pub is_approved: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Module the account is currently working through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_module: Option<Module>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_expiry: Option<NaiveDate>,
}

impl UserRecord {
    /// Create a minimal user record
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            full_name: None,
            role: None,
            is_approved: false,
            rating: None,
            current_module: None,
            weaknesses: None,
            subscription_type: None,
            subscription_expiry: None,
        }
    }

    /// Set first and last name
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Set the account role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Uppercased initial for avatar-style display: first letter of the
    /// first name, falling back to the email, then to "?".
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    /// Human-readable name, preferring the server-computed full name
    pub fn display_name(&self) -> String {
        if let Some(full) = self.full_name.as_deref()
            && !full.trim().is_empty()
        {
            return full.trim().to_string();
        }
        let joined = format!("{} {}", self.first_name, self.last_name);
        let joined = joined.trim();
        if joined.is_empty() {
            self.email.clone()
        } else {
            joined.to_string()
        }
    }
}

/// Learning program as listed in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Decimal prices arrive as strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_monthly: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_yearly: Option<String>,

    #[serde(default)]
    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Ordered unit of a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub id: i64,

    /// Owning program id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<i64>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub order: u32,

    #[serde(default)]
    pub is_unlocked: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Lesson content with navigation pointers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: String,

    /// Title of the program the lesson belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_title: Option<String>,

    /// Structured lesson body; shape varies by lesson kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_lesson: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_lesson: Option<i64>,
}

/// Response for program enrollment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnrollmentResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled: Option<bool>,
}

/// Acknowledgement for lesson completion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Verdict for a submitted math answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MathCheckResult {
    /// Whether the answer matched the expected one
    pub correct: bool,

    #[serde(default)]
    pub user_answer: String,

    #[serde(default)]
    pub expected_answer: String,

    #[serde(default)]
    pub problem_type: String,

    /// How the comparison was performed, e.g. "sympy" or "numeric"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation_method: Option<String>,
}

/// Aggregate learning statistics shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub completed_topics: u32,

    #[serde(default)]
    pub total_topics: u32,
}

/// Program the account is currently working through
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentProgram {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// One row of the recent-activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub activity_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Per-program completion percentage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramProgress {
    pub program_id: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub progress: f64,
}

/// Dashboard summary for the logged-in account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub completed_programs: u32,

    /// Overall completion percentage, clamped to 0..=100 by the server
    #[serde(default)]
    pub current_progress: u32,

    #[serde(default)]
    pub learning_hours: f64,

    #[serde(default)]
    pub recent_activities: Vec<ActivityEntry>,

    #[serde(default)]
    pub progress_data: Vec<ProgramProgress>,

    #[serde(default)]
    pub stats: DashboardStats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_program: Option<CurrentProgram>,
}

/// Per-account statistics shown on the profile page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub completed_programs: u32,

    #[serde(default)]
    pub completed_lessons: u32,

    #[serde(default)]
    pub learning_hours: f64,

    #[serde(default)]
    pub assessment_score: f64,
}

/// Profile page payload. Every field is tolerated as missing because the
/// deployed serializer has drifted across backend revisions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default)]
    pub badges: Vec<serde_json::Value>,

    #[serde(default)]
    pub stats: ProfileStats,

    #[serde(default)]
    pub progress_data: Vec<ProgramProgress>,

    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
}

/// Error body returned by the platform on non-2xx responses. Framework
/// errors carry `detail`, hand-written views carry `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Best available human-readable message
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.error.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_auth_response_deserialization() {
        let json = serde_json::json!({
            "access": "acc-token",
            "refresh": "ref-token",
            "user": {"id": 7, "email": "ada@example.com", "first_name": "Ada"}
        });

        let response: AuthResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.access.as_deref(), Some("acc-token"));
        assert_eq!(response.refresh.as_deref(), Some("ref-token"));
        assert_eq!(response.user.unwrap().first_name, "Ada");
    }

    #[test]
    fn test_auth_response_tolerates_missing_access() {
        let json = serde_json::json!({
            "refresh": "ref-token",
            "user": {"id": 7, "email": "ada@example.com"}
        });

        let response: AuthResponse = serde_json::from_value(json).unwrap();
        assert_eq!(response.access, None);
        assert!(response.user.is_some());
    }

    #[test]
    fn test_auth_check_response_field_name() {
        let json = serde_json::json!({
            "isAuthenticated": true,
            "user": {"id": 1, "email": "ada@example.com"}
        });

        let response: AuthCheckResponse = serde_json::from_value(json).unwrap();
        assert!(response.is_authenticated);

        let serialized = serde_json::to_string(&response).unwrap();
        assert!(serialized.contains("isAuthenticated"));
    }

    #[rstest]
    #[case("Ada", "ada@example.com", "A")]
    #[case("ada", "other@example.com", "A")]
    #[case("", "grace@example.com", "G")]
    #[case("", "", "?")]
    fn test_user_record_initials(
        #[case] first_name: &str,
        #[case] email: &str,
        #[case] expected: &str,
    ) {
        let user = UserRecord::new(1, email).with_name(first_name, "");
        assert_eq!(user.initials(), expected);
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let mut user = UserRecord::new(1, "ada@example.com").with_name("Ada", "Lovelace");
        user.full_name = Some("Ada Lovelace".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");

        user.full_name = Some("  ".to_string());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserRecord::new(1, "ada@example.com");
        assert_eq!(user.display_name(), "ada@example.com");
    }

    #[test]
    fn test_user_record_roundtrip_preserves_profile_fields() {
        let json = serde_json::json!({
            "id": 3,
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "full_name": "Ada Lovelace",
            "role": "STUDENT",
            "is_approved": true,
            "rating": 4.5,
            "subscription_type": "PREMIUM",
            "subscription_expiry": "2026-12-31"
        });

        let user: UserRecord = serde_json::from_value(json).unwrap();
        assert_eq!(user.role.as_deref(), Some("STUDENT"));
        assert!(user.is_approved);

        let reparsed: UserRecord =
            serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(reparsed, user);
    }

    #[test]
    fn test_dashboard_defaults_for_missing_sections() {
        let dashboard: Dashboard = serde_json::from_str("{}").unwrap();
        assert_eq!(dashboard.completed_programs, 0);
        assert_eq!(dashboard.stats, DashboardStats::default());
        assert!(dashboard.recent_activities.is_empty());
        assert!(dashboard.current_program.is_none());
    }

    #[test]
    fn test_dashboard_deserialization() {
        let json = serde_json::json!({
            "completed_programs": 2,
            "current_progress": 40,
            "learning_hours": 12.5,
            "recent_activities": [
                {"id": 1, "activity_type": "lesson_completed", "timestamp": "2025-03-01T10:00:00Z"}
            ],
            "progress_data": [
                {"program_id": 9, "title": "Algebra", "progress": 40}
            ],
            "stats": {"completed_topics": 4, "total_topics": 10}
        });

        let dashboard: Dashboard = serde_json::from_value(json).unwrap();
        assert_eq!(dashboard.current_progress, 40);
        assert_eq!(dashboard.progress_data[0].program_id, 9);
        assert_eq!(dashboard.stats.total_topics, 10);
    }

    #[test]
    fn test_lesson_navigation_pointers_optional() {
        let json = serde_json::json!({
            "title": "Linear equations",
            "program_title": "Algebra",
            "next_lesson": 12
        });

        let lesson: Lesson = serde_json::from_value(json).unwrap();
        assert_eq!(lesson.previous_lesson, None);
        assert_eq!(lesson.next_lesson, Some(12));
    }

    #[test]
    fn test_math_check_result_deserialization() {
        let json = serde_json::json!({
            "correct": true,
            "user_answer": "2*x",
            "expected_answer": "2x",
            "problem_type": "algebra",
            "evaluation_method": "sympy"
        });

        let result: MathCheckResult = serde_json::from_value(json).unwrap();
        assert!(result.correct);
        assert_eq!(result.evaluation_method.as_deref(), Some("sympy"));
    }

    #[test]
    fn test_api_error_body_prefers_detail() {
        let body = ApiErrorBody {
            detail: Some("No active account".to_string()),
            error: Some("Invalid credentials".to_string()),
        };
        assert_eq!(body.message(), Some("No active account"));

        let body: ApiErrorBody = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(body.message(), Some("boom"));

        let body = ApiErrorBody::default();
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_profile_tolerates_user_record_shape() {
        // Some deployments serve the account record from the profile route.
        let json = serde_json::json!({
            "id": 3,
            "email": "ada@example.com",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "role": "STUDENT"
        });

        let profile: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(profile.first_name, "Ada");
        assert_eq!(profile.stats, ProfileStats::default());
    }
}
