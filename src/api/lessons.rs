//! Lesson content and math answer checking

use crate::{
    Result,
    session::{ApiRequest, SessionManager},
    types::{CompletionResponse, Lesson, MathAnswerRequest, MathCheckResult},
};

/// Fetch lesson content with its navigation pointers.
///
/// A 404 here means the lesson has no content available yet; it surfaces
/// unchanged as `Error::Api { status: 404, .. }` for the caller to present.
pub async fn fetch(manager: &SessionManager, program_id: i64, lesson_id: i64) -> Result<Lesson> {
    manager
        .dispatch_json(ApiRequest::get(format!(
            "/learn/{}/{}/",
            program_id, lesson_id
        )))
        .await
}

/// Mark a lesson as completed
pub async fn complete(
    manager: &SessionManager,
    program_id: i64,
    lesson_id: i64,
) -> Result<CompletionResponse> {
    manager
        .dispatch_json(ApiRequest::post(format!(
            "/learn/{}/{}/complete/",
            program_id, lesson_id
        )))
        .await
}

/// Submit a math answer for server-side evaluation
pub async fn check_math(
    manager: &SessionManager,
    answer: &MathAnswerRequest,
) -> Result<MathCheckResult> {
    let request = ApiRequest::post("/api/check-math/").with_body(serde_json::to_value(answer)?);
    manager.dispatch_json(request).await
}
