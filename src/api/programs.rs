//! Program catalog endpoints

use crate::{
    Result,
    session::{ApiRequest, SessionManager},
    types::{EnrollmentResult, Module, Program},
};

/// List all active programs
pub async fn list(manager: &SessionManager) -> Result<Vec<Program>> {
    manager.dispatch_json(ApiRequest::get("/programs/")).await
}

/// Fetch one program by id
pub async fn detail(manager: &SessionManager, program_id: i64) -> Result<Program> {
    manager
        .dispatch_json(ApiRequest::get(format!("/programs/{}/", program_id)))
        .await
}

/// Enroll the logged-in account into a program
pub async fn enroll(manager: &SessionManager, program_id: i64) -> Result<EnrollmentResult> {
    manager
        .dispatch_json(ApiRequest::post(format!("/programs/{}/enroll/", program_id)))
        .await
}

/// List the modules of a program, in course order
pub async fn modules(manager: &SessionManager, program_id: i64) -> Result<Vec<Module>> {
    manager
        .dispatch_json(ApiRequest::get(format!("/programs/{}/modules/", program_id)))
        .await
}
