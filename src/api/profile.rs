//! Profile, dashboard, and progress endpoints

use crate::{
    Result,
    session::{ApiRequest, SessionManager},
    types::{Dashboard, Profile, ProfileUpdate, ProgramProgress},
};

/// Fetch the profile of the logged-in account
pub async fn fetch(manager: &SessionManager) -> Result<Profile> {
    manager.dispatch_json(ApiRequest::get("/profile/")).await
}

/// Apply a partial profile update and return the updated profile
pub async fn update(manager: &SessionManager, changes: &ProfileUpdate) -> Result<Profile> {
    let request = ApiRequest::patch("/profile/").with_body(serde_json::to_value(changes)?);
    manager.dispatch_json(request).await
}

/// Fetch the dashboard summary
pub async fn dashboard(manager: &SessionManager) -> Result<Dashboard> {
    manager
        .dispatch_json(ApiRequest::get("/user/dashboard/"))
        .await
}

/// Fetch per-program progress entries
pub async fn progress(manager: &SessionManager) -> Result<Vec<ProgramProgress>> {
    manager
        .dispatch_json(ApiRequest::get("/user/progress/"))
        .await
}
