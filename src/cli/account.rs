//! Account and session subcommands
//!
//! Login, registration, logout, identity, profile management and the
//! dashboard view.

use tracing::info;

use crate::{
    api::profile,
    cli::{GlobalArgs, connect, fail, print_json},
    error::Error,
    types::{LoginRequest, ProfileUpdate, RegisterRequest},
};

/// Arguments for the login command
#[derive(Debug)]
pub struct LoginArgs {
    pub email: String,
    pub password: Option<String>,
}

/// Arguments for the register command
#[derive(Debug)]
pub struct RegisterArgs {
    pub email: String,
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
}

/// Arguments for the profile update command
#[derive(Debug, Default)]
pub struct ProfileUpdateArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

/// Resolve the password from the CLI flag or EDLEARN_PASSWORD
fn resolve_password(flag: Option<String>) -> crate::Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }

    std::env::var("EDLEARN_PASSWORD").map_err(|_| {
        Error::validation(
            "password",
            "Provide --password or set the EDLEARN_PASSWORD environment variable",
        )
    })
}

/// Log in and persist the session
pub async fn run_login(global: GlobalArgs, args: LoginArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    let password = match resolve_password(args.password) {
        Ok(password) => password,
        Err(e) => fail(e),
    };

    let credentials = LoginRequest::new(&args.email, password);
    match manager.login(&credentials).await {
        Ok(user) => print_json(&user),
        Err(e) => fail(e),
    }
}

/// Create an account and persist the session
pub async fn run_register(global: GlobalArgs, args: RegisterArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    let password = match resolve_password(args.password) {
        Ok(password) => password,
        Err(e) => fail(e),
    };

    let mut request =
        RegisterRequest::new(&args.email, password, &args.first_name, &args.last_name);
    if let Some(role) = &args.role {
        request = request.with_role(role);
    }

    match manager.register(&request).await {
        Ok(user) => {
            info!(email = %args.email, "Registration succeeded");
            print_json(&user)
        }
        Err(e) => fail(e),
    }
}

/// End the session and invalidate the refresh token server-side
pub async fn run_logout(global: GlobalArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;
    manager.logout().await;

    print_json(&serde_json::json!({ "detail": "Logged out." }))
}

/// Print the current user record
pub async fn run_whoami(global: GlobalArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match manager.current_user().await {
        Some(user) => print_json(&user),
        None => fail(Error::auth("Not logged in")),
    }
}

/// Fetch and print the profile
pub async fn run_profile_show(global: GlobalArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match profile::fetch(&manager).await {
        Ok(profile) => print_json(&profile),
        Err(e) => fail(e),
    }
}

/// Apply a partial profile update and print the result
pub async fn run_profile_update(global: GlobalArgs, args: ProfileUpdateArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    let mut changes = ProfileUpdate::new();
    if let Some(first_name) = args.first_name {
        changes = changes.with_first_name(first_name);
    }
    if let Some(last_name) = args.last_name {
        changes = changes.with_last_name(last_name);
    }
    if let Some(bio) = args.bio {
        changes = changes.with_bio(bio);
    }

    if changes.is_empty() {
        fail(Error::validation(
            "profile",
            "Nothing to update; pass at least one of --first-name, --last-name, --bio",
        ));
    }

    match profile::update(&manager, &changes).await {
        Ok(profile) => print_json(&profile),
        Err(e) => fail(e),
    }
}

/// Fetch and print dashboard statistics
pub async fn run_dashboard(global: GlobalArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match profile::dashboard(&manager).await {
        Ok(dashboard) => print_json(&dashboard),
        Err(e) => fail(e),
    }
}
