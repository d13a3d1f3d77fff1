//! Program catalog subcommands
//!
//! Listing, inspecting and enrolling into learning programs.

use crate::{
    api::programs,
    cli::{GlobalArgs, connect, fail, print_json},
};

/// List available programs
pub async fn run_programs_list(global: GlobalArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match programs::list(&manager).await {
        Ok(programs) => print_json(&programs),
        Err(e) => fail(e),
    }
}

/// Show a single program
pub async fn run_programs_show(global: GlobalArgs, program_id: i64) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match programs::detail(&manager, program_id).await {
        Ok(program) => print_json(&program),
        Err(e) => fail(e),
    }
}

/// Enroll into a program
pub async fn run_programs_enroll(global: GlobalArgs, program_id: i64) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match programs::enroll(&manager, program_id).await {
        Ok(result) => print_json(&result),
        Err(e) => fail(e),
    }
}

/// List a program's modules
pub async fn run_programs_modules(global: GlobalArgs, program_id: i64) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match programs::modules(&manager, program_id).await {
        Ok(modules) => print_json(&modules),
        Err(e) => fail(e),
    }
}
