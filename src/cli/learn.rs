//! Lesson and answer-checking subcommands

use crate::{
    api::lessons,
    cli::{GlobalArgs, connect, fail, print_json},
    types::MathAnswerRequest,
};

/// Arguments for the math check command
#[derive(Debug)]
pub struct MathCheckArgs {
    pub answer: String,
    pub expected: String,
    pub problem_type: String,
    pub tolerance: Option<f64>,
}

/// Fetch and print lesson content
pub async fn run_lesson_show(
    global: GlobalArgs,
    program_id: i64,
    lesson_id: i64,
) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match lessons::fetch(&manager, program_id, lesson_id).await {
        Ok(lesson) => print_json(&lesson),
        Err(e) => fail(e),
    }
}

/// Mark a lesson complete
pub async fn run_lesson_complete(
    global: GlobalArgs,
    program_id: i64,
    lesson_id: i64,
) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    match lessons::complete(&manager, program_id, lesson_id).await {
        Ok(result) => print_json(&result),
        Err(e) => fail(e),
    }
}

/// Check a math answer against the expected one
pub async fn run_math_check(global: GlobalArgs, args: MathCheckArgs) -> anyhow::Result<()> {
    let manager = connect(&global)?;

    manager.restore_session().await;

    let mut request = MathAnswerRequest::new(&args.answer, &args.problem_type, &args.expected);
    if let Some(tolerance) = args.tolerance {
        request = request.with_tolerance(tolerance);
    }

    match lessons::check_math(&manager, &request).await {
        Ok(result) => print_json(&result),
        Err(e) => fail(e),
    }
}
