//! Unified CLI for the EdLearn platform client
//!
//! This is the main binary that exposes account, catalog and lesson
//! operations through a unified command-line interface using subcommands.
//!
//! # Usage
//!
//! ## Account
//! ```bash
//! edlearn login --email student@example.edu
//! edlearn whoami
//! edlearn logout
//! ```
//!
//! ## Catalog
//! ```bash
//! edlearn programs list
//! edlearn programs enroll 3
//! ```
//!
//! ## Lessons
//! ```bash
//! edlearn lesson show 3 14
//! edlearn math check --answer "2x" --expected "2*x" --problem-type expression
//! ```
//!
//! ## Help and Version
//! ```bash
//! edlearn --version
//! edlearn --help
//! edlearn programs --help
//! ```

use clap::{Parser, Subcommand};

use edlearn_client::cli::{
    GlobalArgs,
    account::{
        LoginArgs, ProfileUpdateArgs, RegisterArgs, run_dashboard, run_login, run_logout,
        run_profile_show, run_profile_update, run_register, run_whoami,
    },
    catalog::{run_programs_enroll, run_programs_list, run_programs_modules, run_programs_show},
    learn::{MathCheckArgs, run_lesson_complete, run_lesson_show, run_math_check},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "edlearn")]
struct Cli {
    /// Configuration file path
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Backend base URL override
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email address
        #[arg(long)]
        email: String,

        /// Account password (or set EDLEARN_PASSWORD)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and persist the session
    Register {
        /// Account email address
        #[arg(long)]
        email: String,

        /// Account password (or set EDLEARN_PASSWORD)
        #[arg(long)]
        password: Option<String>,

        /// Given name
        #[arg(long)]
        first_name: String,

        /// Family name
        #[arg(long)]
        last_name: String,

        /// Platform role; the backend applies its default when omitted
        #[arg(long)]
        role: Option<String>,
    },

    /// End the session and invalidate the refresh token
    Logout,

    /// Print the currently logged-in user
    Whoami,

    /// Profile management
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Print dashboard statistics
    Dashboard,

    /// Program catalog
    Programs {
        #[command(subcommand)]
        action: ProgramsAction,
    },

    /// Lesson content and completion
    Lesson {
        #[command(subcommand)]
        action: LessonAction,
    },

    /// Math answer checking
    Math {
        #[command(subcommand)]
        action: MathAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile
    Show,

    /// Update profile fields
    Update {
        /// New given name
        #[arg(long)]
        first_name: Option<String>,

        /// New family name
        #[arg(long)]
        last_name: Option<String>,

        /// New bio text
        #[arg(long)]
        bio: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProgramsAction {
    /// List available programs
    List,

    /// Show one program
    Show {
        /// Program identifier
        program_id: i64,
    },

    /// Enroll into a program
    Enroll {
        /// Program identifier
        program_id: i64,
    },

    /// List a program's modules
    Modules {
        /// Program identifier
        program_id: i64,
    },
}

#[derive(Subcommand)]
enum LessonAction {
    /// Fetch lesson content
    Show {
        /// Program identifier
        program_id: i64,

        /// Lesson identifier
        lesson_id: i64,
    },

    /// Mark a lesson complete
    Complete {
        /// Program identifier
        program_id: i64,

        /// Lesson identifier
        lesson_id: i64,
    },
}

#[derive(Subcommand)]
enum MathAction {
    /// Check an answer against the expected one
    Check {
        /// The answer as entered
        #[arg(long, allow_hyphen_values = true)]
        answer: String,

        /// The reference answer
        #[arg(long, allow_hyphen_values = true)]
        expected: String,

        /// Problem category: expression, equation, or numeric
        #[arg(long)]
        problem_type: String,

        /// Numeric comparison tolerance
        #[arg(long)]
        tolerance: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let global = GlobalArgs {
        config: cli.config,
        base_url: cli.base_url,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Login { email, password } => {
            run_login(global, LoginArgs { email, password }).await
        }
        Commands::Register {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let args = RegisterArgs {
                email,
                password,
                first_name,
                last_name,
                role,
            };
            run_register(global, args).await
        }
        Commands::Logout => run_logout(global).await,
        Commands::Whoami => run_whoami(global).await,
        Commands::Profile { action } => match action {
            ProfileAction::Show => run_profile_show(global).await,
            ProfileAction::Update {
                first_name,
                last_name,
                bio,
            } => {
                let args = ProfileUpdateArgs {
                    first_name,
                    last_name,
                    bio,
                };
                run_profile_update(global, args).await
            }
        },
        Commands::Dashboard => run_dashboard(global).await,
        Commands::Programs { action } => match action {
            ProgramsAction::List => run_programs_list(global).await,
            ProgramsAction::Show { program_id } => run_programs_show(global, program_id).await,
            ProgramsAction::Enroll { program_id } => run_programs_enroll(global, program_id).await,
            ProgramsAction::Modules { program_id } => {
                run_programs_modules(global, program_id).await
            }
        },
        Commands::Lesson { action } => match action {
            LessonAction::Show {
                program_id,
                lesson_id,
            } => run_lesson_show(global, program_id, lesson_id).await,
            LessonAction::Complete {
                program_id,
                lesson_id,
            } => run_lesson_complete(global, program_id, lesson_id).await,
        },
        Commands::Math { action } => match action {
            MathAction::Check {
                answer,
                expected,
                problem_type,
                tolerance,
            } => {
                let args = MathCheckArgs {
                    answer,
                    expected,
                    problem_type,
                    tolerance,
                };
                run_math_check(global, args).await
            }
        },
    }
}
