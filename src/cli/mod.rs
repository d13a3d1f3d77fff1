//! Command-line interface logic
//!
//! Each subcommand has a `run_*` function that loads configuration,
//! initializes logging, and drives the session manager. Results print as
//! JSON on stdout; logs go to stderr so stdout stays machine-readable.

pub mod account;
pub mod catalog;
pub mod learn;

use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    SessionManager, Settings,
    config::ConfigLoader,
    error::{Error, format_error, format_error_for_logging},
};

/// Options shared by every subcommand
#[derive(Debug, Default)]
pub struct GlobalArgs {
    pub config: Option<String>,
    pub base_url: Option<String>,
    pub verbose: bool,
}

/// Load configuration for a command invocation
///
/// Precedence:
/// 1. Command line arguments (highest priority)
/// 2. Environment variables
/// 3. Configuration file (from --config, EDLEARN_CONFIG or default location)
/// 4. Default values (lowest priority)
pub(crate) fn load_settings(global: &GlobalArgs) -> Settings {
    let config_loader = ConfigLoader::new();

    // Determine config path: CLI arg > environment variable > default location
    let config_path = if let Some(config) = &global.config {
        Some(PathBuf::from(config))
    } else {
        ConfigLoader::get_config_path()
    };

    let mut settings = config_loader
        .load(config_path.as_deref())
        .unwrap_or_else(|e| {
            // Can't use tracing here since it's not initialized yet
            eprintln!(
                "Warning: Failed to load configuration: {}. Using defaults.",
                e
            );
            Settings::default()
        });

    // Override with CLI arguments if provided (highest priority)
    if let Some(base_url) = &global.base_url {
        settings.api.base_url = base_url.clone();
    }
    settings.logging.verbose = global.verbose;

    settings
}

/// Initialize logging with proper precedence:
/// 1. CLI --verbose flag (highest priority) -> debug level
/// 2. RUST_LOG environment variable
/// 3. Config file logging.level
/// 4. Default: info (lowest priority)
pub(crate) fn init_logging(settings: &Settings) {
    let env_filter = if settings.logging.verbose {
        EnvFilter::new("debug")
    } else if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(&settings.logging.level)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build the session manager for a command invocation
///
/// Configuration is loaded before logging so the config file's logging
/// level can take effect.
pub(crate) fn connect(global: &GlobalArgs) -> anyhow::Result<SessionManager> {
    let settings = load_settings(global);
    init_logging(&settings);

    tracing::debug!(
        version = crate::utils::get_version(),
        backend = %settings.api.base_url,
        "Client initialized"
    );

    Ok(SessionManager::new(settings)?)
}

/// Print a command result as JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Report a failed command on stderr and exit non-zero
pub(crate) fn fail(error: Error) -> ! {
    tracing::error!(details = %format_error_for_logging(&error), "Command failed");
    eprintln!("Error: {}", format_error(&error));
    std::process::exit(1);
}
