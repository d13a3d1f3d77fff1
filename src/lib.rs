//! EdLearn Platform Client - Rust Implementation
//!
//! A typed client for the EdLearn learning-platform REST API. The library
//! manages a persisted token session with silent refresh and exposes thin
//! service wrappers over the catalog, lesson, profile and dashboard
//! endpoints; the `edlearn` binary provides the same operations as CLI
//! subcommands.
//!
//! # Features
//!
//! - **Token Session Management**: Access/refresh token pair persisted to a
//!   session file and restored across runs
//! - **Silent Refresh**: A 401 on an authorized request triggers one token
//!   refresh and one retry before the session is torn down
//! - **Typed API Wrappers**: Programs, modules, lessons, profile, dashboard
//!   and math answer checking as plain async functions
//! - **Configurable**: TOML config file, `EDLEARN_*` environment overrides
//!   and CLI flags with documented precedence
//! - **Cross-Platform**: Native support for Linux, Windows, and macOS
//!
//! # Architecture
//!
//! The [`SessionManager`] owns a single in-memory session cell and a
//! [`SessionStore`](session::SessionStore) for persistence. API modules
//! build [`ApiRequest`] values and hand them to
//! [`dispatch`](SessionManager::dispatch), which attaches the bearer token
//! and performs the refresh-and-retry dance when the backend rejects it.
//!
//! # Usage
//!
//! ## CLI
//!
//! ```bash
//! edlearn login --email student@example.edu
//! edlearn programs list
//! edlearn dashboard
//! ```
//!
//! # Examples
//!
//! ```rust
//! use edlearn_client::{SessionManager, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::default();
//! let manager = SessionManager::new(settings)?;
//! manager.restore_session().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use session::{ApiRequest, SessionManager};
pub use types::{LoginRequest, RegisterRequest, UserRecord};
