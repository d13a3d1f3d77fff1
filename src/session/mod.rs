//! Session management for the platform client
//!
//! This module handles authentication state, token persistence, and the
//! core dispatch logic that attaches credentials to outgoing requests and
//! silently refreshes an expired access token.

pub mod manager;
pub mod network;
pub mod state;
pub mod store;

pub use manager::SessionManager;
pub use network::{ApiRequest, ApiTransport};
pub use state::SessionState;
pub use store::{FileStore, MemoryStore, SessionStore, StoredSession, default_session_path};
