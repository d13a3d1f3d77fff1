//! Configuration management for the client
//!
//! This module handles loading and managing configuration settings
//! for both library and CLI use.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;

// Process environment is global; every test that touches EDLEARN_* vars
// must hold this lock, whichever module it lives in.
#[cfg(test)]
pub(crate) static ENV_TEST_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
