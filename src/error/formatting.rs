//! Error formatting utilities
//!
//! Renders errors for terminal display and as structured values for
//! logging, with nested causes appended to the message.

use crate::Error;
use std::error::Error as StdError;

/// Format error for display
///
/// Expands struct variants into a readable one-line message and walks
/// the source chain, appending causes not already part of the text.
pub fn format_error(error: &Error) -> String {
    let formatted = match error {
        Error::Auth { reason, endpoint } => match endpoint {
            Some(endpoint) => format!("Authentication failed at {}: {}", endpoint, reason),
            None => format!("Authentication failed: {}", reason),
        },

        Error::SessionExpired { reason } => {
            format!("Session expired: {}. Please log in again.", reason)
        }

        Error::Api { status, detail } => {
            format!("The server responded with {}: {}", status, detail)
        }

        Error::Storage { operation, details } => {
            format!("Session storage error during {}: {}", operation, details)
        }

        Error::Config { field, message } => {
            format!("Configuration error in {}: {}", field, message)
        }

        Error::Validation { field, message } => {
            format!("Validation failed for {}: {}", field, message)
        }

        // For wrapped errors, use their Display implementation
        _ => error.to_string(),
    };

    let mut result = formatted;
    let mut source = error.source();

    while let Some(cause) = source {
        if !result.contains(&cause.to_string()) {
            result = format!("{} (caused by {})", result, cause);
        }
        source = cause.source();
    }

    result
}

/// Format error for logging with structured data
pub fn format_error_for_logging(error: &Error) -> serde_json::Value {
    let mut log_data = serde_json::json!({
        "message": format_error(error),
        "category": error.category(),
        "auth_failure": error.is_auth_failure(),
    });

    match error {
        Error::Api { status, .. } => {
            log_data["status"] = serde_json::Value::Number((*status).into());
        }
        Error::Auth {
            endpoint: Some(endpoint),
            ..
        } => {
            log_data["endpoint"] = serde_json::Value::String(endpoint.clone());
        }
        Error::Storage { operation, .. } => {
            log_data["operation"] = serde_json::Value::String(operation.clone());
        }
        _ => {}
    }

    log_data
}
