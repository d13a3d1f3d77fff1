//! Version information utilities
//!
//! Provides version strings for CLI output and the HTTP User-Agent header.

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the current application version
pub fn get_version() -> &'static str {
    VERSION
}

/// Get detailed version information including git commit
pub fn get_detailed_version() -> String {
    let version = get_version();
    let git_hash = option_env!("GIT_HASH").unwrap_or("unknown");
    let build_date = option_env!("BUILD_DATE").unwrap_or("unknown");

    format!("{} ({}@{})", version, git_hash, build_date)
}

/// Default User-Agent header sent with every API request
pub fn user_agent() -> String {
    format!("edlearn-client/{}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_get_detailed_version() {
        let detailed = get_detailed_version();
        assert!(!detailed.is_empty());
        assert!(detailed.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_user_agent_carries_version() {
        let ua = user_agent();
        assert!(ua.starts_with("edlearn-client/"));
        assert!(ua.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
