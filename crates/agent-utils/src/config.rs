//! Environment-backed configuration helpers

use std::env;

/// Load variables from a `.env` file in the working directory, if one exists
///
/// Variables already present in the process environment take precedence.
/// Returns `true` when a file was found and loaded.
pub fn load_env() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Read an environment variable, treating blank values as unset
pub fn env_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
