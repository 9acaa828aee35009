//! Configuration types for directory-client.

use std::env;
use std::time::Duration;

use crate::error::DirectoryError;

/// Default directory base URL.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for connecting to the remote user directory.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL of the directory (e.g., "https://dummyjson.com").
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl DirectoryConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `DIRECTORY_API_URL` | Directory base URL | `https://dummyjson.com` |
    /// | `DIRECTORY_TIMEOUT_SECS` | Request timeout in seconds | `30` |
    pub fn from_env() -> Result<Self, DirectoryError> {
        let base_url =
            env::var("DIRECTORY_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(DirectoryError::Config(format!(
                "DIRECTORY_API_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let timeout = match env::var("DIRECTORY_TIMEOUT_SECS") {
            Ok(value) => {
                let secs = value.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
                    DirectoryError::Config(format!(
                        "DIRECTORY_TIMEOUT_SECS must be a positive whole number, got {}",
                        value
                    ))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self::new(base_url).with_timeout(timeout))
    }

    /// Get the URL of one directory user.
    pub fn user_url(&self, id: &str) -> String {
        format!("{}/users/{}", self.base_url, id)
    }

    /// Get the URL that creates directory users.
    pub fn add_user_url(&self) -> String {
        format!("{}/users/add", self.base_url)
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DirectoryConfig::default();
        assert_eq!(config.base_url, "https://dummyjson.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_urls_trim_trailing_slash() {
        let config = DirectoryConfig::new("http://localhost:3000/");
        assert_eq!(config.user_url("42"), "http://localhost:3000/users/42");
        assert_eq!(config.add_user_url(), "http://localhost:3000/users/add");
    }

    // Environment-based tests are combined into a single test to avoid
    // race conditions when tests run in parallel (env vars are process-global).
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear_all_directory_vars() {
            std::env::remove_var("DIRECTORY_API_URL");
            std::env::remove_var("DIRECTORY_TIMEOUT_SECS");
        }

        // Defaults
        clear_all_directory_vars();
        let config = DirectoryConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        // All vars set
        std::env::set_var("DIRECTORY_API_URL", "http://directory.internal:8080/");
        std::env::set_var("DIRECTORY_TIMEOUT_SECS", "5");
        let config = DirectoryConfig::from_env().unwrap();
        assert_eq!(config.base_url, "http://directory.internal:8080");
        assert_eq!(config.timeout, Duration::from_secs(5));

        // Bad timeout
        std::env::set_var("DIRECTORY_TIMEOUT_SECS", "soon");
        assert!(matches!(
            DirectoryConfig::from_env(),
            Err(DirectoryError::Config(_))
        ));

        // Zero would fail every request immediately
        std::env::set_var("DIRECTORY_TIMEOUT_SECS", "0");
        assert!(matches!(
            DirectoryConfig::from_env(),
            Err(DirectoryError::Config(_))
        ));

        // Bad scheme
        clear_all_directory_vars();
        std::env::set_var("DIRECTORY_API_URL", "ftp://directory");
        assert!(matches!(
            DirectoryConfig::from_env(),
            Err(DirectoryError::Config(_))
        ));

        clear_all_directory_vars();
    }
}
