//! Configuration file support for orgdesk.
//!
//! Configuration is loaded from `~/.config/orgdesk/config.toml` with the following precedence:
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)
//!
//! # Example Configuration
//!
//! ```toml
//! # ~/.config/orgdesk/config.toml
//! api_base_url = "http://localhost:8080"
//! request_timeout_secs = 30
//! start_screen = "employees"
//! years = [2024, 2025]
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Base URL of the master-data backend
    pub api_base_url: Option<String>,

    /// Per-request timeout. Unset means requests may stay pending indefinitely.
    pub request_timeout_secs: Option<u64>,

    /// Screen shown on startup (e.g. "employees", "states")
    pub start_screen: Option<String>,

    /// Years offered by the salary calculator
    pub years: Vec<i32>,
}

impl Config {
    /// Load configuration from the default config file path.
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    /// Environment variables are applied on top of the file.
    pub fn load() -> Self {
        Self::load_file().with_env(|key| std::env::var(key).ok())
    }

    fn load_file() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Override file values with `ORGDESK_API_URL` and `ORGDESK_TIMEOUT_SECS`.
    fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("ORGDESK_API_URL").filter(|v| !v.trim().is_empty()) {
            self.api_base_url = Some(url);
        }
        match lookup("ORGDESK_TIMEOUT_SECS").map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) => self.request_timeout_secs = Some(secs),
            Some(Err(e)) => eprintln!("Warning: Ignoring ORGDESK_TIMEOUT_SECS: {}", e),
            None => {}
        }
        self
    }

    fn parse(contents: &str) -> Self {
        match toml::from_str(contents) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orgdesk")
            .join("config.toml")
    }

    /// Merge with CLI overrides.
    ///
    /// CLI arguments take precedence over environment and config file values.
    pub fn with_overrides(
        mut self,
        api_base_url: Option<String>,
        request_timeout_secs: Option<u64>,
        start_screen: Option<String>,
    ) -> Self {
        if api_base_url.is_some() {
            self.api_base_url = api_base_url;
        }
        if request_timeout_secs.is_some() {
            self.request_timeout_secs = request_timeout_secs;
        }
        if start_screen.is_some() {
            self.start_screen = start_screen;
        }
        self
    }

    /// Get the API base URL, falling back to the default.
    pub fn api_base_url(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Years offered by the salary calculator.
    pub fn years(&self) -> Vec<i32> {
        if self.years.is_empty() {
            vec![2024, 2025]
        } else {
            self.years.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_base_url.is_none());
        assert!(config.request_timeout_secs.is_none());
        assert_eq!(config.years(), vec![2024, 2025]);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
            api_base_url = "http://hr.internal:9000"
            request_timeout_secs = 15
            start_screen = "states"
            years = [2025, 2026]
        "#;

        let config = Config::parse(toml);
        assert_eq!(config.api_base_url.as_deref(), Some("http://hr.internal:9000"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.start_screen.as_deref(), Some("states"));
        assert_eq!(config.years(), vec![2025, 2026]);
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = Config::parse(r#"api_base_url = "http://file:1""#).with_overrides(
            Some("http://cli:2".to_string()),
            None,
            None,
        );
        assert_eq!(config.api_base_url(), "http://cli:2");
    }

    #[test]
    fn test_env_overrides_file() {
        let env = |key: &str| match key {
            "ORGDESK_API_URL" => Some("http://env:3".to_string()),
            "ORGDESK_TIMEOUT_SECS" => Some("20".to_string()),
            _ => None,
        };
        let config = Config::parse(
            r#"
            api_base_url = "http://file:1"
            request_timeout_secs = 5
        "#,
        )
        .with_env(env);
        assert_eq!(config.api_base_url(), "http://env:3");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));

        let config = config.with_overrides(Some("http://cli:2".to_string()), Some(1), None);
        assert_eq!(config.api_base_url(), "http://cli:2");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_unset_or_bad_env_keeps_file_values() {
        let config = Config::parse(r#"api_base_url = "http://file:1""#).with_env(|_| None);
        assert_eq!(config.api_base_url(), "http://file:1");

        let config = Config::parse("request_timeout_secs = 5").with_env(|key| {
            (key == "ORGDESK_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let config = Config::parse("years = \"not a list\"");
        assert!(config.api_base_url.is_none());
    }
}
