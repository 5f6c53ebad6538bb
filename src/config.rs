use crate::client::DEFAULT_API_BASE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

const MIN_TICK_RATE_MS: u64 = 1;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Percent-encode the handle before it goes into the request path.
    pub encode_handle: bool,
    /// No timeout unless set.
    pub request_timeout_secs: Option<u64>,
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE.to_string(),
            encode_handle: false,
            request_timeout_secs: None,
            tick_rate_ms: 250,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Try CWD config.toml first, then ~/.config/devradar/config.toml
        for path in config_paths() {
            if path.exists() {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: AppConfig = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(AppConfig::default())
    }

    #[cfg(test)]
    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(toml_str)?;
        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Never zero: the event task would spin on `sleep(0)`.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(MIN_TICK_RATE_MS))
    }
}

fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("devradar").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert!(!config.encode_handle);
        assert!(config.request_timeout_secs.is_none());
        assert!(config.request_timeout().is_none());
        assert_eq!(config.tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_from_full_toml() {
        let toml_str = r#"
            api_base_url = "https://github.example.com/api/v3"
            encode_handle = true
            request_timeout_secs = 15
            tick_rate_ms = 100
        "#;

        let config = AppConfig::load_from_str(toml_str).unwrap();
        assert_eq!(config.api_base_url, "https://github.example.com/api/v3");
        assert!(config.encode_handle);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.tick_rate_ms, 100);
    }

    #[test]
    fn test_load_from_partial_toml_uses_defaults() {
        let toml_str = r#"
            encode_handle = true
        "#;

        let config = AppConfig::load_from_str(toml_str).unwrap();
        assert!(config.encode_handle);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_load_from_empty_toml_uses_defaults() {
        let config = AppConfig::load_from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_invalid_toml_returns_error() {
        let result = AppConfig::load_from_str("this is not valid toml [[[");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_toml_with_wrong_type_returns_error() {
        let result = AppConfig::load_from_str(r#"tick_rate_ms = "fast""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let config = AppConfig::load_from_str("tick_rate_ms = 0").unwrap();
        assert_eq!(config.tick_rate_ms, 0);
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
    }

    #[test]
    fn test_config_paths_includes_cwd() {
        let paths = config_paths();
        assert!(!paths.is_empty());
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(paths[0], cwd.join("config.toml"));
    }
}
