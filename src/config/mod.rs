use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Default Teamdeck REST API root.
pub const DEFAULT_BASE_URL: &str = "https://api.teamdeck.io/v1";

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "TEAMDECK_BASE_URL";

/// Environment variable naming the TOML configuration file.
pub const CONFIG_ENV: &str = "TEAMDECK_CONFIG";

/// Complete node configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamdeckConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Upstream API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout of the host's HTTP client (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("teamdeck-node/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

/// Batch execution configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutionConfig {
    /// Turn per-item failures into error records instead of aborting the run
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl TeamdeckConfig {
    /// Applies environment overrides (`TEAMDECK_BASE_URL`).
    pub fn apply_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                info!(base_url = %base_url, "Base URL overridden from {}", BASE_URL_ENV);
                self.api.base_url = base_url;
            }
        }
        self
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<TeamdeckConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path))?;
    let config: TeamdeckConfig =
        toml::from_str(&contents).with_context(|| format!("Failed to parse config file {}", path))?;
    info!(path, base_url = %config.api.base_url, "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = TeamdeckConfig::default();
        assert_eq!(config.api.base_url, "https://api.teamdeck.io/v1");
        assert_eq!(config.api.timeout_seconds, 30);
        assert!(config.api.user_agent.starts_with("teamdeck-node/"));
        assert!(!config.execution.continue_on_fail);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TeamdeckConfig = toml::from_str(
            r#"
            [execution]
            continue_on_fail = true
            "#,
        )
        .unwrap();
        assert!(config.execution.continue_on_fail);
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://localhost:9999/v1\"\ntimeout_seconds = 5"
        )
        .unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9999/v1");
        assert_eq!(config.api.timeout_seconds, 5);
        assert!(!config.execution.continue_on_fail);
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/teamdeck.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = load_config(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_apply_env_overrides_base_url() {
        let _lock = ENV_LOCK.lock().unwrap();
        std::env::set_var(BASE_URL_ENV, "http://127.0.0.1:1234");

        let config = TeamdeckConfig::default().apply_env();
        assert_eq!(config.api.base_url, "http://127.0.0.1:1234");

        std::env::remove_var(BASE_URL_ENV);
        let config = TeamdeckConfig::default().apply_env();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }
}
