/// CLI configuration
use crate::error::{CliError, Result};
use civiclink_client::{ClientConfig, RetryPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "civiclink.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_dashboard")]
    pub dashboard: DashboardSettings,

    #[serde(default = "default_submit")]
    pub submit: SubmitSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardSettings {
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmitSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from file and environment.
    ///
    /// `path` overrides the default `civiclink.toml`; a missing default file
    /// is fine, a missing explicit one is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. CIVICLINK_API__BASE_URL
        settings = settings.add_source(
            config::Environment::with_prefix("CIVICLINK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(CliError::Config(
                "API base URL is required (set CIVICLINK_API__BASE_URL)".to_string(),
            ));
        }

        if self.api.request_timeout_secs == 0 || self.dashboard.fetch_timeout_secs == 0 {
            return Err(CliError::Config("Timeouts must be at least 1 second".to_string()));
        }

        if self.submit.max_attempts == 0 {
            return Err(CliError::Config(
                "submit.max_attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.base_url.clone())
            .with_request_timeout(Duration::from_secs(self.api.request_timeout_secs))
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.dashboard.fetch_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.submit.max_attempts,
            delay: Duration::from_millis(self.submit.retry_delay_ms),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        request_timeout_secs: default_request_timeout_secs(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_dashboard() -> DashboardSettings {
    DashboardSettings {
        fetch_timeout_secs: default_fetch_timeout_secs(),
    }
}

fn default_fetch_timeout_secs() -> u64 {
    5
}

fn default_submit() -> SubmitSettings {
    SubmitSettings {
        max_attempts: default_max_attempts(),
        retry_delay_ms: default_retry_delay_ms(),
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_session() -> SessionSettings {
    SessionSettings {
        dir: default_session_dir(),
    }
}

fn default_session_dir() -> PathBuf {
    PathBuf::from(".civiclink")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            dashboard: default_dashboard(),
            submit: default_submit(),
            session: default_session(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.client_config().base_url, "http://localhost:8080/api");
    }

    #[test]
    fn test_load_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://civic.example.com/api\"\n\n[submit]\nmax_attempts = 5"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.api.base_url, "https://civic.example.com/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.submit.max_attempts, 5);
        assert_eq!(config.dashboard.fetch_timeout_secs, 5);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Some(Path::new("/no/such/civiclink.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = AppConfig::default();
        config.submit.max_attempts = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.dashboard.fetch_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
