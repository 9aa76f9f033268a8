use crate::config::{
    validate_settings, LogFormat, DEFAULT_BIND_ADDRESS, DEFAULT_FEED_URL, DEFAULT_GEOCODER_URL,
    DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};
use crate::core::ConfigProvider;
use crate::utils::error::{Result, TrackerError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub feed: Option<FeedConfig>,
    pub geocoder: Option<GeocoderConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    pub url: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TrackerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TrackerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NOMINATIM_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| TrackerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        self.server
            .as_ref()
            .map(|s| s.bind_address.as_str())
            .unwrap_or(DEFAULT_BIND_ADDRESS)
    }

    fn feed_url(&self) -> &str {
        self.feed
            .as_ref()
            .and_then(|f| f.url.as_deref())
            .unwrap_or(DEFAULT_FEED_URL)
    }

    fn geocoder_url(&self) -> &str {
        self.geocoder
            .as_ref()
            .and_then(|g| g.url.as_deref())
            .unwrap_or(DEFAULT_GEOCODER_URL)
    }

    fn user_agent(&self) -> &str {
        self.geocoder
            .as_ref()
            .and_then(|g| g.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.feed
            .as_ref()
            .and_then(|f| f.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
bind_address = "127.0.0.1:8080"

[feed]
url = "https://example.com/ISS.OEM_J2K_EPH.xml"
timeout_seconds = 10

[logging]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.feed_url(), "https://example.com/ISS.OEM_J2K_EPH.xml");
        assert_eq!(config.request_timeout_seconds(), 10);
        assert_eq!(config.geocoder_url(), DEFAULT_GEOCODER_URL);
        assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.bind_address(), DEFAULT_BIND_ADDRESS);
        assert_eq!(config.feed_url(), DEFAULT_FEED_URL);
        assert_eq!(config.log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ISS_TRACKER_TEST_GEOCODER", "http://localhost:7070");

        let toml_content = r#"
[geocoder]
url = "${ISS_TRACKER_TEST_GEOCODER}"
user_agent = "iss_tracker_test"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.geocoder_url(), "http://localhost:7070");
        assert_eq!(config.user_agent(), "iss_tracker_test");

        std::env::remove_var("ISS_TRACKER_TEST_GEOCODER");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[feed]
url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[feed]
timeout_seconds = 0
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(TrackerError::InvalidConfigValueError { ref field, .. }) if field == "feed.timeout_seconds"
        ));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let result = TomlConfig::from_toml_str("[server\nbind_address = 1");
        assert!(matches!(
            result,
            Err(TrackerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[server]
bind_address = "0.0.0.0:9000"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }
}
