pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_socket_addr, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_FEED_URL: &str =
    "https://nasa-public-data.s3.amazonaws.com/iss-coords/current/ISS_OEM/ISS.OEM_J2K_EPH.xml";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = "iss_tracker";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "iss-tracker")]
#[command(about = "REST API for International Space Station ephemeris data")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    #[arg(long, default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,

    #[arg(long, default_value = DEFAULT_GEOCODER_URL)]
    pub geocoder_url: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub request_timeout_seconds: u64,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Path to TOML configuration file; when given, the other flags (except --verbose) are ignored
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> &str {
        &self.bind_address
    }

    fn feed_url(&self) -> &str {
        &self.feed_url
    }

    fn geocoder_url(&self) -> &str {
        &self.geocoder_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}

/// 所有設定來源共用的檢查
pub fn validate_settings(config: &dyn ConfigProvider) -> Result<()> {
    validate_socket_addr("server.bind_address", config.bind_address())?;
    validate_url("feed.url", config.feed_url())?;
    validate_url("geocoder.url", config.geocoder_url())?;
    validate_non_empty_string("geocoder.user_agent", config.user_agent())?;
    validate_range(
        "feed.timeout_seconds",
        config.request_timeout_seconds(),
        1,
        300,
    )?;
    Ok(())
}
