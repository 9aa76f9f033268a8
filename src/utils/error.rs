use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed unavailable: upstream returned HTTP {status}")]
    FeedUnavailable { status: u16 },

    #[error("Feed parsing error: {0}")]
    FeedParse(#[from] quick_xml::DeError),

    #[error("Invalid epoch '{value}': {reason}")]
    InvalidEpoch { value: String, reason: String },

    #[error("Epoch not found: {epoch}")]
    EpochNotFound { epoch: String },

    #[error("Invalid {name} parameter: '{value}'")]
    InvalidQueryParam { name: String, value: String },

    #[error("No epoch found for day {day_of_year} hour {hour:02}")]
    NoEpochNearNow { day_of_year: u32, hour: u32 },

    #[error("Reverse geocoding failed: {message}")]
    Geocoding { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，用於決定回應狀態碼與日誌等級
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 上游 (NASA feed / geocoder) 失敗
    Upstream,
    /// 使用者輸入錯誤
    Request,
    /// 查無資料
    NotFound,
    /// 啟動配置錯誤
    Configuration,
    Internal,
}

impl TrackerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TrackerError::Http(_)
            | TrackerError::FeedUnavailable { .. }
            | TrackerError::FeedParse(_)
            | TrackerError::InvalidEpoch { .. }
            | TrackerError::Geocoding { .. } => ErrorCategory::Upstream,
            TrackerError::InvalidQueryParam { .. } => ErrorCategory::Request,
            TrackerError::EpochNotFound { .. } | TrackerError::NoEpochNearNow { .. } => {
                ErrorCategory::NotFound
            }
            TrackerError::ConfigValidationError { .. }
            | TrackerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TrackerError::IoError(_) => ErrorCategory::Internal,
        }
    }

    /// 給 API 使用者看的訊息 (純文字)
    pub fn user_friendly_message(&self) -> String {
        match self {
            TrackerError::EpochNotFound { .. } => {
                "Epoch not found, please enter a valid epoch value".to_string()
            }
            TrackerError::InvalidQueryParam { name, .. } => format!(
                "Invalid {name} parameter; {name} must be a non-negative integer."
            ),
            TrackerError::NoEpochNearNow { day_of_year, hour } => format!(
                "No epoch in the current feed falls on day {} at hour {:02}",
                day_of_year, hour
            ),
            TrackerError::Http(_) | TrackerError::FeedUnavailable { .. } => {
                "ISS ephemeris feed is currently unavailable".to_string()
            }
            TrackerError::FeedParse(_) | TrackerError::InvalidEpoch { .. } => {
                "ISS ephemeris feed could not be parsed".to_string()
            }
            TrackerError::Geocoding { .. } => "Reverse geocoding service failed".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Upstream => "Check network access to the feed and geocoder URLs",
            ErrorCategory::Request => "Fix the request parameters and try again",
            ErrorCategory::NotFound => "List available epochs with GET /epochs",
            ErrorCategory::Configuration => "Check the command line flags or the TOML config file",
            ErrorCategory::Internal => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
