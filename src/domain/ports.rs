use crate::domain::model::OemDocument;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// 取得並解析 ISS 星曆資料
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<OemDocument>;
}

/// 反向地理編碼：經緯度 → 地名。查無結果時回傳 `Ok(None)`。
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>>;
}

/// UTC 時鐘
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn feed_url(&self) -> &str;
    fn geocoder_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
}
