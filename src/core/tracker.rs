use crate::adapters::clock::SystemClock;
use crate::core::geolocation::geodetic_position;
use crate::core::kinematics::velocity_speed;
use crate::core::nearest::nearest_epoch_index;
use crate::domain::model::{OemHeader, OemMetadata, StateVector};
use crate::domain::ports::{Clock, FeedSource, Geocoder};
use crate::utils::error::{Result, TrackerError};
use serde::Serialize;
use std::sync::Arc;

pub const SPEED_UNITS: &str = "km/s";

/// `/epochs` 分頁參數
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub offset: usize,
    /// `None` 代表全部
    pub limit: Option<usize>,
}

impl Page {
    /// 從原始查詢字串值建立分頁，非負整數以外的值都回報錯誤
    pub fn from_query(offset: Option<&str>, limit: Option<&str>) -> Result<Self> {
        let offset = match offset {
            Some(value) => parse_query_param("offset", value)?,
            None => 0,
        };
        let limit = limit
            .map(|value| parse_query_param("limit", value))
            .transpose()?;

        Ok(Self { offset, limit })
    }

    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

fn parse_query_param(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| TrackerError::InvalidQueryParam {
            name: name.to_string(),
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedReport {
    pub epoch: String,
    pub speed: f64,
    pub units: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationReport {
    pub epoch: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// 查無地名時為 `null`
    pub geolocation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NowReport {
    pub epoch: String,
    pub instantaneous_speed: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub geolocation: Option<String>,
}

/// 所有 API 操作。每次呼叫都重新下載並解析 feed，不做快取。
pub struct IssTracker<F: FeedSource, G: Geocoder> {
    feed: F,
    geocoder: G,
    clock: Arc<dyn Clock>,
}

impl<F: FeedSource, G: Geocoder> IssTracker<F, G> {
    pub fn new(feed: F, geocoder: G) -> Self {
        Self {
            feed,
            geocoder,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub async fn list_epochs(&self, page: Page) -> Result<Vec<StateVector>> {
        let document = self.feed.fetch().await?;
        Ok(page.apply(&document.state_vectors))
    }

    pub async fn epoch(&self, epoch: &str) -> Result<StateVector> {
        let document = self.feed.fetch().await?;
        document
            .find_epoch(epoch)
            .cloned()
            .ok_or_else(|| TrackerError::EpochNotFound {
                epoch: epoch.to_string(),
            })
    }

    pub async fn epoch_speed(&self, epoch: &str) -> Result<SpeedReport> {
        let sv = self.epoch(epoch).await?;
        Ok(SpeedReport {
            epoch: sv.epoch.to_string(),
            speed: velocity_speed(&sv.velocity),
            units: SPEED_UNITS,
        })
    }

    pub async fn epoch_location(&self, epoch: &str) -> Result<LocationReport> {
        let sv = self.epoch(epoch).await?;
        self.locate(&sv).await
    }

    /// 最接近現在時間的 epoch，附瞬時速度與位置
    pub async fn now(&self) -> Result<NowReport> {
        let document = self.feed.fetch().await?;
        let now = self.clock.now();
        let index = nearest_epoch_index(&document.state_vectors, now)?;
        let sv = &document.state_vectors[index];

        let location = self.locate(sv).await?;
        Ok(NowReport {
            epoch: location.epoch,
            instantaneous_speed: velocity_speed(&sv.velocity),
            latitude: location.latitude,
            longitude: location.longitude,
            altitude: location.altitude,
            geolocation: location.geolocation,
        })
    }

    pub async fn comments(&self) -> Result<Vec<String>> {
        Ok(self.feed.fetch().await?.comments)
    }

    pub async fn header(&self) -> Result<OemHeader> {
        Ok(self.feed.fetch().await?.header)
    }

    pub async fn metadata(&self) -> Result<OemMetadata> {
        Ok(self.feed.fetch().await?.metadata)
    }

    async fn locate(&self, sv: &StateVector) -> Result<LocationReport> {
        let geo = geodetic_position(&sv.position, sv.epoch.instant());
        let geolocation = self.geocoder.reverse(geo.latitude, geo.longitude).await?;

        Ok(LocationReport {
            epoch: sv.epoch.to_string(),
            latitude: geo.latitude,
            longitude: geo.longitude,
            altitude: geo.altitude,
            geolocation,
        })
    }
}
