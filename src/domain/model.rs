use crate::utils::error::{Result, TrackerError};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// OEM 時間格式：`YYYY-DDDTHH:MM:SS.sssZ` (以年內第幾日表示)
pub const EPOCH_FORMAT: &str = "%Y-%jT%H:%M:%S%.fZ";

/// 一筆狀態向量的時間戳。保留原始字串以便精確比對。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Epoch {
    raw: String,
    instant: NaiveDateTime,
}

impl Epoch {
    pub fn parse(value: &str) -> Result<Self> {
        let instant = NaiveDateTime::parse_from_str(value, EPOCH_FORMAT).map_err(|e| {
            TrackerError::InvalidEpoch {
                value: value.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            raw: value.to_string(),
            instant,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// UTC instant
    pub fn instant(&self) -> NaiveDateTime {
        self.instant
    }

    pub fn day_of_year(&self) -> u32 {
        self.instant.ordinal()
    }

    pub fn hour(&self) -> u32 {
        self.instant.hour()
    }

    pub fn minute(&self) -> u32 {
        self.instant.minute()
    }
}

impl FromStr for Epoch {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Epoch {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// 位置 (km)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 速度 (km/s)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Velocity {
    pub x_dot: f64,
    pub y_dot: f64,
    pub z_dot: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateVector {
    pub epoch: Epoch,
    pub position: Position,
    pub velocity: Velocity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OemHeader {
    pub creation_date: Option<String>,
    pub originator: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OemMetadata {
    pub object_name: Option<String>,
    pub object_id: Option<String>,
    pub center_name: Option<String>,
    pub ref_frame: Option<String>,
    pub time_system: Option<String>,
    pub start_time: Option<String>,
    pub stop_time: Option<String>,
}

/// 解析後的整份 OEM 文件
#[derive(Debug, Clone, PartialEq)]
pub struct OemDocument {
    pub header: OemHeader,
    pub metadata: OemMetadata,
    pub comments: Vec<String>,
    pub state_vectors: Vec<StateVector>,
}

impl OemDocument {
    /// 第一筆與最後一筆 epoch
    pub fn epoch_range(&self) -> Option<(&Epoch, &Epoch)> {
        let first = self.state_vectors.first()?;
        let last = self.state_vectors.last()?;
        Some((&first.epoch, &last.epoch))
    }

    pub fn find_epoch(&self, epoch: &str) -> Option<&StateVector> {
        self.state_vectors
            .iter()
            .find(|sv| sv.epoch.as_str() == epoch)
    }
}
