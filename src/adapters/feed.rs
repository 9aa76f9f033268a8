use crate::domain::model::{
    Epoch, OemDocument, OemHeader, OemMetadata, Position, StateVector, Velocity,
};
use crate::domain::ports::FeedSource;
use crate::utils::error::{Result, TrackerError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

// 原始 XML 結構：只在解析邊界使用，之後轉換成 domain 型別

#[derive(Debug, Deserialize)]
struct RawNdm {
    oem: RawOem,
}

#[derive(Debug, Deserialize)]
struct RawOem {
    header: OemHeader,
    body: RawBody,
}

#[derive(Debug, Deserialize)]
struct RawBody {
    segment: RawSegment,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    metadata: OemMetadata,
    data: RawData,
}

#[derive(Debug, Deserialize)]
struct RawData {
    #[serde(rename = "COMMENT", default)]
    comments: Vec<String>,
    #[serde(rename = "stateVector", default)]
    state_vectors: Vec<RawStateVector>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
struct RawStateVector {
    epoch: String,
    x: RawMeasure,
    y: RawMeasure,
    z: RawMeasure,
    x_dot: RawMeasure,
    y_dot: RawMeasure,
    z_dot: RawMeasure,
}

/// `<X units="km">4</X>`，單位屬性忽略
#[derive(Debug, Deserialize)]
struct RawMeasure {
    #[serde(rename = "$text")]
    value: f64,
}

impl TryFrom<RawStateVector> for StateVector {
    type Error = TrackerError;

    fn try_from(raw: RawStateVector) -> Result<Self> {
        Ok(StateVector {
            epoch: Epoch::parse(raw.epoch.trim())?,
            position: Position {
                x: raw.x.value,
                y: raw.y.value,
                z: raw.z.value,
            },
            velocity: Velocity {
                x_dot: raw.x_dot.value,
                y_dot: raw.y_dot.value,
                z_dot: raw.z_dot.value,
            },
        })
    }
}

/// 將 OEM XML 文字解析為 `OemDocument`
pub fn parse_oem(xml: &str) -> Result<OemDocument> {
    let raw: RawNdm = quick_xml::de::from_str(xml)?;
    let segment = raw.oem.body.segment;

    let state_vectors = segment
        .data
        .state_vectors
        .into_iter()
        .map(StateVector::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(OemDocument {
        header: raw.oem.header,
        metadata: segment.metadata,
        comments: segment.data.comments,
        state_vectors,
    })
}

/// 透過 HTTP 下載 NASA 公開的 ISS OEM 檔案
#[derive(Debug, Clone)]
pub struct HttpFeedSource {
    client: Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<OemDocument> {
        tracing::debug!("Making feed request to: {}", self.url);
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch data: {}", e);
            e
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Failed to fetch data: HTTP {}", status);
            return Err(TrackerError::FeedUnavailable {
                status: status.as_u16(),
            });
        }
        tracing::info!("Successfully fetched data");

        let body = response.text().await?;
        let document = parse_oem(&body)?;

        match document.epoch_range() {
            Some((first, last)) => tracing::debug!(
                "Feed holds {} state vectors from {} to {}",
                document.state_vectors.len(),
                first,
                last
            ),
            None => tracing::warn!("Feed holds no state vectors"),
        }

        Ok(document)
    }
}
