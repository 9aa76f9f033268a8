use crate::adapters::{HttpFeedSource, NominatimGeocoder};
use crate::core::tracker::IssTracker;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use reqwest::Client;
use std::time::Duration;

pub type HttpTracker = IssTracker<HttpFeedSource, NominatimGeocoder>;

/// 依配置建立共用的 HTTP client (feed 與 geocoder 共用連線池)
pub fn http_client(config: &dyn ConfigProvider) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds()))
        .user_agent(config.user_agent())
        .build()?;
    Ok(client)
}

pub fn build_tracker(config: &dyn ConfigProvider) -> Result<HttpTracker> {
    let client = http_client(config)?;
    let feed = HttpFeedSource::new(client.clone(), config.feed_url());
    let geocoder = NominatimGeocoder::new(client, config.geocoder_url());

    tracing::debug!(
        "Tracker configured with feed {} and geocoder {}",
        feed.url(),
        config.geocoder_url()
    );
    Ok(IssTracker::new(feed, geocoder))
}
