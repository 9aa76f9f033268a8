// Adapters layer: concrete implementations of the domain ports (http feed, geocoder, clock).

pub mod clock;
pub mod feed;
pub mod geocoder;

pub use clock::{FixedClock, SystemClock};
pub use feed::{parse_oem, HttpFeedSource};
pub use geocoder::NominatimGeocoder;
