// Domain layer: typed OEM records and ports (interfaces) to the feed, geocoder and clock.

pub mod model;
pub mod ports;
