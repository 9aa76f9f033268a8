pub mod geolocation;
pub mod kinematics;
pub mod nearest;
pub mod tracker;

pub use crate::domain::model::{Epoch, OemDocument, StateVector};
pub use crate::domain::ports::{Clock, ConfigProvider, FeedSource, Geocoder};
pub use crate::utils::error::Result;
