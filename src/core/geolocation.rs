use crate::domain::model::Position;
use chrono::{Datelike, NaiveDateTime, Timelike};
use map_3d::{ecef2geodetic, Ellipsoid};
use nalgebra::Vector3;
use satkit::frametransform::qgcrf2itrf_approx;
use satkit::Instant;

// feed 的位置是 EME2000 (J2000) 慣性座標；先轉到地固座標 (ITRF)，再換算 WGS84 經緯度

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    /// 緯度 (度)
    pub latitude: f64,
    /// 經度 (度)，(-180, 180]
    pub longitude: f64,
    /// WGS84 橢球面上方高度 (km)
    pub altitude: f64,
}

fn to_satkit_instant(instant: NaiveDateTime) -> Instant {
    let seconds = f64::from(instant.second()) + f64::from(instant.nanosecond()) * 1e-9;
    Instant::from_datetime(
        instant.year() as _,
        instant.month() as _,
        instant.day() as _,
        instant.hour() as _,
        instant.minute() as _,
        seconds,
    )
}

/// 慣性座標 (km) → 地固座標 (km)
pub fn inertial_to_earth_fixed(position: &Position, instant: NaiveDateTime) -> Vector3<f64> {
    let rotation = qgcrf2itrf_approx(&to_satkit_instant(instant));
    rotation * Vector3::new(position.x, position.y, position.z)
}

pub fn geodetic_position(position: &Position, instant: NaiveDateTime) -> GeodeticPosition {
    let ecef_km = inertial_to_earth_fixed(position, instant);
    let (lat, lon, alt) = ecef2geodetic(
        ecef_km.x * 1.0e3,
        ecef_km.y * 1.0e3,
        ecef_km.z * 1.0e3,
        Ellipsoid::WGS84,
    );

    GeodeticPosition {
        latitude: lat.to_degrees(),
        longitude: lon.to_degrees(),
        altitude: alt / 1.0e3,
    }
}
