//! Geographic helpers for sighting radius search.
//!
//! Distances use the haversine formula on a spherical Earth. The bounding
//! box is a cheap prefilter the repository applies before computing exact
//! great-circle distances in SQL.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Largest accepted search radius.
pub const MAX_RADIUS_KM: f64 = 500.0;

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Axis-aligned box of latitude/longitude bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

/// Great-circle distance between two points, in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Compute a bounding box that contains every point within `radius_km` of
/// `center`.
///
/// Near the poles, or when the box would cross the antimeridian, the
/// longitude range widens to the full [-180, 180] span. Over-inclusion is
/// fine: the exact distance check runs afterwards.
pub fn bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = (radius_km / EARTH_RADIUS_KM).to_degrees();
    let min_latitude = (center.latitude - lat_delta).max(MIN_LATITUDE);
    let max_latitude = (center.latitude + lat_delta).min(MAX_LATITUDE);

    // Half-width at the latitude where the circle reaches furthest east,
    // which lies poleward of the center.
    let ratio = (radius_km / EARTH_RADIUS_KM).sin() / center.latitude.to_radians().cos();
    if min_latitude <= MIN_LATITUDE || max_latitude >= MAX_LATITUDE || !(0.0..1.0).contains(&ratio) {
        return BoundingBox {
            min_latitude,
            max_latitude,
            min_longitude: MIN_LONGITUDE,
            max_longitude: MAX_LONGITUDE,
        };
    }

    let lon_delta = ratio.asin().to_degrees();
    let min_longitude = center.longitude - lon_delta;
    let max_longitude = center.longitude + lon_delta;
    if min_longitude < MIN_LONGITUDE || max_longitude > MAX_LONGITUDE {
        return BoundingBox {
            min_latitude,
            max_latitude,
            min_longitude: MIN_LONGITUDE,
            max_longitude: MAX_LONGITUDE,
        };
    }

    BoundingBox {
        min_latitude,
        max_latitude,
        min_longitude,
        max_longitude,
    }
}
