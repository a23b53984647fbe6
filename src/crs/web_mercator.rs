//! Spherical ("Web") Mercator, EPSG:3857.
//!
//! Used only as a metric fallback when no UTM zone is known. Distances and
//! areas are inflated by `1 / cos(lat)`, so output is approximate.

use super::transverse_mercator::WGS84_A;

/// Latitude limit where the projection square closes (degrees).
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Project `(lon, lat)` in degrees to `(x, y)` in metres.
pub fn forward(lon: f64, lat: f64) -> (f64, f64) {
    let x = WGS84_A * lon.to_radians();
    let y = WGS84_A * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln();
    (x, y)
}

/// Unproject `(x, y)` in metres to `(lon, lat)` in degrees.
pub fn inverse(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / WGS84_A).to_degrees();
    let lat = (2.0 * (y / WGS84_A).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    (lon, lat)
}
