//! Coordinate reference systems and point transforms.
//!
//! The pipeline only ever converts between geographic WGS84 `(lon, lat)` and a
//! planar CRS, so the transform interface is two operations keyed by CRS:
//!
//! - [`CrsTransformer::forward`]: geographic → `crs`
//! - [`CrsTransformer::inverse`]: `crs` → geographic
//!
//! [`ProjectionEngine`] is the stateless built-in implementation. Tests and
//! callers with their own geodesy stack can substitute another implementation.

pub mod transverse_mercator;
pub mod web_mercator;

pub use transverse_mercator::{central_meridian, zone_for_longitude, TransverseMercator};

use crate::error::{Error, Result};
use crate::geometry::Point;
use serde::{Serialize, Serializer};
use std::fmt;

/// Highest UTM zone number.
pub const MAX_UTM_ZONE: u8 = 60;

/// A coordinate reference system the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crs {
    /// Geographic WGS84, `(lon, lat)` in degrees (EPSG:4326)
    Wgs84,
    /// WGS84 / UTM zone, `(easting, northing)` in metres
    Utm {
        /// Zone number, 1-60
        zone: u8,
        /// Southern hemisphere variant (false northing 10,000 km)
        south: bool,
    },
    /// Spherical Mercator, `(x, y)` in metres (EPSG:3857)
    WebMercator,
}

impl Crs {
    /// A validated UTM CRS.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidZone`] when `zone` is not in 1..=60.
    ///
    /// # Examples
    ///
    /// ```
    /// use survey_oxide::crs::Crs;
    ///
    /// let crs = Crs::utm(23, true).unwrap();
    /// assert_eq!(crs.epsg(), 32723);
    /// assert!(Crs::utm(0, true).is_err());
    /// ```
    pub fn utm(zone: u8, south: bool) -> Result<Self> {
        validate_zone(zone)?;
        Ok(Crs::Utm { zone, south })
    }

    /// EPSG code of this CRS.
    pub fn epsg(&self) -> u32 {
        match *self {
            Crs::Wgs84 => 4326,
            Crs::Utm { zone, south } => {
                let base = if south { 32700 } else { 32600 };
                base + u32::from(zone)
            },
            Crs::WebMercator => 3857,
        }
    }

    /// True for planar (metric) systems.
    pub fn is_projected(&self) -> bool {
        !matches!(self, Crs::Wgs84)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

impl Serialize for Crs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn validate_zone(zone: u8) -> Result<()> {
    if (1..=MAX_UTM_ZONE).contains(&zone) {
        Ok(())
    } else {
        Err(Error::InvalidZone(zone))
    }
}

/// Pointwise transforms between geographic WGS84 and another CRS.
///
/// Implementations must be stateless (or internally synchronized): one
/// transformer is shared by concurrent pipeline runs.
pub trait CrsTransformer: Send + Sync {
    /// Transform a geographic `(lon, lat)` point into `target`.
    fn forward(&self, point: Point, target: Crs) -> Result<Point>;

    /// Transform a point expressed in `source` into geographic `(lon, lat)`.
    fn inverse(&self, point: Point, source: Crs) -> Result<Point>;

    /// Order-preserving [`Self::forward`] over a sequence.
    fn forward_all(&self, points: &[Point], target: Crs) -> Result<Vec<Point>> {
        points.iter().map(|p| self.forward(*p, target)).collect()
    }

    /// Order-preserving [`Self::inverse`] over a sequence.
    fn inverse_all(&self, points: &[Point], source: Crs) -> Result<Vec<Point>> {
        points.iter().map(|p| self.inverse(*p, source)).collect()
    }
}

/// Built-in WGS84 transform engine (UTM via Krüger series, spherical Mercator).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionEngine;

impl ProjectionEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self
    }
}

impl CrsTransformer for ProjectionEngine {
    fn forward(&self, point: Point, target: Crs) -> Result<Point> {
        let (lon, lat) = (point.x, point.y);
        let in_domain = point.is_finite() && lat.abs() <= 90.0;
        if !in_domain {
            return Err(out_of_range(point, Crs::Wgs84));
        }

        let (x, y) = match target {
            Crs::Wgs84 => (lon, lat),
            Crs::Utm { zone, south } => {
                validate_zone(zone)?;
                // TM is undefined at the poles and a quarter-turn from the central meridian
                let dlon = (lon - central_meridian(zone) + 180.0).rem_euclid(360.0) - 180.0;
                if lat.abs() >= 90.0 || dlon.abs() >= 90.0 {
                    return Err(out_of_range(point, target));
                }
                TransverseMercator::utm(zone, south).forward(lon, lat)
            },
            Crs::WebMercator => {
                if lat.abs() > web_mercator::MAX_LATITUDE {
                    return Err(out_of_range(point, target));
                }
                web_mercator::forward(lon, lat)
            },
        };

        finite_point(x, y, point, target)
    }

    fn inverse(&self, point: Point, source: Crs) -> Result<Point> {
        if !point.is_finite() {
            return Err(out_of_range(point, source));
        }

        let (lon, lat) = match source {
            Crs::Wgs84 => (point.x, point.y),
            Crs::Utm { zone, south } => {
                validate_zone(zone)?;
                TransverseMercator::utm(zone, south).inverse(point.x, point.y)
            },
            Crs::WebMercator => web_mercator::inverse(point.x, point.y),
        };

        finite_point(lon, lat, point, source)
    }
}

fn finite_point(x: f64, y: f64, input: Point, crs: Crs) -> Result<Point> {
    let out = Point::new(x, y);
    if out.is_finite() {
        Ok(out)
    } else {
        Err(out_of_range(input, crs))
    }
}

fn out_of_range(point: Point, crs: Crs) -> Error {
    Error::ProjectionOutOfRange {
        x: point.x,
        y: point.y,
        crs: crs.to_string(),
    }
}
