//! Geometric primitives for survey polygons.
//!
//! Points are plain `(x, y)` pairs in whatever CRS the surrounding stage works
//! in: `(easting, northing)` for projected data, `(lon, lat)` for geographic.

mod polygon;

pub use polygon::{PolygonBuilder, PolygonResult};

use serde::{Deserialize, Serialize};

/// A 2D point in a single, stage-defined CRS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (easting or longitude)
    pub x: f64,
    /// Y coordinate (northing or latitude)
    pub y: f64,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use survey_oxide::geometry::Point;
    ///
    /// let point = Point::new(320000.0, 7395000.0);
    /// assert_eq!(point.x, 320000.0);
    /// assert_eq!(point.y, 7395000.0);
    /// ```
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.x, y: p.y }
    }
}

impl From<geo::Coord<f64>> for Point {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { x: c.x, y: c.y }
    }
}

/// Compute the Euclidean distance between two points.
///
/// # Examples
///
/// ```
/// use survey_oxide::geometry::{Point, euclidean_distance};
///
/// let p1 = Point::new(0.0, 0.0);
/// let p2 = Point::new(3.0, 4.0);
///
/// assert_eq!(euclidean_distance(&p1, &p2), 5.0);
/// ```
pub fn euclidean_distance(p1: &Point, p2: &Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Sum of segment lengths along a sequence of points.
pub fn path_length(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| euclidean_distance(&w[0], &w[1]))
        .sum()
}

/// Arithmetic mean of the coordinates.
///
/// Not an area-weighted centroid. On a closed ring the repeated first vertex
/// is counted twice. Returns `None` for an empty slice.
///
/// # Examples
///
/// ```
/// use survey_oxide::geometry::{Point, mean_center};
///
/// let pts = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(1.0, 3.0)];
/// let c = mean_center(&pts).unwrap();
/// assert_eq!(c, Point::new(1.0, 1.0));
/// ```
pub fn mean_center(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}
