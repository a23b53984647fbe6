//! Ring closure, validity repair and measurement.
//!
//! The builder accepts an ordered vertex list in one CRS and produces a closed
//! ring with its area and perimeter. Self-intersecting rings are dissolved into
//! a valid geometry with a boolean union against the empty set (the same effect
//! as the classic zero-distance buffer). Zero-area results are rejected.

use super::{path_length, Point};
use crate::config::MIN_POLYGON_POINTS;
use crate::error::{Error, Result};
use geo::{Area, BooleanOps, LineString, MultiPolygon, Polygon, Validation};
use serde::Serialize;

/// A validated, closed polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolygonResult {
    /// Ring vertices, first == last
    pub points: Vec<Point>,
    /// Always true on output
    pub is_closed: bool,
    /// Area in squared units of the input CRS (> 0)
    pub area: f64,
    /// Perimeter in units of the input CRS
    pub perimeter: f64,
}

/// Builds [`PolygonResult`]s from ordered point lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonBuilder;

impl PolygonBuilder {
    /// Close, validate (repairing if needed) and measure a ring.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] if:
    /// - fewer than 3 points are supplied
    /// - a coordinate is not finite
    /// - the ring stays invalid after repair
    /// - the resulting area is zero (collinear or duplicate points)
    ///
    /// # Examples
    ///
    /// ```
    /// use survey_oxide::geometry::{Point, PolygonBuilder};
    ///
    /// let tri = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(0.0, 3.0)];
    /// let poly = PolygonBuilder::build(&tri).unwrap();
    /// assert_eq!(poly.points.len(), 4);
    /// assert_eq!(poly.area, 6.0);
    /// assert_eq!(poly.perimeter, 12.0);
    /// ```
    pub fn build(points: &[Point]) -> Result<PolygonResult> {
        if points.len() < MIN_POLYGON_POINTS {
            return Err(invalid(
                format!("at least {} points are required", MIN_POLYGON_POINTS),
                points.len(),
            ));
        }
        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(invalid(format!("non-finite coordinate ({}, {})", bad.x, bad.y), points.len()));
        }

        let ring = close_ring(points);
        let polygon = Polygon::new(to_line_string(&ring), vec![]);

        if polygon.is_valid() {
            let area = polygon.unsigned_area();
            if area == 0.0 {
                return Err(invalid("polygon has zero area".to_string(), points.len()));
            }
            let perimeter = path_length(&ring);
            return Ok(PolygonResult {
                points: ring,
                is_closed: true,
                area,
                perimeter,
            });
        }

        log::warn!(
            "Ring with {} vertices is not a valid simple polygon, attempting repair",
            ring.len()
        );

        let repaired = MultiPolygon::new(vec![polygon]).union(&MultiPolygon::new(Vec::new()));
        if !repaired.is_valid() {
            return Err(invalid(
                "self-intersection could not be repaired".to_string(),
                points.len(),
            ));
        }

        let area = repaired.unsigned_area();
        if area == 0.0 {
            return Err(invalid("polygon has zero area".to_string(), points.len()));
        }
        let perimeter = multi_polygon_length(&repaired);

        // A repair that dissolves into one polygon replaces the ring; a split
        // into several parts keeps the surveyed vertex order.
        let points_out = match repaired.0.as_slice() {
            [single] => single.exterior().coords().map(|c| Point::from(*c)).collect(),
            _ => ring,
        };

        log::debug!(
            "Repaired polygon into {} part(s), area {:.3}",
            repaired.0.len(),
            area
        );

        Ok(PolygonResult {
            points: points_out,
            is_closed: true,
            area,
            perimeter,
        })
    }
}

/// Append the first vertex if the ring is not already closed.
fn close_ring(points: &[Point]) -> Vec<Point> {
    let mut ring = points.to_vec();
    if points.first() != points.last() {
        ring.push(points[0]);
    }
    ring
}

fn to_line_string(ring: &[Point]) -> LineString<f64> {
    LineString::from(ring.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>())
}

fn line_string_length(ls: &LineString<f64>) -> f64 {
    ls.lines().map(|l| l.dx().hypot(l.dy())).sum()
}

fn multi_polygon_length(mp: &MultiPolygon<f64>) -> f64 {
    mp.0.iter()
        .map(|poly| {
            line_string_length(poly.exterior())
                + poly.interiors().iter().map(line_string_length).sum::<f64>()
        })
        .sum()
}

fn invalid(reason: String, points: usize) -> Error {
    Error::InvalidGeometry { reason, points }
}
