//! Multi-CRS reconciliation of a validated polygon.
//!
//! Given the base representation chosen by the classifier and the caller's zone
//! metadata, produce a geographic ring (always) and a metric ring (whenever one
//! can be derived):
//!
//! | base       | zone given | geographic        | projected                    |
//! |------------|------------|-------------------|------------------------------|
//! | geographic | yes        | polygon points    | forward to UTM, `zone-exact` |
//! | geographic | no         | polygon points    | forward to EPSG:3857, approx |
//! | projected  | yes        | inverse from UTM  | polygon points, `zone-exact` |
//! | projected  | no         | error             | `MissingZoneMetadata`        |

use crate::config::ZoneMetadata;
use crate::crs::{Crs, CrsTransformer, ProjectionEngine};
use crate::error::{Error, Result};
use crate::extractors::BaseMode;
use crate::geometry::{mean_center, Point, PolygonResult};
use serde::Serialize;

/// How trustworthy the projected ring is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectedLabel {
    /// Computed in the caller-supplied UTM zone
    #[serde(rename = "zone-exact")]
    ZoneExact,
    /// Global spherical Mercator stand-in; metric but distorted
    #[serde(rename = "approximate-web-mercator")]
    ApproximateFallback,
}

impl ProjectedLabel {
    /// True only for [`ProjectedLabel::ZoneExact`].
    pub fn is_exact(&self) -> bool {
        matches!(self, ProjectedLabel::ZoneExact)
    }
}

/// A projected ring and the CRS it is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedPoints {
    /// CRS of `points`
    pub crs: Crs,
    /// Exact zone or fallback
    pub label: ProjectedLabel,
    /// Closed ring, same order as the geographic ring
    pub points: Vec<Point>,
}

/// The polygon in every representation the caller can use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledGeometry {
    /// Which representation was authoritative
    pub base_mode: BaseMode,
    /// Closed `(lon, lat)` ring
    pub geographic_points: Vec<Point>,
    /// Metric ring, absent only when no zone was given and the fallback is disabled
    pub projected: Option<ProjectedPoints>,
}

impl ReconciledGeometry {
    /// Label of the projected ring, if there is one.
    pub fn projected_label(&self) -> Option<ProjectedLabel> {
        self.projected.as_ref().map(|p| p.label)
    }

    /// Arithmetic mean of the geographic ring's coordinates (closing vertex included).
    pub fn center(&self) -> Option<Point> {
        mean_center(&self.geographic_points)
    }
}

/// Turns a base-CRS polygon into a [`ReconciledGeometry`].
#[derive(Debug, Clone)]
pub struct CoordinateReconciler<T: CrsTransformer = ProjectionEngine> {
    transformer: T,
    mercator_fallback: bool,
}

impl Default for CoordinateReconciler<ProjectionEngine> {
    fn default() -> Self {
        Self::new(ProjectionEngine::new())
    }
}

impl<T: CrsTransformer> CoordinateReconciler<T> {
    /// Create a reconciler backed by the given transformer.
    pub fn new(transformer: T) -> Self {
        Self {
            transformer,
            mercator_fallback: true,
        }
    }

    /// Enable or disable the spherical Mercator fallback for geographic input without a zone.
    pub fn with_mercator_fallback(mut self, enable: bool) -> Self {
        self.mercator_fallback = enable;
        self
    }

    /// The transformer in use.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// Reconcile `polygon`, whose points are in the CRS described by `base`.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingZoneMetadata`] when `base` is projected and no zone was given (or zone `0`)
    /// - [`Error::InvalidZone`] when the given zone is outside 1..=60
    /// - [`Error::ProjectionOutOfRange`] when a point cannot be transformed
    pub fn reconcile(
        &self,
        polygon: &PolygonResult,
        base: BaseMode,
        meta: &ZoneMetadata,
    ) -> Result<ReconciledGeometry> {
        match base {
            BaseMode::Geographic => self.from_geographic(polygon, meta),
            BaseMode::Projected => self.from_projected(polygon, meta),
        }
    }

    fn from_geographic(
        &self,
        polygon: &PolygonResult,
        meta: &ZoneMetadata,
    ) -> Result<ReconciledGeometry> {
        let geographic_points = polygon.points.clone();

        let projected = match meta.zone() {
            Some(zone) => {
                let crs = Crs::utm(zone, meta.utm_south)?;
                Some(ProjectedPoints {
                    crs,
                    label: ProjectedLabel::ZoneExact,
                    points: self.transformer.forward_all(&geographic_points, crs)?,
                })
            },
            None if self.mercator_fallback => {
                log::info!(
                    "No UTM zone supplied; projecting {} points to {} as an approximation",
                    geographic_points.len(),
                    Crs::WebMercator
                );
                Some(ProjectedPoints {
                    crs: Crs::WebMercator,
                    label: ProjectedLabel::ApproximateFallback,
                    points: self
                        .transformer
                        .forward_all(&geographic_points, Crs::WebMercator)?,
                })
            },
            None => None,
        };

        Ok(ReconciledGeometry {
            base_mode: BaseMode::Geographic,
            geographic_points,
            projected,
        })
    }

    fn from_projected(
        &self,
        polygon: &PolygonResult,
        meta: &ZoneMetadata,
    ) -> Result<ReconciledGeometry> {
        let zone = meta
            .zone()
            .ok_or(Error::MissingZoneMetadata { field: "utm_zone" })?;
        let crs = Crs::utm(zone, meta.utm_south)?;

        let geographic_points = self.transformer.inverse_all(&polygon.points, crs)?;

        Ok(ReconciledGeometry {
            base_mode: BaseMode::Projected,
            geographic_points,
            projected: Some(ProjectedPoints {
                crs,
                label: ProjectedLabel::ZoneExact,
                points: polygon.points.clone(),
            }),
        })
    }
}
