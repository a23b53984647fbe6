//! Survey text → reconciled polygon pipeline.
//!
//! ```text
//! document text
//!     ↓
//! [CandidateExtractor]  (text → RawCandidatePairs)
//!     ↓
//! [classify]            (counts → ClassificationHint)
//!     ↓
//! [PolygonBuilder]      (base points → PolygonResult)
//!     ↓
//! [CoordinateReconciler] (base polygon + zone metadata → ReconciledGeometry)
//!     ↓
//! SurveyReport
//! ```
//!
//! Each stage consumes only the output of the stage before it. The first
//! failing stage aborts the run; no partial report is produced.

pub mod reconciler;

pub use reconciler::{CoordinateReconciler, ProjectedLabel, ProjectedPoints, ReconciledGeometry};

use crate::config::{PipelineConfig, ZoneMetadata};
use crate::crs::{zone_for_longitude, CrsTransformer, ProjectionEngine};
use crate::error::{Error, Result};
use crate::extractors::{classify_with_min, BaseMode, CandidateExtractor, TextSource};
use crate::geometry::{Point, PolygonBuilder};
use serde::Serialize;

/// Arithmetic-mean position of the geographic ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCenter {
    /// Longitude (degrees)
    pub lon: f64,
    /// Latitude (degrees)
    pub lat: f64,
}

impl From<Point> for GeoCenter {
    fn from(p: Point) -> Self {
        Self { lon: p.x, lat: p.y }
    }
}

/// Everything the reporting layer needs about one processed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveyReport {
    /// Export label from the request metadata
    pub name: String,
    /// Authoritative representation
    pub detected: BaseMode,
    /// Number of ring vertices (closing vertex included)
    pub points_count: usize,
    /// Closed `(lon, lat)` ring
    pub points: Vec<Point>,
    /// Coordinate mean of `points`
    pub center: GeoCenter,
    /// Area in squared units of the base CRS
    pub area: f64,
    /// Perimeter in units of the base CRS
    pub perimeter: f64,
    /// UTM zone containing the center, offered when the caller gave none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_utm_zone: Option<u8>,
    /// All representations of the polygon
    pub geometry: ReconciledGeometry,
}

/// Runs the four pipeline stages for one document at a time.
///
/// Holds no per-document state; a single instance can be shared between threads.
pub struct SurveyPipeline<T: CrsTransformer = ProjectionEngine> {
    config: PipelineConfig,
    extractor: CandidateExtractor,
    reconciler: CoordinateReconciler<T>,
}

impl SurveyPipeline<ProjectionEngine> {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self::with_transformer(config, ProjectionEngine::new())
    }
}

impl Default for SurveyPipeline<ProjectionEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CrsTransformer> SurveyPipeline<T> {
    /// Create a pipeline backed by a custom CRS transformer.
    pub fn with_transformer(config: PipelineConfig, transformer: T) -> Self {
        let extractor = CandidateExtractor::new(&config);
        let reconciler =
            CoordinateReconciler::new(transformer).with_mercator_fallback(config.mercator_fallback);
        Self {
            config,
            extractor,
            reconciler,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Turn one document's text into a [`SurveyReport`].
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientEvidence`] when neither family yields enough points
    /// - [`Error::InvalidGeometry`] when the points do not form a usable polygon
    /// - [`Error::MissingZoneMetadata`] when projected points arrive without a zone
    /// - [`Error::InvalidZone`] / [`Error::ProjectionOutOfRange`] from the CRS step
    pub fn process(&self, text: &str, meta: &ZoneMetadata) -> Result<SurveyReport> {
        let candidates = self.extractor.extract(text);
        let (base, points) = classify_with_min(candidates, self.config.min_points).into_base_points()?;

        log::debug!("Building {:?} polygon from {} points", base, points.len());
        let polygon = PolygonBuilder::build(&points)?;

        let geometry = self.reconciler.reconcile(&polygon, base, meta)?;
        let center: GeoCenter = geometry
            .center()
            .ok_or_else(|| Error::InvalidGeometry {
                reason: "empty geographic ring".to_string(),
                points: 0,
            })?
            .into();

        let suggested_utm_zone = match meta.zone() {
            None => Some(zone_for_longitude(center.lon)),
            Some(_) => None,
        };

        log::info!(
            "Processed '{}': {:?} base, {} vertices, area {:.3}",
            meta.name,
            base,
            polygon.points.len(),
            polygon.area
        );

        Ok(SurveyReport {
            name: meta.name.clone(),
            detected: base,
            points_count: geometry.geographic_points.len(),
            points: geometry.geographic_points.clone(),
            center,
            area: polygon.area,
            perimeter: polygon.perimeter,
            suggested_utm_zone,
            geometry,
        })
    }

    /// Pull text from a [`TextSource`] and process it.
    pub fn process_source<S: TextSource + ?Sized>(
        &self,
        source: &mut S,
        meta: &ZoneMetadata,
    ) -> Result<SurveyReport> {
        let text = source.extract_text()?;
        self.process(&text, meta)
    }
}
