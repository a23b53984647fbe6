//! Geometry exporters for reconciled polygons.
//!
//! This module writes the rings of a [`SurveyReport`] to exchange formats:
//! - **KML**: geographic ring as a styled placemark polygon
//! - **KMZ**: the same KML zipped as `doc.kml` (requires the `kmz` feature)
//! - **DXF**: any ring as a closed polyline on a named layer
//!
//! # Examples
//!
//! ```no_run
//! use survey_oxide::config::ZoneMetadata;
//! use survey_oxide::converters::export_report;
//! use survey_oxide::pipeline::SurveyPipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = std::fs::read_to_string("memorial.txt")?;
//! let report = SurveyPipeline::new().process(&text, &ZoneMetadata::with_zone(23, true))?;
//! for path in export_report(&report, "out")? {
//!     println!("wrote {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dxf;
pub mod kml;
#[cfg(feature = "kmz")]
pub mod kmz;

pub use dxf::DxfWriter;
pub use kml::KmlWriter;
#[cfg(feature = "kmz")]
pub use kmz::KmzWriter;

use crate::error::Result;
use crate::geometry::Point;
use crate::pipeline::{ProjectedLabel, SurveyReport};
use std::path::{Path, PathBuf};

/// Serializes one named ring into a file format.
pub trait GeometryExporter {
    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// Encode `points` (a closed ring) labelled `name`.
    fn to_bytes(&self, name: &str, points: &[Point]) -> Result<Vec<u8>>;

    /// Encode and write to `path`.
    fn write_to_file(&self, name: &str, points: &[Point], path: &Path) -> Result<()> {
        let bytes = self.to_bytes(name, points)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Base name of every exported file.
pub const EXPORT_STEM: &str = "poligono";

/// File name for the projected DXF, by projected label.
pub fn projected_dxf_file_name(label: ProjectedLabel) -> String {
    match label {
        ProjectedLabel::ZoneExact => format!("{}_utm.dxf", EXPORT_STEM),
        ProjectedLabel::ApproximateFallback => format!("{}_mercator_3857.dxf", EXPORT_STEM),
    }
}

/// Write the full export set for a report into `dir` (created if missing).
///
/// Produces `poligono.kml`, `poligono.kmz` (with the `kmz` feature),
/// `poligono_lonlat.dxf`, and `poligono_utm.dxf` or `poligono_mercator_3857.dxf`
/// when a projected ring exists. Returns the written paths in that order.
pub fn export_report(report: &SurveyReport, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let geographic = &report.geometry.geographic_points;
    let mut written = Vec::new();

    let path = dir.join(format!("{}.kml", EXPORT_STEM));
    KmlWriter::new().write_to_file(&report.name, geographic, &path)?;
    written.push(path);

    #[cfg(feature = "kmz")]
    {
        let path = dir.join(format!("{}.kmz", EXPORT_STEM));
        KmzWriter::new().write_to_file(&report.name, geographic, &path)?;
        written.push(path);
    }

    let path = dir.join(format!("{}_lonlat.dxf", EXPORT_STEM));
    DxfWriter::geographic().write_to_file(&report.name, geographic, &path)?;
    written.push(path);

    if let Some(projected) = &report.geometry.projected {
        let path = dir.join(projected_dxf_file_name(projected.label));
        DxfWriter::for_projected(projected.label).write_to_file(
            &report.name,
            &projected.points,
            &path,
        )?;
        written.push(path);
    }

    log::debug!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}
