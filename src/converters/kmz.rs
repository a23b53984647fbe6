//! KMZ writer: the KML document zipped as `doc.kml`.

use super::kml::KmlWriter;
use super::GeometryExporter;
use crate::error::Result;
use crate::geometry::Point;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Name of the KML entry inside the archive.
pub const KMZ_ENTRY: &str = "doc.kml";

/// KMZ archive writer.
#[derive(Debug, Clone, Default)]
pub struct KmzWriter {
    kml: KmlWriter,
}

impl KmzWriter {
    /// Create a writer with the default KML style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a configured KML writer.
    pub fn with_kml(kml: KmlWriter) -> Self {
        Self { kml }
    }
}

impl GeometryExporter for KmzWriter {
    fn extension(&self) -> &'static str {
        "kmz"
    }

    fn to_bytes(&self, name: &str, points: &[Point]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file(KMZ_ENTRY, options)?;
        zip.write_all(self.kml.to_kml(name, points).as_bytes())?;

        Ok(zip.finish()?.into_inner())
    }
}
