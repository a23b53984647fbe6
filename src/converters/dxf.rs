//! ASCII DXF writer.
//!
//! Produces an R12 drawing with a LAYER table entry and one closed POLYLINE.
//! The ring's repeated closing vertex is omitted; flag 70 = 1 closes the polyline.

use super::GeometryExporter;
use crate::error::Result;
use crate::geometry::Point;
use crate::pipeline::ProjectedLabel;

/// Layer for geographic `(lon, lat)` rings.
pub const LAYER_LONLAT: &str = "POLIGONO_LONLAT";
/// Layer for zone-exact UTM rings.
pub const LAYER_UTM: &str = "POLIGONO_UTM";
/// Layer for the spherical Mercator fallback.
pub const LAYER_MERCATOR: &str = "POLIGONO_3857";

/// DXF writer for a single polygon layer.
#[derive(Debug, Clone)]
pub struct DxfWriter {
    layer: String,
    color: u8,
}

impl DxfWriter {
    /// Writer targeting an arbitrary layer (AutoCAD colour 7).
    pub fn for_layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            color: 7,
        }
    }

    /// Writer for geographic rings.
    pub fn geographic() -> Self {
        Self::for_layer(LAYER_LONLAT)
    }

    /// Writer for a projected ring, layer chosen by label.
    pub fn for_projected(label: ProjectedLabel) -> Self {
        match label {
            ProjectedLabel::ZoneExact => Self::for_layer(LAYER_UTM),
            ProjectedLabel::ApproximateFallback => Self::for_layer(LAYER_MERCATOR),
        }
    }

    /// Layer name.
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Generate the DXF text.
    pub fn to_dxf(&self, points: &[Point]) -> String {
        let mut out = String::new();

        group(&mut out, 0, "SECTION");
        group(&mut out, 2, "HEADER");
        group(&mut out, 9, "$ACADVER");
        group(&mut out, 1, "AC1009");
        group(&mut out, 0, "ENDSEC");

        group(&mut out, 0, "SECTION");
        group(&mut out, 2, "TABLES");
        group(&mut out, 0, "TABLE");
        group(&mut out, 2, "LAYER");
        group(&mut out, 70, "1");
        group(&mut out, 0, "LAYER");
        group(&mut out, 2, &self.layer);
        group(&mut out, 70, "0");
        group(&mut out, 62, &self.color.to_string());
        group(&mut out, 6, "CONTINUOUS");
        group(&mut out, 0, "ENDTAB");
        group(&mut out, 0, "ENDSEC");

        group(&mut out, 0, "SECTION");
        group(&mut out, 2, "ENTITIES");
        group(&mut out, 0, "POLYLINE");
        group(&mut out, 8, &self.layer);
        group(&mut out, 66, "1");
        group(&mut out, 70, "1");
        for p in open_ring(points) {
            group(&mut out, 0, "VERTEX");
            group(&mut out, 8, &self.layer);
            group(&mut out, 10, &p.x.to_string());
            group(&mut out, 20, &p.y.to_string());
            group(&mut out, 30, "0");
        }
        group(&mut out, 0, "SEQEND");
        group(&mut out, 8, &self.layer);
        group(&mut out, 0, "ENDSEC");

        group(&mut out, 0, "EOF");
        out
    }
}

impl GeometryExporter for DxfWriter {
    fn extension(&self) -> &'static str {
        "dxf"
    }

    fn to_bytes(&self, _name: &str, points: &[Point]) -> Result<Vec<u8>> {
        Ok(self.to_dxf(points).into_bytes())
    }
}

/// Ring without its repeated closing vertex.
fn open_ring(points: &[Point]) -> &[Point] {
    match points {
        [first, .., last] if first == last => &points[..points.len() - 1],
        _ => points,
    }
}

fn group(out: &mut String, code: u16, value: &str) {
    out.push_str(&format!("{:>3}\n{}\n", code, value));
}
