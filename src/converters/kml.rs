//! KML polygon writer.
//!
//! Emits a single placemark whose outer boundary is the geographic ring, with
//! fill and outline enabled. Coordinates are written as `lon,lat,0`.

use super::GeometryExporter;
use crate::error::Result;
use crate::geometry::Point;

/// Default outline colour (opaque red, KML `aabbggrr`).
const DEFAULT_LINE_COLOR: &str = "ff0000ff";
/// Default fill colour (translucent red).
const DEFAULT_FILL_COLOR: &str = "4d0000ff";

/// KML document writer.
#[derive(Debug, Clone)]
pub struct KmlWriter {
    line_color: String,
    fill_color: String,
}

impl Default for KmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl KmlWriter {
    /// Create a writer with the default style.
    pub fn new() -> Self {
        Self {
            line_color: DEFAULT_LINE_COLOR.to_string(),
            fill_color: DEFAULT_FILL_COLOR.to_string(),
        }
    }

    /// Override the outline and fill colours (`aabbggrr` hex).
    pub fn with_colors(mut self, line: impl Into<String>, fill: impl Into<String>) -> Self {
        self.line_color = line.into();
        self.fill_color = fill.into();
        self
    }

    /// Generate the KML document for a `(lon, lat)` ring.
    pub fn to_kml(&self, name: &str, points: &[Point]) -> String {
        let mut xml = String::new();

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#);
        xml.push('\n');
        xml.push_str("  <Document>\n");
        xml.push_str(&format!("    <name>{}</name>\n", xml_escape(name)));

        xml.push_str("    <Style id=\"polygon\">\n");
        xml.push_str(&format!(
            "      <LineStyle><color>{}</color><width>2</width></LineStyle>\n",
            xml_escape(&self.line_color)
        ));
        xml.push_str(&format!(
            "      <PolyStyle><color>{}</color><fill>1</fill><outline>1</outline></PolyStyle>\n",
            xml_escape(&self.fill_color)
        ));
        xml.push_str("    </Style>\n");

        xml.push_str("    <Placemark>\n");
        xml.push_str(&format!("      <name>{}</name>\n", xml_escape(name)));
        xml.push_str("      <styleUrl>#polygon</styleUrl>\n");
        xml.push_str("      <Polygon>\n");
        xml.push_str("        <outerBoundaryIs>\n");
        xml.push_str("          <LinearRing>\n");
        xml.push_str("            <coordinates>");
        xml.push_str(&coordinates(points));
        xml.push_str("</coordinates>\n");
        xml.push_str("          </LinearRing>\n");
        xml.push_str("        </outerBoundaryIs>\n");
        xml.push_str("      </Polygon>\n");
        xml.push_str("    </Placemark>\n");
        xml.push_str("  </Document>\n");
        xml.push_str("</kml>\n");

        xml
    }
}

impl GeometryExporter for KmlWriter {
    fn extension(&self) -> &'static str {
        "kml"
    }

    fn to_bytes(&self, name: &str, points: &[Point]) -> Result<Vec<u8>> {
        Ok(self.to_kml(name, points).into_bytes())
    }
}

fn coordinates(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{},0", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape special XML characters.
fn xml_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
