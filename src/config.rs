//! Configuration for survey processing.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Minimum number of points needed to form a polygon.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Plausibility window for geographic coordinates.
///
/// The default covers the region the extraction heuristics were tuned for
/// (roughly Brazil): `lat ∈ [-35, 6]`, `lon ∈ [-75, -30]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicWindow {
    /// Southern latitude bound (degrees)
    pub lat_min: f64,
    /// Northern latitude bound (degrees)
    pub lat_max: f64,
    /// Western longitude bound (degrees)
    pub lon_min: f64,
    /// Eastern longitude bound (degrees)
    pub lon_max: f64,
}

impl Default for GeographicWindow {
    fn default() -> Self {
        Self {
            lat_min: -35.0,
            lat_max: 6.0,
            lon_min: -75.0,
            lon_max: -30.0,
        }
    }
}

impl GeographicWindow {
    /// Check whether a latitude falls inside the window (inclusive).
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.lat_min && lat <= self.lat_max
    }

    /// Check whether a longitude falls inside the window (inclusive).
    pub fn contains_lon(&self, lon: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max
    }
}

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Plausibility window for geographic candidates.
    pub window: GeographicWindow,

    /// Retry rejected geographic pairs with their unsigned tokens negated.
    pub recover_unsigned: bool,

    /// Minimum candidate count for a family to be trusted.
    pub min_points: usize,

    /// Project geographic polygons to spherical Mercator when no UTM zone is known.
    pub mercator_fallback: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            window: GeographicWindow::default(),
            recover_unsigned: true,
            min_points: MIN_POLYGON_POINTS,
            mercator_fallback: true,
        }
    }

    /// Use a different geographic plausibility window.
    pub fn with_window(mut self, window: GeographicWindow) -> Self {
        self.window = window;
        self
    }

    /// Enable or disable unsigned-coordinate recovery.
    pub fn with_recover_unsigned(mut self, enable: bool) -> Self {
        self.recover_unsigned = enable;
        self
    }

    /// Enable or disable the spherical Mercator fallback.
    pub fn with_mercator_fallback(mut self, enable: bool) -> Self {
        self.mercator_fallback = enable;
        self
    }
}

fn default_south() -> bool {
    true
}

fn default_name() -> String {
    "Poligono".to_string()
}

/// Caller-supplied metadata for one document.
///
/// Deserialized from the request configuration JSON, e.g.
/// `{"utm_zone": 23, "utm_south": true, "name": "Lote 12"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMetadata {
    /// UTM zone number (1-60), if known
    #[serde(default)]
    pub utm_zone: Option<u8>,

    /// Southern hemisphere variant of the zone
    #[serde(default = "default_south")]
    pub utm_south: bool,

    /// Label for exported geometry; not used by geometry logic
    #[serde(default = "default_name")]
    pub name: String,
}

impl Default for ZoneMetadata {
    fn default() -> Self {
        Self {
            utm_zone: None,
            utm_south: default_south(),
            name: default_name(),
        }
    }
}

impl ZoneMetadata {
    /// Metadata for a known zone.
    pub fn with_zone(zone: u8, south: bool) -> Self {
        Self {
            utm_zone: Some(zone),
            utm_south: south,
            ..Default::default()
        }
    }

    /// The usable zone number; `0` counts as no zone.
    pub fn zone(&self) -> Option<u8> {
        self.utm_zone.filter(|&z| z != 0)
    }

    /// Set the export label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parse the request configuration string. An empty string yields defaults.
    pub fn from_json(cfg: &str) -> Result<Self> {
        if cfg.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(cfg).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_bounds() {
        let w = GeographicWindow::default();
        assert!(w.contains_lat(-35.0));
        assert!(w.contains_lat(6.0));
        assert!(!w.contains_lat(6.1));
        assert!(w.contains_lon(-75.0));
        assert!(w.contains_lon(-30.0));
        assert!(!w.contains_lon(-29.9));
    }

    #[test]
    fn test_pipeline_config_builder() {
        let cfg = PipelineConfig::new().with_recover_unsigned(false);
        assert!(!cfg.recover_unsigned);
        assert!(cfg.mercator_fallback);
        assert_eq!(cfg.min_points, 3);

        let cfg = PipelineConfig::default().with_mercator_fallback(false);
        assert!(!cfg.mercator_fallback);
    }

    #[test]
    fn test_zone_zero_is_unset() {
        let meta = ZoneMetadata::from_json(r#"{"utm_zone": 0}"#).unwrap();
        assert_eq!(meta.utm_zone, Some(0));
        assert_eq!(meta.zone(), None);
        assert_eq!(ZoneMetadata::with_zone(23, true).zone(), Some(23));
        assert_eq!(ZoneMetadata::default().zone(), None);
    }

    #[test]
    fn test_metadata_from_empty_json() {
        let meta = ZoneMetadata::from_json("").unwrap();
        assert_eq!(meta.utm_zone, None);
        assert!(meta.utm_south);
        assert_eq!(meta.name, "Poligono");
    }

    #[test]
    fn test_metadata_from_json() {
        let meta = ZoneMetadata::from_json(r#"{"utm_zone": 23, "utm_south": false, "name": "Lote"}"#)
            .unwrap();
        assert_eq!(meta.utm_zone, Some(23));
        assert!(!meta.utm_south);
        assert_eq!(meta.name, "Lote");
    }

    #[test]
    fn test_metadata_partial_json_keeps_defaults() {
        let meta = ZoneMetadata::from_json(r#"{"utm_zone": 22}"#).unwrap();
        assert_eq!(meta.utm_zone, Some(22));
        assert!(meta.utm_south);
    }

    #[test]
    fn test_metadata_malformed_json() {
        let err = ZoneMetadata::from_json("{utm_zone:").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
