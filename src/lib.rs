// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::redundant_guards)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # Survey Oxide
//!
//! Turns the linearized text of a land-survey document into a closed polygon
//! expressed consistently in geographic and projected coordinates.
//!
//! ## Pipeline
//!
//! - **Candidate extraction**: regex scan for projected `(easting, northing)`
//!   and geographic `(lon, lat)` pairs, both decimal conventions, plausibility
//!   windows, unsigned-coordinate recovery
//! - **Classification**: an auditable decision table over candidate counts
//! - **Polygon building**: ring closure, self-intersection repair, area and perimeter
//! - **Reconciliation**: zone-exact UTM transforms, with a labelled spherical
//!   Mercator fallback when the zone is unknown
//! - **Export**: KML, KMZ (feature `kmz`) and DXF writers
//!
//! ## Quick Start
//!
//! ```
//! use survey_oxide::config::ZoneMetadata;
//! use survey_oxide::pipeline::SurveyPipeline;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "E 320000,7395000  E 320100,7395000  E 320050,7395100";
//! let meta = ZoneMetadata::with_zone(23, true);
//!
//! let report = SurveyPipeline::new().process(text, &meta)?;
//! assert_eq!(report.points_count, 4);
//! assert!(report.area > 0.0);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Error handling
pub mod error;

pub mod config;

// Core pipeline stages
pub mod extractors;
pub mod geometry;
pub mod pipeline;

// Coordinate reference systems
pub mod crs;

// Output formats
pub mod converters;

// Re-exports
pub use config::{GeographicWindow, PipelineConfig, ZoneMetadata};
pub use error::{Error, Result};
pub use pipeline::{
    CoordinateReconciler, ProjectedLabel, ReconciledGeometry, SurveyPipeline, SurveyReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
