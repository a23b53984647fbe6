//! Error types for the survey pipeline.
//!
//! Every pipeline failure is terminal for the current document: the caller
//! receives either a full result or exactly one of these errors.

/// Result type alias for survey pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning survey text into a polygon.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    /// Fewer than the required number of points qualified in either family
    #[error(
        "Insufficient coordinate evidence: {projected} projected and {geographic} geographic candidates (need at least 3 in one family)"
    )]
    InsufficientEvidence {
        /// Number of plausible projected (easting, northing) pairs
        projected: usize,
        /// Number of plausible geographic (lon, lat) pairs
        geographic: usize,
    },

    /// The point list cannot form a usable simple polygon
    #[error("Invalid geometry ({points} points): {reason}")]
    InvalidGeometry {
        /// Why the ring was rejected
        reason: String,
        /// Number of points supplied to the builder
        points: usize,
    },

    /// Projected coordinates were detected but no zone was supplied
    #[error("Projected coordinates detected but '{field}' was not supplied")]
    MissingZoneMetadata {
        /// Name of the missing request field
        field: &'static str,
    },

    /// UTM zone number outside 1..=60
    #[error("Invalid UTM zone: {0} (expected 1-60)")]
    InvalidZone(u8),

    /// A coordinate lies outside the domain of a projection
    #[error("Coordinate ({x}, {y}) is outside the domain of {crs}")]
    ProjectionOutOfRange {
        /// First ordinate
        x: f64,
        /// Second ordinate
        y: f64,
        /// CRS label
        crs: String,
    },

    /// Malformed request configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// KMZ archive error
    #[error("Zip error: {0}")]
    Zip(String),
}

impl Error {
    /// Whether the caller can fix this error by supplying more input and retrying.
    ///
    /// Input is deterministic, so everything else would fail again identically.
    pub fn is_user_resolvable(&self) -> bool {
        matches!(self, Error::MissingZoneMetadata { .. })
    }

    /// Message suitable for showing to the person who submitted the document.
    pub fn user_message(&self) -> String {
        match self {
            Error::InsufficientEvidence { .. } => {
                "Could not recognize enough coordinates in the document (at least 3 points are needed). Please provide a clearer document.".to_string()
            },
            Error::MissingZoneMetadata { field } => {
                format!("UTM coordinates were detected but '{}' was not provided. Example: 23 (SP).", field)
            },
            other => other.to_string(),
        }
    }
}

#[cfg(feature = "kmz")]
impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_evidence_error() {
        let err = Error::InsufficientEvidence {
            projected: 1,
            geographic: 2,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("1 projected"));
        assert!(msg.contains("2 geographic"));
    }

    #[test]
    fn test_invalid_geometry_error() {
        let err = Error::InvalidGeometry {
            reason: "zero area".to_string(),
            points: 4,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("4 points"));
        assert!(msg.contains("zero area"));
    }

    #[test]
    fn test_missing_zone_is_only_resolvable_error() {
        let missing = Error::MissingZoneMetadata { field: "utm_zone" };
        assert!(missing.is_user_resolvable());
        assert!(missing.to_string().contains("utm_zone"));
        assert!(missing.user_message().contains("23 (SP)"));

        let invalid = Error::InvalidGeometry {
            reason: "self-intersection".to_string(),
            points: 5,
        };
        assert!(!invalid.is_user_resolvable());
        assert!(!Error::InvalidZone(61).is_user_resolvable());
    }

    #[test]
    fn test_insufficient_evidence_user_message() {
        let err = Error::InsufficientEvidence {
            projected: 0,
            geographic: 2,
        };
        assert!(err.user_message().contains("at least 3 points"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
