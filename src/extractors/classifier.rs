//! Decide which coordinate family carries the survey points.
//!
//! The decision is a pure function of the two candidate counts:
//!
//! | projected          | geographic | hint         |
//! |--------------------|------------|--------------|
//! | >= 3 and >= geo    | any        | `Projected`  |
//! | otherwise          | >= 3       | `Geographic` |
//! | otherwise          | < 3        | `Unknown`    |
//!
//! Projected pairs need longer digit runs and are less likely to be noise, so
//! ties go to them.

use super::candidates::RawCandidatePairs;
use crate::config::MIN_POLYGON_POINTS;
use crate::error::{Error, Result};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Which family the classifier trusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateFamily {
    /// UTM-like `(easting, northing)`
    Projected,
    /// `(lon, lat)`
    Geographic,
    /// Not enough evidence in either family
    Unknown,
}

/// The authoritative representation of a polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseMode {
    /// Points came from projected candidates
    Projected,
    /// Points came from geographic candidates
    Geographic,
}

/// Classifier output: the decision plus the evidence it was derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationHint {
    /// Chosen family
    pub family: CoordinateFamily,
    /// Candidates the decision was based on
    pub candidates: RawCandidatePairs,
}

impl ClassificationHint {
    /// Take the points of the chosen family.
    ///
    /// # Errors
    ///
    /// [`Error::InsufficientEvidence`] when the hint is `Unknown`.
    pub fn into_base_points(self) -> Result<(BaseMode, Vec<Point>)> {
        let RawCandidatePairs {
            projected,
            geographic,
        } = self.candidates;
        match self.family {
            CoordinateFamily::Projected => Ok((BaseMode::Projected, projected)),
            CoordinateFamily::Geographic => Ok((BaseMode::Geographic, geographic)),
            CoordinateFamily::Unknown => Err(Error::InsufficientEvidence {
                projected: projected.len(),
                geographic: geographic.len(),
            }),
        }
    }
}

/// Decision table over candidate counts.
///
/// # Examples
///
/// ```
/// use survey_oxide::extractors::{decide_family, CoordinateFamily};
///
/// assert_eq!(decide_family(3, 3, 3), CoordinateFamily::Projected);
/// assert_eq!(decide_family(2, 5, 3), CoordinateFamily::Geographic);
/// assert_eq!(decide_family(2, 2, 3), CoordinateFamily::Unknown);
/// ```
pub fn decide_family(projected: usize, geographic: usize, min_points: usize) -> CoordinateFamily {
    if projected >= min_points && projected >= geographic {
        CoordinateFamily::Projected
    } else if geographic >= min_points {
        CoordinateFamily::Geographic
    } else {
        CoordinateFamily::Unknown
    }
}

/// Classify extracted candidates with the default 3-point minimum.
pub fn classify(candidates: RawCandidatePairs) -> ClassificationHint {
    classify_with_min(candidates, MIN_POLYGON_POINTS)
}

/// Classify extracted candidates with an explicit minimum point count.
pub fn classify_with_min(candidates: RawCandidatePairs, min_points: usize) -> ClassificationHint {
    let family = decide_family(candidates.projected.len(), candidates.geographic.len(), min_points);
    log::debug!(
        "Classified as {:?} ({} projected, {} geographic)",
        family,
        candidates.projected.len(),
        candidates.geographic.len()
    );
    ClassificationHint { family, candidates }
}
