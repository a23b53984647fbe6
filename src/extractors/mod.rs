//! Coordinate extraction and classification from document text.
//!
//! ```text
//! document text ──▶ CandidateExtractor ──▶ RawCandidatePairs ──▶ classify ──▶ ClassificationHint
//! ```

pub mod candidates;
pub mod classifier;
pub mod text_source;

pub use candidates::{decode_number, CandidateExtractor, RawCandidatePairs};
pub use classifier::{
    classify, classify_with_min, decide_family, BaseMode, ClassificationHint, CoordinateFamily,
};
pub use text_source::{join_pages, PlainTextSource, TextSource};
