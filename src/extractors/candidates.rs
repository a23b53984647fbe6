//! Coordinate-pair candidate extraction from linearized document text.
//!
//! Two independent pattern families scan the same text:
//!
//! - **Projected**: an easting with 6-7 integer digits next to a northing with
//!   6-8 integer digits (`320000 7395000`, `320.000,00;7.395.000,00`).
//! - **Geographic**: two tokens of 1-3 integer digits with an optional sign and
//!   a dot or comma fractional part (`-23.5505, -46.6333`, `-23,5505 -46,6333`).
//!
//! Pairs are separated by a comma, semicolon or whitespace. Matches outside the
//! plausibility ranges are dropped silently; extraction never fails.

use crate::config::{GeographicWindow, PipelineConfig};
use crate::geometry::Point;
use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    /// Easting (6-7 digits) then northing (6-8 digits), plain or dot-grouped with a decimal comma
    static ref RE_PROJECTED_PAIR: Regex = Regex::new(
        r"\b(?P<e>\d\.\d{3}\.\d{3},\d+|\d{3}\.\d{3},\d+|\d{6,7}(?:\.\d+)?)\b\s*[,;\s]\s*\b(?P<n>\d{1,2}\.\d{3}\.\d{3},\d+|\d{3}\.\d{3},\d+|\d{6,8}(?:\.\d+)?)\b"
    )
    .unwrap();

    /// Two short signed decimals, dot or comma fraction
    static ref RE_GEOGRAPHIC_PAIR: Regex = Regex::new(
        r"(?P<a>-?\b\d{1,3}(?:[.,]\d+)?)\b\s*[,;\s]\s*(?P<b>-?\b\d{1,3}(?:[.,]\d+)?)\b"
    )
    .unwrap();
}

/// Plausible easting range (metres).
pub const EASTING_RANGE: (f64, f64) = (100_000.0, 9_999_999.0);

/// Plausible northing range (metres).
pub const NORTHING_RANGE: (f64, f64) = (0.0, 99_999_999.0);

/// Numeric pairs found in one document, per pattern family.
///
/// Order follows appearance in the text; duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCandidatePairs {
    /// `(easting, northing)` pairs
    pub projected: Vec<Point>,
    /// `(lon, lat)` pairs
    pub geographic: Vec<Point>,
}

impl RawCandidatePairs {
    /// True when neither family found anything.
    pub fn is_empty(&self) -> bool {
        self.projected.is_empty() && self.geographic.is_empty()
    }
}

/// Decode a numeric token written with either decimal convention.
///
/// A token with exactly one comma and at least one dot is European style:
/// dots are thousands separators and the comma is the decimal point.
/// Otherwise dots are decimal points and commas are stripped.
/// Malformed tokens yield `None`.
///
/// # Examples
///
/// ```
/// use survey_oxide::extractors::decode_number;
///
/// assert_eq!(decode_number("7.395.000,25"), Some(7395000.25));
/// assert_eq!(decode_number("-46.6333"), Some(-46.6333));
/// assert_eq!(decode_number("7,395,000.5"), Some(7395000.5));
/// assert_eq!(decode_number("1.2.3"), None);
/// ```
pub fn decode_number(token: &str) -> Option<f64> {
    let token = token.trim();
    let commas = token.matches(',').count();
    let normalized = if commas == 1 && token.contains('.') {
        token.replace('.', "").replace(',', ".")
    } else {
        token.replace(',', "")
    };
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decode a geographic token. These carry at most one separator, so a
/// comma is always the decimal point (`-23,5505`).
fn decode_degrees(token: &str) -> Option<f64> {
    decode_number(&token.replace(',', "."))
}

/// Scans text for coordinate-pair candidates.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    window: GeographicWindow,
    recover_unsigned: bool,
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl CandidateExtractor {
    /// Create an extractor from pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            window: config.window,
            recover_unsigned: config.recover_unsigned,
        }
    }

    /// Extract both candidate families from raw text.
    pub fn extract(&self, text: &str) -> RawCandidatePairs {
        let projected = scan_pairs(&RE_PROJECTED_PAIR, text, |caps| {
            let e = decode_number(&caps["e"])?;
            let n = decode_number(&caps["n"])?;
            is_plausible_projected(e, n).then(|| Point::new(e, n))
        });

        let geographic = scan_pairs(&RE_GEOGRAPHIC_PAIR, text, |caps| {
            let (a, b) = (caps.name("a")?, caps.name("b")?);
            if is_fragment(text, a.start(), a.end()) || is_fragment(text, b.start(), b.end()) {
                return None;
            }
            self.resolve_geographic(a.as_str(), b.as_str())
        });

        log::debug!(
            "Extracted {} projected and {} geographic candidates",
            projected.len(),
            geographic.len()
        );

        RawCandidatePairs {
            projected,
            geographic,
        }
    }

    /// Interpret a matched pair as `(lon, lat)`.
    ///
    /// `(a = lat, b = lon)` is tried before `(a = lon, b = lat)`. If neither fits,
    /// recovery is enabled and exactly one token carries a sign, the unsigned
    /// token is negated and both orientations are tried once more.
    fn resolve_geographic(&self, a_token: &str, b_token: &str) -> Option<Point> {
        let a = decode_degrees(a_token)?;
        let b = decode_degrees(b_token)?;

        if let Some(p) = orient(&self.window, a, b) {
            return Some(p);
        }
        if !self.recover_unsigned {
            return None;
        }

        let a_signed = a_token.starts_with('-');
        let b_signed = b_token.starts_with('-');
        // Only a sign dropped from one token is recovered
        if a_signed == b_signed {
            return None;
        }
        let a = if a_signed { a } else { -a };
        let b = if b_signed { b } else { -b };
        orient(&self.window, a, b)
    }
}

fn orient(window: &GeographicWindow, a: f64, b: f64) -> Option<Point> {
    if window.contains_lat(a) && window.contains_lon(b) {
        Some(Point::new(b, a))
    } else if window.contains_lat(b) && window.contains_lon(a) {
        Some(Point::new(a, b))
    } else {
        None
    }
}

/// A short token that is really part of a longer grouped or decimal number
/// (`50` in `320.000,50`, `7.395` in `7.395.000,25`).
///
/// A signed token always starts a new number, so `-46.6333` in
/// `-23.5505,-46.6333` is never a fragment of what precedes it.
fn is_fragment(text: &str, start: usize, end: usize) -> bool {
    let bytes = text.as_bytes();
    let is_sep = |b: u8| b == b'.' || b == b',';
    let before = bytes.get(start) != Some(&b'-')
        && start >= 2
        && is_sep(bytes[start - 1])
        && bytes[start - 2].is_ascii_digit();
    let after = end + 1 < bytes.len() && is_sep(bytes[end]) && bytes[end + 1].is_ascii_digit();
    before || after
}

fn is_plausible_projected(e: f64, n: f64) -> bool {
    (EASTING_RANGE.0..=EASTING_RANGE.1).contains(&e)
        && (NORTHING_RANGE.0..=NORTHING_RANGE.1).contains(&n)
}

/// Walk all pair matches left to right.
///
/// An accepted pair consumes both tokens. A rejected pair only consumes its
/// first token, so its second token can still start the next pair.
fn scan_pairs<F>(re: &Regex, text: &str, mut accept: F) -> Vec<Point>
where
    F: FnMut(&Captures<'_>) -> Option<Point>,
{
    let mut out = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = re.captures_at(text, pos) else {
            break;
        };
        let (Some(whole), Some(second)) = (caps.get(0), caps.iter().last().flatten()) else {
            break;
        };

        match accept(&caps) {
            Some(p) => {
                out.push(p);
                pos = whole.end();
            },
            None => pos = second.start(),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> RawCandidatePairs {
        CandidateExtractor::default().extract(text)
    }

    #[test]
    fn test_decode_dot_decimal() {
        assert_eq!(decode_number("320000.55"), Some(320000.55));
        assert_eq!(decode_number("-23.5505"), Some(-23.5505));
        assert_eq!(decode_number("7395000"), Some(7395000.0));
    }

    #[test]
    fn test_decode_european_grouping() {
        assert_eq!(decode_number("320.000,00"), Some(320000.0));
        assert_eq!(decode_number("7.395.000,25"), Some(7395000.25));
    }

    #[test]
    fn test_decode_lone_comma_is_stripped() {
        assert_eq!(decode_number("1,234"), Some(1234.0));
        assert_eq!(decode_number("7,395,000.5"), Some(7395000.5));
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode_number(""), None);
        assert_eq!(decode_number("abc"), None);
        assert_eq!(decode_number("1.2.3"), None);
    }

    #[test]
    fn test_projected_pairs_comma_separated() {
        let c = extract("320000,7395000 320100,7395000 320050,7395100");
        assert_eq!(
            c.projected,
            vec![
                Point::new(320000.0, 7395000.0),
                Point::new(320100.0, 7395000.0),
                Point::new(320050.0, 7395100.0),
            ]
        );
        assert!(c.geographic.is_empty());
    }

    #[test]
    fn test_projected_pairs_european_format() {
        let c = extract("P1 E 320.000,50; N 7.395.000,25\nP2 320.100,00 7.395.000,00");
        assert_eq!(c.projected.len(), 1);
        let c = extract("320.000,50; 7.395.000,25\n320.100,00 7.395.000,00");
        assert_eq!(
            c.projected,
            vec![Point::new(320000.5, 7395000.25), Point::new(320100.0, 7395000.0)]
        );
    }

    #[test]
    fn test_projected_out_of_range_dropped() {
        // 099999 is below the easting floor
        let c = extract("099999 7395000");
        assert!(c.projected.is_empty());
    }

    #[test]
    fn test_grouped_numbers_do_not_leak_geographic() {
        let c = extract("320.000,50; 7.395.000,25");
        assert_eq!(c.projected.len(), 1);
        assert!(c.geographic.is_empty());
    }

    #[test]
    fn test_projected_ignores_longer_digit_runs() {
        let c = extract("protocol 123456789012 3456789");
        assert!(c.projected.is_empty());
    }

    #[test]
    fn test_geographic_lat_first() {
        let c = extract("-23.5505, -46.6333");
        assert_eq!(c.geographic, vec![Point::new(-46.6333, -23.5505)]);
    }

    #[test]
    fn test_geographic_lon_first() {
        let c = extract("-46.6333;-23.5505");
        assert_eq!(c.geographic, vec![Point::new(-46.6333, -23.5505)]);
    }

    #[test]
    fn test_geographic_unsigned_recovery() {
        let c = extract("23.5505,-46.6333");
        assert_eq!(c.geographic, vec![Point::new(-46.6333, -23.5505)]);
    }

    #[test]
    fn test_geographic_signed_pair_without_space() {
        let c = extract("-23.5505,-46.6333;-23.5510,-46.6340");
        assert_eq!(
            c.geographic,
            vec![Point::new(-46.6333, -23.5505), Point::new(-46.634, -23.551)]
        );
    }

    #[test]
    fn test_unsigned_pairs_not_recovered() {
        let c = extract("Confrontantes lotes 15 45 / 20 50 / 12 40 / 25 35");
        assert!(c.geographic.is_empty());
        let c = extract("23.5505 46.6333");
        assert!(c.geographic.is_empty());
    }

    #[test]
    fn test_unsigned_noise_does_not_outvote_projected() {
        let text = "V1 320000 7395000\nV2 320100 7395000\nV3 320050 7395100\n\
                    Confrontantes lotes 15 45 / 20 50 / 12 40 / 25 35";
        let c = extract(text);
        assert_eq!(c.projected.len(), 3);
        assert!(c.geographic.is_empty());
    }

    #[test]
    fn test_geographic_comma_decimal() {
        let c = extract("-23,5505 -46,6333");
        assert_eq!(c.geographic, vec![Point::new(-46.6333, -23.5505)]);
        let c = extract("23,5505;-46,6333");
        assert_eq!(c.geographic, vec![Point::new(-46.6333, -23.5505)]);
    }

    #[test]
    fn test_geographic_recovery_disabled() {
        let cfg = PipelineConfig::new().with_recover_unsigned(false);
        let c = CandidateExtractor::new(&cfg).extract("23.5505,-46.6333");
        assert!(c.geographic.is_empty());
    }

    #[test]
    fn test_geographic_outside_window_rejected() {
        let c = extract("-10.0 -20.0");
        assert!(c.geographic.is_empty());
        // Negating unsigned tokens still leaves 120 outside both windows
        let c = extract("10.0 120.0");
        assert!(c.geographic.is_empty());
    }

    #[test]
    fn test_rejected_pair_releases_second_token() {
        // "7 -23.5505" is rejected, then "-23.5505 -46.6333" is accepted.
        let c = extract("7 -23.5505 -46.6333");
        assert_eq!(c.geographic, vec![Point::new(-46.6333, -23.5505)]);
    }

    #[test]
    fn test_duplicates_retained_in_order() {
        let c = extract("-23.1 -46.1 -23.2 -46.2 -23.1 -46.1");
        assert_eq!(
            c.geographic,
            vec![
                Point::new(-46.1, -23.1),
                Point::new(-46.2, -23.2),
                Point::new(-46.1, -23.1),
            ]
        );
    }

    #[test]
    fn test_no_matches_is_empty() {
        let c = extract("Memorial descritivo sem coordenadas.");
        assert!(c.is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn test_projected_text_does_not_leak_geographic() {
        let c = extract("320000 7395000");
        assert!(c.geographic.is_empty());
    }
}
