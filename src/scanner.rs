//! # Quantity Scanner
//!
//! Regex-based detection of numeric quantities inside ingredient text.
//!
//! ## Features
//!
//! - Four notation classes: decimals (`12,5` / `12.5`), fractions (`1/2`),
//!   ranges (`2-3` / `2–3`) and whole numbers
//! - Scan-all semantics: every occurrence in a text unit is reported, so
//!   "2-3 db, 1 kg" scales correctly in a single pass
//! - Priority overlap resolution: a number already claimed as part of a
//!   decimal, fraction or range is never re-reported as a bare whole
//! - Tokens are returned ordered by start offset descending, ready for
//!   in-place substitution from the end of the string backward

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

lazy_static! {
    static ref DECIMAL_RE: Regex =
        Regex::new(r"\d+[.,]\d+").expect("decimal pattern should be valid");
    static ref FRACTION_RE: Regex =
        Regex::new(r"\d+/\d+").expect("fraction pattern should be valid");
    static ref RANGE_RE: Regex =
        Regex::new(r"\d+[-–]\d+").expect("range pattern should be valid");
    static ref WHOLE_RE: Regex = Regex::new(r"\d+").expect("whole pattern should be valid");
}

/// Notation class of a detected quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityKind {
    Decimal,
    Fraction,
    Range,
    Whole,
}

/// A numeric quantity located inside one ingredient text unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityToken {
    /// The exact matched substring (e.g., "2-3", "1/2", "12,5")
    pub matched_text: String,
    /// Numeric value of the quantity; for ranges, the first endpoint
    pub value: f64,
    /// Byte offset of the match start within the unit's text
    pub start: usize,
    /// Byte offset one past the match end
    pub end: usize,
    /// Which notation class produced this token
    pub kind: QuantityKind,
}

/// Scanner that locates quantity tokens in free-form ingredient text
///
/// The scanner is stateless; tokens are recomputed fresh on every call so
/// a unit's quantities are always derived from its original text rather
/// than cached parse results.
#[derive(Debug, Default, Clone)]
pub struct QuantityScanner;

impl QuantityScanner {
    pub fn new() -> Self {
        Self
    }

    /// Find all quantity tokens in `text`, ordered by start offset
    /// descending.
    ///
    /// Matchers run in priority order decimal > fraction > range > whole;
    /// when two matches would occupy overlapping spans the
    /// earlier-priority match wins and the later one is discarded
    /// entirely. Tokens with a non-positive value are dropped as
    /// degenerate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ingredient_scaler::scanner::QuantityScanner;
    ///
    /// let scanner = QuantityScanner::new();
    /// let tokens = scanner.scan("2-3 db, 1 kg");
    /// assert_eq!(tokens.len(), 2);
    /// // descending start order: "1" before "2-3"
    /// assert_eq!(tokens[0].matched_text, "1");
    /// assert_eq!(tokens[1].matched_text, "2-3");
    /// ```
    pub fn scan(&self, text: &str) -> Vec<QuantityToken> {
        let mut tokens: Vec<QuantityToken> = Vec::new();

        let matchers: [(QuantityKind, &Regex); 4] = [
            (QuantityKind::Decimal, &DECIMAL_RE),
            (QuantityKind::Fraction, &FRACTION_RE),
            (QuantityKind::Range, &RANGE_RE),
            (QuantityKind::Whole, &WHOLE_RE),
        ];

        for (kind, pattern) in matchers {
            for m in pattern.find_iter(text) {
                // The numeric token must be followed by a non-digit
                // boundary so multi-digit numbers and the trailing unit
                // word are never fragmented.
                if !digit_boundary(text, m.end()) {
                    trace!("Rejecting '{}' at {}: no boundary", m.as_str(), m.start());
                    continue;
                }
                if tokens
                    .iter()
                    .any(|t| spans_overlap(t.start, t.end, m.start(), m.end()))
                {
                    trace!(
                        "Discarding {:?} match '{}' overlapping a higher-priority token",
                        kind,
                        m.as_str()
                    );
                    continue;
                }
                let value = match numeric_value(kind, m.as_str()) {
                    Some(v) if v > 0.0 => v,
                    _ => {
                        debug!("Discarding degenerate quantity '{}'", m.as_str());
                        continue;
                    }
                };
                tokens.push(QuantityToken {
                    matched_text: m.as_str().to_string(),
                    value,
                    start: m.start(),
                    end: m.end(),
                    kind,
                });
            }
        }

        tokens.sort_by(|a, b| b.start.cmp(&a.start));
        debug!("Found {} quantity tokens in '{}'", tokens.len(), text);
        tokens
    }

    /// Whether `text` contains at least one scalable quantity
    pub fn has_quantities(&self, text: &str) -> bool {
        !self.scan(text).is_empty()
    }
}

/// True when the position `end` is a word boundary for a numeric token:
/// end of string, or any non-digit character. A manual check is used
/// instead of `\b` because the en-dash range separator is not a word
/// character.
fn digit_boundary(text: &str, end: usize) -> bool {
    match text[end..].chars().next() {
        Some(c) => !c.is_ascii_digit(),
        None => true,
    }
}

fn spans_overlap(a_start: usize, a_end: usize, b_start: usize, b_end: usize) -> bool {
    a_start < b_end && b_start < a_end
}

/// Extract the numeric value of a matched quantity string.
///
/// Fractions evaluate numerator/denominator; ranges take the first
/// endpoint only (the second endpoint is recomputed at format time from
/// the original text); decimals and wholes parse literally with comma
/// treated as the decimal point.
fn numeric_value(kind: QuantityKind, matched: &str) -> Option<f64> {
    match kind {
        QuantityKind::Fraction => {
            let (num, den) = matched.split_once('/')?;
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                return None;
            }
            Some(num / den)
        }
        QuantityKind::Range => {
            let first = matched.split(['-', '–']).next()?;
            parse_number(first)
        }
        QuantityKind::Decimal | QuantityKind::Whole => parse_number(matched),
    }
}

/// Parse a number accepting comma as the decimal separator
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let parsed: f64 = raw.trim().replace(',', ".").parse().ok()?;
    parsed.is_finite().then_some(parsed)
}
