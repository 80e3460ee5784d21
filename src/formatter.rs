//! # Quantity Formatter
//!
//! Renders a scaled value back into the notation style of the original
//! matched text. Fraction-origin quantities snap to a small table of
//! culinary fractions; range-origin quantities rebuild both endpoints
//! preserving the original separator; everything else formats as an
//! integer or a one-decimal number with comma as the decimal separator.
//!
//! The fraction snapping is intentionally lossy: remainders outside the
//! snap table fall through to plain one-decimal formatting rather than
//! reconstructing an exact fraction.

use tracing::trace;

use crate::scanner::parse_number;

/// Culinary fraction snap table: remainder value and its rendered suffix
const FRACTION_SNAPS: [(f64, &str); 5] = [
    (0.25, "25"),
    (0.33, "33"),
    (0.5, "5"),
    (0.67, "67"),
    (0.75, "75"),
];

/// Format a scaled value in the notation class of `original`, the exact
/// substring the scanner matched for this quantity.
///
/// # Examples
///
/// ```rust
/// use ingredient_scaler::formatter::format_quantity;
///
/// assert_eq!(format_quantity(1.0, "1/2"), "1");
/// assert_eq!(format_quantity(0.75, "1/2"), "0.75");
/// assert_eq!(format_quantity(4.0, "2-3"), "4-6");
/// assert_eq!(format_quantity(2.5, "2"), "2,5");
/// ```
pub fn format_quantity(scaled: f64, original: &str) -> String {
    if original.contains('/') {
        if let Some(snapped) = snap_fraction(scaled) {
            trace!("Snapped {} to fraction form '{}'", scaled, snapped);
            return snapped;
        }
    }

    if original.contains('-') || original.contains('–') {
        if let Some(range) = format_range(scaled, original) {
            return range;
        }
    }

    format_plain(scaled)
}

/// Snap the fractional remainder of `scaled` to a culinary fraction when
/// it lands exactly on one, e.g. 1.5 -> "1.5", 0.75 -> "0.75". The
/// epsilon only absorbs float noise; a ratio-derived 0.333... does NOT
/// land on the .25-grid .33 entry and falls through to plain formatting,
/// as do whole values and any other remainder outside the table.
fn snap_fraction(scaled: f64) -> Option<String> {
    let whole = scaled.floor();
    let remainder = scaled - whole;
    for (snap, suffix) in FRACTION_SNAPS {
        if (remainder - snap).abs() < 1e-9 {
            return Some(format!("{}.{}", whole as i64, suffix));
        }
    }
    None
}

/// Rebuild a range from its scaled first endpoint. The second endpoint is
/// recomputed from the ORIGINAL endpoints' ratio; a zero first endpoint
/// abandons range formatting so the division can never propagate.
fn format_range(scaled_first: f64, original: &str) -> Option<String> {
    let separator = if original.contains('–') { '–' } else { '-' };
    let (first_raw, second_raw) = original.split_once(separator)?;
    let first = parse_number(first_raw)?;
    let second = parse_number(second_raw)?;
    if first == 0.0 {
        return None;
    }
    let ratio = second / first;
    let scaled_second = scaled_first * ratio;
    Some(format!(
        "{}{}{}",
        format_plain(scaled_first),
        separator,
        format_plain(scaled_second)
    ))
}

/// Integer string for whole values, otherwise one decimal place with
/// comma as the decimal separator. Ties round half away from zero
/// (6.25 -> "6,3"), not to even as `{:.1}` alone would.
fn format_plain(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        let tenths = (value * 10.0).round() / 10.0;
        format!("{:.1}", tenths).replace('.', ",")
    }
}
