//! Converts raw extracted strings into typed values. Malformed input is
//! never an error here: every function degrades to `None` so one bad field
//! can't sink the whole item.

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// Currency symbols and whitespace stripped from raw price text.
const CURRENCY_CHARS: &[char] = &[
    '$', '\u{20AC}', '\u{00A3}', '\u{00A5}', '\u{20B9}', '\u{20BA}', '\u{00A0}',
];

fn rating_regex() -> Option<&'static Regex> {
    static INSTANCE: OnceLock<Option<Regex>> = OnceLock::new();
    INSTANCE
        .get_or_init(|| Regex::new(r"([0-5]\.?[0-9]?) out of 5 stars").ok())
        .as_ref()
}

/// Strips currency symbols and whitespace, then parses the remainder as a
/// float. `"$1,059.99"` stays unparseable on purpose: the source renders
/// prices without thousands separators in the offscreen span.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && !CURRENCY_CHARS.contains(c))
        .collect();

    match cleaned.parse::<f64>() {
        Ok(price) => Some(price),
        Err(_) => {
            debug!("could not convert price '{cleaned}' (raw: '{raw}')");
            None
        }
    }
}

/// Extracts the numeric part of an "X.Y out of 5 stars" label.
#[must_use]
pub fn parse_rating(raw: &str) -> Option<f64> {
    let caps = rating_regex()?.captures(raw)?;
    match caps.get(1)?.as_str().parse::<f64>() {
        Ok(rating) => Some(rating),
        Err(_) => {
            debug!("rating pattern matched but value unparseable: '{raw}'");
            None
        }
    }
}

/// Parses a review count with optional thousands separators ("1,234").
#[must_use]
pub fn parse_review_count(raw: &str) -> Option<i64> {
    let cleaned = raw.replace(',', "");
    match cleaned.parse::<i64>() {
        Ok(count) => Some(count),
        Err(_) => {
            debug!("could not convert review count '{cleaned}' (raw: '{raw}')");
            None
        }
    }
}
