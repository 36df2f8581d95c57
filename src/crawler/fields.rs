//! Field parsers for raw catalog text
//!
//! Pure functions turning text fragments from catalog markup into typed values.

use thiserror::Error;

/// Errors raised by field parsers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("invalid price text {0:?}")]
    InvalidPrice(String),
}

/// Rating labels as they appear in the rating element's class list
const RATING_LABELS: [(&str, u8); 5] = [("One", 1), ("Two", 2), ("Three", 3), ("Four", 4), ("Five", 5)];

/// Parses a currency-prefixed price such as `"£53.74"`
///
/// Every character other than ASCII digits and `.` is dropped before parsing, so
/// the result is never negative.
///
/// # Errors
///
/// `FieldError::InvalidPrice` when nothing numeric remains or the remainder is
/// not a single decimal number (e.g. two decimal points).
pub fn parse_price(text: &str) -> Result<f64, FieldError> {
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    numeric
        .parse::<f64>()
        .map_err(|_| FieldError::InvalidPrice(text.to_string()))
}

/// Maps rating labels to a 1..=5 star count
///
/// Labels are checked in the order given and the first recognized one wins. No
/// recognized label is a normal outcome and yields `None`.
pub fn parse_rating<'a, I>(labels: I) -> Option<u8>
where
    I: IntoIterator<Item = &'a str>,
{
    labels.into_iter().find_map(|label| {
        RATING_LABELS
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, stars)| *stars)
    })
}

/// Extracts the stock count from text such as `"In stock (22 available)"`
///
/// Returns the first maximal run of ASCII digits, or `None` if the text has no
/// digits or the run does not fit a `u32`.
pub fn parse_availability(text: &str) -> Option<u32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    rest[..end].parse().ok()
}
