//! Address cleanup before geocoding
//!
//! Geocoders choke on detail suffixes like "3층 301호", so those are stripped
//! before lookup. The cleaned string is used only for the coordinate query;
//! the stored address keeps its original form.

use once_cell::sync::Lazy;
use regex::Regex;

static FLOOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d+층\s*").unwrap());
static UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d+호\s*").unwrap());
static UNIT_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d+-\d+호?\s*").unwrap());
static UNIT_TRIPLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d+-\d+-\d+호?\s*").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips detail suffixes from a lookup address
///
/// "서울시 강남구 테헤란로 123 3층 301호" → "서울시 강남구 테헤란로 123".
/// Everything from a `~` onward is dropped as well.
pub fn clean_address(address: &str) -> String {
    let mut cleaned = address.trim().to_string();

    cleaned = FLOOR.replace_all(&cleaned, " ").into_owned();
    cleaned = UNIT_TRIPLE.replace_all(&cleaned, " ").into_owned();
    cleaned = UNIT_RANGE.replace_all(&cleaned, " ").into_owned();
    cleaned = UNIT.replace_all(&cleaned, " ").into_owned();

    if let Some(tilde) = cleaned.find('~') {
        cleaned.truncate(tilde);
    }

    SPACES.replace_all(cleaned.trim(), " ").into_owned()
}
