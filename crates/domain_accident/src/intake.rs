//! Intake message parsing
//!
//! Operators paste accident notifications straight out of messenger chats.
//! The extractors below pull the structured fields out of that free text;
//! everything is best effort and absent fields simply stay empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static CAR_NUMBER: Lazy<Regex> = Lazy::new(|| {
    // 지역 plates ("서울12가3456") and newer plain plates ("123가4567")
    Regex::new(r"([가-힣]{2}\d{2,4}[가-힣]\d{4})|(\d{2,3}[가-힣]\d{4})").unwrap()
});

static DEDUCTIBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,3}[,\d]*)\s*만?\s*원").unwrap());

// Requires a city/province plus district pair; a single suffix character is
// too loose (앞유리 ends in 리).
static ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[가-힣]{2,}(시|도)\s*[가-힣]{2,}(구|군|시)[\s\S]{0,50}").unwrap());

static CUSTOMER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([가-힣]{2,4})\s*(님|고객|선생님)").unwrap());

static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d{2,3}[-.\s]?\d{3,4}[-.\s]?\d{4}").unwrap());

/// Brand keywords that anchor car-model extraction
const BRANDS: [&str; 8] = [
    "현대", "기아", "쌍용", "르노", "제네시스", "벤츠", "BMW", "아우디",
];

static BRAND_WINDOWS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    BRANDS
        .iter()
        .map(|brand| {
            // Brand name plus up to 20 following characters as the model window
            let pattern = format!("{}[\\s\\S]{{0,20}}", regex::escape(brand));
            (*brand, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Fields extracted from a pasted intake message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntakeDraft {
    pub car_number: Option<String>,
    pub car_model: Option<String>,
    pub damage_type: String,
    pub deductible: Option<String>,
    pub address: Option<String>,
    pub customer_name: Option<String>,
    pub phone: Option<String>,
}

/// Parses an intake message into a draft
pub fn parse_message(message: &str) -> IntakeDraft {
    IntakeDraft {
        car_number: extract_car_number(message),
        car_model: extract_car_model(message),
        damage_type: extract_damage_type(message).to_string(),
        deductible: extract_deductible(message),
        address: extract_address(message),
        customer_name: extract_customer_name(message),
        phone: extract_phone(message),
    }
}

fn extract_car_number(text: &str) -> Option<String> {
    CAR_NUMBER.find(text).map(|m| m.as_str().to_string())
}

fn extract_car_model(text: &str) -> Option<String> {
    for (brand, window) in BRAND_WINDOWS.iter() {
        if text.contains(brand) {
            return Some(
                window
                    .find(text)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_else(|| (*brand).to_string()),
            );
        }
    }
    None
}

/// Damage type keyword match; windshield is by far the common case and is
/// the fallback when nothing matches.
fn extract_damage_type(text: &str) -> &'static str {
    if text.contains("앞유리") || text.contains("윈드실드") {
        "앞유리"
    } else if text.contains("뒤유리") {
        "뒤유리"
    } else if text.contains("사이드") {
        "사이드"
    } else {
        "앞유리"
    }
}

fn extract_deductible(text: &str) -> Option<String> {
    DEDUCTIBLE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().replace(',', ""))
}

fn extract_address(text: &str) -> Option<String> {
    ADDRESS.find(text).map(|m| m.as_str().trim().to_string())
}

fn extract_customer_name(text: &str) -> Option<String> {
    CUSTOMER_NAME
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn extract_phone(text: &str) -> Option<String> {
    PHONE.find(text).map(|m| m.as_str().to_string())
}
