//! Field rules shared by request DTOs that `validator` has no built-in for.

use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use validator::ValidationError;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug pattern"));

/// Slug column width: a 255-character name plus the collision suffix fits.
pub const SLUG_MAX_LENGTH: usize = 300;

/// Digits of the largest price a `NUMERIC(12,2)` column holds.
const MAX_PRICE_CENTS: i64 = 999_999_999_999;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.len() > SLUG_MAX_LENGTH {
        return Err(error("slug", "Slug must be at most 300 characters"));
    }
    if SLUG_PATTERN.is_match(slug) {
        Ok(())
    } else {
        Err(error(
            "slug",
            "Slug must be non-empty and contain only letters, digits, '-' or '_'",
        ))
    }
}

pub fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if *price < BigDecimal::from(0) {
        return Err(error("price", "Price must not be negative"));
    }
    if *price > BigDecimal::new(MAX_PRICE_CENTS.into(), 2) {
        return Err(error("price", "Price must be at most 9999999999.99"));
    }
    if price.with_scale(2) != *price {
        return Err(error("price", "Price must have at most two decimal places"));
    }
    Ok(())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(serde_json::Number),
    Text(String),
}

impl RawDecimal {
    fn parse<E: serde::de::Error>(self) -> Result<BigDecimal, E> {
        let text = match self {
            RawDecimal::Number(n) => n.to_string(),
            RawDecimal::Text(s) => s,
        };
        BigDecimal::from_str(text.trim()).map_err(E::custom)
    }
}

/// Accepts `49.99` or `"49.99"` without a detour through binary floating point.
pub fn deserialize_price<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
    D: Deserializer<'de>,
{
    RawDecimal::deserialize(deserializer)?.parse()
}

pub fn deserialize_optional_price<'de, D>(deserializer: D) -> Result<Option<BigDecimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawDecimal>::deserialize(deserializer)?
        .map(RawDecimal::parse)
        .transpose()
}
