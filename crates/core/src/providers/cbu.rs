use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::rates::{normalize_code, RateSnapshot, BASE_CURRENCY};

/// Central-bank (CBU) rate feed normalization.
///
/// The feed is a JSON array of per-currency items with all-string fields
/// and a `Nominal` quotation unit: a rate quoted per 10 or 100 units must
/// be divided down to a per-1-unit rate. Fetching the feed is the
/// caller's concern; this module only turns the payload into a
/// [`RateSnapshot`].
///
/// One item of the feed:
///
/// ```json
/// { "Ccy": "JPY", "Rate": "85.10", "Diff": "-0.12",
///   "Nominal": "1", "Date": "15.01.2025" }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CbuRateItem {
    #[serde(rename = "Ccy", default)]
    pub ccy: Option<String>,

    #[serde(rename = "Rate", default)]
    pub rate: Option<String>,

    #[serde(rename = "Diff", default)]
    pub diff: Option<String>,

    #[serde(rename = "Nominal", default)]
    pub nominal: Option<String>,

    #[serde(rename = "Date", default)]
    pub date: Option<String>,
}

/// Parse the raw feed JSON into a rate snapshot.
///
/// Items with a missing code, an unusable rate, or a non-positive nominal
/// are skipped rather than failing the whole feed. The base currency is
/// seeded at 1. Errors only when the payload is not valid JSON or no
/// usable rate survives.
pub fn parse_cbu_rates(json: &str) -> Result<RateSnapshot, CoreError> {
    let items: Vec<CbuRateItem> = serde_json::from_str(json)?;
    normalize_cbu_items(&items)
}

/// Normalize already-deserialized feed items into a rate snapshot.
pub fn normalize_cbu_items(items: &[CbuRateItem]) -> Result<RateSnapshot, CoreError> {
    let mut rates: HashMap<String, f64> = HashMap::from([(BASE_CURRENCY.to_string(), 1.0)]);
    let mut delta_rates: HashMap<String, f64> = HashMap::from([(BASE_CURRENCY.to_string(), 0.0)]);
    let mut previous_rates: HashMap<String, f64> =
        HashMap::from([(BASE_CURRENCY.to_string(), 1.0)]);
    let mut feed_date: Option<NaiveDate> = None;

    for item in items {
        let code = match item.ccy.as_deref().map(normalize_code) {
            Some(code) if !code.is_empty() => code,
            _ => continue,
        };
        let rate = match parse_feed_number(item.rate.as_deref()) {
            Some(rate) if rate > 0.0 => rate,
            _ => continue,
        };
        let nominal = parse_feed_number(item.nominal.as_deref()).unwrap_or(1.0);
        if nominal <= 0.0 {
            continue;
        }

        let per_unit = rate / nominal;
        rates.insert(code.clone(), per_unit);

        if let Some(diff) = parse_feed_number(item.diff.as_deref()) {
            let per_unit_diff = diff / nominal;
            delta_rates.insert(code.clone(), per_unit_diff);
            previous_rates.insert(code, per_unit - per_unit_diff);
        }

        if feed_date.is_none() {
            feed_date = item.date.as_deref().and_then(parse_cbu_date);
        }
    }

    // Only the seeded base entry left — the feed carried nothing usable.
    if rates.len() <= 1 {
        return Err(CoreError::RateFeed(
            "CBU feed contained no usable rates".to_string(),
        ));
    }

    Ok(RateSnapshot {
        rates,
        previous_rates: (previous_rates.len() > 1).then_some(previous_rates),
        delta_rates: (delta_rates.len() > 1).then_some(delta_rates),
        date: feed_date,
        previous_date: feed_date.map(|d| d - Duration::days(1)),
        updated_at: None,
        source: Some("CBU".to_string()),
    })
}

/// Feed numbers are strings and may use a comma as the decimal mark.
fn parse_feed_number(value: Option<&str>) -> Option<f64> {
    let normalized = value?.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Feed dates come as `DD.MM.YYYY`.
fn parse_cbu_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d.%m.%Y").ok()
}
