use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::rates::{normalize_code, RateSnapshot};

/// Response shape of the backend `/fx/rates` endpoint.
///
/// The backend already quotes per-1-unit rates against the base currency,
/// so no nominal normalization is needed here — only key normalization
/// and the wholesale snapshot conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct FxRatesResponse {
    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    pub rates: HashMap<String, f64>,

    #[serde(default)]
    pub previous_date: Option<NaiveDate>,

    #[serde(default)]
    pub previous_rates: Option<HashMap<String, f64>>,

    #[serde(default)]
    pub delta_rates: Option<HashMap<String, f64>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub source: Option<String>,
}

/// Parse a backend rates payload into a rate snapshot.
/// Rejects payloads whose rate map is empty.
pub fn parse_backend_rates(json: &str) -> Result<RateSnapshot, CoreError> {
    let response: FxRatesResponse = serde_json::from_str(json)?;
    RateSnapshot::try_from(response)
}

impl TryFrom<FxRatesResponse> for RateSnapshot {
    type Error = CoreError;

    fn try_from(response: FxRatesResponse) -> Result<Self, Self::Error> {
        if response.rates.is_empty() {
            return Err(CoreError::RateFeed(
                "backend payload contained no rates".to_string(),
            ));
        }

        Ok(RateSnapshot {
            rates: normalize_keys(response.rates),
            previous_rates: response.previous_rates.map(normalize_keys),
            delta_rates: response.delta_rates.map(normalize_keys),
            date: response.date,
            previous_date: response.previous_date,
            updated_at: response.updated_at,
            source: response.source,
        })
    }
}

fn normalize_keys(map: HashMap<String, f64>) -> HashMap<String, f64> {
    map.into_iter()
        .map(|(code, rate)| (normalize_code(&code), rate))
        .collect()
}
