use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The currency all rate-table entries are expressed against.
/// A rate is "units of base currency per 1 unit of the quoted currency",
/// so the base itself is 1 by definition and need not appear in the table.
pub const BASE_CURRENCY: &str = "UZS";

/// Trim + uppercase a currency code so comparisons are case-insensitive
/// and whitespace-tolerant.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// An immutable snapshot of exchange rates relative to [`BASE_CURRENCY`].
///
/// Snapshots are replaced wholesale on refresh — there is no partial merge.
/// The previous/delta maps carry day-over-day movement for rate-card display
/// and are purely informational; conversion only reads `rates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    /// Currency code → rate (base-currency units per 1 unit)
    pub rates: HashMap<String, f64>,

    /// Rates as of the previous feed date, when the feed provides them
    #[serde(default)]
    pub previous_rates: Option<HashMap<String, f64>>,

    /// Day-over-day rate change per currency
    #[serde(default)]
    pub delta_rates: Option<HashMap<String, f64>>,

    /// Date the rates are valid for
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Date the previous rates are valid for
    #[serde(default)]
    pub previous_date: Option<NaiveDate>,

    /// When the feed published this snapshot
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Feed identifier (e.g., "CBU")
    #[serde(default)]
    pub source: Option<String>,
}

impl RateSnapshot {
    /// Build a snapshot from a bare rate table, normalizing the keys.
    pub fn new(rates: HashMap<String, f64>) -> Self {
        let rates = rates
            .into_iter()
            .map(|(code, rate)| (normalize_code(&code), rate))
            .collect();
        Self {
            rates,
            ..Self::default()
        }
    }

    /// Look up a usable rate for a currency code.
    ///
    /// The base currency is implicitly 1. Entries that are missing, zero,
    /// negative, or non-finite are unusable and yield `None` — conversion
    /// to/from such a currency is undefined, not zero.
    pub fn rate(&self, code: &str) -> Option<f64> {
        let code = normalize_code(code);
        if code == BASE_CURRENCY {
            return Some(1.0);
        }
        self.rates
            .get(&code)
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
    }

    /// Day-over-day change for a currency, when the feed provided deltas.
    pub fn delta(&self, code: &str) -> Option<f64> {
        self.delta_rates.as_ref()?.get(&normalize_code(code)).copied()
    }

    /// Previous-day rate for a currency, when the feed provided it.
    pub fn previous_rate(&self, code: &str) -> Option<f64> {
        self.previous_rates
            .as_ref()?
            .get(&normalize_code(code))
            .copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// All quoted currency codes, sorted for deterministic display.
    pub fn currencies(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
