use crate::models::rates::{normalize_code, RateSnapshot, BASE_CURRENCY};

/// What actually happened inside a conversion call.
///
/// The converter never fails: when rate information is insufficient it
/// returns the amount unchanged. The outcome lets callers and tests tell
/// a real conversion apart from a silent pass-through, which the returned
/// number alone cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// A rate ratio was applied
    Converted,
    /// Source and target currency are the same — nothing to do
    SameCurrency,
    /// Zero (or non-finite) amount — nothing to do
    ZeroAmount,
    /// No rate table was supplied, or it was empty
    RatesUnavailable,
    /// One of the two currencies has no usable rate in the table
    RateMissing,
}

impl ConversionOutcome {
    /// True when the returned number went through an actual rate ratio.
    pub fn is_converted(&self) -> bool {
        matches!(self, ConversionOutcome::Converted)
    }
}

/// Converts monetary amounts between currencies using a flat rate table
/// anchored to [`BASE_CURRENCY`].
///
/// Policy: never throw, never emit NaN/Infinity. Degenerate inputs
/// (missing table, missing rate, unknown currency) degrade to returning
/// the amount unchanged, so the UI always has a number to show. Callers
/// that need to distinguish the degraded path use [`convert_checked`].
///
/// [`convert_checked`]: ConversionService::convert_checked
pub struct ConversionService;

impl ConversionService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` from `from` into `to` using `rates`.
    ///
    /// `from = None` (or empty) means the amount is already in `to`.
    /// Currency codes are trimmed and uppercased before comparison.
    /// Full f64 precision is carried through — no intermediate rounding.
    pub fn convert(
        &self,
        amount: f64,
        from: Option<&str>,
        to: &str,
        rates: Option<&RateSnapshot>,
    ) -> f64 {
        self.convert_checked(amount, from, to, rates).0
    }

    /// Like [`convert`](Self::convert), but also reports whether a rate
    /// ratio was actually applied.
    pub fn convert_checked(
        &self,
        amount: f64,
        from: Option<&str>,
        to: &str,
        rates: Option<&RateSnapshot>,
    ) -> (f64, ConversionOutcome) {
        if !amount.is_finite() {
            return (0.0, ConversionOutcome::ZeroAmount);
        }

        let to = normalize_code(to);
        let from = match from.map(str::trim).filter(|s| !s.is_empty()) {
            Some(code) => normalize_code(code),
            None => to.clone(),
        };

        if amount == 0.0 {
            return (amount, ConversionOutcome::ZeroAmount);
        }
        if from == to {
            return (amount, ConversionOutcome::SameCurrency);
        }
        let snapshot = match rates.filter(|r| !r.is_empty()) {
            Some(s) => s,
            None => return (amount, ConversionOutcome::RatesUnavailable),
        };

        let from_rate = snapshot.rate(&from);
        let to_rate = snapshot.rate(&to);
        match (from_rate, to_rate) {
            // Into base units, then into target units.
            (Some(f), Some(t)) => (amount * f / t, ConversionOutcome::Converted),
            _ => (amount, ConversionOutcome::RateMissing),
        }
    }

    /// Bind a target currency and rate table into a reusable conversion
    /// closure of the shape the aggregation layer consumes.
    pub fn bind<'a>(
        &'a self,
        to: &'a str,
        rates: Option<&'a RateSnapshot>,
    ) -> impl Fn(f64, Option<&str>) -> f64 + 'a {
        move |amount, from| self.convert(amount, from, to, rates)
    }
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new()
    }
}
