use crate::models::wallet::{TransactionType, Wallet};

/// Coerce malformed numeric fields to zero so a bad record never poisons
/// a whole aggregation with NaN.
pub(crate) fn safe_amount(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Folds wallet balances and transaction histories into net figures,
/// per-item converted into the display currency.
///
/// The conversion closure has the shape produced by
/// [`ConversionService::bind`](crate::services::conversion_service::ConversionService::bind):
/// `(amount, source_currency) -> converted_amount`. Aggregation is pure,
/// total, and order-independent.
pub struct BalanceService;

impl BalanceService {
    pub fn new() -> Self {
        Self
    }

    /// Net balance of a single wallet: converted stored balance, plus
    /// converted income amounts, minus converted expense amounts.
    pub fn wallet_net_balance<F>(&self, wallet: &Wallet, convert: F) -> f64
    where
        F: Fn(f64, Option<&str>) -> f64,
    {
        let base = convert(safe_amount(wallet.balance), wallet.currency.as_deref());

        let delta: f64 = wallet
            .transactions
            .iter()
            .map(|tx| {
                let amount = convert(safe_amount(tx.amount), tx.currency.as_deref());
                match tx.transaction_type {
                    TransactionType::Income => amount,
                    TransactionType::Expense => -amount,
                }
            })
            .sum();

        base + delta
    }

    /// Combined net balance across all wallets ("All wallets" display).
    pub fn wallets_net_balance<F>(&self, wallets: &[Wallet], convert: F) -> f64
    where
        F: Fn(f64, Option<&str>) -> f64,
    {
        wallets
            .iter()
            .map(|wallet| self.wallet_net_balance(wallet, &convert))
            .sum()
    }
}

impl Default for BalanceService {
    fn default() -> Self {
        Self::new()
    }
}
