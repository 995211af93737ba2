pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::NaiveDate;
use models::{
    budget::Budget,
    rates::RateSnapshot,
    settings::Settings,
    wallet::{Transaction, TransactionType, Wallet},
};
use services::{
    balance_service::BalanceService,
    conversion_service::{ConversionOutcome, ConversionService},
    format_service::FormatService,
    report_service::{BudgetUsage, DailyTotals, PeriodTotals, ReportService},
};

use errors::CoreError;

/// Default fraction-digit budget for price display.
const DEFAULT_PRICE_DIGITS: usize = 2;

/// Main entry point for the Wallet Ledger core library.
///
/// Owns the session state the app keeps in its store — wallets, the
/// selected display currency, and the current rate snapshot — and exposes
/// the conversion, aggregation, reporting, and formatting operations over
/// it. All monetary math is pure; the rate snapshot is treated as an
/// immutable whole and replaced wholesale on refresh.
#[must_use]
pub struct WalletLedger {
    wallets: Vec<Wallet>,
    settings: Settings,
    rates: Option<RateSnapshot>,
    balance_service: BalanceService,
    conversion_service: ConversionService,
    format_service: FormatService,
    report_service: ReportService,
}

impl std::fmt::Debug for WalletLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletLedger")
            .field("wallets", &self.wallets.len())
            .field("settings", &self.settings)
            .field("rates", &self.rates.as_ref().map(|r| r.len()))
            .finish()
    }
}

impl WalletLedger {
    /// Create an empty ledger with default settings and no rate snapshot.
    pub fn create_new() -> Self {
        Self {
            wallets: Vec::new(),
            settings: Settings::default(),
            rates: None,
            balance_service: BalanceService::new(),
            conversion_service: ConversionService::new(),
            format_service: FormatService::new(),
            report_service: ReportService::new(),
        }
    }

    // ── Wallet Management ───────────────────────────────────────────

    /// Add a wallet. `currency: None` means the stored balance is already
    /// in the display currency.
    pub fn add_wallet(
        &mut self,
        symbol: impl Into<String>,
        title: impl Into<String>,
        balance: f64,
        currency: Option<String>,
    ) -> Result<uuid::Uuid, CoreError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Wallet title must not be empty".to_string(),
            ));
        }
        if !balance.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Wallet balance must be a finite number, got {balance}"
            )));
        }
        let currency = currency.map(|c| validate_currency_code(&c)).transpose()?;

        let wallet = Wallet::new(symbol, title, balance, currency);
        let id = wallet.id;
        self.wallets.push(wallet);
        Ok(id)
    }

    /// Remove a wallet and its whole transaction history.
    pub fn remove_wallet(&mut self, wallet_id: uuid::Uuid) -> Result<(), CoreError> {
        let before = self.wallets.len();
        self.wallets.retain(|w| w.id != wallet_id);
        if self.wallets.len() == before {
            return Err(CoreError::WalletNotFound(wallet_id.to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn get_wallet(&self, wallet_id: uuid::Uuid) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == wallet_id)
    }

    #[must_use]
    pub fn get_wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    #[must_use]
    pub fn wallet_count(&self) -> usize {
        self.wallets.len()
    }

    /// Overwrite a wallet's stored base balance.
    pub fn set_wallet_balance(
        &mut self,
        wallet_id: uuid::Uuid,
        balance: f64,
    ) -> Result<(), CoreError> {
        if !balance.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Wallet balance must be a finite number, got {balance}"
            )));
        }
        let wallet = self
            .wallets
            .iter_mut()
            .find(|w| w.id == wallet_id)
            .ok_or_else(|| CoreError::WalletNotFound(wallet_id.to_string()))?;
        wallet.balance = balance;
        Ok(())
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Add an income/expense transaction to a wallet.
    /// Amounts are stored positive; the type carries the sign.
    pub fn add_transaction(
        &mut self,
        wallet_id: uuid::Uuid,
        transaction_type: TransactionType,
        amount: f64,
        currency: Option<String>,
        date: NaiveDate,
    ) -> Result<uuid::Uuid, CoreError> {
        let transaction = Transaction::new(transaction_type, amount, currency, date);
        self.insert_transaction(wallet_id, transaction)
    }

    /// Add a transaction with a free-text note attached.
    pub fn add_transaction_with_note(
        &mut self,
        wallet_id: uuid::Uuid,
        transaction_type: TransactionType,
        amount: f64,
        currency: Option<String>,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Result<uuid::Uuid, CoreError> {
        let transaction = Transaction::with_note(transaction_type, amount, currency, date, note);
        self.insert_transaction(wallet_id, transaction)
    }

    /// Remove a transaction by id, searching every wallet.
    pub fn remove_transaction(&mut self, transaction_id: uuid::Uuid) -> Result<(), CoreError> {
        for wallet in &mut self.wallets {
            if let Some(pos) = wallet.transactions.iter().position(|t| t.id == transaction_id) {
                wallet.transactions.remove(pos);
                return Ok(());
            }
        }
        Err(CoreError::TransactionNotFound(transaction_id.to_string()))
    }

    /// A wallet's transactions, newest-first for display.
    pub fn get_transactions(&self, wallet_id: uuid::Uuid) -> Result<Vec<&Transaction>, CoreError> {
        let wallet = self
            .get_wallet(wallet_id)
            .ok_or_else(|| CoreError::WalletNotFound(wallet_id.to_string()))?;
        let mut transactions: Vec<&Transaction> = wallet.transactions.iter().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    fn insert_transaction(
        &mut self,
        wallet_id: uuid::Uuid,
        mut transaction: Transaction,
    ) -> Result<uuid::Uuid, CoreError> {
        if !(transaction.amount.is_finite() && transaction.amount > 0.0) {
            return Err(CoreError::ValidationError(format!(
                "Transaction amount must be positive and finite, got {}",
                transaction.amount
            )));
        }
        if let Some(code) = transaction.currency.take() {
            transaction.currency = Some(validate_currency_code(&code)?);
        }

        let wallet = self
            .wallets
            .iter_mut()
            .find(|w| w.id == wallet_id)
            .ok_or_else(|| CoreError::WalletNotFound(wallet_id.to_string()))?;
        let id = transaction.id;
        wallet.transactions.push(transaction);
        Ok(id)
    }

    // ── Display Currency & Rates ────────────────────────────────────

    /// Set the display currency (e.g., "UZS", "USD", "EUR").
    /// Currency code must be a 3-letter alphabetic string.
    pub fn set_display_currency(&mut self, currency: impl AsRef<str>) -> Result<(), CoreError> {
        self.settings.display_currency = validate_currency_code(currency.as_ref())?;
        Ok(())
    }

    #[must_use]
    pub fn display_currency(&self) -> &str {
        &self.settings.display_currency
    }

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace the rate snapshot wholesale. There is no partial merge.
    pub fn set_rates(&mut self, snapshot: RateSnapshot) {
        self.rates = Some(snapshot);
    }

    #[must_use]
    pub fn rates(&self) -> Option<&RateSnapshot> {
        self.rates.as_ref()
    }

    /// Drop the current snapshot; conversion degrades to identity.
    pub fn clear_rates(&mut self) {
        self.rates = None;
    }

    /// Replace the snapshot from a raw central-bank feed payload.
    pub fn load_rates_from_cbu_json(&mut self, json: &str) -> Result<(), CoreError> {
        self.rates = Some(providers::cbu::parse_cbu_rates(json)?);
        Ok(())
    }

    /// Replace the snapshot from a backend `/fx/rates` payload.
    pub fn load_rates_from_backend_json(&mut self, json: &str) -> Result<(), CoreError> {
        self.rates = Some(providers::backend::parse_backend_rates(json)?);
        Ok(())
    }

    // ── Conversion ──────────────────────────────────────────────────

    /// Convert an amount into the display currency.
    /// `from: None` means the amount is already in the display currency.
    #[must_use]
    pub fn convert(&self, amount: f64, from: Option<&str>) -> f64 {
        self.conversion_service.convert(
            amount,
            from,
            &self.settings.display_currency,
            self.rates.as_ref(),
        )
    }

    /// Convert with the diagnostic outcome attached, for callers that
    /// need to tell "converted" from "passed through".
    #[must_use]
    pub fn convert_checked(&self, amount: f64, from: Option<&str>) -> (f64, ConversionOutcome) {
        self.conversion_service.convert_checked(
            amount,
            from,
            &self.settings.display_currency,
            self.rates.as_ref(),
        )
    }

    // ── Balances ────────────────────────────────────────────────────

    /// Net balance of one wallet in the display currency.
    pub fn wallet_net_balance(&self, wallet_id: uuid::Uuid) -> Result<f64, CoreError> {
        let wallet = self
            .get_wallet(wallet_id)
            .ok_or_else(|| CoreError::WalletNotFound(wallet_id.to_string()))?;
        let convert = self
            .conversion_service
            .bind(&self.settings.display_currency, self.rates.as_ref());
        Ok(self.balance_service.wallet_net_balance(wallet, convert))
    }

    /// Combined net balance across all wallets in the display currency.
    #[must_use]
    pub fn total_net_balance(&self) -> f64 {
        let convert = self
            .conversion_service
            .bind(&self.settings.display_currency, self.rates.as_ref());
        self.balance_service
            .wallets_net_balance(&self.wallets, convert)
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Converted income/expense totals for `from..=to` across all wallets.
    #[must_use]
    pub fn period_totals(&self, from: NaiveDate, to: NaiveDate) -> PeriodTotals {
        let convert = self
            .conversion_service
            .bind(&self.settings.display_currency, self.rates.as_ref());
        self.report_service
            .period_totals(&self.wallets, from, to, convert)
    }

    /// Per-day converted totals for `from..=to`, ascending by date.
    #[must_use]
    pub fn daily_ledger(&self, from: NaiveDate, to: NaiveDate) -> Vec<DailyTotals> {
        let convert = self
            .conversion_service
            .bind(&self.settings.display_currency, self.rates.as_ref());
        self.report_service
            .daily_ledger(&self.wallets, from, to, convert)
    }

    /// Consumption of a budget within its current period window.
    #[must_use]
    pub fn budget_usage(&self, budget: &Budget, today: NaiveDate) -> BudgetUsage {
        let convert = self
            .conversion_service
            .bind(&self.settings.display_currency, self.rates.as_ref());
        self.report_service
            .budget_usage(budget, &self.wallets, today, convert)
    }

    // ── Display Formatting ──────────────────────────────────────────

    /// Format an amount for display: rounded to 2 fraction digits,
    /// trailing zeros stripped, display currency appended.
    #[must_use]
    pub fn format_amount(&self, amount: f64) -> String {
        self.format_service.format_price(
            amount,
            DEFAULT_PRICE_DIGITS,
            &self.settings.display_currency,
        )
    }

    /// Compact K/M/B rendering with the display currency appended.
    #[must_use]
    pub fn format_amount_compact(&self, amount: f64) -> String {
        self.format_service
            .format_compact(amount, Some(&self.settings.display_currency))
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Export all wallets (with their transactions) as a JSON string.
    pub fn export_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.wallets)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize wallets: {e}")))
    }

    /// Export all transactions as a CSV string.
    /// Columns: wallet_title, id, type, amount, currency, date, category, note
    #[must_use]
    pub fn export_transactions_to_csv(&self) -> String {
        let mut csv =
            String::from("wallet_title,id,type,amount,currency,date,category,note\n");
        for wallet in &self.wallets {
            for tx in &wallet.transactions {
                csv.push_str(&format!(
                    "{},{},{},{},{},{},{},{}\n",
                    escape_csv_field(&wallet.title),
                    tx.id,
                    tx.transaction_type,
                    tx.amount,
                    tx.currency.as_deref().unwrap_or(""),
                    tx.date,
                    escape_csv_field(tx.category.as_deref().unwrap_or("")),
                    escape_csv_field(tx.note.as_deref().unwrap_or("")),
                ));
            }
        }
        csv
    }

    /// Import wallets from a JSON string produced by `export_to_json`.
    /// Replaces the current wallet list.
    pub fn import_from_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let wallets: Vec<Wallet> = serde_json::from_str(json)?;
        let count = wallets.len();
        self.wallets = wallets;
        Ok(count)
    }
}

impl Default for WalletLedger {
    fn default() -> Self {
        Self::create_new()
    }
}

// ── Internal ────────────────────────────────────────────────────────

/// Currency codes are 3 ASCII letters, stored uppercased.
fn validate_currency_code(code: &str) -> Result<String, CoreError> {
    let trimmed = code.trim().to_uppercase();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(CoreError::ValidationError(format!(
            "Invalid currency code '{code}': must be exactly 3 ASCII letters (e.g., UZS, USD, EUR)"
        )));
    }
    Ok(trimmed)
}

/// Quote CSV fields containing commas, quotes, or newlines.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
