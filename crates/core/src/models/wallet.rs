use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Type of a wallet transaction.
/// Income adds to the wallet's net balance, expense subtracts from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// A single income/expense entry in a wallet's history.
///
/// `currency: None` means the amount is already denominated in the user's
/// display currency and needs no conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Income or Expense
    pub transaction_type: TransactionType,

    /// Amount in `currency` (stored as entered, sign carried by the type)
    pub amount: f64,

    /// Currency code (e.g., "USD"); `None` means display currency
    #[serde(default)]
    pub currency: Option<String>,

    /// Date of the transaction (daily granularity)
    pub date: NaiveDate,

    /// Category label (e.g., "Groceries"); free-form, optional
    #[serde(default)]
    pub category: Option<String>,

    /// Optional free-text note
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(
        transaction_type: TransactionType,
        amount: f64,
        currency: Option<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_type,
            amount,
            currency: currency.map(|c| c.trim().to_uppercase()),
            date,
            category: None,
            note: None,
        }
    }

    /// Create a transaction with a note attached.
    pub fn with_note(
        transaction_type: TransactionType,
        amount: f64,
        currency: Option<String>,
        date: NaiveDate,
        note: impl Into<String>,
    ) -> Self {
        Self {
            note: Some(note.into()),
            ..Self::new(transaction_type, amount, currency, date)
        }
    }

    /// Builder-style category setter.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// A wallet: a stored base balance plus its transaction history.
///
/// The insertion order of `transactions` is irrelevant for balance sums;
/// listings sort explicitly where order matters for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique identifier
    pub id: Uuid,

    /// Short display symbol (e.g., an emoji or ticker-like tag)
    pub symbol: String,

    /// Human-readable title (e.g., "Cash", "Visa ****1234")
    pub title: String,

    /// Stored base balance in `currency`
    pub balance: f64,

    /// Currency of the stored balance; `None` means display currency
    #[serde(default)]
    pub currency: Option<String>,

    /// Income/expense history
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Wallet {
    pub fn new(
        symbol: impl Into<String>,
        title: impl Into<String>,
        balance: f64,
        currency: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            title: title.into(),
            balance,
            currency: currency.map(|c| c.trim().to_uppercase()),
            transactions: Vec::new(),
        }
    }
}
