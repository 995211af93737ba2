use thiserror::Error;

/// Unified error type for the entire wallet-ledger-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
///
/// Note that the conversion/aggregation/formatting core itself never
/// errors — missing rate information degrades to identity by design.
/// Errors exist only at the boundary: feed parsing, validation, export.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Wallet not found: {0}")]
    WalletNotFound(String),

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // ── Rate Feed ───────────────────────────────────────────────────
    #[error("Rate feed error: {0}")]
    RateFeed(String),

    // ── Serialization ───────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
