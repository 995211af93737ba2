// ═══════════════════════════════════════════════════════════════════
// Model Tests — wallet/transaction shapes, rate snapshots, budgets,
// settings, serde round-trips
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::HashMap;

use wallet_ledger_core::models::budget::{Budget, BudgetPeriod};
use wallet_ledger_core::models::rates::{normalize_code, RateSnapshot, BASE_CURRENCY};
use wallet_ledger_core::models::settings::Settings;
use wallet_ledger_core::models::wallet::{Transaction, TransactionType, Wallet};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionType
// ═══════════════════════════════════════════════════════════════════

mod transaction_type {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn serde_lowercase_tags() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Income).unwrap(),
            "\"income\""
        );
        let back: TransactionType = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(back, TransactionType::Expense);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    #[test]
    fn new_normalizes_currency_code() {
        let tx = Transaction::new(
            TransactionType::Income,
            10.0,
            Some(" usd ".into()),
            d(2025, 1, 15),
        );
        assert_eq!(tx.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn new_without_currency() {
        let tx = Transaction::new(TransactionType::Expense, 5.0, None, d(2025, 1, 15));
        assert!(tx.currency.is_none());
        assert!(tx.note.is_none());
        assert!(tx.category.is_none());
    }

    #[test]
    fn with_note() {
        let tx = Transaction::with_note(
            TransactionType::Expense,
            12.5,
            None,
            d(2025, 1, 15),
            "lunch",
        );
        assert_eq!(tx.note.as_deref(), Some("lunch"));
    }

    #[test]
    fn with_category_builder() {
        let tx = Transaction::new(TransactionType::Expense, 12.5, None, d(2025, 1, 15))
            .with_category("Groceries");
        assert_eq!(tx.category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn unique_ids() {
        let a = Transaction::new(TransactionType::Income, 1.0, None, d(2025, 1, 1));
        let b = Transaction::new(TransactionType::Income, 1.0, None, d(2025, 1, 1));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn serde_roundtrip() {
        let tx = Transaction::with_note(
            TransactionType::Income,
            42.0,
            Some("EUR".into()),
            d(2025, 3, 1),
            "salary",
        );
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }

    #[test]
    fn optional_fields_default_on_deserialize() {
        let json = format!(
            r#"{{"id":"{}","transaction_type":"income","amount":7.0,"date":"2025-01-15"}}"#,
            uuid::Uuid::new_v4()
        );
        let tx: Transaction = serde_json::from_str(&json).unwrap();
        assert!(tx.currency.is_none());
        assert!(tx.category.is_none());
        assert!(tx.note.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Wallet
// ═══════════════════════════════════════════════════════════════════

mod wallet {
    use super::*;

    #[test]
    fn new_starts_with_empty_history() {
        let wallet = Wallet::new("💵", "Cash", 100.0, Some("usd".into()));
        assert_eq!(wallet.title, "Cash");
        assert_eq!(wallet.balance, 100.0);
        assert_eq!(wallet.currency.as_deref(), Some("USD"));
        assert!(wallet.transactions.is_empty());
    }

    #[test]
    fn serde_roundtrip_with_transactions() {
        let mut wallet = Wallet::new("💳", "Card", 500.0, None);
        wallet.transactions.push(Transaction::new(
            TransactionType::Expense,
            30.0,
            Some("USD".into()),
            d(2025, 2, 10),
        ));

        let json = serde_json::to_string(&wallet).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(wallet, back);
    }

    #[test]
    fn transactions_default_on_deserialize() {
        let json = format!(
            r#"{{"id":"{}","symbol":"💵","title":"Cash","balance":10.0}}"#,
            uuid::Uuid::new_v4()
        );
        let wallet: Wallet = serde_json::from_str(&json).unwrap();
        assert!(wallet.transactions.is_empty());
        assert!(wallet.currency.is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RateSnapshot
// ═══════════════════════════════════════════════════════════════════

mod rate_snapshot {
    use super::*;

    fn table(pairs: &[(&str, f64)]) -> RateSnapshot {
        let rates: HashMap<String, f64> = pairs
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect();
        RateSnapshot::new(rates)
    }

    #[test]
    fn normalize_code_trims_and_uppercases() {
        assert_eq!(normalize_code(" usd "), "USD");
        assert_eq!(normalize_code("Eur"), "EUR");
    }

    #[test]
    fn new_normalizes_keys() {
        let snapshot = table(&[(" usd ", 12600.0)]);
        assert_eq!(snapshot.rate("USD"), Some(12600.0));
        assert_eq!(snapshot.rate("usd"), Some(12600.0));
    }

    #[test]
    fn base_currency_is_always_one() {
        let snapshot = table(&[("USD", 12600.0)]);
        assert_eq!(snapshot.rate(BASE_CURRENCY), Some(1.0));
        assert_eq!(snapshot.rate("uzs"), Some(1.0));
    }

    #[test]
    fn unusable_rates_yield_none() {
        let snapshot = table(&[("ZER", 0.0), ("NEG", -2.0), ("NAN", f64::NAN)]);
        assert_eq!(snapshot.rate("ZER"), None);
        assert_eq!(snapshot.rate("NEG"), None);
        assert_eq!(snapshot.rate("NAN"), None);
        assert_eq!(snapshot.rate("ABS"), None);
    }

    #[test]
    fn len_and_is_empty() {
        assert!(RateSnapshot::default().is_empty());
        let snapshot = table(&[("USD", 12600.0), ("EUR", 13600.0)]);
        assert_eq!(snapshot.len(), 2);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn currencies_sorted() {
        let snapshot = table(&[("USD", 12600.0), ("EUR", 13600.0), ("GBP", 16000.0)]);
        assert_eq!(snapshot.currencies(), vec!["EUR", "GBP", "USD"]);
    }

    #[test]
    fn delta_and_previous_lookup() {
        let mut snapshot = table(&[("USD", 12600.0)]);
        snapshot.delta_rates = Some(HashMap::from([("USD".to_string(), 25.0)]));
        snapshot.previous_rates = Some(HashMap::from([("USD".to_string(), 12575.0)]));

        assert_eq!(snapshot.delta("usd"), Some(25.0));
        assert_eq!(snapshot.previous_rate("USD"), Some(12575.0));
        assert_eq!(snapshot.delta("EUR"), None);
    }

    #[test]
    fn serde_roundtrip() {
        let mut snapshot = table(&[("USD", 12600.0)]);
        snapshot.date = Some(d(2025, 1, 15));
        snapshot.source = Some("CBU".to_string());

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Budget & BudgetPeriod
// ═══════════════════════════════════════════════════════════════════

mod budget {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(BudgetPeriod::Weekly.to_string(), "Weekly");
        assert_eq!(BudgetPeriod::Monthly.to_string(), "Monthly");
        assert_eq!(BudgetPeriod::Yearly.to_string(), "Yearly");
    }

    #[test]
    fn monthly_window_is_the_calendar_month() {
        let (start, end) = BudgetPeriod::Monthly.window(d(2025, 1, 15));
        assert_eq!(start, d(2025, 1, 1));
        assert_eq!(end, d(2025, 1, 31));
    }

    #[test]
    fn monthly_window_december_wraps_year() {
        let (start, end) = BudgetPeriod::Monthly.window(d(2025, 12, 10));
        assert_eq!(start, d(2025, 12, 1));
        assert_eq!(end, d(2025, 12, 31));
    }

    #[test]
    fn monthly_window_leap_february() {
        let (start, end) = BudgetPeriod::Monthly.window(d(2024, 2, 10));
        assert_eq!(start, d(2024, 2, 1));
        assert_eq!(end, d(2024, 2, 29));
    }

    #[test]
    fn weekly_window_starts_monday() {
        // 2025-01-15 is a Wednesday
        let (start, end) = BudgetPeriod::Weekly.window(d(2025, 1, 15));
        assert_eq!(start, d(2025, 1, 13));
        assert_eq!(end, d(2025, 1, 19));
    }

    #[test]
    fn yearly_window() {
        let (start, end) = BudgetPeriod::Yearly.window(d(2025, 6, 30));
        assert_eq!(start, d(2025, 1, 1));
        assert_eq!(end, d(2025, 12, 31));
    }

    #[test]
    fn window_contains_its_anchor() {
        for period in [BudgetPeriod::Weekly, BudgetPeriod::Monthly, BudgetPeriod::Yearly] {
            assert!(period.contains(d(2025, 1, 15), d(2025, 1, 15)));
        }
    }

    #[test]
    fn contains_excludes_outside_dates() {
        assert!(!BudgetPeriod::Monthly.contains(d(2025, 1, 15), d(2025, 2, 1)));
        assert!(!BudgetPeriod::Weekly.contains(d(2025, 1, 15), d(2025, 1, 20)));
    }

    #[test]
    fn budget_new() {
        let budget = Budget::new("Groceries", 500.0, BudgetPeriod::Monthly, d(2025, 1, 1));
        assert_eq!(budget.title, "Groceries");
        assert_eq!(budget.amount, 500.0);
        assert_eq!(budget.period, BudgetPeriod::Monthly);
    }

    #[test]
    fn serde_roundtrip() {
        let budget = Budget::new("Travel", 1200.0, BudgetPeriod::Yearly, d(2025, 1, 1));
        let json = serde_json::to_string(&budget).unwrap();
        let back: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget, back);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn default_display_currency_is_base() {
        assert_eq!(Settings::default().display_currency, "UZS");
    }
}
