// ═══════════════════════════════════════════════════════════════════
// Balance Tests — BalanceService net-balance folds, malformed-record
// coercion, multi-wallet reduction
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::HashMap;

use wallet_ledger_core::models::rates::RateSnapshot;
use wallet_ledger_core::models::wallet::{Transaction, TransactionType, Wallet};
use wallet_ledger_core::services::balance_service::BalanceService;
use wallet_ledger_core::services::conversion_service::ConversionService;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn snapshot(pairs: &[(&str, f64)]) -> RateSnapshot {
    let rates: HashMap<String, f64> = pairs
        .iter()
        .map(|(code, rate)| (code.to_string(), *rate))
        .collect();
    RateSnapshot::new(rates)
}

/// Identity conversion — everything already in the display currency.
fn no_convert(amount: f64, _from: Option<&str>) -> f64 {
    amount
}

fn tx(transaction_type: TransactionType, amount: f64, currency: Option<&str>) -> Transaction {
    Transaction::new(
        transaction_type,
        amount,
        currency.map(str::to_string),
        d(2025, 1, 15),
    )
}

mod wallet_net_balance {
    use super::*;

    #[test]
    fn income_adds_expense_subtracts() {
        let svc = BalanceService::new();
        let mut wallet = Wallet::new("💵", "Cash", 100.0, None);
        wallet.transactions.push(tx(TransactionType::Income, 50.0, None));
        wallet.transactions.push(tx(TransactionType::Expense, 30.0, None));

        assert_eq!(svc.wallet_net_balance(&wallet, no_convert), 120.0);
    }

    #[test]
    fn empty_history_is_just_the_balance() {
        let svc = BalanceService::new();
        let wallet = Wallet::new("💵", "Cash", 250.0, None);
        assert_eq!(svc.wallet_net_balance(&wallet, no_convert), 250.0);
    }

    #[test]
    fn order_independent() {
        let svc = BalanceService::new();
        let entries = [
            tx(TransactionType::Income, 10.0, None),
            tx(TransactionType::Expense, 4.0, None),
            tx(TransactionType::Income, 2.5, None),
        ];

        let mut forward = Wallet::new("💵", "Cash", 0.0, None);
        forward.transactions.extend(entries.iter().cloned());

        let mut reversed = Wallet::new("💵", "Cash", 0.0, None);
        reversed.transactions.extend(entries.iter().rev().cloned());

        assert_eq!(
            svc.wallet_net_balance(&forward, no_convert),
            svc.wallet_net_balance(&reversed, no_convert),
        );
    }

    #[test]
    fn net_can_go_negative() {
        let svc = BalanceService::new();
        let mut wallet = Wallet::new("💳", "Card", 20.0, None);
        wallet.transactions.push(tx(TransactionType::Expense, 75.0, None));
        assert_eq!(svc.wallet_net_balance(&wallet, no_convert), -55.0);
    }

    #[test]
    fn per_item_conversion_applied() {
        let svc = BalanceService::new();
        let conversion = ConversionService::new();
        let table = snapshot(&[("USD", 12600.0)]);
        let convert = conversion.bind("UZS", Some(&table));

        // Balance in USD, one income in USD, one expense already in UZS
        let mut wallet = Wallet::new("💵", "Cash", 100.0, Some("USD".into()));
        wallet.transactions.push(tx(TransactionType::Income, 50.0, Some("USD")));
        wallet
            .transactions
            .push(tx(TransactionType::Expense, 63_000.0, None));

        let expected = 100.0 * 12600.0 + 50.0 * 12600.0 - 63_000.0;
        let net = svc.wallet_net_balance(&wallet, convert);
        assert!((net - expected).abs() < 1e-6);
    }

    #[test]
    fn nan_balance_coerced_to_zero() {
        let svc = BalanceService::new();
        let mut wallet = Wallet::new("💵", "Cash", f64::NAN, None);
        wallet.transactions.push(tx(TransactionType::Income, 10.0, None));

        let net = svc.wallet_net_balance(&wallet, no_convert);
        assert_eq!(net, 10.0);
        assert!(net.is_finite());
    }

    #[test]
    fn infinite_transaction_amount_coerced_to_zero() {
        let svc = BalanceService::new();
        let mut wallet = Wallet::new("💵", "Cash", 100.0, None);
        wallet
            .transactions
            .push(tx(TransactionType::Expense, f64::INFINITY, None));

        assert_eq!(svc.wallet_net_balance(&wallet, no_convert), 100.0);
    }

    #[test]
    fn missing_rates_degrade_to_identity() {
        let svc = BalanceService::new();
        let conversion = ConversionService::new();
        let convert = conversion.bind("UZS", None);

        let mut wallet = Wallet::new("💵", "Cash", 100.0, Some("USD".into()));
        wallet.transactions.push(tx(TransactionType::Income, 50.0, Some("USD")));

        // No rates — amounts pass through untouched
        assert_eq!(svc.wallet_net_balance(&wallet, convert), 150.0);
    }
}

mod wallets_net_balance {
    use super::*;

    #[test]
    fn sums_across_wallets() {
        let svc = BalanceService::new();

        let mut cash = Wallet::new("💵", "Cash", 100.0, None);
        cash.transactions.push(tx(TransactionType::Income, 25.0, None));

        let mut card = Wallet::new("💳", "Card", 500.0, None);
        card.transactions.push(tx(TransactionType::Expense, 100.0, None));

        let wallets = vec![cash, card];
        assert_eq!(svc.wallets_net_balance(&wallets, no_convert), 525.0);
    }

    #[test]
    fn empty_collection_is_zero() {
        let svc = BalanceService::new();
        assert_eq!(svc.wallets_net_balance(&[], no_convert), 0.0);
    }

    #[test]
    fn always_finite() {
        let svc = BalanceService::new();
        let mut broken = Wallet::new("❓", "Broken", f64::NEG_INFINITY, None);
        broken
            .transactions
            .push(tx(TransactionType::Income, f64::NAN, None));

        let wallets = vec![broken, Wallet::new("💵", "Cash", 5.0, None)];
        let net = svc.wallets_net_balance(&wallets, no_convert);
        assert!(net.is_finite());
        assert_eq!(net, 5.0);
    }

    #[test]
    #[allow(clippy::default_constructed_unit_structs)]
    fn default_trait() {
        let svc = BalanceService::default();
        assert_eq!(svc.wallets_net_balance(&[], no_convert), 0.0);
    }
}
