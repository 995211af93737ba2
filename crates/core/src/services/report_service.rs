use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::budget::Budget;
use crate::models::wallet::{TransactionType, Wallet};
use crate::services::balance_service::safe_amount;

/// Converted income and expense totals over a date range.
/// Both figures are positive magnitudes; net spending is `income - expense`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodTotals {
    pub income: f64,
    pub expense: f64,
}

impl PeriodTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// One day's converted totals, for the income/expense chart screens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub income: f64,
    pub expense: f64,
}

/// How far a budget's current period has been consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetUsage {
    /// Converted expense total inside the current period window
    pub spent: f64,
    /// Limit minus spent (negative when over budget)
    pub remaining: f64,
    /// Spent as a percentage of the limit (0 when the limit is 0)
    pub used_pct: f64,
}

/// Period and per-day reporting over transaction histories.
///
/// Reporting applies the same per-transaction convert-then-branch-on-type
/// fold as net-balance aggregation, restricted by a date-range predicate.
/// The conversion closure has the `(amount, source_currency)` shape.
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    /// Converted income/expense totals across `wallets` for transactions
    /// dated within `from..=to`.
    pub fn period_totals<F>(
        &self,
        wallets: &[Wallet],
        from: NaiveDate,
        to: NaiveDate,
        convert: F,
    ) -> PeriodTotals
    where
        F: Fn(f64, Option<&str>) -> f64,
    {
        let mut totals = PeriodTotals::default();
        for tx in wallets.iter().flat_map(|w| &w.transactions) {
            if tx.date < from || tx.date > to {
                continue;
            }
            let amount = convert(safe_amount(tx.amount), tx.currency.as_deref());
            match tx.transaction_type {
                TransactionType::Income => totals.income += amount,
                TransactionType::Expense => totals.expense += amount,
            }
        }
        totals
    }

    /// Per-day converted totals across `wallets` for `from..=to`,
    /// ascending by date. Days without transactions are omitted.
    pub fn daily_ledger<F>(
        &self,
        wallets: &[Wallet],
        from: NaiveDate,
        to: NaiveDate,
        convert: F,
    ) -> Vec<DailyTotals>
    where
        F: Fn(f64, Option<&str>) -> f64,
    {
        let mut days: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
        for tx in wallets.iter().flat_map(|w| &w.transactions) {
            if tx.date < from || tx.date > to {
                continue;
            }
            let amount = convert(safe_amount(tx.amount), tx.currency.as_deref());
            let entry = days.entry(tx.date).or_insert((0.0, 0.0));
            match tx.transaction_type {
                TransactionType::Income => entry.0 += amount,
                TransactionType::Expense => entry.1 += amount,
            }
        }

        days.into_iter()
            .map(|(date, (income, expense))| DailyTotals {
                date,
                income,
                expense,
            })
            .collect()
    }

    /// Consumption of `budget` within the period window containing `today`:
    /// converted expenses only, incomes do not refill a budget.
    pub fn budget_usage<F>(
        &self,
        budget: &Budget,
        wallets: &[Wallet],
        today: NaiveDate,
        convert: F,
    ) -> BudgetUsage
    where
        F: Fn(f64, Option<&str>) -> f64,
    {
        let (from, to) = budget.period.window(today);
        let totals = self.period_totals(wallets, from, to, convert);

        let limit = safe_amount(budget.amount);
        let spent = totals.expense;
        let used_pct = if limit > 0.0 {
            (spent / limit) * 100.0
        } else {
            0.0
        };

        BudgetUsage {
            spent,
            remaining: limit - spent,
            used_pct,
        }
    }
}

impl Default for ReportService {
    fn default() -> Self {
        Self::new()
    }
}
