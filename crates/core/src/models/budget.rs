use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a budget resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl std::fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPeriod::Weekly => write!(f, "Weekly"),
            BudgetPeriod::Monthly => write!(f, "Monthly"),
            BudgetPeriod::Yearly => write!(f, "Yearly"),
        }
    }
}

impl BudgetPeriod {
    /// Inclusive start and end of the period window containing `date`.
    /// Weeks start on Monday; months and years use calendar boundaries.
    pub fn window(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            BudgetPeriod::Weekly => {
                let offset = date.weekday().num_days_from_monday() as i64;
                let start = date - Duration::days(offset);
                (start, start + Duration::days(6))
            }
            BudgetPeriod::Monthly => {
                let start = date.with_day(1).unwrap_or(date);
                let end = if date.month() == 12 {
                    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
                }
                .map(|next| next - Duration::days(1))
                .unwrap_or(date);
                (start, end)
            }
            BudgetPeriod::Yearly => {
                let start = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
                let end = NaiveDate::from_ymd_opt(date.year(), 12, 31).unwrap_or(date);
                (start, end)
            }
        }
    }

    /// Whether `candidate` falls inside the period window containing `anchor`.
    pub fn contains(&self, anchor: NaiveDate, candidate: NaiveDate) -> bool {
        let (start, end) = self.window(anchor);
        candidate >= start && candidate <= end
    }
}

/// A spending limit over a recurring period, expressed in the
/// display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: Uuid,

    /// Display title (e.g., "Groceries")
    pub title: String,

    /// Spending limit per period, in display currency
    pub amount: f64,

    /// Reset cadence
    pub period: BudgetPeriod,

    /// When the budget was created
    pub created_at: NaiveDate,
}

impl Budget {
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        period: BudgetPeriod,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            period,
            created_at,
        }
    }
}
