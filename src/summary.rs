//! The aggregation core: collapses a transaction collection into the totals,
//! groupings, and series a reporting layer presents.
//!
//! Everything here is a pure function of its input. No I/O, no shared state,
//! and recomputing with the same input always yields the same output.

use crate::error::InvalidTransaction;
use crate::model::{Amount, Period, Transaction, TransactionKind};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Reserved grouping key for expenses whose category is blank. Assigning a
/// real category is the job of whatever feeds this core; the sentinel is
/// applied at aggregation time only and stored categories are never rewritten.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One point in the daily-volume series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    /// Sum of amounts on that day across both kinds, as unsigned magnitudes:
    /// total dollar volume moved, not net cash flow.
    pub total: Amount,
}

/// The aggregated projection of a transaction collection.
///
/// Derived and immutable; never persisted. Map keys ascend and
/// `daily_totals` ascends by date, so iteration order is stable for
/// presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    total_income: Amount,
    total_by_kind: BTreeMap<TransactionKind, Amount>,
    expenses_by_category: BTreeMap<String, Amount>,
    net_amount: Amount,
    daily_totals: Vec<DailyTotal>,
}

impl PeriodSummary {
    /// Sum of amounts over the Income partition.
    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    /// Sum of amounts over the Expense partition.
    pub fn total_expenses(&self) -> Amount {
        self.total_by_kind
            .get(&TransactionKind::Expense)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Totals keyed by kind. Both keys are always present, zero when a
    /// partition is empty.
    pub fn total_by_kind(&self) -> &BTreeMap<TransactionKind, Amount> {
        &self.total_by_kind
    }

    /// Expense totals grouped by exact category string, blank grouped under
    /// [`UNCATEGORIZED`].
    pub fn expenses_by_category(&self) -> &BTreeMap<String, Amount> {
        &self.expenses_by_category
    }

    /// `total_income - total_expenses`. The one value here that may be
    /// negative.
    pub fn net_amount(&self) -> Amount {
        self.net_amount
    }

    /// Sparse daily series over all transactions, ascending by date.
    pub fn daily_totals(&self) -> &[DailyTotal] {
        &self.daily_totals
    }

    /// Parallel label/value vectors for an expenses-by-category pie chart.
    pub fn expense_breakdown(&self) -> (Vec<String>, Vec<Amount>) {
        let labels = self.expenses_by_category.keys().cloned().collect();
        let values = self.expenses_by_category.values().copied().collect();
        (labels, values)
    }

    /// The one-sentence numeric summary the dashboard shows for a period.
    ///
    /// ```
    /// # use txn_summary::{summarize, Period};
    /// let summary = summarize(&[]).unwrap();
    /// let period = Period::new(2025, 3).unwrap();
    /// assert_eq!(
    ///     summary.headline(period),
    ///     "In March, revenue was $0. Total expenses were $0. Net profit: $0."
    /// );
    /// ```
    pub fn headline(&self, period: Period) -> String {
        format!(
            "In {}, revenue was {}. Total expenses were {}. Net profit: {}.",
            period.month_name(),
            whole_dollars(self.total_income()),
            whole_dollars(self.total_expenses()),
            whole_dollars(self.net_amount()),
        )
    }
}

/// Comma-grouped whole dollars, sign ahead of the dollar sign.
fn whole_dollars(amount: Amount) -> String {
    let (sign, value) = if amount.is_negative() {
        ("-", amount.value().abs())
    } else {
        ("", amount.value())
    };
    format!(
        "{sign}${}",
        format_num::format_num!(",.0", value.to_f64().unwrap_or_default())
    )
}

/// Collapses `transactions` into a [`PeriodSummary`].
///
/// An empty input is not an error; it yields all-zero totals and an empty
/// daily series. A record with a negative amount fails the whole call with
/// [`InvalidTransaction`]; there is no partial summarization, so callers
/// needing best-effort results must pre-filter. (Date and kind malformations
/// cannot reach this function; the `TransactionRecord` boundary rejects
/// them.)
pub fn summarize<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<PeriodSummary, InvalidTransaction> {
    let mut total_by_kind = BTreeMap::from([
        (TransactionKind::Income, Amount::ZERO),
        (TransactionKind::Expense, Amount::ZERO),
    ]);
    let mut expenses_by_category: BTreeMap<String, Amount> = BTreeMap::new();
    let mut by_date: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
    let mut count = 0usize;

    for transaction in transactions {
        if transaction.amount.is_negative() {
            return Err(InvalidTransaction::NegativeAmount {
                id: transaction.id.clone(),
                amount: transaction.amount.value(),
            });
        }

        *total_by_kind.entry(transaction.kind).or_insert(Amount::ZERO) += transaction.amount;

        if transaction.kind == TransactionKind::Expense {
            let label = if transaction.category.trim().is_empty() {
                UNCATEGORIZED
            } else {
                transaction.category.as_str()
            };
            *expenses_by_category
                .entry(label.to_string())
                .or_insert(Amount::ZERO) += transaction.amount;
        }

        *by_date.entry(transaction.date).or_insert(Amount::ZERO) += transaction.amount;
        count += 1;
    }

    let total_income = total_by_kind[&TransactionKind::Income];
    let net_amount = total_income - total_by_kind[&TransactionKind::Expense];
    debug!("summarized {count} transactions across {} days", by_date.len());

    Ok(PeriodSummary {
        total_income,
        total_by_kind,
        expenses_by_category,
        net_amount,
        daily_totals: by_date
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect(),
    })
}

/// Keeps only the transactions whose date falls within `period`.
///
/// A period with no matching transactions yields an empty vector, never an
/// error.
pub fn filter_by_period<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    period: Period,
) -> Vec<&'a Transaction> {
    transactions
        .into_iter()
        .filter(|t| period.contains(t.date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transactions;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn txn(id: &str, date: &str, amount: Decimal, kind: TransactionKind, category: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            date: date.parse().unwrap(),
            description: String::new(),
            amount: Amount::new(amount),
            kind,
            category: category.to_string(),
        }
    }

    /// The worked March scenario: one invoice, payroll, and a utility bill.
    fn march_transactions() -> Vec<Transaction> {
        vec![
            txn("t-1", "2025-03-01", dec!(9200), TransactionKind::Income, "Revenue"),
            txn("t-2", "2025-03-05", dec!(8200), TransactionKind::Expense, "Payroll"),
            txn("t-3", "2025-03-10", dec!(326), TransactionKind::Expense, "Utilities"),
        ]
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = summarize(&[]).unwrap();
        assert!(summary.total_income().is_zero());
        assert!(summary.total_expenses().is_zero());
        assert!(summary.net_amount().is_zero());
        assert!(summary.expenses_by_category().is_empty());
        assert!(summary.daily_totals().is_empty());
        // Both kinds are still present in the by-kind map.
        assert_eq!(summary.total_by_kind().len(), 2);
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let transactions = march_transactions();
        let first = summarize(&transactions).unwrap();
        let second = summarize(&transactions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_conservation() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(100.10), TransactionKind::Income, ""),
            txn("t-2", "2025-03-02", dec!(0.20), TransactionKind::Expense, "Fees"),
            txn("t-3", "2025-03-02", dec!(49.75), TransactionKind::Expense, "Rent"),
            txn("t-4", "2025-03-09", dec!(12.00), TransactionKind::Income, ""),
        ];
        let summary = summarize(&transactions).unwrap();

        let volume: Amount = transactions.iter().map(|t| t.amount).sum();
        let income = summary.total_by_kind()[&TransactionKind::Income];
        let expenses = summary.total_by_kind()[&TransactionKind::Expense];
        assert_eq!(income + expenses, volume);
        assert_eq!(summary.net_amount(), income - expenses);
    }

    #[test]
    fn test_blank_category_groups_as_uncategorized() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(100), TransactionKind::Expense, "Rent"),
            txn("t-2", "2025-03-02", dec!(50), TransactionKind::Expense, "Rent"),
            txn("t-3", "2025-03-03", dec!(20), TransactionKind::Expense, ""),
        ];
        let summary = summarize(&transactions).unwrap();
        let by_category = summary.expenses_by_category();
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category["Rent"].value(), dec!(150));
        assert_eq!(by_category[UNCATEGORIZED].value(), dec!(20));
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(10), TransactionKind::Expense, "rent"),
            txn("t-2", "2025-03-02", dec!(15), TransactionKind::Expense, "Rent"),
        ];
        let summary = summarize(&transactions).unwrap();
        assert_eq!(summary.expenses_by_category().len(), 2);
    }

    #[test]
    fn test_income_category_does_not_join_the_expense_breakdown() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(100), TransactionKind::Income, "Revenue"),
            txn("t-2", "2025-03-02", dec!(40), TransactionKind::Expense, "Rent"),
        ];
        let summary = summarize(&transactions).unwrap();
        assert!(!summary.expenses_by_category().contains_key("Revenue"));
    }

    #[test]
    fn test_daily_totals_ascend_regardless_of_input_order() {
        let transactions = vec![
            txn("t-1", "2025-03-10", dec!(1), TransactionKind::Expense, ""),
            txn("t-2", "2025-03-01", dec!(2), TransactionKind::Income, ""),
            txn("t-3", "2025-03-05", dec!(3), TransactionKind::Expense, ""),
        ];
        let summary = summarize(&transactions).unwrap();
        let dates: Vec<String> = summary
            .daily_totals()
            .iter()
            .map(|d| d.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-03-01", "2025-03-05", "2025-03-10"]);
    }

    #[test]
    fn test_same_day_volume_merges_both_kinds() {
        // An expense on the same day as income adds positively: the daily
        // series is dollar volume moved, not net cash flow.
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(100), TransactionKind::Income, ""),
            txn("t-2", "2025-03-01", dec!(40), TransactionKind::Expense, ""),
        ];
        let summary = summarize(&transactions).unwrap();
        assert_eq!(summary.daily_totals().len(), 1);
        assert_eq!(summary.daily_totals()[0].total.value(), dec!(140));
    }

    #[test]
    fn test_negative_amount_fails_the_whole_call() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(10), TransactionKind::Income, "x"),
            txn("t-2", "2025-03-01", dec!(-5), TransactionKind::Income, "x"),
        ];
        let err = summarize(&transactions).unwrap_err();
        assert_eq!(
            err,
            InvalidTransaction::NegativeAmount {
                id: "t-2".to_string(),
                amount: dec!(-5),
            }
        );
    }

    #[test]
    fn test_march_report_scenario() {
        let summary = summarize(&march_transactions()).unwrap();

        assert_eq!(summary.total_income().value(), dec!(9200));
        assert_eq!(summary.total_expenses().value(), dec!(8526));
        assert_eq!(summary.net_amount().value(), dec!(686));

        let by_category = summary.expenses_by_category();
        assert_eq!(by_category["Payroll"].value(), dec!(8200));
        assert_eq!(by_category["Utilities"].value(), dec!(326));

        let daily: Vec<(String, Decimal)> = summary
            .daily_totals()
            .iter()
            .map(|d| (d.date.to_string(), d.total.value()))
            .collect();
        assert_eq!(
            daily,
            vec![
                ("2025-03-01".to_string(), dec!(9200)),
                ("2025-03-05".to_string(), dec!(8200)),
                ("2025-03-10".to_string(), dec!(326)),
            ]
        );
    }

    #[test]
    fn test_net_amount_may_be_negative() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(100), TransactionKind::Income, ""),
            txn("t-2", "2025-03-02", dec!(150), TransactionKind::Expense, "Rent"),
        ];
        let summary = summarize(&transactions).unwrap();
        assert_eq!(summary.net_amount().value(), dec!(-50));
    }

    #[test]
    fn test_headline_wording() {
        let summary = summarize(&march_transactions()).unwrap();
        let period = Period::new(2025, 3).unwrap();
        assert_eq!(
            summary.headline(period),
            "In March, revenue was $9,200. Total expenses were $8,526. Net profit: $686."
        );
    }

    #[test]
    fn test_headline_with_negative_net() {
        let transactions = vec![
            txn("t-1", "2025-03-01", dec!(100), TransactionKind::Income, ""),
            txn("t-2", "2025-03-02", dec!(414), TransactionKind::Expense, "Rent"),
        ];
        let summary = summarize(&transactions).unwrap();
        let period = Period::new(2025, 3).unwrap();
        assert_eq!(
            summary.headline(period),
            "In March, revenue was $100. Total expenses were $414. Net profit: -$314."
        );
    }

    #[test]
    fn test_expense_breakdown_is_label_value_parallel() {
        let summary = summarize(&march_transactions()).unwrap();
        let (labels, values) = summary.expense_breakdown();
        assert_eq!(labels, vec!["Payroll", "Utilities"]);
        assert_eq!(values[0].value(), dec!(8200));
        assert_eq!(values[1].value(), dec!(326));
    }

    #[test]
    fn test_filter_by_period() {
        let transactions = vec![
            txn("t-1", "2025-02-28", dec!(1), TransactionKind::Income, ""),
            txn("t-2", "2025-03-01", dec!(2), TransactionKind::Income, ""),
            txn("t-3", "2025-03-31", dec!(3), TransactionKind::Expense, ""),
            txn("t-4", "2025-04-01", dec!(4), TransactionKind::Expense, ""),
        ];
        let march = Period::new(2025, 3).unwrap();
        let filtered = filter_by_period(&transactions, march);
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t-2", "t-3"]);

        let june = Period::new(2025, 6).unwrap();
        assert!(filter_by_period(&transactions, june).is_empty());
    }

    #[test]
    fn test_filter_then_summarize() {
        let mut transactions = march_transactions();
        transactions.push(txn("t-9", "2025-04-02", dec!(9999), TransactionKind::Expense, "Rent"));

        let transactions = Transactions::from(transactions);
        let march = Period::new(2025, 3).unwrap();
        let summary = summarize(filter_by_period(&transactions, march)).unwrap();
        assert_eq!(summary.net_amount().value(), dec!(686));
    }

    #[test]
    fn test_summary_serializes_for_the_report_renderer() {
        let summary = summarize(&march_transactions()).unwrap();
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["total_income"], serde_json::json!(9200.0));
        assert_eq!(json["net_amount"], serde_json::json!(686.0));
        assert_eq!(json["total_by_kind"]["Income"], serde_json::json!(9200.0));
        assert_eq!(json["expenses_by_category"]["Payroll"], serde_json::json!(8200.0));
        assert_eq!(json["daily_totals"][0]["date"], serde_json::json!("2025-03-01"));
        assert_eq!(json["daily_totals"][0]["total"], serde_json::json!(9200.0));
    }
}
