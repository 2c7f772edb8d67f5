//! Aggregates a filtered transaction set into the spend/income/cash-flow
//! statistics shown above the transaction table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{category, transaction::Transaction};

/// The top category reported when no category had any negative spend.
pub const NO_TOP_CATEGORY: &str = "N/A";

/// A financial summary of a filtered set of transactions.
///
/// Serialized camelCase because that is the wire shape the table header
/// cards consume.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of all negative transaction amounts. Never positive.
    pub total_spent: f64,
    /// The sum of all non-negative transaction amounts.
    pub total_income: f64,
    /// The total net change in funds, spending plus income.
    pub net_cash_flow: f64,
    /// The sum of all recurring transaction amounts.
    pub fixed_costs: f64,
    /// The sum of all non-recurring transaction amounts.
    pub variable_costs: f64,
    /// The category with the highest total spending, or [NO_TOP_CATEGORY].
    pub top_category: String,
}

/// Summarize a set of transactions.
///
/// Transactions in the "excluded" category are skipped by every aggregate.
/// Non-finite amounts (the builder's NaN sentinel) count as zero. The top
/// category ranks categories by the magnitude of their negative amounts; ties
/// break alphabetically so the result is deterministic.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let mut summary = Summary {
        total_spent: 0.0,
        total_income: 0.0,
        net_cash_flow: 0.0,
        fixed_costs: 0.0,
        variable_costs: 0.0,
        top_category: NO_TOP_CATEGORY.to_owned(),
    };

    let mut spending_by_category: BTreeMap<&str, f64> = BTreeMap::new();

    for transaction in transactions {
        if transaction.category == category::EXCLUDED {
            continue;
        }

        let amount = if transaction.amount.is_finite() {
            transaction.amount
        } else {
            0.0
        };

        summary.net_cash_flow += amount;

        if amount < 0.0 {
            summary.total_spent += amount;
        } else {
            summary.total_income += amount;
        }

        if transaction.is_reoccuring {
            summary.fixed_costs += amount;
        } else {
            summary.variable_costs += amount;
        }

        if amount < 0.0 {
            *spending_by_category
                .entry(transaction.category.as_str())
                .or_default() += amount.abs();
        }
    }

    // BTreeMap iterates alphabetically, and a later category must strictly
    // exceed the current best, so ties break towards the first name.
    let mut top_total = 0.0;
    for (category_name, total) in &spending_by_category {
        if *total > top_total {
            top_total = *total;
            summary.top_category = (*category_name).to_owned();
        }
    }

    summary
}

#[cfg(test)]
mod summarize_tests {
    use crate::transaction::Transaction;

    use super::{NO_TOP_CATEGORY, summarize};

    fn transaction(amount: f64, category: &str, is_reoccuring: bool) -> Transaction {
        Transaction {
            id: "id".to_owned(),
            account_id: None,
            date: "2024-01-05T00:00:00Z".to_owned(),
            name: None,
            description: "desc".to_owned(),
            amount,
            category: category.to_owned(),
            is_reoccuring,
        }
    }

    #[test]
    fn aggregates_spend_income_and_costs() {
        let transactions = [
            transaction(-50.0, "groceries", false),
            transaction(-20.0, "excluded", false),
            transaction(1000.0, "income", true),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.total_spent, -50.0);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.net_cash_flow, 950.0);
        assert_eq!(summary.fixed_costs, 1000.0);
        assert_eq!(summary.variable_costs, -50.0);
        assert_eq!(summary.top_category, "groceries");
    }

    #[test]
    fn zero_amounts_count_as_income() {
        let summary = summarize(&[transaction(0.0, "general", false)]);

        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_spent, 0.0);
    }

    #[test]
    fn nan_amounts_count_as_zero() {
        let transactions = [
            transaction(f64::NAN, "groceries", false),
            transaction(-10.0, "bills", false),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.net_cash_flow, -10.0);
        assert_eq!(summary.total_spent, -10.0);
        assert_eq!(summary.top_category, "bills");
    }

    #[test]
    fn excluded_category_is_skipped_everywhere() {
        let transactions = [
            transaction(-500.0, "excluded", true),
            transaction(-5.0, "take_out", false),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.total_spent, -5.0);
        assert_eq!(summary.fixed_costs, 0.0);
        assert_eq!(summary.top_category, "take_out");
    }

    #[test]
    fn top_category_only_counts_negative_amounts() {
        let transactions = [
            transaction(2000.0, "income", false),
            transaction(-15.0, "transport", false),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.top_category, "transport");
    }

    #[test]
    fn top_category_ties_break_alphabetically() {
        let transactions = [
            transaction(-25.0, "transport", false),
            transaction(-25.0, "groceries", false),
        ];

        let summary = summarize(&transactions);

        assert_eq!(summary.top_category, "groceries");
    }

    #[test]
    fn no_spending_reports_sentinel_top_category() {
        let summary = summarize(&[transaction(100.0, "income", false)]);

        assert_eq!(summary.top_category, NO_TOP_CATEGORY);
    }

    #[test]
    fn empty_set_is_all_zeroes() {
        let summary = summarize(&[]);

        assert_eq!(summary.net_cash_flow, 0.0);
        assert_eq!(summary.top_category, NO_TOP_CATEGORY);
    }
}
