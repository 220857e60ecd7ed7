//! Server-side aggregation of transactions into the monthly summary and
//! the trailing history totals consumed by the dashboard.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Category, Period, Transaction, TransactionType};

/// Expense total for a single category within a summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category_id: Uuid,
    pub category_name: String,
    pub category_color: String,
    pub amount: Decimal,
    /// Share of total expenses, 0..=100.
    pub percentage: f64,
}

/// Aggregate of one month's transactions: totals, balance, and the
/// per-category expense breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionSummary {
    pub total_incomes: Decimal,
    pub total_expenses: Decimal,
    pub balance: Decimal,
    pub expenses_by_category: Vec<CategorySummary>,
}

/// Income/expense totals for one month of a history window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Short display label, e.g. `Mar/2025`.
    pub label: String,
    pub period: Period,
    pub incomes: Decimal,
    pub expenses: Decimal,
}

/// Compute the summary for a set of transactions (already filtered to one
/// user and one month by the caller).
///
/// Transactions pointing at a category missing from `categories` are still
/// counted, grouped under their id with placeholder name and color.
pub fn summarize(transactions: &[Transaction], categories: &[Category]) -> TransactionSummary {
    let mut total_incomes = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut per_category: HashMap<Uuid, Decimal> = HashMap::new();

    for tx in transactions {
        match tx.kind {
            TransactionType::Income => total_incomes += tx.amount,
            TransactionType::Expense => {
                total_expenses += tx.amount;
                *per_category.entry(tx.category_id).or_default() += tx.amount;
            }
        }
    }

    let lookup: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();

    let mut expenses_by_category: Vec<CategorySummary> = per_category
        .into_iter()
        .map(|(category_id, amount)| {
            let (name, color) = lookup
                .get(&category_id)
                .map(|c| (c.name.clone(), c.color.clone()))
                .unwrap_or_else(|| ("Uncategorized".to_string(), "#64748b".to_string()));

            CategorySummary {
                category_id,
                category_name: name,
                category_color: color,
                amount,
                percentage: percentage_of(amount, total_expenses),
            }
        })
        .collect();

    // Largest expense first, id as tiebreaker so the order is stable.
    expenses_by_category.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category_id.cmp(&b.category_id))
    });

    TransactionSummary {
        total_incomes,
        total_expenses,
        balance: total_incomes - total_expenses,
        expenses_by_category,
    }
}

/// Reduce one month's transactions to the income/expense pair used by the
/// historical bar chart.
pub fn monthly_totals(period: Period, transactions: &[Transaction]) -> MonthlyTotals {
    let mut incomes = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;

    for tx in transactions {
        match tx.kind {
            TransactionType::Income => incomes += tx.amount,
            TransactionType::Expense => expenses += tx.amount,
        }
    }

    MonthlyTotals {
        label: period.label(),
        period,
        incomes,
        expenses,
    }
}

fn percentage_of(amount: Decimal, total: Decimal) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (amount / total * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn category(name: &str, kind: TransactionType) -> Category {
        Category::new(
            Uuid::new_v4(),
            name.to_string(),
            "#ef4444".to_string(),
            "tag".to_string(),
            kind,
        )
        .unwrap()
    }

    fn tx(amount: Decimal, category_id: Uuid, kind: TransactionType) -> Transaction {
        Transaction::new(
            Uuid::new_v4(),
            "tx".to_string(),
            amount,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            category_id,
            kind,
        )
        .unwrap()
    }

    #[test]
    fn test_summarize_totals_and_balance() {
        let food = category("Food", TransactionType::Expense);
        let rent = category("Rent", TransactionType::Expense);
        let salary = category("Salary", TransactionType::Income);

        let transactions = vec![
            tx(dec!(250), food.id, TransactionType::Expense),
            tx(dec!(750), rent.id, TransactionType::Expense),
            tx(dec!(3000), salary.id, TransactionType::Income),
        ];
        let categories = vec![food.clone(), rent.clone(), salary];

        let summary = summarize(&transactions, &categories);

        assert_eq!(summary.total_incomes, dec!(3000));
        assert_eq!(summary.total_expenses, dec!(1000));
        assert_eq!(summary.balance, dec!(2000));
        assert_eq!(summary.expenses_by_category.len(), 2);

        // Sorted largest first.
        assert_eq!(summary.expenses_by_category[0].category_name, "Rent");
        assert_eq!(summary.expenses_by_category[0].amount, dec!(750));
        assert!((summary.expenses_by_category[0].percentage - 75.0).abs() < 1e-9);
        assert!((summary.expenses_by_category[1].percentage - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_summarize_percentages_sum_to_hundred() {
        let a = category("A", TransactionType::Expense);
        let b = category("B", TransactionType::Expense);
        let c = category("C", TransactionType::Expense);

        let transactions = vec![
            tx(dec!(10), a.id, TransactionType::Expense),
            tx(dec!(20), b.id, TransactionType::Expense),
            tx(dec!(30), c.id, TransactionType::Expense),
        ];
        let categories = vec![a, b, c];

        let summary = summarize(&transactions, &categories);
        let total: f64 = summary
            .expenses_by_category
            .iter()
            .map(|c| c.percentage)
            .sum();

        assert!((total - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_summarize_empty_input() {
        let summary = summarize(&[], &[]);

        assert_eq!(summary.total_incomes, Decimal::ZERO);
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert!(summary.expenses_by_category.is_empty());
    }

    #[test]
    fn test_summarize_no_expenses_skips_percentage_math() {
        let salary = category("Salary", TransactionType::Income);
        let transactions = vec![tx(dec!(3000), salary.id, TransactionType::Income)];

        let summary = summarize(&transactions, &[salary]);

        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.balance, dec!(3000));
        assert!(summary.expenses_by_category.is_empty());
    }

    #[test]
    fn test_summarize_unknown_category_gets_placeholder() {
        let orphan_id = Uuid::new_v4();
        let transactions = vec![tx(dec!(50), orphan_id, TransactionType::Expense)];

        let summary = summarize(&transactions, &[]);

        assert_eq!(summary.expenses_by_category.len(), 1);
        assert_eq!(
            summary.expenses_by_category[0].category_name,
            "Uncategorized"
        );
        assert_eq!(summary.expenses_by_category[0].category_id, orphan_id);
    }

    #[test]
    fn test_monthly_totals_reduce() {
        let food = category("Food", TransactionType::Expense);
        let salary = category("Salary", TransactionType::Income);
        let period = Period::new(3, 2025).unwrap();

        let transactions = vec![
            tx(dec!(100), food.id, TransactionType::Expense),
            tx(dec!(40), food.id, TransactionType::Expense),
            tx(dec!(900), salary.id, TransactionType::Income),
        ];

        let totals = monthly_totals(period, &transactions);

        assert_eq!(totals.label, "Mar/2025");
        assert_eq!(totals.incomes, dec!(900));
        assert_eq!(totals.expenses, dec!(140));
    }
}
