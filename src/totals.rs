//! Aggregates transactions into per-type counts, totals, and category
//! breakdowns.

use std::collections::HashMap;

use time::OffsetDateTime;

use crate::{
    range::current_month,
    transaction::{Transaction, TransactionType},
};

/// The running figures for one transaction type.
///
/// Amounts accumulate as plain `f64` sums; rounding happens only when a
/// value is formatted for display.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TypeTotals {
    /// How many transactions of this type were seen.
    pub count: u64,
    /// The sum of their amounts.
    pub total: f64,
    /// The sum of amounts per category label. Labels are taken from the
    /// records as-is, including labels outside the static category lists.
    pub categories: HashMap<String, f64>,
}

/// The aggregate figures for all three transaction types.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FinancialTotals {
    /// Totals for expense transactions.
    pub expense: TypeTotals,
    /// Totals for income transactions.
    pub income: TypeTotals,
    /// Totals for savings transactions.
    pub savings: TypeTotals,
}

impl FinancialTotals {
    /// The totals for one transaction type.
    pub fn get(&self, transaction_type: TransactionType) -> &TypeTotals {
        match transaction_type {
            TransactionType::Expense => &self.expense,
            TransactionType::Income => &self.income,
            TransactionType::Savings => &self.savings,
        }
    }

    /// The sum of the three per-type totals.
    pub fn grand_total(&self) -> f64 {
        self.expense.total + self.income.total + self.savings.total
    }

    fn get_mut(&mut self, transaction_type: TransactionType) -> &mut TypeTotals {
        match transaction_type {
            TransactionType::Expense => &mut self.expense,
            TransactionType::Income => &mut self.income,
            TransactionType::Savings => &mut self.savings,
        }
    }
}

/// Compute per-type counts, totals, and category subtotals in a single pass.
///
/// Records whose type was absent on the wire have already been folded into
/// [TransactionType::Expense] at deserialization time, so every record
/// lands in exactly one bucket.
pub fn aggregate<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> FinancialTotals {
    let mut totals = FinancialTotals::default();

    for transaction in transactions {
        let entry = totals.get_mut(transaction.transaction_type);
        entry.count += 1;
        entry.total += transaction.amount;
        *entry
            .categories
            .entry(transaction.category.clone())
            .or_insert(0.0) += transaction.amount;
    }

    totals
}

/// The same aggregation restricted to the current calendar month.
///
/// The month is computed from `now` at call time and includes its last day
/// up to 23:59:59.
pub fn aggregate_current_month<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    now: OffsetDateTime,
) -> FinancialTotals {
    let month = current_month(now);

    aggregate(
        transactions
            .into_iter()
            .filter(|transaction| month.contains(transaction.created_at)),
    )
}
