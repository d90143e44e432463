//! The static category lists, one per transaction type.
//!
//! The lists are an input-time convenience for forms: drafts are checked
//! against them, but records already in the remote store may carry labels
//! outside these lists and the aggregation code accepts those as-is.

use crate::transaction::TransactionType;

/// Category labels for expense transactions.
pub const EXPENSE_LABELS: &[&str] = &[
    "Bills",
    "Car",
    "Food",
    "Gifts",
    "Government",
    "Grocery",
    "Health",
    "Household",
    "Leisure",
    "Lifestyle",
    "Others",
    "Purchases",
    "Rent",
    "Transport",
];

/// Category labels for income transactions.
pub const INCOME_LABELS: &[&str] = &[
    "Business",
    "Car Park",
    "Carpooling",
    "Cashback",
    "Freelancing",
    "Gifts",
    "Interest",
    "Others",
    "Salary",
    "Tax",
    "Trading",
];

/// Category labels for savings transactions.
pub const SAVINGS_LABELS: &[&str] = &["Investment", "Other"];

/// The category labels that are valid for the given transaction type.
pub fn labels_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Expense => EXPENSE_LABELS,
        TransactionType::Income => INCOME_LABELS,
        TransactionType::Savings => SAVINGS_LABELS,
    }
}

/// Whether `label` is a known category for the given transaction type.
pub fn is_valid(transaction_type: TransactionType, label: &str) -> bool {
    labels_for(transaction_type).contains(&label)
}

/// All known category labels across the three types, deduplicated while
/// keeping the order of first appearance (expense, then income, then
/// savings). Used to populate the category filter dropdown.
pub fn all_labels() -> Vec<&'static str> {
    let mut labels = Vec::new();

    for list in [EXPENSE_LABELS, INCOME_LABELS, SAVINGS_LABELS] {
        for &label in list {
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }

    labels
}
