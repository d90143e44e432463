//! Pure predicate logic for narrowing the cached transaction collection.

use time::OffsetDateTime;

use crate::{
    range::{RangePreset, TimeRange, resolve},
    transaction::{Transaction, TransactionType},
};

/// Defines which transactions should be kept by [filter_transactions].
///
/// Every field has a "no restriction" value (an empty search string, `None`,
/// or [RangePreset::All]) that skips its predicate entirely; the default
/// filter therefore matches everything.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Free-text search. Matches case-insensitively against the description,
    /// the category label, or the two-decimal string form of the amount.
    pub search: String,
    /// Keep only transactions with exactly this category label.
    pub category: Option<String>,
    /// Keep only transactions of this type.
    pub transaction_type: Option<TransactionType>,
    /// Keep only transactions whose date falls in the resolved range.
    pub date_range: RangePreset,
}

/// Return the transactions matching `filter`, preserving the input order.
///
/// The date-range preset is resolved against `now` once per call, so a
/// single invocation sees one consistent interval. The input is never
/// mutated.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    now: OffsetDateTime,
) -> Vec<&'a Transaction> {
    let range = resolve(filter.date_range, now);
    let search = filter.search.trim().to_lowercase();

    transactions
        .iter()
        .filter(|transaction| matches(transaction, filter, &search, range))
        .collect()
}

fn matches(
    transaction: &Transaction,
    filter: &TransactionFilter,
    search: &str,
    range: Option<TimeRange>,
) -> bool {
    if !search.is_empty() && !matches_search(transaction, search) {
        return false;
    }

    if let Some(category) = &filter.category
        && &transaction.category != category
    {
        return false;
    }

    if let Some(transaction_type) = filter.transaction_type
        && transaction.transaction_type != transaction_type
    {
        return false;
    }

    if let Some(range) = range
        && !range.contains(transaction.created_at)
    {
        return false;
    }

    true
}

fn matches_search(transaction: &Transaction, search: &str) -> bool {
    // The amount is compared in its two-decimal display form so that a query
    // such as "15.00" finds a transaction of 15 units.
    let amount_text = format!("{:.2}", transaction.amount);

    transaction.description.to_lowercase().contains(search)
        || transaction.category.to_lowercase().contains(search)
        || amount_text.contains(search)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        range::RangePreset,
        transaction::{Transaction, TransactionType},
    };

    use super::{TransactionFilter, filter_transactions};

    fn transaction(
        id: i64,
        amount: f64,
        category: &str,
        description: &str,
        transaction_type: TransactionType,
        created_at: time::OffsetDateTime,
    ) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            family_id: 1,
            amount,
            category: category.to_owned(),
            description: description.to_owned(),
            transaction_type,
            created_at,
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            transaction(
                1,
                15.0,
                "Food",
                "Friday takeaway",
                TransactionType::Expense,
                datetime!(2025-10-15 12:00 UTC),
            ),
            transaction(
                2,
                1200.0,
                "Salary",
                "October pay",
                TransactionType::Income,
                datetime!(2025-10-01 09:00 UTC),
            ),
            transaction(
                3,
                50.0,
                "Investment",
                "Index fund top-up",
                TransactionType::Savings,
                datetime!(2025-09-20 08:00 UTC),
            ),
        ]
    }

    #[test]
    fn default_filter_is_the_identity() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);

        let got = filter_transactions(&transactions, &TransactionFilter::default(), now);

        let want: Vec<&Transaction> = transactions.iter().collect();
        assert_eq!(got, want);
    }

    #[test]
    fn filtering_is_idempotent() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        };

        let once: Vec<Transaction> = filter_transactions(&transactions, &filter, now)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_transactions(&once, &filter, now);

        assert_eq!(once.iter().collect::<Vec<_>>(), twice);
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            search: "FRIDAY".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, 1);
    }

    #[test]
    fn search_matches_category() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            search: "salar".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].id, 2);
    }

    #[test]
    fn search_matches_amount_in_display_form() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            search: "15.00".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].amount, 15.0);
    }

    #[test]
    fn whitespace_only_search_is_ignored() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            search: "   ".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        assert_eq!(got.len(), 3);
    }

    #[test]
    fn category_filter_is_an_exact_match() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            category: Some("Food".to_owned()),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, "Food");
    }

    #[test]
    fn date_range_excludes_transactions_outside_the_interval() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            date_range: RangePreset::Month,
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        // The September savings transaction falls outside October.
        assert_eq!(got.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn predicates_compose_with_and_semantics() {
        let transactions = sample();
        let now = datetime!(2025-10-15 14:30 UTC);
        let filter = TransactionFilter {
            search: "pay".to_owned(),
            transaction_type: Some(TransactionType::Expense),
            ..Default::default()
        };

        let got = filter_transactions(&transactions, &filter, now);

        // "October pay" matches the search but is an income transaction.
        assert!(got.is_empty());
    }
}
