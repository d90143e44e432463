//! Grouping logic for the transaction list view.

use time::{Date, Month};

use crate::{range::week_start, transaction::Transaction};

/// How to bucket transactions for display.
///
/// "No grouping" is not a variant: callers that do not want buckets simply
/// use the flat sequence instead of calling [group_transactions].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// One bucket per calendar day.
    Day,
    /// One bucket per week, starting on Sunday as in the quick filters.
    Week,
    /// One bucket per calendar month.
    Month,
}

/// A labelled bucket of transactions.
#[derive(Debug, PartialEq)]
pub struct TransactionGroup<'a> {
    /// The display label for the bucket, e.g. `"Week of 5 Oct"`.
    pub label: String,
    /// The member transactions, in input order.
    pub transactions: Vec<&'a Transaction>,
}

/// Partition transactions into labelled buckets.
///
/// Buckets appear in the order their label is first encountered, so an
/// input sorted by date descending produces groups sorted the same way.
pub fn group_transactions<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    key: GroupKey,
) -> Vec<TransactionGroup<'a>> {
    let mut groups: Vec<TransactionGroup<'a>> = Vec::new();

    for transaction in transactions {
        let label = group_label(key, transaction.created_at.date());

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.transactions.push(transaction),
            None => groups.push(TransactionGroup {
                label,
                transactions: vec![transaction],
            }),
        }
    }

    groups
}

fn group_label(key: GroupKey, date: Date) -> String {
    match key {
        GroupKey::Day => format_date_label(date),
        GroupKey::Week => {
            let start = week_start(date);
            format!("Week of {} {}", start.day(), month_abbrev(start.month()))
        }
        GroupKey::Month => format!("{} {}", date.month(), date.year()),
    }
}

fn format_date_label(date: Date) -> String {
    format!(
        "{} {} {}",
        date.day(),
        month_abbrev(date.month()),
        date.year()
    )
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
