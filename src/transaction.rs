//! This file defines the type `Transaction`, the core type of the expense
//! tracking part of the application, along with the validated input types
//! used to create and update transactions.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, category};

/// Alias for the integer type used for transaction IDs.
///
/// IDs are assigned by the remote store and are immutable.
pub type TransactionId = i64;

/// The top-level classification of a transaction.
///
/// Legacy records in the remote store may lack the column entirely, in which
/// case they deserialize (and aggregate) as [TransactionType::Expense].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money spent.
    #[default]
    Expense,
    /// Money earned.
    Income,
    /// Money put aside.
    Savings,
}

impl TransactionType {
    /// The wire and display form of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
            Self::Savings => "savings",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single income, expense, or savings record shared within a family.
///
/// `created_at` holds the user-chosen transaction date, not the row's
/// insertion time, and is the sole ordering and date-filtering key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the remote store.
    pub id: TransactionId,
    /// The authorized user that created the transaction.
    pub user_id: i64,
    /// The sharing group the transaction belongs to. All queries are scoped
    /// to the signed-in user's family.
    pub family_id: i64,
    /// The amount of money involved. Always positive; the sign is implied by
    /// [Transaction::transaction_type].
    pub amount: f64,
    /// A free-form category label.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The top-level classification of the record.
    #[serde(default)]
    pub transaction_type: TransactionType,
    /// The user-chosen transaction date.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The validated input for creating a new transaction.
///
/// The remote store assigns the ID, and the family ID is taken from the
/// signed-in user's record rather than from client input.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// The amount of money involved. Must be positive.
    pub amount: f64,
    /// The category label. Must be one of the labels for `transaction_type`,
    /// see [category::labels_for].
    pub category: String,
    /// A text description. Must be non-empty.
    pub description: String,
    /// The top-level classification of the record.
    pub transaction_type: TransactionType,
    /// The user-chosen transaction date.
    pub date: OffsetDateTime,
}

impl TransactionDraft {
    /// Check the form-boundary rules before any remote call is made.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is zero, negative, or not
    ///   finite,
    /// - [Error::EmptyDescription] if the description is empty or
    ///   whitespace-only,
    /// - or [Error::InvalidCategory] if the category label is not in the
    ///   static list for the draft's transaction type.
    pub fn validate(&self) -> Result<(), Error> {
        validate_amount(self.amount)?;
        validate_description(&self.description)?;
        validate_category(&self.category, self.transaction_type)
    }
}

/// A partial update for an existing transaction.
///
/// Fields left as `None` are not sent to the remote store and keep their
/// current value. The ID and family ID of a transaction cannot be changed.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TransactionPatch {
    /// Replace the amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Replace the category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Replace the description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Replace the transaction type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// Replace the user-chosen transaction date.
    #[serde(
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
}

impl TransactionPatch {
    /// Check the form-boundary rules for the fields present in the patch.
    ///
    /// The category label is checked against the type the record will have
    /// after the patch is applied, which is the patched type if present and
    /// otherwise the type currently on `existing`.
    ///
    /// # Errors
    /// Returns the same errors as [TransactionDraft::validate] for the
    /// corresponding fields.
    pub fn validate_for(&self, existing: &Transaction) -> Result<(), Error> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }

        if let Some(description) = &self.description {
            validate_description(description)?;
        }

        let effective_type = self
            .transaction_type
            .unwrap_or(existing.transaction_type);

        match &self.category {
            Some(category) => validate_category(category, effective_type),
            // Changing only the type re-labels the record; the old category
            // may no longer be valid for the new type, so require both.
            None if self.transaction_type.is_some() => {
                validate_category(&existing.category, effective_type)
            }
            None => Ok(()),
        }
    }

    /// Apply the patch to a transaction record in place.
    ///
    /// Useful for in-memory implementations of
    /// [ExpenseApi](crate::api::ExpenseApi); the Supabase client relies on
    /// the remote store returning the updated row instead.
    pub fn apply(&self, transaction: &mut Transaction) {
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(category) = &self.category {
            transaction.category = category.clone();
        }
        if let Some(description) = &self.description {
            transaction.description = description.clone();
        }
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(created_at) = self.created_at {
            transaction.created_at = created_at;
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), Error> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount)
    }
}

fn validate_description(description: &str) -> Result<(), Error> {
    if description.trim().is_empty() {
        Err(Error::EmptyDescription)
    } else {
        Ok(())
    }
}

fn validate_category(label: &str, transaction_type: TransactionType) -> Result<(), Error> {
    if category::is_valid(transaction_type, label) {
        Ok(())
    } else {
        Err(Error::InvalidCategory(label.to_owned(), transaction_type))
    }
}

#[cfg(test)]
mod transaction_tests {
    use time::macros::datetime;

    use crate::Error;

    use super::{Transaction, TransactionDraft, TransactionPatch, TransactionType};

    fn draft() -> TransactionDraft {
        TransactionDraft {
            amount: 12.5,
            category: "Food".to_owned(),
            description: "Takeaway".to_owned(),
            transaction_type: TransactionType::Expense,
            date: datetime!(2025-10-05 12:00 UTC),
        }
    }

    fn transaction() -> Transaction {
        Transaction {
            id: 1,
            user_id: 1,
            family_id: 1,
            amount: 12.5,
            category: "Food".to_owned(),
            description: "Takeaway".to_owned(),
            transaction_type: TransactionType::Expense,
            created_at: datetime!(2025-10-05 12:00 UTC),
        }
    }

    #[test]
    fn draft_validate_accepts_well_formed_input() {
        assert_eq!(draft().validate(), Ok(()));
    }

    #[test]
    fn draft_validate_rejects_non_positive_amounts() {
        for amount in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut draft = draft();
            draft.amount = amount;

            assert_eq!(
                draft.validate(),
                Err(Error::InvalidAmount),
                "amount {amount} should be rejected"
            );
        }
    }

    #[test]
    fn draft_validate_rejects_blank_descriptions() {
        let mut draft = draft();
        draft.description = "   ".to_owned();

        assert_eq!(draft.validate(), Err(Error::EmptyDescription));
    }

    #[test]
    fn draft_validate_rejects_category_from_another_type() {
        let mut draft = draft();
        // "Salary" is an income label, not an expense label.
        draft.category = "Salary".to_owned();

        assert_eq!(
            draft.validate(),
            Err(Error::InvalidCategory(
                "Salary".to_owned(),
                TransactionType::Expense
            ))
        );
    }

    #[test]
    fn patch_validate_checks_category_against_patched_type() {
        let patch = TransactionPatch {
            category: Some("Salary".to_owned()),
            transaction_type: Some(TransactionType::Income),
            ..Default::default()
        };

        assert_eq!(patch.validate_for(&transaction()), Ok(()));
    }

    #[test]
    fn patch_validate_rejects_type_change_that_orphans_category() {
        // The record's current category "Food" is not an income label.
        let patch = TransactionPatch {
            transaction_type: Some(TransactionType::Income),
            ..Default::default()
        };

        assert_eq!(
            patch.validate_for(&transaction()),
            Err(Error::InvalidCategory(
                "Food".to_owned(),
                TransactionType::Income
            ))
        );
    }

    #[test]
    fn patch_apply_replaces_only_present_fields() {
        let mut got = transaction();
        let patch = TransactionPatch {
            amount: Some(20.0),
            created_at: Some(datetime!(2025-10-06 08:30 UTC)),
            ..Default::default()
        };

        patch.apply(&mut got);

        assert_eq!(got.amount, 20.0);
        assert_eq!(got.created_at, datetime!(2025-10-06 08:30 UTC));
        assert_eq!(got.category, "Food");
        assert_eq!(got.description, "Takeaway");
    }

    #[test]
    fn transaction_type_defaults_to_expense_for_legacy_rows() {
        let json = r#"{
            "id": 7,
            "user_id": 1,
            "family_id": 1,
            "amount": 3.5,
            "category": "Food",
            "description": "Coffee",
            "created_at": "2025-10-05T12:00:00Z"
        }"#;

        let got: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(got.transaction_type, TransactionType::Expense);
    }
}
