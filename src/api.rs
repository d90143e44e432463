//! The boundary to the remote persistence service.
//!
//! The client core only ever talks to the remote store through the
//! [ExpenseApi] trait; [SupabaseClient](crate::supabase::SupabaseClient) is
//! the production implementation and tests substitute an in-memory fake.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    Error,
    transaction::{Transaction, TransactionDraft, TransactionId, TransactionPatch},
};

/// The family-scoped identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    /// The ID of the authorized-user row.
    pub id: i64,
    /// The sharing group the user belongs to. Scopes every other call.
    pub family_id: i64,
}

/// Handles the remote storage and retrieval of transactions.
///
/// Implementers enforce family scoping server-side: an update or delete
/// against a record from another family must behave as not-found, never
/// touch or reveal the foreign record.
#[async_trait]
pub trait ExpenseApi {
    /// Resolve the current session to an authorized user record.
    ///
    /// `Ok(None)` means there is no signed-in user (or no authorized-user
    /// row for them), which is fatal for the session.
    async fn current_user(&self) -> Result<Option<UserRecord>, Error>;

    /// Fetch the full transaction set for a family, ordered by
    /// `created_at` descending.
    async fn list_transactions(&self, family_id: i64) -> Result<Vec<Transaction>, Error>;

    /// Create a new transaction and return the stored record.
    ///
    /// The user and family IDs on the stored record come from `user`, not
    /// from client input.
    async fn create_transaction(
        &self,
        user: &UserRecord,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error>;

    /// Apply a partial update and return the updated record.
    async fn update_transaction(
        &self,
        family_id: i64,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction, Error>;

    /// Permanently delete a transaction. There is no soft delete.
    async fn delete_transaction(&self, family_id: i64, id: TransactionId) -> Result<(), Error>;
}
