//! The transaction store: owns the in-memory transaction cache for the
//! signed-in family and derives the views the UI renders.
//!
//! Mutations go remote-first: the local cache is only patched after the
//! remote store acknowledges the change, so a failed call never needs a
//! rollback. Derived views (filtered set, current page, totals) are
//! recomputed on every call rather than cached, trading a pass over the
//! collection for the absence of invalidation bugs.

use time::OffsetDateTime;

use crate::{
    Error,
    api::{ExpenseApi, UserRecord},
    filter::{TransactionFilter, filter_transactions},
    grouping::{GroupKey, TransactionGroup, group_transactions},
    pagination::{PaginationConfig, page_slice, total_pages},
    totals::{FinancialTotals, aggregate, aggregate_current_month},
    transaction::{Transaction, TransactionDraft, TransactionId, TransactionPatch},
};

/// The client-side state for one signed-in session.
///
/// The collection is kept sorted by `created_at` descending at all times;
/// every mutation re-establishes the order before returning.
#[derive(Debug)]
pub struct TransactionStore<A: ExpenseApi> {
    api: A,
    user: UserRecord,
    all_transactions: Vec<Transaction>,
    filter: TransactionFilter,
    current_page: u64,
    page_size: u64,
    loading: bool,
    error: Option<String>,
}

impl<A: ExpenseApi> TransactionStore<A> {
    /// Resolve the session identity and create an empty store for it.
    ///
    /// Call [TransactionStore::load] afterwards to populate the cache.
    ///
    /// # Errors
    /// Returns [Error::AuthenticationMissing] if the session does not map
    /// to an authorized user record, or [Error::Remote] if the lookup
    /// itself fails.
    pub async fn connect(api: A) -> Result<Self, Error> {
        let user = api
            .current_user()
            .await?
            .ok_or(Error::AuthenticationMissing)?;

        let pagination = PaginationConfig::default();

        Ok(Self {
            api,
            user,
            all_transactions: Vec::new(),
            filter: TransactionFilter::default(),
            current_page: pagination.default_page,
            page_size: pagination.default_page_size,
            loading: false,
            error: None,
        })
    }

    /// The family-scoped identity the store was connected with.
    pub fn user(&self) -> &UserRecord {
        &self.user
    }

    /// Whether a load is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message of the last failed load, if the cache is stale.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the cache with the family's full transaction set.
    ///
    /// On failure the previous cache is kept untouched: stale data beats
    /// an empty screen.
    pub async fn load(&mut self) -> Result<(), Error> {
        self.loading = true;
        let result = self.api.list_transactions(self.user.family_id).await;
        self.loading = false;

        match result {
            Ok(mut transactions) => {
                // The remote store already orders by date descending, but
                // the ordering is a local invariant, not a remote promise.
                sort_newest_first(&mut transactions);
                self.all_transactions = transactions;
                self.error = None;
                Ok(())
            }
            Err(error) => {
                tracing::error!("failed to load transactions: {error}");
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Replace the active filter and return to the first page.
    ///
    /// Resetting the page is deliberate: the new result set may be shorter
    /// than the old page offset, and starting from page 1 matches what
    /// users expect after narrowing a search.
    pub fn set_filter(&mut self, filter: TransactionFilter) {
        self.filter = filter;
        self.current_page = 1;
    }

    /// The active filter.
    pub fn filter(&self) -> &TransactionFilter {
        &self.filter
    }

    /// Jump to the 1-indexed `page`.
    ///
    /// No clamping happens here; an out-of-range page simply renders empty
    /// (see [page_slice]) until the caller picks a valid one.
    pub fn set_page(&mut self, page: u64) {
        self.current_page = page;
    }

    /// The 1-indexed current page.
    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// The number of transactions per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Create a transaction remotely and insert it into the cache.
    ///
    /// The record is re-sorted into place, so backdated entries land where
    /// their date puts them rather than at the top.
    ///
    /// # Errors
    /// Validation errors (see [TransactionDraft::validate]) are returned
    /// before any remote call; [Error::Remote] leaves the cache unchanged.
    pub async fn add(&mut self, draft: TransactionDraft) -> Result<&Transaction, Error> {
        draft.validate()?;

        let created = self.api.create_transaction(&self.user, &draft).await?;
        tracing::debug!("created transaction {}", created.id);
        let id = created.id;

        self.all_transactions.insert(0, created);
        sort_newest_first(&mut self.all_transactions);

        Ok(self.find(id).expect("record was just inserted"))
    }

    /// Apply a partial update remotely and patch the cached record.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` is not in the cache, a validation
    /// error before any remote call, or [Error::Remote] with the cache
    /// unchanged.
    pub async fn update(
        &mut self,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<&Transaction, Error> {
        let existing = self.find(id).ok_or(Error::NotFound)?;
        patch.validate_for(existing)?;

        let updated = self
            .api
            .update_transaction(self.user.family_id, id, &patch)
            .await?;
        tracing::debug!("updated transaction {id}");

        let slot = self
            .all_transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
            .ok_or(Error::NotFound)?;
        *slot = updated;
        sort_newest_first(&mut self.all_transactions);

        Ok(self.find(id).expect("record was just updated"))
    }

    /// Delete a transaction remotely and drop it from the cache.
    ///
    /// The current page is left alone even when this empties it; the
    /// caller decides whether to move the user somewhere else.
    pub async fn remove(&mut self, id: TransactionId) -> Result<(), Error> {
        self.api.delete_transaction(self.user.family_id, id).await?;
        tracing::debug!("deleted transaction {id}");

        self.all_transactions
            .retain(|transaction| transaction.id != id);

        Ok(())
    }

    /// Delete several transactions, one remote call per ID, in order.
    ///
    /// The loop stops at the first failure. Everything deleted up to that
    /// point stays deleted, remotely and locally; the returned
    /// [Error::BulkDelete] lists the IDs whose removal was not confirmed.
    pub async fn bulk_remove(&mut self, ids: &[TransactionId]) -> Result<(), Error> {
        for (index, &id) in ids.iter().enumerate() {
            if let Err(error) = self.api.delete_transaction(self.user.family_id, id).await {
                tracing::error!("bulk delete stopped at transaction {id}: {error}");
                return Err(Error::BulkDelete {
                    reason: error.to_string(),
                    remaining: ids[index..].to_vec(),
                });
            }

            self.all_transactions
                .retain(|transaction| transaction.id != id);
        }

        Ok(())
    }

    /// The full cached collection, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.all_transactions
    }

    /// The cached transactions matching the active filter, newest first.
    pub fn filtered(&self) -> Vec<&Transaction> {
        filter_transactions(&self.all_transactions, &self.filter, OffsetDateTime::now_utc())
    }

    /// The slice of the filtered set belonging to the current page.
    pub fn page(&self) -> Vec<&Transaction> {
        let filtered = self.filtered();
        page_slice(&filtered, self.current_page, self.page_size).to_vec()
    }

    /// The current page partitioned into labelled date buckets.
    pub fn grouped_page(&self, key: GroupKey) -> Vec<TransactionGroup<'_>> {
        group_transactions(self.page(), key)
    }

    /// How many pages the filtered set occupies, never less than one.
    pub fn total_pages(&self) -> u64 {
        total_pages(self.filtered().len(), self.page_size)
    }

    /// Per-type totals over the transactions matching the active filter.
    pub fn totals(&self) -> FinancialTotals {
        aggregate(self.filtered())
    }

    /// Per-type totals over the full cache, restricted to the current
    /// calendar month. Independent of the active filter.
    pub fn monthly_breakdown(&self) -> FinancialTotals {
        aggregate_current_month(&self.all_transactions, OffsetDateTime::now_utc())
    }

    fn find(&self, id: TransactionId) -> Option<&Transaction> {
        self.all_transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    // Stable sort: same-instant records keep their relative order, so a
    // freshly inserted record stays ahead of older ties.
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
