//! The client core of a shared family finance tracker.
//!
//! Transactions live in a remote Supabase project; this library owns the
//! signed-in family's local copy and everything derived from it. The
//! [TransactionStore] loads the family's transactions once, applies
//! mutations remote-first, and recomputes the filtered list, the current
//! page, and the financial totals on demand. A separate [InsightClient]
//! turns recent spending into a short AI-written summary.
//!
//! The remote store is reached through the [ExpenseApi] trait, so tests
//! (and any future backend) can swap in their own implementation.

#![warn(missing_docs)]

pub mod api;
pub mod category;
pub mod config;
mod error;
pub mod filter;
pub mod grouping;
pub mod insight;
pub mod pagination;
pub mod range;
pub mod store;
pub mod supabase;
pub mod totals;
pub mod transaction;

pub use api::{ExpenseApi, UserRecord};
pub use config::Config;
pub use error::Error;
pub use filter::TransactionFilter;
pub use grouping::{GroupKey, TransactionGroup};
pub use insight::InsightClient;
pub use range::RangePreset;
pub use store::TransactionStore;
pub use supabase::SupabaseClient;
pub use totals::FinancialTotals;
pub use transaction::{
    Transaction, TransactionDraft, TransactionId, TransactionPatch, TransactionType,
};
