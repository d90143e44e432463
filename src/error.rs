//! Defines the crate level error type.

use crate::transaction::{TransactionId, TransactionType};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The current session could not be resolved to an authorized user
    /// record.
    ///
    /// This is fatal for the session: every other remote call is scoped by
    /// the family ID on the user record, so there is nothing to retry until
    /// the user signs in again.
    #[error("no authorized user record for the current session")]
    AuthenticationMissing,

    /// A remote list, create, update, or delete call failed.
    ///
    /// The local transaction cache is left as it was before the call, so the
    /// application keeps showing stale but consistent data.
    #[error("the remote operation failed: {0}")]
    Remote(String),

    /// A zero, negative, or non-finite amount was used to create or update a
    /// transaction.
    #[error("transaction amounts must be greater than zero")]
    InvalidAmount,

    /// An empty description was used to create or update a transaction.
    #[error("transaction descriptions cannot be empty")]
    EmptyDescription,

    /// The category label is not one of the known labels for the given
    /// transaction type.
    ///
    /// This is only checked at input time. Records already in the remote
    /// store may carry labels outside the static lists and are accepted
    /// as-is when aggregating.
    #[error("\"{0}\" is not a valid category for {1} transactions")]
    InvalidCategory(String, TransactionType),

    /// The requested transaction could not be found.
    #[error("the requested transaction could not be found")]
    NotFound,

    /// The configured Supabase URL could not be parsed.
    #[error("the Supabase URL is not valid: {0}")]
    InvalidUrl(String),

    /// A bulk delete stopped at the first failed request.
    ///
    /// Transactions deleted before the failure are already gone from the
    /// remote store and have been removed from the local cache; `remaining`
    /// lists the IDs whose removal was not confirmed.
    #[error("bulk delete stopped after a failed request ({reason}); unconfirmed: {remaining:?}")]
    BulkDelete {
        /// Why the underlying delete call failed.
        reason: String,
        /// The IDs that were not confirmed removed, in request order.
        remaining: Vec<TransactionId>,
    },

    /// A required environment variable was not set.
    #[error("the environment variable {0} must be set")]
    MissingConfig(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        tracing::error!("an unhandled HTTP error occurred: {}", value);
        Error::Remote(value.to_string())
    }
}
