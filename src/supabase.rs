//! The Supabase-backed implementation of [ExpenseApi].
//!
//! Talks to two surfaces of the same project: the auth endpoint to resolve
//! the session, and the PostgREST interface for the `authorized_users` and
//! `expenses` tables. Row filters go in the query string (`id=eq.7`), and
//! writes ask for `return=representation` so the stored row comes back in
//! the same round trip.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    api::{ExpenseApi, UserRecord},
    config::Config,
    transaction::{Transaction, TransactionDraft, TransactionId, TransactionPatch},
};

const AUTH_USER_PATH: &str = "auth/v1/user";
const AUTHORIZED_USERS_PATH: &str = "rest/v1/authorized_users";
const EXPENSES_PATH: &str = "rest/v1/expenses";

/// A client for the remote Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: String,
    access_token: Option<String>,
}

/// The session record returned by the auth endpoint.
#[derive(Debug, Deserialize)]
struct AuthUser {
    /// The auth-level user ID, a UUID distinct from the application's
    /// `authorized_users` row ID.
    id: String,
}

/// The insert payload for the `expenses` table.
///
/// The row ID is assigned by the database and therefore absent here.
#[derive(Debug, Serialize)]
struct NewExpenseRecord<'a> {
    user_id: i64,
    family_id: i64,
    amount: f64,
    category: &'a str,
    description: &'a str,
    transaction_type: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl<'a> NewExpenseRecord<'a> {
    fn new(user: &UserRecord, draft: &'a TransactionDraft) -> Self {
        Self {
            user_id: user.id,
            family_id: user.family_id,
            amount: draft.amount,
            category: &draft.category,
            description: &draft.description,
            transaction_type: draft.transaction_type.as_str(),
            created_at: draft.date,
        }
    }
}

impl SupabaseClient {
    /// Create a client for the project named in `config`.
    ///
    /// # Errors
    /// Returns [Error::InvalidUrl] if the configured base URL does not
    /// parse.
    pub fn new(config: &Config) -> Result<Self, Error> {
        // A trailing slash makes `Url::join` append instead of replacing
        // the last path segment.
        let mut base = config.supabase_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|error| Error::InvalidUrl(error.to_string()))?;

        Ok(Self {
            http: Client::new(),
            base_url,
            anon_key: config.supabase_anon_key.clone(),
            access_token: config.supabase_access_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path)
            .map_err(|error| Error::InvalidUrl(error.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);

        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }
}

#[async_trait]
impl ExpenseApi for SupabaseClient {
    async fn current_user(&self) -> Result<Option<UserRecord>, Error> {
        let response = self
            .request(Method::GET, self.endpoint(AUTH_USER_PATH)?)
            .send()
            .await?;

        // An expired or absent token is an anonymous session, not a fault.
        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let session: AuthUser = ensure_success(response).await?.json().await?;

        let response = self
            .request(Method::GET, self.endpoint(AUTHORIZED_USERS_PATH)?)
            .query(&[
                ("auth_user_id", format!("eq.{}", session.id).as_str()),
                ("select", "id,family_id"),
            ])
            .send()
            .await?;
        let records: Vec<UserRecord> = ensure_success(response).await?.json().await?;

        Ok(records.into_iter().next())
    }

    async fn list_transactions(&self, family_id: i64) -> Result<Vec<Transaction>, Error> {
        let response = self
            .request(Method::GET, self.endpoint(EXPENSES_PATH)?)
            .query(&[
                ("family_id", format!("eq.{family_id}").as_str()),
                ("select", "*"),
                ("order", "created_at.desc"),
            ])
            .send()
            .await?;

        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create_transaction(
        &self,
        user: &UserRecord,
        draft: &TransactionDraft,
    ) -> Result<Transaction, Error> {
        let response = self
            .request(Method::POST, self.endpoint(EXPENSES_PATH)?)
            .header("Prefer", "return=representation")
            .json(&NewExpenseRecord::new(user, draft))
            .send()
            .await?;
        let rows: Vec<Transaction> = ensure_success(response).await?.json().await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| Error::Remote("the insert returned no row".to_owned()))
    }

    async fn update_transaction(
        &self,
        family_id: i64,
        id: TransactionId,
        patch: &TransactionPatch,
    ) -> Result<Transaction, Error> {
        let response = self
            .request(Method::PATCH, self.endpoint(EXPENSES_PATH)?)
            .query(&[
                ("id", format!("eq.{id}").as_str()),
                ("family_id", format!("eq.{family_id}").as_str()),
            ])
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;
        let rows: Vec<Transaction> = ensure_success(response).await?.json().await?;

        // PostgREST reports an update that matched no rows as a success
        // with an empty body.
        rows.into_iter().next().ok_or(Error::NotFound)
    }

    async fn delete_transaction(&self, family_id: i64, id: TransactionId) -> Result<(), Error> {
        let response = self
            .request(Method::DELETE, self.endpoint(EXPENSES_PATH)?)
            .query(&[
                ("id", format!("eq.{id}").as_str()),
                ("family_id", format!("eq.{family_id}").as_str()),
            ])
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let rows: Vec<Transaction> = ensure_success(response).await?.json().await?;

        if rows.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!("request failed with {status}: {body}");
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::AuthenticationMissing,
        StatusCode::NOT_FOUND => Error::NotFound,
        _ => Error::Remote(format!("{status}: {body}")),
    }
}
