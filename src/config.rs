//! Functions and types for application config.

use crate::Error;

/// The model used for spending insights when none is configured.
pub const DEFAULT_INSIGHT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";

/// The settings needed to reach the remote services.
#[derive(Debug, Clone)]
pub struct Config {
    /// The base URL of the Supabase project, e.g.
    /// `https://example.supabase.co`.
    pub supabase_url: String,
    /// The project's public (anon) API key.
    pub supabase_anon_key: String,
    /// The access token of the signed-in user. Without one, requests are
    /// made with the anon key only and the session resolves to no user.
    pub supabase_access_token: Option<String>,
    /// The OpenRouter API key used for spending insights.
    pub openrouter_api_key: String,
    /// The OpenRouter model to request insights from.
    pub openrouter_model: String,
}

impl Config {
    /// Assemble the config from environment variables.
    ///
    /// `SUPABASE_URL`, `SUPABASE_ANON_KEY` and `OPENROUTER_API_KEY` are
    /// required. `SUPABASE_ACCESS_TOKEN` and `OPENROUTER_MODEL` are
    /// optional; the model falls back to [DEFAULT_INSIGHT_MODEL].
    ///
    /// # Errors
    /// Returns [Error::MissingConfig] naming the first required variable
    /// that is not set.
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            supabase_url: require("SUPABASE_URL")?,
            supabase_anon_key: require("SUPABASE_ANON_KEY")?,
            supabase_access_token: std::env::var("SUPABASE_ACCESS_TOKEN").ok(),
            openrouter_api_key: require("OPENROUTER_API_KEY")?,
            openrouter_model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| DEFAULT_INSIGHT_MODEL.to_owned()),
        })
    }
}

fn require(name: &'static str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::MissingConfig(name))
}
