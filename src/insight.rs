//! AI-written spending insights.
//!
//! Summarises the last 30 days of transactions, turns the summary into a
//! prompt, and asks an OpenRouter-hosted model for a short piece of advice.
//! The feature is decorative, so every failure degrades to a canned string
//! instead of surfacing an error.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, config::Config, transaction::Transaction};

/// Shown when there are no transactions in the insight window.
pub const EMPTY_INSIGHT: &str = "Start tracking expenses to get personalized spending insights!";

/// Shown when the model request fails or returns nothing usable.
pub const FALLBACK_INSIGHT: &str = "Unable to load insights at this moment.";

/// How many days of history feed the summary.
pub const INSIGHT_WINDOW_DAYS: i64 = 30;

const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// The figures the prompt is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    /// The sum of all amounts in the window.
    pub total_spent: f64,
    /// How many transactions fell in the window.
    pub transaction_count: usize,
    /// The mean amount per transaction.
    pub average: f64,
    /// The category with the largest total. First seen wins ties.
    pub top_category: String,
    /// The total for [SpendingSummary::top_category].
    pub top_category_total: f64,
    /// Per-category totals in first-seen order.
    pub category_totals: Vec<(String, f64)>,
}

impl SpendingSummary {
    /// Summarise a set of transactions, or `None` if there are none.
    pub fn from_transactions(transactions: &[&Transaction]) -> Option<Self> {
        let mut category_totals: Vec<(String, f64)> = Vec::new();
        let mut total_spent = 0.0;

        for transaction in transactions {
            total_spent += transaction.amount;
            match category_totals
                .iter_mut()
                .find(|(label, _)| label == &transaction.category)
            {
                Some((_, total)) => *total += transaction.amount,
                None => category_totals.push((transaction.category.clone(), transaction.amount)),
            }
        }

        let (top_category, top_category_total) =
            category_totals
                .iter()
                .fold(None::<(&str, f64)>, |best, (label, total)| match best {
                    Some((_, best_total)) if *total <= best_total => best,
                    _ => Some((label, *total)),
                })?;

        Some(Self {
            total_spent,
            transaction_count: transactions.len(),
            average: total_spent / transactions.len() as f64,
            top_category: top_category.to_owned(),
            top_category_total,
            category_totals,
        })
    }
}

/// The transactions dated within the last [INSIGHT_WINDOW_DAYS] days.
pub fn recent_transactions(
    transactions: &[Transaction],
    now: OffsetDateTime,
) -> Vec<&Transaction> {
    let cutoff = now - Duration::days(INSIGHT_WINDOW_DAYS);

    transactions
        .iter()
        .filter(|transaction| transaction.created_at >= cutoff)
        .collect()
}

/// Render the prompt sent to the model.
pub fn build_prompt(summary: &SpendingSummary) -> String {
    let mut breakdown = String::new();
    for (label, total) in &summary.category_totals {
        breakdown.push_str(&format!("- {label}: £{total:.2}\n"));
    }

    format!(
        "Analyze this spending data from the last {INSIGHT_WINDOW_DAYS} days and give 2-3 \
         brief, friendly, actionable insights:\n\n\
         Total spent: £{total:.2}\n\
         Number of transactions: {count}\n\
         Average transaction: £{average:.2}\n\
         Top category: {top} (£{top_total:.2})\n\n\
         Category breakdown:\n{breakdown}\n\
         Keep the response under 100 words and make it personal and encouraging.",
        total = summary.total_spent,
        count = summary.transaction_count,
        average = summary.average,
        top = summary.top_category,
        top_total = summary.top_category_total,
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

fn first_choice_content(response: ChatResponse) -> Option<String> {
    let content = response.choices.into_iter().next()?.message.content;
    let content = content.trim();

    if content.is_empty() {
        None
    } else {
        Some(content.to_owned())
    }
}

/// A client for the OpenRouter chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct InsightClient {
    http: Client,
    api_key: String,
    model: String,
}

impl InsightClient {
    /// Create a client using the key and model named in `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
        }
    }

    /// An insight for the last 30 days of `transactions`.
    ///
    /// Always returns something renderable: [EMPTY_INSIGHT] when the window
    /// holds no transactions, and [FALLBACK_INSIGHT] when the model cannot
    /// be reached or returns an empty completion.
    pub async fn spending_insight(
        &self,
        transactions: &[Transaction],
        now: OffsetDateTime,
    ) -> String {
        let recent = recent_transactions(transactions, now);
        let Some(summary) = SpendingSummary::from_transactions(&recent) else {
            return EMPTY_INSIGHT.to_owned();
        };

        match self.request_insight(&build_prompt(&summary)).await {
            Ok(insight) => insight,
            Err(error) => {
                tracing::warn!("falling back to the canned insight: {error}");
                FALLBACK_INSIGHT.to_owned()
            }
        }
    }

    async fn request_insight(&self, prompt: &str) -> Result<String, Error> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user".to_owned(),
                content: prompt.to_owned(),
            }],
            max_tokens: 150,
            temperature: 0.7,
        };

        let response = self
            .http
            .post(OPENROUTER_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Remote(format!("{status}: {body}")));
        }

        let response: ChatResponse = response.json().await?;
        first_choice_content(response)
            .ok_or_else(|| Error::Remote("the model returned an empty completion".to_owned()))
    }
}
