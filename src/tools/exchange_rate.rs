//! Exchange-rate lookup against the Frankfurter API, exposed as a tool.
//!
//! Every failure is returned as an [`ExchangeRateResult::Failure`] rather than
//! an error so the model can explain it to the user. Nothing is cached: each
//! call performs a live request.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::arguments::ToolArguments;
use super::tool::{Tool, ToolExecutionContext};
use super::types::AgentToolParameters;
use crate::error::AgentError;

pub const DEFAULT_EXCHANGE_RATE_BASE_URL: &str = "https://api.frankfurter.app";

/// Date segment meaning "most recent published rates".
pub const LATEST: &str = "latest";

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid API response format.";
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response from API.";

/// Outcome of one exchange-rate lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum ExchangeRateResult {
    /// Raw API payload; guaranteed to contain a `rates` field.
    Rates(Value),
    Failure { error: String },
}

impl ExchangeRateResult {
    fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// JSON handed back to the model as tool output.
    pub fn into_json(self) -> Value {
        match self {
            Self::Rates(payload) => payload,
            Self::Failure { error } => json!({ "error": error }),
        }
    }
}

/// HTTP client for the exchange-rate API.
#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for ExchangeRateClient {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ExchangeRateClient {
    /// Create a client; `None` targets the public Frankfurter endpoint.
    ///
    /// Uses reqwest's default client settings (no retry, no timeout override).
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_EXCHANGE_RATE_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the rate between two currencies on `currency_date`
    /// (`"latest"` or an ISO `YYYY-MM-DD` date).
    pub async fn get_exchange_rate(
        &self,
        currency_from: &str,
        currency_to: &str,
        currency_date: &str,
    ) -> ExchangeRateResult {
        let url = format!("{}/{}", self.base_url, currency_date);
        debug!(%url, currency_from, currency_to, "requesting exchange rate");

        let body = match self.fetch(&url, currency_from, currency_to).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "exchange rate request failed");
                return ExchangeRateResult::failure(format!("API request failed: {e}"));
            }
        };

        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                warn!(error = %e, "exchange rate response is not JSON");
                return ExchangeRateResult::failure(INVALID_JSON_MESSAGE);
            }
        };

        if data.get("rates").is_none() {
            return ExchangeRateResult::failure(INVALID_FORMAT_MESSAGE);
        }
        ExchangeRateResult::Rates(data)
    }

    async fn fetch(
        &self,
        url: &str,
        currency_from: &str,
        currency_to: &str,
    ) -> Result<String, reqwest::Error> {
        self.http
            .get(url)
            .query(&[("from", currency_from), ("to", currency_to)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[derive(Debug, Deserialize)]
struct ExchangeRateArgs {
    currency_from: String,
    currency_to: String,
    #[serde(default)]
    currency_date: Option<String>,
}

/// The `get_exchange_rate` tool offered to the model.
pub struct ExchangeRateTool {
    client: ExchangeRateClient,
    parameters: AgentToolParameters,
}

impl ExchangeRateTool {
    pub const NAME: &'static str = "get_exchange_rate";

    pub fn new(client: ExchangeRateClient) -> Self {
        let parameters = AgentToolParameters::object()
            .string(
                "currency_from",
                "The currency to convert from (e.g., \"USD\").",
                true,
            )
            .string(
                "currency_to",
                "The currency to convert to (e.g., \"JPY\").",
                true,
            )
            .string(
                "currency_date",
                "The date for the exchange rate or \"latest\". Defaults to \"latest\".",
                false,
            )
            .build();
        Self { client, parameters }
    }

    pub fn client(&self) -> &ExchangeRateClient {
        &self.client
    }
}

#[async_trait]
impl Tool for ExchangeRateTool {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        "Use this to get current exchange rate. Returns a dictionary containing the \
         exchange rate data, or an error message if the request fails."
    }

    fn parameters(&self) -> &AgentToolParameters {
        &self.parameters
    }

    async fn execute(
        &self,
        args: &ToolArguments,
        ctx: &ToolExecutionContext,
    ) -> Result<Value, AgentError> {
        let args: ExchangeRateArgs = args.deserialize()?;
        let date = args
            .currency_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(LATEST);
        debug!(tool_call_id = ?ctx.tool_call_id, date, "executing exchange rate tool");

        Ok(self
            .client
            .get_exchange_rate(&args.currency_from, &args.currency_to, date)
            .await
            .into_json())
    }
}
