//! Configuration system (layered: code > env > `.env` file).

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use tracing::warn;

use crate::agent::session::SessionPolicy;
use crate::error::AgentError;
#[cfg(feature = "openai")]
use crate::models::OpenAiModel;

/// Global default config (lazy-initialized from env).
static DEFAULT_CONFIG: OnceLock<AgentConfig> = OnceLock::new();

/// Env var holding the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Layered configuration for the currency agent.
///
/// Keys and base URLs are held behind shared locks so a cloned config
/// observes later `set_*` calls.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    api_keys: Arc<RwLock<HashMap<String, String>>>,
    base_urls: Arc<RwLock<HashMap<String, String>>>,
    model_id: Option<String>,
    session_policy: SessionPolicy,
}

/// Env var name reported when a provider key is missing.
fn api_key_env_var(provider: &str) -> String {
    match provider {
        "openai" => OPENAI_API_KEY_ENV.to_string(),
        other => format!("{}_API_KEY", other.to_uppercase().replace('-', "_")),
    }
}

/// Read a positive integer setting; anything else is logged and ignored.
fn positive_setting(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => {
            warn!(key, value = %raw, "ignoring setting: expected a positive integer");
            None
        }
        Ok(n) => Some(n),
    }
}

impl AgentConfig {
    /// Create empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables, reading `.env` first if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(key) = lookup(OPENAI_API_KEY_ENV) {
            config.set_api_key("openai", key);
        }

        let url_mappings = [
            ("OPENAI_BASE_URL", "openai"),
            ("EXCHANGE_RATE_BASE_URL", "exchange-rate"),
        ];
        for (env_var, service) in &url_mappings {
            if let Some(url) = lookup(env_var) {
                config.set_base_url(service, url);
            }
        }

        config.model_id = lookup("CURRENCY_AGENT_MODEL").filter(|m| !m.trim().is_empty());

        let max_sessions = positive_setting(&lookup, "CURRENCY_AGENT_MAX_SESSIONS")
            .and_then(|n| usize::try_from(n).ok());
        let idle_ttl =
            positive_setting(&lookup, "CURRENCY_AGENT_SESSION_TTL_SECS").map(Duration::from_secs);
        config.session_policy = SessionPolicy {
            max_sessions,
            idle_ttl,
        };

        config
    }

    /// Get (or create) the global default config.
    pub fn global() -> &'static AgentConfig {
        DEFAULT_CONFIG.get_or_init(Self::from_env)
    }

    pub fn set_api_key(&self, provider: &str, key: String) {
        if let Ok(mut keys) = self.api_keys.write() {
            keys.insert(provider.to_string(), key);
        }
    }

    pub fn get_api_key(&self, provider: &str) -> Option<String> {
        self.api_keys
            .read()
            .ok()?
            .get(provider)
            .filter(|k| !k.trim().is_empty())
            .cloned()
    }

    /// Resolve an API key or fail with [`AgentError::MissingApiKey`].
    pub fn require_api_key(&self, provider: &str) -> Result<String, AgentError> {
        self.get_api_key(provider).ok_or_else(|| {
            AgentError::MissingApiKey(format!(
                "{} environment variable not set.",
                api_key_env_var(provider)
            ))
        })
    }

    pub fn set_base_url(&self, service: &str, url: String) {
        if let Ok(mut urls) = self.base_urls.write() {
            urls.insert(service.to_string(), url);
        }
    }

    pub fn get_base_url(&self, service: &str) -> Option<String> {
        self.base_urls.read().ok()?.get(service).cloned()
    }

    /// Check if a provider has credentials configured.
    pub fn has_credentials(&self, provider: &str) -> bool {
        self.get_api_key(provider).is_some()
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    /// Configured model, falling back to the agent's default snapshot.
    #[cfg(feature = "openai")]
    pub fn model(&self) -> OpenAiModel {
        self.model_id
            .as_deref()
            .and_then(|id| id.parse().ok())
            .unwrap_or_default()
    }

    pub fn with_session_policy(mut self, policy: SessionPolicy) -> Self {
        self.session_policy = policy;
        self
    }

    pub fn session_policy(&self) -> &SessionPolicy {
        &self.session_policy
    }
}
