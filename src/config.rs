//! Runtime settings read from the process environment. Binaries call `dotenvy::dotenv()` first.

use crate::error::ConfigError;
use std::collections::HashMap;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/eventapp";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SCHEMA: &str = "public";
/// Event images are uploaded inline as base64, so the default limit is generous.
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const DEFAULT_SUCCESS_URL: &str = "https://yourwebsite.com/success";
const DEFAULT_CANCEL_URL: &str = "https://yourwebsite.com/cancel";
const DEFAULT_CURRENCY: &str = "usd";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    /// Schema holding the events, event_types and ticket_types tables.
    pub schema: String,
    pub max_body_bytes: usize,
    pub checkout: CheckoutConfig,
}

#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// When absent, checkout requests fail with a logged config error.
    pub secret_key: Option<String>,
    pub api_base: String,
    pub success_url: String,
    pub cancel_url: String,
    pub currency: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        CheckoutConfig {
            secret_key: None,
            api_base: DEFAULT_STRIPE_API_BASE.into(),
            success_url: DEFAULT_SUCCESS_URL.into(),
            cancel_url: DEFAULT_CANCEL_URL.into(),
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Build from an explicit variable map. Empty values count as unset.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let max_connections = match get("EVENTAPP_DB_MAX_CONNECTIONS") {
            Some(v) => v.parse::<u32>().map_err(|e| ConfigError::Invalid {
                key: "EVENTAPP_DB_MAX_CONNECTIONS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "EVENTAPP_DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }

        let max_body_bytes = match get("EVENTAPP_MAX_BODY_BYTES") {
            Some(v) => v.parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "EVENTAPP_MAX_BODY_BYTES",
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let schema = get("EVENTAPP_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_plain_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "EVENTAPP_SCHEMA",
                reason: format!("'{}' is not a plain identifier", schema),
            });
        }

        let checkout = CheckoutConfig {
            secret_key: get("STRIPE_SECRET_KEY"),
            api_base: get("STRIPE_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.into()),
            success_url: get("CHECKOUT_SUCCESS_URL").unwrap_or_else(|| DEFAULT_SUCCESS_URL.into()),
            cancel_url: get("CHECKOUT_CANCEL_URL").unwrap_or_else(|| DEFAULT_CANCEL_URL.into()),
            currency: get("CHECKOUT_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| DEFAULT_CURRENCY.into()),
        };

        Ok(AppConfig {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: get("EVENTAPP_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            max_connections,
            schema,
            max_body_bytes,
            checkout,
        })
    }
}

/// Lowercase ASCII letters, digits and underscores, not starting with a digit.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
