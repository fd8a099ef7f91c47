//! Payment checkout: hands an event name and ticket price to a hosted checkout provider and
//! returns the provider's opaque session id. Prices are never validated against stored events.

use crate::config::CheckoutConfig;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

const PRODUCT_DESCRIPTION: &str = "Event ticket";

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("checkout provider is not configured")]
    NotConfigured,
    #[error("amount {0} does not fit in minor units")]
    AmountOutOfRange(Decimal),
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider rejected session ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// One line item, one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckoutRequest {
    pub event_name: String,
    /// Price in minor units (cents).
    pub unit_amount: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
}

#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_session(&self, request: CheckoutRequest) -> Result<CheckoutSession, CheckoutError>;
}

/// Price × 100, truncated toward zero.
pub fn to_minor_units(price: Decimal) -> Result<i64, CheckoutError> {
    (price * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .ok_or(CheckoutError::AmountOutOfRange(price))
}

/// Stripe Checkout Sessions over its form-encoded REST API.
#[derive(Clone, Debug)]
pub struct StripeCheckout {
    http_client: Client,
    config: CheckoutConfig,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl StripeCheckout {
    pub fn new(config: CheckoutConfig) -> Self {
        StripeCheckout {
            http_client: Client::new(),
            config,
        }
    }

    fn form(&self, request: &CheckoutRequest) -> Vec<(&'static str, String)> {
        vec![
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][price_data][currency]", self.config.currency.clone()),
            ("line_items[0][price_data][unit_amount]", request.unit_amount.to_string()),
            ("line_items[0][price_data][product_data][name]", request.event_name.clone()),
            (
                "line_items[0][price_data][product_data][description]",
                PRODUCT_DESCRIPTION.to_string(),
            ),
            ("line_items[0][quantity]", "1".to_string()),
            ("mode", "payment".to_string()),
            ("success_url", self.config.success_url.clone()),
            ("cancel_url", self.config.cancel_url.clone()),
        ]
    }
}

#[async_trait]
impl CheckoutGateway for StripeCheckout {
    async fn create_session(&self, request: CheckoutRequest) -> Result<CheckoutSession, CheckoutError> {
        let secret_key = self
            .config
            .secret_key
            .as_deref()
            .ok_or(CheckoutError::NotConfigured)?;
        let url = format!("{}/v1/checkout/sessions", self.config.api_base);
        tracing::debug!(url = %url, unit_amount = request.unit_amount, "creating checkout session");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(secret_key)
            .form(&self.form(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or(body);
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        tracing::info!(session_id = %session.id, "checkout session created");
        Ok(session)
    }
}
