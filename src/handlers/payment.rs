//! `/api/payment`: start a hosted checkout for one ticket.

use super::{require_body, JsonBody};
use crate::checkout::{to_minor_units, CheckoutRequest};
use crate::error::AppError;
use crate::models::EventDto;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutParams {
    /// Informational only; the price comes from the body.
    pub event_id: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub session_id: String,
}

pub async fn create_checkout_session(
    State(state): State<AppState>,
    Query(params): Query<CheckoutParams>,
    payload: JsonBody<EventDto>,
) -> Result<Json<CheckoutResponse>, AppError> {
    let dto = require_body(payload, "EventDto")?;
    let event_name = dto
        .event_name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::InvalidInput("eventName is required".into()))?;
    let price = dto
        .ticket_price
        .ok_or_else(|| AppError::InvalidInput("ticketPrice is required".into()))?;
    if price.is_sign_negative() {
        return Err(AppError::InvalidInput("ticketPrice must not be negative".into()));
    }
    let unit_amount = to_minor_units(price).map_err(|e| AppError::InvalidInput(e.to_string()))?;

    tracing::info!(event_id = ?params.event_id, unit_amount, "starting checkout");
    let session = state
        .checkout
        .create_session(CheckoutRequest {
            event_name,
            unit_amount,
        })
        .await?;
    Ok(Json(CheckoutResponse {
        session_id: session.id,
    }))
}
