//! `/api/tickettype`

use super::{parse_id, require_body, JsonBody};
use crate::error::AppError;
use crate::models::TicketTypeDto;
use crate::response::{created, success_many, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.ticket_types.list().await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No ticket type found.".into()));
    }
    let data: Vec<TicketTypeDto> = rows.iter().map(TicketTypeDto::from).collect();
    Ok(success_many(data))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .ticket_types
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticket type not found.".into()))?;
    Ok(success_one_ok(TicketTypeDto::from(&row)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: JsonBody<TicketTypeDto>,
) -> Result<impl IntoResponse, AppError> {
    let dto = require_body(payload, "TicketTypeDto")?;
    let row = state.ticket_types.create(dto.to_new_ticket_type()).await?;
    Ok(created(format!("/api/tickettype/{}", row.ticket_type_id), row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: JsonBody<TicketTypeDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let dto = require_body(payload, "TicketTypeDto")?;
    let row = state.ticket_types.modify(id, |t| dto.merge_into(t)).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let removed = state.ticket_types.remove(id).await?;
    Ok(success_one_ok(TicketTypeDto::from(&removed)))
}
