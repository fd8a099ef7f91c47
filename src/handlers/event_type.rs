//! `/api/eventtype`

use super::{parse_id, require_body, JsonBody};
use crate::error::AppError;
use crate::models::EventTypeDto;
use crate::response::{created, success_many, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

/// An empty list is a normal 200 here, unlike events and ticket types.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = state.event_types.list().await?;
    let data: Vec<EventTypeDto> = rows.iter().map(EventTypeDto::from).collect();
    Ok(success_many(data))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = state
        .event_types
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event type not found.".into()))?;
    Ok(success_one_ok(EventTypeDto::from(&row)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: JsonBody<EventTypeDto>,
) -> Result<impl IntoResponse, AppError> {
    let dto = require_body(payload, "EventTypeDto")?;
    let row = state.event_types.create(dto.to_new_event_type()).await?;
    Ok(created(format!("/api/eventtype/{}", row.event_type_id), row))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: JsonBody<EventTypeDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let dto = require_body(payload, "EventTypeDto")?;
    let row = state.event_types.modify(id, |t| dto.merge_into(t)).await?;
    Ok(success_one_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let removed = state.event_types.remove(id).await?;
    Ok(success_one_ok(EventTypeDto::from(&removed)))
}
