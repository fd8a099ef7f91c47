//! `/api/events`

use super::{parse_id, require_body, JsonBody};
use crate::error::AppError;
use crate::models::EventDto;
use crate::response::{created, success_many, success_one_ok};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Substring matched against name or location.
    pub filter: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let rows = state.events.list(params.filter.as_deref()).await?;
    if rows.is_empty() {
        return Err(AppError::NotFound("No event found.".into()));
    }
    let data: Vec<EventDto> = rows.iter().map(EventDto::from).collect();
    Ok(success_many(data))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let details = state
        .events
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event with id {} not found.", id)))?;
    Ok(success_one_ok(EventDto::from(&details)))
}

pub async fn create(
    State(state): State<AppState>,
    payload: JsonBody<EventDto>,
) -> Result<impl IntoResponse, AppError> {
    let dto = require_body(payload, "EventDto")?;
    let event = state.events.create(dto.to_new_event()).await?;
    Ok(created(
        format!("/api/events/{}", event.event_id),
        EventDto::from(&event),
    ))
}

/// Replace: supplied fields are merged over the stored row; returns the stored entity.
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: JsonBody<EventDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let dto = require_body(payload, "EventDto")?;
    let event = state.events.modify(id, |e| dto.merge_into(e)).await?;
    Ok(success_one_ok(event))
}

/// Soft delete; responds with the event as it was before deletion.
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let removed = state.events.remove(id).await?;
    Ok(success_one_ok(EventDto::from(&removed)))
}
