//! Query layer. One trait per resource with a PostgreSQL and an in-memory implementation.
//!
//! Every trait has the same contract:
//! - `list` returns rows whose delete flag is unset.
//! - `get_by_id` ignores the delete flag, so a soft-deleted row is still reachable by id.
//! - `update` replaces the whole row keyed by id with exactly what the caller passes;
//!   `last_modified` is written back as given and never refreshed here.
//! - `soft_delete` sets the delete flag and reports whether a row matched. An unknown id
//!   is not an error.

mod memory;
mod postgres;

pub use memory::InMemoryStore;
pub use postgres::{PgEventRepository, PgEventTypeRepository, PgTicketTypeRepository};

use crate::error::AppError;
use crate::models::{
    Event, EventDetails, EventType, NewEvent, NewEventType, NewTicketType, TicketType,
};
use async_trait::async_trait;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Non-deleted events with their types attached. A non-empty `filter` keeps rows whose
    /// name or location contains it.
    async fn list(&self, filter: Option<&str>) -> Result<Vec<EventDetails>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<EventDetails>, AppError>;
    async fn insert(&self, new: NewEvent) -> Result<Event, AppError>;
    async fn update(&self, event: &Event) -> Result<bool, AppError>;
    async fn soft_delete(&self, id: i32) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EventTypeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<EventType>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<EventType>, AppError>;
    async fn insert(&self, new: NewEventType) -> Result<EventType, AppError>;
    async fn update(&self, event_type: &EventType) -> Result<bool, AppError>;
    async fn soft_delete(&self, id: i32) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TicketTypeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<TicketType>, AppError>;
    async fn get_by_id(&self, id: i32) -> Result<Option<TicketType>, AppError>;
    async fn insert(&self, new: NewTicketType) -> Result<TicketType, AppError>;
    async fn update(&self, ticket_type: &TicketType) -> Result<bool, AppError>;
    async fn soft_delete(&self, id: i32) -> Result<bool, AppError>;
}

/// An empty filter means "no filter".
pub(crate) fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}
