//! In-memory store implementing all three repositories. Used by tests and database-less runs.

use crate::error::AppError;
use crate::models::{
    Event, EventDetails, EventType, NewEvent, NewEventType, NewTicketType, TicketType,
};
use crate::repository::{
    normalize_filter, EventRepository, EventTypeRepository, TicketTypeRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    events: Vec<Event>,
    event_types: Vec<EventType>,
    ticket_types: Vec<TicketType>,
    next_event_id: i32,
    next_event_type_id: i32,
    next_ticket_type_id: i32,
}

/// Rows kept in insertion order; ids start at 1 per table.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Db(sqlx::Error::PoolClosed))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Db(sqlx::Error::PoolClosed))
    }
}

fn details(tables: &Tables, event: &Event) -> EventDetails {
    EventDetails {
        event: event.clone(),
        event_type: tables
            .event_types
            .iter()
            .find(|t| t.event_type_id == event.event_type_id)
            .cloned(),
        ticket_type: tables
            .ticket_types
            .iter()
            .find(|t| t.ticket_type_id == event.ticket_type_id)
            .cloned(),
    }
}

/// Foreign keys are enforced by the database; mirror that so both stores fail alike.
fn check_references(tables: &Tables, event_type_id: i32, ticket_type_id: i32) -> Result<(), AppError> {
    let has_event_type = tables.event_types.iter().any(|t| t.event_type_id == event_type_id);
    let has_ticket_type = tables.ticket_types.iter().any(|t| t.ticket_type_id == ticket_type_id);
    if has_event_type && has_ticket_type {
        Ok(())
    } else {
        Err(AppError::Db(sqlx::Error::Protocol(format!(
            "foreign key violation: event_type_id {} / ticket_type_id {}",
            event_type_id, ticket_type_id
        ))))
    }
}

#[async_trait]
impl EventRepository for InMemoryStore {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<EventDetails>, AppError> {
        let tables = self.read()?;
        let needle = normalize_filter(filter);
        Ok(tables
            .events
            .iter()
            .filter(|e| !e.is_deleted)
            .filter(|e| match needle {
                Some(n) => {
                    e.event_name.as_deref().is_some_and(|s| s.contains(n))
                        || e.location.as_deref().is_some_and(|s| s.contains(n))
                }
                None => true,
            })
            .map(|e| details(&tables, e))
            .collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<EventDetails>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .events
            .iter()
            .find(|e| e.event_id == id)
            .map(|e| details(&tables, e)))
    }

    async fn insert(&self, new: NewEvent) -> Result<Event, AppError> {
        let mut tables = self.write()?;
        check_references(&tables, new.event_type_id, new.ticket_type_id)?;
        tables.next_event_id += 1;
        let now = Utc::now();
        let event = Event {
            event_id: tables.next_event_id,
            event_name: new.event_name,
            image: new.image,
            event_date: new.event_date,
            start_date: new.start_date,
            end_date: new.end_date,
            description: new.description,
            location: new.location,
            ticket_price: new.ticket_price,
            limit: new.limit,
            ticket_type_id: new.ticket_type_id,
            event_type_id: new.event_type_id,
            date_created: now,
            last_modified: now,
            is_deleted: false,
        };
        tables.events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, event: &Event) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        check_references(&tables, event.event_type_id, event.ticket_type_id)?;
        match tables.events.iter_mut().find(|e| e.event_id == event.event_id) {
            Some(row) => {
                *row = event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables.events.iter_mut().find(|e| e.event_id == id) {
            Some(row) => {
                row.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl EventTypeRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<EventType>, AppError> {
        let tables = self.read()?;
        Ok(tables.event_types.iter().filter(|t| !t.is_deleted).cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<EventType>, AppError> {
        let tables = self.read()?;
        Ok(tables.event_types.iter().find(|t| t.event_type_id == id).cloned())
    }

    async fn insert(&self, new: NewEventType) -> Result<EventType, AppError> {
        let mut tables = self.write()?;
        tables.next_event_type_id += 1;
        let now = Utc::now();
        let row = EventType {
            event_type_id: tables.next_event_type_id,
            event_type_name: new.event_type_name,
            date_created: now,
            last_modified: now,
            is_deleted: false,
        };
        tables.event_types.push(row.clone());
        Ok(row)
    }

    async fn update(&self, event_type: &EventType) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables
            .event_types
            .iter_mut()
            .find(|t| t.event_type_id == event_type.event_type_id)
        {
            Some(row) => {
                *row = event_type.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables.event_types.iter_mut().find(|t| t.event_type_id == id) {
            Some(row) => {
                row.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TicketTypeRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<TicketType>, AppError> {
        let tables = self.read()?;
        Ok(tables.ticket_types.iter().filter(|t| !t.is_deleted).cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<TicketType>, AppError> {
        let tables = self.read()?;
        Ok(tables.ticket_types.iter().find(|t| t.ticket_type_id == id).cloned())
    }

    async fn insert(&self, new: NewTicketType) -> Result<TicketType, AppError> {
        let mut tables = self.write()?;
        tables.next_ticket_type_id += 1;
        let now = Utc::now();
        let row = TicketType {
            ticket_type_id: tables.next_ticket_type_id,
            ticket_type_name: new.ticket_type_name,
            date_created: now,
            last_modified: now,
            is_deleted: false,
        };
        tables.ticket_types.push(row.clone());
        Ok(row)
    }

    async fn update(&self, ticket_type: &TicketType) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables
            .ticket_types
            .iter_mut()
            .find(|t| t.ticket_type_id == ticket_type.ticket_type_id)
        {
            Some(row) => {
                *row = ticket_type.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        match tables.ticket_types.iter_mut().find(|t| t.ticket_type_id == id) {
            Some(row) => {
                row.is_deleted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
