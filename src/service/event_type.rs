use crate::error::AppError;
use crate::models::{EventType, NewEventType};
use crate::repository::EventTypeRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventTypeService {
    repo: Arc<dyn EventTypeRepository>,
}

impl EventTypeService {
    pub fn new(repo: Arc<dyn EventTypeRepository>) -> Self {
        EventTypeService { repo }
    }

    pub async fn list(&self) -> Result<Vec<EventType>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<EventType>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, new: NewEventType) -> Result<EventType, AppError> {
        let row = self.repo.insert(new).await?;
        tracing::info!(event_type_id = row.event_type_id, "event type created");
        Ok(row)
    }

    pub async fn modify<F>(&self, id: i32, merge: F) -> Result<EventType, AppError>
    where
        F: FnOnce(&mut EventType) + Send,
    {
        let mut row = self.require(id).await?;
        merge(&mut row);
        row.event_type_id = id;
        if !self.repo.update(&row).await? {
            return Err(not_found(id));
        }
        tracing::info!(event_type_id = id, "event type updated");
        Ok(row)
    }

    pub async fn remove(&self, id: i32) -> Result<EventType, AppError> {
        let existing = self.require(id).await?;
        self.repo.soft_delete(id).await?;
        tracing::info!(event_type_id = id, "event type deleted");
        Ok(existing)
    }

    async fn require(&self, id: i32) -> Result<EventType, AppError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Event type with id {} not found.", id))
}
