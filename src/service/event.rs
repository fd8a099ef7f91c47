use crate::error::AppError;
use crate::models::{Event, EventDetails, NewEvent};
use crate::repository::EventRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct EventService {
    repo: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repo: Arc<dyn EventRepository>) -> Self {
        EventService { repo }
    }

    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<EventDetails>, AppError> {
        self.repo.list(filter).await
    }

    /// Direct lookup; soft-deleted events are returned too.
    pub async fn get(&self, id: i32) -> Result<Option<EventDetails>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, new: NewEvent) -> Result<Event, AppError> {
        let event = self.repo.insert(new).await?;
        tracing::info!(event_id = event.event_id, "event created");
        Ok(event)
    }

    /// Apply `merge` to the stored row and write it back as a whole.
    pub async fn modify<F>(&self, id: i32, merge: F) -> Result<Event, AppError>
    where
        F: FnOnce(&mut Event) + Send,
    {
        let mut event = self.require(id).await?.event;
        merge(&mut event);
        event.event_id = id;
        if !self.repo.update(&event).await? {
            return Err(not_found(id));
        }
        tracing::info!(event_id = id, "event updated");
        Ok(event)
    }

    /// Soft-delete and return the row as it was before the flag flipped.
    pub async fn remove(&self, id: i32) -> Result<EventDetails, AppError> {
        let existing = self.require(id).await?;
        self.repo.soft_delete(id).await?;
        tracing::info!(event_id = id, "event deleted");
        Ok(existing)
    }

    async fn require(&self, id: i32) -> Result<EventDetails, AppError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Event with id {} not found.", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewEventType, NewTicketType};
    use crate::repository::{EventTypeRepository, InMemoryStore, TicketTypeRepository};

    async fn service() -> EventService {
        let store = Arc::new(InMemoryStore::new());
        EventTypeRepository::insert(store.as_ref(), NewEventType::default()).await.unwrap();
        TicketTypeRepository::insert(store.as_ref(), NewTicketType::default()).await.unwrap();
        EventService::new(store)
    }

    fn new_event() -> NewEvent {
        NewEvent {
            event_name: Some("Expo".into()),
            event_type_id: 1,
            ticket_type_id: 1,
            ..NewEvent::default()
        }
    }

    #[tokio::test]
    async fn modify_cannot_move_the_row_to_another_id() {
        let svc = service().await;
        let created = svc.create(new_event()).await.unwrap();
        let updated = svc
            .modify(created.event_id, |e| {
                e.event_id = 99;
                e.location = Some("Hall C".into());
            })
            .await
            .unwrap();
        assert_eq!(updated.event_id, created.event_id);
        assert!(svc.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_returns_pre_delete_snapshot() {
        let svc = service().await;
        let created = svc.create(new_event()).await.unwrap();
        let removed = svc.remove(created.event_id).await.unwrap();
        assert!(!removed.event.is_deleted);
        assert!(svc.get(created.event_id).await.unwrap().unwrap().event.is_deleted);
        assert!(svc.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let svc = service().await;
        assert!(matches!(svc.remove(5).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.modify(5, |_| {}).await, Err(AppError::NotFound(_))));
    }
}
