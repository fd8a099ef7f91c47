use crate::error::AppError;
use crate::models::{NewTicketType, TicketType};
use crate::repository::TicketTypeRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct TicketTypeService {
    repo: Arc<dyn TicketTypeRepository>,
}

impl TicketTypeService {
    pub fn new(repo: Arc<dyn TicketTypeRepository>) -> Self {
        TicketTypeService { repo }
    }

    pub async fn list(&self) -> Result<Vec<TicketType>, AppError> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i32) -> Result<Option<TicketType>, AppError> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, new: NewTicketType) -> Result<TicketType, AppError> {
        let row = self.repo.insert(new).await?;
        tracing::info!(ticket_type_id = row.ticket_type_id, "ticket type created");
        Ok(row)
    }

    pub async fn modify<F>(&self, id: i32, merge: F) -> Result<TicketType, AppError>
    where
        F: FnOnce(&mut TicketType) + Send,
    {
        let mut row = self.require(id).await?;
        merge(&mut row);
        row.ticket_type_id = id;
        if !self.repo.update(&row).await? {
            return Err(not_found(id));
        }
        tracing::info!(ticket_type_id = id, "ticket type updated");
        Ok(row)
    }

    pub async fn remove(&self, id: i32) -> Result<TicketType, AppError> {
        let existing = self.require(id).await?;
        self.repo.soft_delete(id).await?;
        tracing::info!(ticket_type_id = id, "ticket type deleted");
        Ok(existing)
    }

    async fn require(&self, id: i32) -> Result<TicketType, AppError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| not_found(id))
    }
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Ticket type with id {} not found.", id))
}
