use crate::error::AppError;
use crate::models::{EventType, NewEventType};
use crate::repository::EventTypeRepository;
use crate::store::{qualified_table, EVENT_TYPES_TABLE};
use async_trait::async_trait;
use sqlx::PgPool;

pub(super) const EVENT_TYPE_COLUMNS: &str =
    "event_type_id, event_type_name, date_created, last_modified, is_deleted";

pub struct PgEventTypeRepository {
    pool: PgPool,
    table: String,
}

impl PgEventTypeRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgEventTypeRepository {
            pool,
            table: qualified_table(schema, EVENT_TYPES_TABLE),
        }
    }
}

#[async_trait]
impl EventTypeRepository for PgEventTypeRepository {
    async fn list(&self) -> Result<Vec<EventType>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE is_deleted = FALSE ORDER BY event_type_id",
            EVENT_TYPE_COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, EventType>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<EventType>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE event_type_id = $1",
            EVENT_TYPE_COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, EventType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewEventType) -> Result<EventType, AppError> {
        let sql = format!(
            "INSERT INTO {} (event_type_name) VALUES ($1) RETURNING {}",
            self.table, EVENT_TYPE_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, EventType>(&sql)
            .bind(new.event_type_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, event_type: &EventType) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET event_type_name = $2, date_created = $3, last_modified = $4, is_deleted = $5 \
             WHERE event_type_id = $1",
            self.table
        );
        tracing::debug!(sql = %sql, id = event_type.event_type_id, "query");
        let result = sqlx::query(&sql)
            .bind(event_type.event_type_id)
            .bind(&event_type.event_type_name)
            .bind(event_type.date_created)
            .bind(event_type.last_modified)
            .bind(event_type.is_deleted)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET is_deleted = TRUE WHERE event_type_id = $1",
            self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
