use crate::error::AppError;
use crate::models::{NewTicketType, TicketType};
use crate::repository::TicketTypeRepository;
use crate::store::{qualified_table, TICKET_TYPES_TABLE};
use async_trait::async_trait;
use sqlx::PgPool;

pub(super) const TICKET_TYPE_COLUMNS: &str =
    "ticket_type_id, ticket_type_name, date_created, last_modified, is_deleted";

pub struct PgTicketTypeRepository {
    pool: PgPool,
    table: String,
}

impl PgTicketTypeRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgTicketTypeRepository {
            pool,
            table: qualified_table(schema, TICKET_TYPES_TABLE),
        }
    }
}

#[async_trait]
impl TicketTypeRepository for PgTicketTypeRepository {
    async fn list(&self) -> Result<Vec<TicketType>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE is_deleted = FALSE ORDER BY ticket_type_id",
            TICKET_TYPE_COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, TicketType>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<TicketType>, AppError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE ticket_type_id = $1",
            TICKET_TYPE_COLUMNS, self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, TicketType>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewTicketType) -> Result<TicketType, AppError> {
        let sql = format!(
            "INSERT INTO {} (ticket_type_name) VALUES ($1) RETURNING {}",
            self.table, TICKET_TYPE_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, TicketType>(&sql)
            .bind(new.ticket_type_name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, ticket_type: &TicketType) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET ticket_type_name = $2, date_created = $3, last_modified = $4, is_deleted = $5 \
             WHERE ticket_type_id = $1",
            self.table
        );
        tracing::debug!(sql = %sql, id = ticket_type.ticket_type_id, "query");
        let result = sqlx::query(&sql)
            .bind(ticket_type.ticket_type_id)
            .bind(&ticket_type.ticket_type_name)
            .bind(ticket_type.date_created)
            .bind(ticket_type.last_modified)
            .bind(ticket_type.is_deleted)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET is_deleted = TRUE WHERE ticket_type_id = $1",
            self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
