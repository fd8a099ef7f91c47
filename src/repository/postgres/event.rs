use super::event_type::EVENT_TYPE_COLUMNS;
use super::ticket_type::TICKET_TYPE_COLUMNS;
use crate::error::AppError;
use crate::models::{Event, EventDetails, EventType, NewEvent, TicketType};
use crate::repository::{normalize_filter, EventRepository};
use crate::store::{qualified_table, EVENTS_TABLE, EVENT_TYPES_TABLE, TICKET_TYPES_TABLE};
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::{BTreeSet, HashMap};

const EVENT_COLUMNS: &str = "event_id, event_name, image, event_date, start_date, end_date, description, \
    location, ticket_price, \"limit\", ticket_type_id, event_type_id, date_created, last_modified, is_deleted";

pub struct PgEventRepository {
    pool: PgPool,
    events: String,
    event_types: String,
    ticket_types: String,
}

impl PgEventRepository {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgEventRepository {
            pool,
            events: qualified_table(schema, EVENTS_TABLE),
            event_types: qualified_table(schema, EVENT_TYPES_TABLE),
            ticket_types: qualified_table(schema, TICKET_TYPES_TABLE),
        }
    }

    /// Batch-load the referenced type rows (deleted or not) and attach them.
    async fn attach_types(&self, events: Vec<Event>) -> Result<Vec<EventDetails>, AppError> {
        if events.is_empty() {
            return Ok(Vec::new());
        }
        let event_type_ids: Vec<i32> = events
            .iter()
            .map(|e| e.event_type_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ticket_type_ids: Vec<i32> = events
            .iter()
            .map(|e| e.ticket_type_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let sql = format!(
            "SELECT {} FROM {} WHERE event_type_id = ANY($1)",
            EVENT_TYPE_COLUMNS, self.event_types
        );
        tracing::debug!(sql = %sql, ids = ?event_type_ids, "query");
        let event_types: HashMap<i32, EventType> = sqlx::query_as::<_, EventType>(&sql)
            .bind(&event_type_ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|t| (t.event_type_id, t))
            .collect();

        let sql = format!(
            "SELECT {} FROM {} WHERE ticket_type_id = ANY($1)",
            TICKET_TYPE_COLUMNS, self.ticket_types
        );
        tracing::debug!(sql = %sql, ids = ?ticket_type_ids, "query");
        let ticket_types: HashMap<i32, TicketType> = sqlx::query_as::<_, TicketType>(&sql)
            .bind(&ticket_type_ids)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|t| (t.ticket_type_id, t))
            .collect();

        Ok(events
            .into_iter()
            .map(|event| EventDetails {
                event_type: event_types.get(&event.event_type_id).cloned(),
                ticket_type: ticket_types.get(&event.ticket_type_id).cloned(),
                event,
            })
            .collect())
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<EventDetails>, AppError> {
        let rows = match normalize_filter(filter) {
            Some(needle) => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE is_deleted = FALSE \
                     AND (strpos(event_name, $1) > 0 OR strpos(location, $1) > 0) ORDER BY event_id",
                    EVENT_COLUMNS, self.events
                );
                tracing::debug!(sql = %sql, filter = %needle, "query");
                sqlx::query_as::<_, Event>(&sql)
                    .bind(needle)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM {} WHERE is_deleted = FALSE ORDER BY event_id",
                    EVENT_COLUMNS, self.events
                );
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as::<_, Event>(&sql).fetch_all(&self.pool).await?
            }
        };
        self.attach_types(rows).await
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<EventDetails>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE event_id = $1", EVENT_COLUMNS, self.events);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some(event) => Ok(self.attach_types(vec![event]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn insert(&self, new: NewEvent) -> Result<Event, AppError> {
        let sql = format!(
            "INSERT INTO {} (event_name, image, event_date, start_date, end_date, description, location, \
             ticket_price, \"limit\", ticket_type_id, event_type_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING {}",
            self.events, EVENT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Event>(&sql)
            .bind(new.event_name)
            .bind(new.image)
            .bind(new.event_date)
            .bind(new.start_date)
            .bind(new.end_date)
            .bind(new.description)
            .bind(new.location)
            .bind(new.ticket_price)
            .bind(new.limit)
            .bind(new.ticket_type_id)
            .bind(new.event_type_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, event: &Event) -> Result<bool, AppError> {
        let sql = format!(
            "UPDATE {} SET event_name = $2, image = $3, event_date = $4, start_date = $5, end_date = $6, \
             description = $7, location = $8, ticket_price = $9, \"limit\" = $10, ticket_type_id = $11, \
             event_type_id = $12, date_created = $13, last_modified = $14, is_deleted = $15 \
             WHERE event_id = $1",
            self.events
        );
        tracing::debug!(sql = %sql, id = event.event_id, "query");
        let result = sqlx::query(&sql)
            .bind(event.event_id)
            .bind(&event.event_name)
            .bind(&event.image)
            .bind(event.event_date)
            .bind(event.start_date)
            .bind(event.end_date)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.ticket_price)
            .bind(event.limit)
            .bind(event.ticket_type_id)
            .bind(event.event_type_id)
            .bind(event.date_created)
            .bind(event.last_modified)
            .bind(event.is_deleted)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!("UPDATE {} SET is_deleted = TRUE WHERE event_id = $1", self.events);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
