//! Versioned schema migrations. Each migration has forward and backward statements and runs in
//! its own transaction; applied versions are recorded in `<schema>._eventapp_migrations`.

use crate::error::AppError;
use crate::store::{
    qualified_table, quote_ident, EVENTS_TABLE, EVENT_TYPES_TABLE, MIGRATIONS_TABLE,
    TICKET_TYPES_TABLE,
};
use sqlx::PgPool;
use std::collections::BTreeSet;

/// Schema-qualified table names the statements are rendered against.
pub struct TableNames {
    pub events: String,
    pub event_types: String,
    pub ticket_types: String,
}

impl TableNames {
    pub fn new(schema: &str) -> Self {
        TableNames {
            events: qualified_table(schema, EVENTS_TABLE),
            event_types: qualified_table(schema, EVENT_TYPES_TABLE),
            ticket_types: qualified_table(schema, TICKET_TYPES_TABLE),
        }
    }
}

pub struct Migration {
    pub version: i64,
    pub name: &'static str,
    pub up: fn(&TableNames) -> Vec<String>,
    pub down: fn(&TableNames) -> Vec<String>,
}

/// All migrations, ascending by version.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "initial",
        up: initial_up,
        down: initial_down,
    },
    Migration {
        version: 2,
        name: "ticket_price",
        up: ticket_price_up,
        down: ticket_price_down,
    },
];

fn initial_up(t: &TableNames) -> Vec<String> {
    vec![
        format!(
            r#"CREATE TABLE {} (
                event_type_id SERIAL PRIMARY KEY,
                event_type_type_name TEXT,
                date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_modified TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                is_deleted BOOLEAN NOT NULL DEFAULT FALSE
            )"#,
            t.event_types
        ),
        format!(
            r#"CREATE TABLE {} (
                ticket_type_id SERIAL PRIMARY KEY,
                ticket_type_name TEXT,
                date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_modified TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                is_deleted BOOLEAN NOT NULL DEFAULT FALSE
            )"#,
            t.ticket_types
        ),
        format!(
            r#"CREATE TABLE {} (
                event_id SERIAL PRIMARY KEY,
                event_name TEXT,
                image BYTEA,
                event_date TIMESTAMP,
                location TEXT,
                "limit" INTEGER NOT NULL,
                ticket_type_id INTEGER NOT NULL REFERENCES {} (ticket_type_id),
                event_type_id INTEGER NOT NULL REFERENCES {} (event_type_id),
                date_created TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                last_modified TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                is_deleted BOOLEAN NOT NULL DEFAULT FALSE
            )"#,
            t.events, t.ticket_types, t.event_types
        ),
        format!("CREATE INDEX events_ticket_type_id_idx ON {} (ticket_type_id)", t.events),
        format!("CREATE INDEX events_event_type_id_idx ON {} (event_type_id)", t.events),
    ]
}

fn initial_down(t: &TableNames) -> Vec<String> {
    vec![
        format!("DROP TABLE {}", t.events),
        format!("DROP TABLE {}", t.ticket_types),
        format!("DROP TABLE {}", t.event_types),
    ]
}

fn ticket_price_up(t: &TableNames) -> Vec<String> {
    vec![
        format!(
            "ALTER TABLE {} RENAME COLUMN event_type_type_name TO event_type_name",
            t.event_types
        ),
        format!(r#"ALTER TABLE {} ALTER COLUMN "limit" DROP NOT NULL"#, t.events),
        format!("ALTER TABLE {} ADD COLUMN description TEXT", t.events),
        format!("ALTER TABLE {} ADD COLUMN end_date TIMESTAMP", t.events),
        format!("ALTER TABLE {} ADD COLUMN start_date TIMESTAMP", t.events),
        format!(
            "ALTER TABLE {} ADD COLUMN ticket_price NUMERIC(18, 2) NOT NULL DEFAULT 0",
            t.events
        ),
    ]
}

fn ticket_price_down(t: &TableNames) -> Vec<String> {
    vec![
        format!("ALTER TABLE {} DROP COLUMN description", t.events),
        format!("ALTER TABLE {} DROP COLUMN end_date", t.events),
        format!("ALTER TABLE {} DROP COLUMN start_date", t.events),
        format!("ALTER TABLE {} DROP COLUMN ticket_price", t.events),
        format!(
            "ALTER TABLE {} RENAME COLUMN event_type_name TO event_type_type_name",
            t.event_types
        ),
        format!(r#"UPDATE {} SET "limit" = 0 WHERE "limit" IS NULL"#, t.events),
        format!(r#"ALTER TABLE {} ALTER COLUMN "limit" SET DEFAULT 0"#, t.events),
        format!(r#"ALTER TABLE {} ALTER COLUMN "limit" SET NOT NULL"#, t.events),
    ]
}

/// Version of the newest known migration.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Migrations not yet recorded, ascending.
pub fn pending(applied: &BTreeSet<i64>) -> Vec<&'static Migration> {
    MIGRATIONS
        .iter()
        .filter(|m| !applied.contains(&m.version))
        .collect()
}

/// Applied migrations newer than `target`, newest first.
pub fn to_revert(applied: &BTreeSet<i64>, target: i64) -> Vec<&'static Migration> {
    MIGRATIONS
        .iter()
        .rev()
        .filter(|m| m.version > target && applied.contains(&m.version))
        .collect()
}

async fn ensure_migrations_table(pool: &PgPool, schema: &str) -> Result<String, AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    let table = qualified_table(schema, MIGRATIONS_TABLE);
    sqlx::query(&format!(
        r#"CREATE TABLE IF NOT EXISTS {} (
            version BIGINT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"#,
        table
    ))
    .execute(pool)
    .await?;
    Ok(table)
}

async fn applied_versions(pool: &PgPool, table: &str) -> Result<BTreeSet<i64>, AppError> {
    let rows: Vec<(i64,)> = sqlx::query_as(&format!("SELECT version FROM {}", table))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}

/// Highest applied version, `None` when nothing has been applied yet.
pub async fn current_version(pool: &PgPool, schema: &str) -> Result<Option<i64>, AppError> {
    let table = qualified_table(schema, MIGRATIONS_TABLE);
    let (version,): (Option<i64>,) = sqlx::query_as(&format!("SELECT MAX(version) FROM {}", table))
        .fetch_one(pool)
        .await?;
    Ok(version)
}

/// Run every pending forward migration. Returns the versions applied.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<Vec<i64>, AppError> {
    let table = ensure_migrations_table(pool, schema).await?;
    let applied = applied_versions(pool, &table).await?;
    let names = TableNames::new(schema);

    let mut done = Vec::new();
    for m in pending(&applied) {
        let mut tx = pool.begin().await?;
        for sql in (m.up)(&names) {
            tracing::debug!(sql = %sql, version = m.version, "migrate up");
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        sqlx::query(&format!("INSERT INTO {} (version, name) VALUES ($1, $2)", table))
            .bind(m.version)
            .bind(m.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version = m.version, name = m.name, "migration applied");
        done.push(m.version);
    }
    Ok(done)
}

/// Run backward migrations until only versions `<= target` remain. Returns the versions reverted.
pub async fn revert_migrations(pool: &PgPool, schema: &str, target: i64) -> Result<Vec<i64>, AppError> {
    let table = ensure_migrations_table(pool, schema).await?;
    let applied = applied_versions(pool, &table).await?;
    let names = TableNames::new(schema);

    let mut done = Vec::new();
    for m in to_revert(&applied, target) {
        let mut tx = pool.begin().await?;
        for sql in (m.down)(&names) {
            tracing::debug!(sql = %sql, version = m.version, "migrate down");
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        sqlx::query(&format!("DELETE FROM {} WHERE version = $1", table))
            .bind(m.version)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(version = m.version, name = m.name, "migration reverted");
        done.push(m.version);
    }
    Ok(done)
}
