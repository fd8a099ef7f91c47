//! Database bootstrap and identifier helpers shared by the repositories and migrations.

use crate::error::{AppError, ConfigError};
use sqlx::ConnectOptions;
use std::str::FromStr;

pub const EVENTS_TABLE: &str = "events";
pub const EVENT_TYPES_TABLE: &str = "event_types";
pub const TICKET_TYPES_TABLE: &str = "ticket_types";
pub const MIGRATIONS_TABLE: &str = "_eventapp_migrations";

/// Returns schema-qualified table name (e.g. `"public"."events"`).
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(schema), quote_ident(table))
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: e.to_string(),
        })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split `DATABASE_URL` into an admin URL on the `postgres` database (query options kept)
/// and the target database name.
fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or(ConfigError::Invalid {
            key: "DATABASE_URL",
            reason: "no database path".into(),
        })?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name, Some(query)),
        None => (path_and_query, None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) if !q.is_empty() => format!("{}postgres?{}", base, q),
        _ => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.trim().to_string()))
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
