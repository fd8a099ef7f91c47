//! Common routes: health, readiness, version.

use crate::migration::{current_version, latest_version};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

/// Readiness report. `schema_version` is the highest applied migration; the service is
/// ready only once it has reached `latest_schema_version`.
#[derive(Debug, Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema_version: Option<i64>,
    latest_schema_version: i64,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadyBody>) {
    let latest = latest_version();
    let (Some(pool), Some(schema)) = (&state.pool, &state.schema) else {
        return (
            StatusCode::OK,
            Json(ReadyBody {
                status: "ok",
                database: "in_memory",
                schema: None,
                schema_version: None,
                latest_schema_version: latest,
            }),
        );
    };

    match current_version(pool, schema).await {
        Ok(version) => {
            let migrated = version == Some(latest);
            if !migrated {
                tracing::warn!(?version, latest, "schema not at latest migration");
            }
            (
                if migrated { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE },
                Json(ReadyBody {
                    status: if migrated { "ok" } else { "degraded" },
                    database: "ok",
                    schema: Some(schema.clone()),
                    schema_version: version,
                    latest_schema_version: latest,
                }),
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadyBody {
                    status: "degraded",
                    database: "unavailable",
                    schema: Some(schema.clone()),
                    schema_version: None,
                    latest_schema_version: latest,
                }),
            )
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "schema_version": latest_version()
    }))
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .with_state(state)
}
