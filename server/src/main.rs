//! eventapp HTTP server.
//!
//! `eventapp-server` applies pending migrations and serves the API.
//! `eventapp-server migrate down <version>` reverts migrations newer than `<version>` and exits.

use eventapp::{
    app, apply_migrations, ensure_database_exists, revert_migrations, AppConfig, AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("eventapp=info,eventapp_server=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["migrate", "down", version] => {
            let to_version: i64 = version.parse()?;
            let reverted = revert_migrations(&pool, &config.schema, to_version).await?;
            tracing::info!(?reverted, to_version, "migrations reverted");
            return Ok(());
        }
        ["migrate"] | ["migrate", "up"] => {
            let applied = apply_migrations(&pool, &config.schema).await?;
            tracing::info!(?applied, "migrations applied");
            return Ok(());
        }
        [] => {}
        other => {
            return Err(format!("unrecognized arguments: {}", other.join(" ")).into());
        }
    }

    let applied = apply_migrations(&pool, &config.schema).await?;
    if !applied.is_empty() {
        tracing::info!(?applied, "migrations applied");
    }

    let state = AppState::postgres(pool, &config);
    let router = app(state, config.max_body_bytes);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
