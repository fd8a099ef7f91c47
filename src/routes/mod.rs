//! Router assembly.

mod api;
mod common;

pub use api::api_routes;
pub use common::common_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Full application: common routes at the root, resources under `/api`.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(max_body_bytes)),
        )
}
