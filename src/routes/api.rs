//! Resource routes, mounted under `/api`.

use crate::handlers::{event, event_type, payment, ticket_type};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/events", get(event::list).post(event::create))
        .route(
            "/events/:id",
            get(event::read).put(event::update).delete(event::delete),
        )
        .route("/eventtype", get(event_type::list).post(event_type::create))
        .route(
            "/eventtype/:id",
            get(event_type::read)
                .put(event_type::update)
                .delete(event_type::delete),
        )
        .route("/tickettype", get(ticket_type::list).post(ticket_type::create))
        .route(
            "/tickettype/:id",
            get(ticket_type::read)
                .put(ticket_type::update)
                .delete(ticket_type::delete),
        )
        .route("/payment", post(payment::create_checkout_session))
        .with_state(state)
}
