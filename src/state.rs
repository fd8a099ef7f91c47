//! Shared application state for all routes.

use crate::checkout::{CheckoutGateway, StripeCheckout};
use crate::repository::{
    InMemoryStore, PgEventRepository, PgEventTypeRepository, PgTicketTypeRepository,
};
use crate::service::{EventService, EventTypeService, TicketTypeService};
use crate::config::AppConfig;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Present when backed by PostgreSQL; used by the readiness probe.
    pub pool: Option<PgPool>,
    /// Schema the tables live in; set together with `pool`.
    pub schema: Option<String>,
    pub events: EventService,
    pub event_types: EventTypeService,
    pub ticket_types: TicketTypeService,
    pub checkout: Arc<dyn CheckoutGateway>,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: &AppConfig) -> Self {
        AppState {
            events: EventService::new(Arc::new(PgEventRepository::new(pool.clone(), &config.schema))),
            event_types: EventTypeService::new(Arc::new(PgEventTypeRepository::new(
                pool.clone(),
                &config.schema,
            ))),
            ticket_types: TicketTypeService::new(Arc::new(PgTicketTypeRepository::new(
                pool.clone(),
                &config.schema,
            ))),
            checkout: Arc::new(StripeCheckout::new(config.checkout.clone())),
            pool: Some(pool),
            schema: Some(config.schema.clone()),
        }
    }

    pub fn in_memory(store: Arc<InMemoryStore>, checkout: Arc<dyn CheckoutGateway>) -> Self {
        AppState {
            pool: None,
            schema: None,
            events: EventService::new(store.clone()),
            event_types: EventTypeService::new(store.clone()),
            ticket_types: TicketTypeService::new(store),
            checkout,
        }
    }
}
