//! Event management backend: events, event types and ticket types with soft delete,
//! served over axum and stored in PostgreSQL, plus a hosted payment checkout.

pub mod checkout;
pub mod config;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use checkout::{CheckoutGateway, StripeCheckout};
pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use migration::{apply_migrations, revert_migrations};
pub use repository::InMemoryStore;
pub use routes::app;
pub use state::AppState;
pub use store::ensure_database_exists;
