//! PostgreSQL repositories. Identifiers come from the configured schema only; values are bound.

mod event;
mod event_type;
mod ticket_type;

pub use event::PgEventRepository;
pub use event_type::PgEventTypeRepository;
pub use ticket_type::PgTicketTypeRepository;
