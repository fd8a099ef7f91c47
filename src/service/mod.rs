//! Services: thin façades over the repositories. Mutations look the row up first so an
//! unknown id surfaces as NotFound, then issue a single keyed write.

mod event;
mod event_type;
mod ticket_type;

pub use event::EventService;
pub use event_type::EventTypeService;
pub use ticket_type::TicketTypeService;
