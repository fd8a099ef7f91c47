//! Persisted entities, insert inputs and transfer objects for the three resources.

mod event;
mod event_type;
mod ticket_type;

pub use event::{Event, EventDetails, EventDto, NewEvent};
pub use event_type::{EventType, EventTypeDto, NewEventType};
pub use ticket_type::{NewTicketType, TicketType, TicketTypeDto};

/// Binary columns travel over JSON as standard base64 strings.
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => s.serialize_some(&STANDARD.encode(bytes)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| STANDARD.decode(s.trim()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
