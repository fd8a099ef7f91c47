use super::{EventType, TicketType};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Row of the `events` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: i32,
    pub event_name: Option<String>,
    #[serde(default, with = "super::base64_bytes")]
    pub image: Option<Vec<u8>>,
    pub event_date: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub ticket_price: Decimal,
    pub limit: Option<i32>,
    pub ticket_type_id: i32,
    pub event_type_id: i32,
    pub date_created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_deleted: bool,
}

/// Insert input: everything except identity, audit timestamps and the delete flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewEvent {
    pub event_name: Option<String>,
    pub image: Option<Vec<u8>>,
    pub event_date: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub ticket_price: Decimal,
    pub limit: Option<i32>,
    pub ticket_type_id: i32,
    pub event_type_id: i32,
}

/// An event together with the type rows it references.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDetails {
    pub event: Event,
    pub event_type: Option<EventType>,
    pub ticket_type: Option<TicketType>,
}

/// Transfer object for events. Every field is optional on input; ids default to 0.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDto {
    #[serde(default)]
    pub event_id: i32,
    pub event_name: Option<String>,
    #[serde(default, with = "super::base64_bytes")]
    pub image: Option<Vec<u8>>,
    pub event_date: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub description: Option<String>,
    pub ticket_price: Option<Decimal>,
    pub location: Option<String>,
    #[serde(default)]
    pub ticket_type_id: i32,
    #[serde(default)]
    pub event_type_id: i32,
    pub limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type_name: Option<String>,
}

impl EventDto {
    pub fn to_new_event(&self) -> NewEvent {
        NewEvent {
            event_name: self.event_name.clone(),
            image: self.image.clone(),
            event_date: self.event_date,
            start_date: self.start_date,
            end_date: self.end_date,
            description: self.description.clone(),
            location: self.location.clone(),
            ticket_price: self.ticket_price.unwrap_or_default(),
            limit: self.limit,
            ticket_type_id: self.ticket_type_id,
            event_type_id: self.event_type_id,
        }
    }

    /// Merge supplied fields over a stored row. Type ids and limit only override when non-zero.
    pub fn merge_into(&self, event: &mut Event) {
        if let Some(name) = &self.event_name {
            event.event_name = Some(name.clone());
        }
        if let Some(image) = &self.image {
            event.image = Some(image.clone());
        }
        if self.event_date.is_some() {
            event.event_date = self.event_date;
        }
        if self.start_date.is_some() {
            event.start_date = self.start_date;
        }
        if self.end_date.is_some() {
            event.end_date = self.end_date;
        }
        if let Some(description) = &self.description {
            event.description = Some(description.clone());
        }
        if let Some(location) = &self.location {
            event.location = Some(location.clone());
        }
        if let Some(price) = self.ticket_price {
            event.ticket_price = price;
        }
        if self.ticket_type_id != 0 {
            event.ticket_type_id = self.ticket_type_id;
        }
        if self.event_type_id != 0 {
            event.event_type_id = self.event_type_id;
        }
        if let Some(limit) = self.limit.filter(|l| *l != 0) {
            event.limit = Some(limit);
        }
    }
}

impl From<&Event> for EventDto {
    fn from(e: &Event) -> Self {
        EventDto {
            event_id: e.event_id,
            event_name: e.event_name.clone(),
            image: e.image.clone(),
            event_date: e.event_date,
            start_date: e.start_date,
            end_date: e.end_date,
            description: e.description.clone(),
            ticket_price: Some(e.ticket_price),
            location: e.location.clone(),
            ticket_type_id: e.ticket_type_id,
            event_type_id: e.event_type_id,
            limit: e.limit,
            ticket_type_name: None,
            event_type_name: None,
        }
    }
}

impl From<&EventDetails> for EventDto {
    fn from(d: &EventDetails) -> Self {
        let mut dto = EventDto::from(&d.event);
        dto.event_type_name = d.event_type.as_ref().and_then(|t| t.event_type_name.clone());
        dto.ticket_type_name = d.ticket_type.as_ref().and_then(|t| t.ticket_type_name.clone());
        dto
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn stored() -> Event {
        let now = Utc::now();
        Event {
            event_id: 3,
            event_name: Some("Expo".into()),
            image: Some(vec![1, 2, 3]),
            event_date: None,
            start_date: None,
            end_date: None,
            description: Some("yearly".into()),
            location: Some("Hall A".into()),
            ticket_price: Decimal::new(2500, 2),
            limit: Some(100),
            ticket_type_id: 1,
            event_type_id: 2,
            date_created: now,
            last_modified: now,
            is_deleted: false,
        }
    }

    #[test]
    fn merge_overrides_only_supplied_fields() {
        let mut event = stored();
        let dto = EventDto {
            location: Some("Hall B".into()),
            event_type_id: 5,
            ..EventDto::default()
        };
        dto.merge_into(&mut event);
        assert_eq!(event.location.as_deref(), Some("Hall B"));
        assert_eq!(event.event_type_id, 5);
        assert_eq!(event.ticket_type_id, 1);
        assert_eq!(event.limit, Some(100));
        assert_eq!(event.event_name.as_deref(), Some("Expo"));
        assert_eq!(event.image, Some(vec![1, 2, 3]));
    }

    #[test]
    fn merge_ignores_zero_limit() {
        let mut event = stored();
        let dto = EventDto {
            limit: Some(0),
            ..EventDto::default()
        };
        dto.merge_into(&mut event);
        assert_eq!(event.limit, Some(100));
    }

    #[test]
    fn dto_reads_camel_case_and_base64_image() {
        let dto: EventDto = serde_json::from_value(json!({
            "eventName": "Expo",
            "image": "AAECAwQF",
            "eventDate": "2024-06-24T10:00:00",
            "location": "Hall A",
            "ticketTypeId": 1,
            "eventTypeId": 1,
            "ticketPrice": 12.5,
            "limit": 100
        }))
        .unwrap();
        assert_eq!(dto.image, Some(vec![0, 1, 2, 3, 4, 5]));
        assert_eq!(
            dto.event_date,
            NaiveDate::from_ymd_opt(2024, 6, 24).and_then(|d| d.and_hms_opt(10, 0, 0))
        );
        let new_event = dto.to_new_event();
        assert_eq!(new_event.ticket_price, Decimal::new(125, 1));
        assert_eq!(new_event.limit, Some(100));
    }

    #[test]
    fn new_event_defaults_price_to_zero() {
        let dto: EventDto = serde_json::from_value(json!({ "eventName": "Free" })).unwrap();
        assert_eq!(dto.to_new_event().ticket_price, Decimal::ZERO);
        assert_eq!(dto.ticket_type_id, 0);
    }

    #[test]
    fn dto_carries_type_names_from_details() {
        let now = Utc::now();
        let details = EventDetails {
            event: stored(),
            event_type: Some(EventType {
                event_type_id: 2,
                event_type_name: Some("Conference".into()),
                date_created: now,
                last_modified: now,
                is_deleted: false,
            }),
            ticket_type: None,
        };
        let dto = EventDto::from(&details);
        assert_eq!(dto.event_type_name.as_deref(), Some("Conference"));
        assert!(dto.ticket_type_name.is_none());
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["image"], json!("AQID"));
        assert!(value.get("ticketTypeName").is_none());
    }
}
