use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of the `event_types` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventType {
    pub event_type_id: i32,
    pub event_type_name: Option<String>,
    pub date_created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewEventType {
    pub event_type_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeDto {
    #[serde(default)]
    pub event_type_id: i32,
    pub event_type_name: Option<String>,
}

impl EventTypeDto {
    pub fn to_new_event_type(&self) -> NewEventType {
        NewEventType {
            event_type_name: self.event_type_name.clone(),
        }
    }

    /// The name is replaced outright, so an omitted name clears it.
    pub fn merge_into(&self, event_type: &mut EventType) {
        event_type.event_type_name = self.event_type_name.clone();
    }
}

impl From<&EventType> for EventTypeDto {
    fn from(t: &EventType) -> Self {
        EventTypeDto {
            event_type_id: t.event_type_id,
            event_type_name: t.event_type_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_name_even_when_absent() {
        let now = Utc::now();
        let mut row = EventType {
            event_type_id: 1,
            event_type_name: Some("Concert".into()),
            date_created: now,
            last_modified: now,
            is_deleted: false,
        };
        EventTypeDto::default().merge_into(&mut row);
        assert_eq!(row.event_type_name, None);
        assert_eq!(row.event_type_id, 1);
    }
}
