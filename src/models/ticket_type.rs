use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of the `ticket_types` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub ticket_type_id: i32,
    pub ticket_type_name: Option<String>,
    pub date_created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub is_deleted: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewTicketType {
    pub ticket_type_name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketTypeDto {
    #[serde(default)]
    pub ticket_type_id: i32,
    pub ticket_type_name: Option<String>,
}

impl TicketTypeDto {
    pub fn to_new_ticket_type(&self) -> NewTicketType {
        NewTicketType {
            ticket_type_name: self.ticket_type_name.clone(),
        }
    }

    pub fn merge_into(&self, ticket_type: &mut TicketType) {
        if let Some(name) = &self.ticket_type_name {
            ticket_type.ticket_type_name = Some(name.clone());
        }
    }
}

impl From<&TicketType> for TicketTypeDto {
    fn from(t: &TicketType) -> Self {
        TicketTypeDto {
            ticket_type_id: t.ticket_type_id,
            ticket_type_name: t.ticket_type_name.clone(),
        }
    }
}
