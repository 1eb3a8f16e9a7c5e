use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct ParseQuery {
    /// Address of the document to parse.
    pub url: String,
}

/// Acknowledgment returned by the parse endpoints.
#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct MessageResponse {
    #[schema(example = "Parsing completed")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct PageResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub parsed_at: DateTime<Utc>,
}

impl From<crate::entity::page::Model> for PageResponse {
    fn from(m: crate::entity::page::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            parsed_at: m.parsed_at,
        }
    }
}
