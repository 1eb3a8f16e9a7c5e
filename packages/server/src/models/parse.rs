use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, IntoParams)]
pub struct ParseQuery {
    /// Address of the document the parser service should fetch.
    pub url: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, PartialEq)]
pub struct MessageResponse {
    #[schema(example = "Parser completed")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
