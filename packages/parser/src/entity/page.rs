use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Metadata extracted from a fetched document.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "page")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub description: Option<String>,

    pub parsed_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
