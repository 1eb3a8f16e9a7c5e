use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub email: String,
    pub phone: Option<String>,

    #[sea_orm(has_many, via = "participant_team")]
    pub teams: HasMany<super::team::Entity>,

    /// Evaluations this participant handed out as a judge.
    #[sea_orm(has_many)]
    pub evaluations: HasMany<super::evaluation::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
