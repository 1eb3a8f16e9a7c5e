use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryOrder, Set};

use crate::entity::page;
use crate::extract::PageMetadata;

/// Insert a new page row for `metadata`, stamping `parsed_at` with the current time.
///
/// Pages have no natural key, so every call creates a new row.
pub async fn save_page<C: ConnectionTrait>(
    conn: &C,
    metadata: PageMetadata,
) -> Result<page::Model, DbErr> {
    page::ActiveModel {
        name: Set(metadata.name),
        description: Set(Some(metadata.description)),
        parsed_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await
}

pub async fn list_pages<C: ConnectionTrait>(conn: &C) -> Result<Vec<page::Model>, DbErr> {
    page::Entity::find()
        .order_by_asc(page::Column::Id)
        .all(conn)
        .await
}

pub async fn find_page<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<page::Model>, DbErr> {
    page::Entity::find_by_id(id).one(conn).await
}
