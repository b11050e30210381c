use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String, // comma-joined
    pub page_count: i32,
    pub average_rating: f64,
    pub thumbnail: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// DTO handed to services and views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub user_id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub page_count: i32,
    pub average_rating: f64,
    pub thumbnail: Option<String>,
    pub created_at: String,
}

impl From<Model> for Book {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            isbn: model.isbn,
            title: model.title,
            author: model.author,
            page_count: model.page_count,
            average_rating: model.average_rating,
            thumbnail: model.thumbnail,
            created_at: model.created_at,
        }
    }
}

/// A book resolved from the metadata provider, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub user_id: i32,
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub page_count: i32,
    pub average_rating: f64,
    pub thumbnail: Option<String>,
}
