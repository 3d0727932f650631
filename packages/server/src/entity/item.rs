use sea_orm::entity::prelude::*;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String, // 24-char hex ObjectId

    pub title: String,
    pub genre: String,
    pub platform: String,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub cover_image_url: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub completed: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
