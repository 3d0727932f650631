use sea_orm::entity::prelude::*;

/// Reviews keep their `item_id` after the item is deleted, so there is no
/// foreign key to `item`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub item_id: String,
    pub score: i32,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub hours_played: f64,
    pub difficulty: String,
    pub would_recommend: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
