use std::str::FromStr;

use async_trait::async_trait;
use common::ObjectId;
use common::storage::{Collection, FieldValue, Filter, SortOrder, StorageError};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, IntoColumnRef, LikeExpr};
use sea_orm::*;

use crate::entity::{item, review};
use crate::models::item::Item;
use crate::models::review::Review;
use crate::models::shared::escape_like;

fn backend(err: DbErr) -> StorageError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => StorageError::Duplicate(detail),
        _ => StorageError::Backend(err.to_string()),
    }
}

fn column<C: ColumnTrait + FromStr>(name: &str) -> Result<C, StorageError> {
    C::from_str(name).map_err(|_| StorageError::Backend(format!("Unknown column '{name}'")))
}

/// Translate a filter tree into a sea-orm condition over the columns of `C`.
fn condition<C>(filter: &Filter) -> Result<Condition, StorageError>
where
    C: ColumnTrait + FromStr + IntoColumnRef,
{
    let cond = match filter {
        Filter::All => Condition::all(),
        Filter::Eq(field, value) => {
            let col = column::<C>(field)?;
            let expr = match value {
                FieldValue::Text(text) => col.eq(text.clone()),
                FieldValue::Bool(flag) => col.eq(*flag),
                FieldValue::Id(id) => col.eq(id.to_hex()),
            };
            Condition::all().add(expr)
        }
        Filter::EqIgnoreCase(field, value) => {
            let col = column::<C>(field)?;
            Condition::all()
                .add(Expr::expr(Func::lower(Expr::col(col))).eq(value.to_lowercase()))
        }
        Filter::ContainsIgnoreCase(field, needle) => {
            let col = column::<C>(field)?;
            let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
            Condition::all().add(
                Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(pattern).escape('\\')),
            )
        }
        Filter::And(clauses) => {
            let mut cond = Condition::all();
            for clause in clauses {
                cond = cond.add(condition::<C>(clause)?);
            }
            cond
        }
        Filter::Or(clauses) => {
            let mut cond = Condition::any();
            for clause in clauses {
                cond = cond.add(condition::<C>(clause)?);
            }
            cond
        }
    };
    Ok(cond)
}

fn order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}

fn parse_stored_id(raw: &str) -> Result<ObjectId, StorageError> {
    ObjectId::parse_str(raw).map_err(|e| StorageError::Corrupt(e.to_string()))
}

fn parse_label<T: FromStr<Err = String>>(raw: &str) -> Result<T, StorageError> {
    raw.parse().map_err(StorageError::Corrupt)
}

impl TryFrom<item::Model> for Item {
    type Error = StorageError;

    fn try_from(m: item::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_stored_id(&m.id)?,
            title: m.title,
            genre: parse_label(&m.genre)?,
            platform: parse_label(&m.platform)?,
            release_year: m.release_year,
            developer: m.developer,
            cover_image_url: m.cover_image_url,
            description: m.description,
            completed: m.completed,
            created_at: m.created_at,
        })
    }
}

impl From<Item> for item::ActiveModel {
    fn from(doc: Item) -> Self {
        item::ActiveModel {
            id: Set(doc.id.to_hex()),
            title: Set(doc.title),
            genre: Set(doc.genre.as_str().to_string()),
            platform: Set(doc.platform.as_str().to_string()),
            release_year: Set(doc.release_year),
            developer: Set(doc.developer),
            cover_image_url: Set(doc.cover_image_url),
            description: Set(doc.description),
            completed: Set(doc.completed),
            created_at: Set(doc.created_at),
        }
    }
}

impl TryFrom<review::Model> for Review {
    type Error = StorageError;

    fn try_from(m: review::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_stored_id(&m.id)?,
            item_id: parse_stored_id(&m.item_id)?,
            score: m.score,
            text: m.text,
            hours_played: m.hours_played,
            difficulty: parse_label(&m.difficulty)?,
            would_recommend: m.would_recommend,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}

impl From<Review> for review::ActiveModel {
    fn from(doc: Review) -> Self {
        review::ActiveModel {
            id: Set(doc.id.to_hex()),
            item_id: Set(doc.item_id.to_hex()),
            score: Set(doc.score),
            text: Set(doc.text),
            hours_played: Set(doc.hours_played),
            difficulty: Set(doc.difficulty.as_str().to_string()),
            would_recommend: Set(doc.would_recommend),
            created_at: Set(doc.created_at),
            updated_at: Set(doc.updated_at),
        }
    }
}

/// `item` table behind the [`Collection`] contract.
pub struct SqlItems {
    db: DatabaseConnection,
}

impl SqlItems {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Collection<Item> for SqlItems {
    async fn find(&self, filter: &Filter, sort: SortOrder) -> Result<Vec<Item>, StorageError> {
        let models = item::Entity::find()
            .filter(condition::<item::Column>(filter)?)
            .order_by(item::Column::CreatedAt, order(sort))
            .order_by(item::Column::Id, order(sort))
            .all(&self.db)
            .await
            .map_err(backend)?;
        models.into_iter().map(Item::try_from).collect()
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Item>, StorageError> {
        item::Entity::find()
            .filter(condition::<item::Column>(filter)?)
            .order_by_asc(item::Column::CreatedAt)
            .order_by_asc(item::Column::Id)
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(Item::try_from)
            .transpose()
    }

    async fn insert(&self, doc: Item) -> Result<Item, StorageError> {
        let model = item::ActiveModel::from(doc)
            .insert(&self.db)
            .await
            .map_err(backend)?;
        Item::try_from(model)
    }

    async fn update_by_id(&self, id: ObjectId, doc: Item) -> Result<Option<Item>, StorageError> {
        let mut active = item::ActiveModel::from(doc);
        active.id = ActiveValue::Unchanged(id.to_hex());
        match active.update(&self.db).await {
            Ok(model) => Item::try_from(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Item>, StorageError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let result = item::Entity::delete_by_id(id.to_hex())
            .exec(&self.db)
            .await
            .map_err(backend)?;
        Ok((result.rows_affected > 0).then_some(existing))
    }
}

/// `review` table behind the [`Collection`] contract.
pub struct SqlReviews {
    db: DatabaseConnection,
}

impl SqlReviews {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Collection<Review> for SqlReviews {
    async fn find(&self, filter: &Filter, sort: SortOrder) -> Result<Vec<Review>, StorageError> {
        let models = review::Entity::find()
            .filter(condition::<review::Column>(filter)?)
            .order_by(review::Column::CreatedAt, order(sort))
            .order_by(review::Column::Id, order(sort))
            .all(&self.db)
            .await
            .map_err(backend)?;
        models.into_iter().map(Review::try_from).collect()
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<Review>, StorageError> {
        review::Entity::find()
            .filter(condition::<review::Column>(filter)?)
            .order_by_asc(review::Column::CreatedAt)
            .order_by_asc(review::Column::Id)
            .one(&self.db)
            .await
            .map_err(backend)?
            .map(Review::try_from)
            .transpose()
    }

    async fn insert(&self, doc: Review) -> Result<Review, StorageError> {
        let model = review::ActiveModel::from(doc)
            .insert(&self.db)
            .await
            .map_err(backend)?;
        Review::try_from(model)
    }

    async fn update_by_id(
        &self,
        id: ObjectId,
        doc: Review,
    ) -> Result<Option<Review>, StorageError> {
        let mut active = review::ActiveModel::from(doc);
        active.id = ActiveValue::Unchanged(id.to_hex());
        match active.update(&self.db).await {
            Ok(model) => Review::try_from(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(backend(e)),
        }
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<Review>, StorageError> {
        let Some(existing) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let result = review::Entity::delete_by_id(id.to_hex())
            .exec(&self.db)
            .await
            .map_err(backend)?;
        Ok((result.rows_affected > 0).then_some(existing))
    }
}
