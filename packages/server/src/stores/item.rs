use std::sync::Arc;

use chrono::Utc;
use common::ObjectId;
use common::storage::{Collection, Filter, SortOrder, StorageError};
use tracing::{info, instrument, warn};

use crate::error::AppError;
use crate::models::item::{
    Item, ItemFields, ItemFilters, ItemPatch, ItemSummary, fields, validate_item,
};

use super::{current_year, parse_id};

const NOT_FOUND: &str = "Item not found";
const TITLE_TAKEN: &str = "An item with that title already exists";

/// Owns the item lifecycle.
#[derive(Clone)]
pub struct ItemStore {
    items: Arc<dyn Collection<Item>>,
}

impl ItemStore {
    pub fn new(items: Arc<dyn Collection<Item>>) -> Self {
        Self { items }
    }

    /// Items matching `filters`, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self, filters: &ItemFilters) -> Result<Vec<Item>, AppError> {
        Ok(self.items.find(&filters.to_filter(), SortOrder::Desc).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Item, AppError> {
        let id = parse_id(id, "item")?;
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    #[instrument(skip(self, input), fields(title = ?input.title))]
    pub async fn create(&self, input: ItemFields) -> Result<Item, AppError> {
        let values = validate_item(&input, current_year()).map_err(AppError::Validation)?;

        let same_title = Filter::EqIgnoreCase(fields::TITLE, values.title.clone());
        if self.items.find_one(&same_title).await?.is_some() {
            return Err(AppError::Conflict(TITLE_TAKEN.into()));
        }

        let item = Item::from_values(ObjectId::new(), Utc::now(), values);
        let stored = self.items.insert(item).await.map_err(|e| match e {
            StorageError::Duplicate(_) => {
                warn!("Concurrent create with the same title lost the race");
                AppError::Conflict(TITLE_TAKEN.into())
            }
            other => other.into(),
        })?;

        info!(id = %stored.id, title = %stored.title, "Item created");
        Ok(stored)
    }

    /// Apply a partial update. Title uniqueness is not re-checked here.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: ItemPatch) -> Result<Item, AppError> {
        let id = parse_id(id, "item")?;
        let existing = self
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;

        let merged = patch.merge_into(&existing);
        let values = validate_item(&merged, current_year()).map_err(AppError::Validation)?;
        let item = Item::from_values(existing.id, existing.created_at, values);

        let updated = self
            .items
            .update_by_id(id, item)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;

        info!(id = %updated.id, title = %updated.title, "Item updated");
        Ok(updated)
    }

    /// Remove an item. Its reviews are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Item, AppError> {
        let id = parse_id(id, "item")?;
        let removed = self
            .items
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;

        info!(id = %removed.id, title = %removed.title, "Item deleted");
        Ok(removed)
    }

    /// Existence check used before writes that reference an item.
    pub async fn find(&self, id: ObjectId) -> Result<Option<Item>, AppError> {
        Ok(self.items.find_by_id(id).await?)
    }

    /// Projection attached to reviews; `None` once the item is gone.
    pub async fn summary(&self, id: ObjectId) -> Result<Option<ItemSummary>, AppError> {
        Ok(self.find(id).await?.as_ref().map(ItemSummary::from))
    }
}
