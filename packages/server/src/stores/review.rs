use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::ObjectId;
use common::storage::{Collection, FieldValue, Filter, SortOrder};
use tracing::{info, instrument};

use crate::error::AppError;
use crate::models::item::ItemSummary;
use crate::models::review::{
    Review, ReviewFields, ReviewPatch, ReviewView, fields, validate_review,
};

use super::item::ItemStore;
use super::parse_id;

const NOT_FOUND: &str = "Review not found";
const ITEM_MISSING: &str = "Item does not exist";

/// Owns the review lifecycle. Reads items only through [`ItemStore`].
#[derive(Clone)]
pub struct ReviewStore {
    reviews: Arc<dyn Collection<Review>>,
    items: ItemStore,
}

impl ReviewStore {
    pub fn new(reviews: Arc<dyn Collection<Review>>, items: ItemStore) -> Self {
        Self { reviews, items }
    }

    /// Every review, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ReviewView>, AppError> {
        let reviews = self.reviews.find(&Filter::All, SortOrder::Desc).await?;
        self.enrich_all(reviews).await
    }

    /// Reviews of one item, newest first. An unknown item has no reviews.
    #[instrument(skip(self))]
    pub async fn list_by_item(&self, item_id: &str) -> Result<Vec<ReviewView>, AppError> {
        let item_id = parse_id(item_id, "item")?;
        let filter = Filter::Eq(fields::ITEM_ID, FieldValue::Id(item_id));
        let reviews = self.reviews.find(&filter, SortOrder::Desc).await?;
        self.enrich_all(reviews).await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<ReviewView, AppError> {
        let id = parse_id(id, "review")?;
        let review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        self.enrich(review).await
    }

    /// Create a review of an existing item.
    ///
    /// The parent is resolved before any field rule is checked; an absent or
    /// malformed `itemId` can never resolve and is reported as not found.
    #[instrument(skip(self, input), fields(item_id = ?input.item_id))]
    pub async fn create(&self, input: ReviewFields) -> Result<ReviewView, AppError> {
        let parent = match input.item_id.as_deref().map(ObjectId::parse_str) {
            Some(Ok(item_id)) => self.items.find(item_id).await?,
            _ => None,
        };
        let parent = parent.ok_or_else(|| AppError::NotFound(ITEM_MISSING.into()))?;

        let values = validate_review(&input).map_err(AppError::Validation)?;

        let now = Utc::now();
        let review = Review::from_values(ObjectId::new(), parent.id, now, now, values);
        let stored = self.reviews.insert(review).await?;

        info!(id = %stored.id, item_id = %stored.item_id, score = stored.score, "Review created");
        Ok(ReviewView {
            review: stored,
            item: Some(ItemSummary::from(&parent)),
        })
    }

    /// Apply a partial update. `updatedAt` moves forward even when nothing changed.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: ReviewPatch) -> Result<ReviewView, AppError> {
        let id = parse_id(id, "review")?;
        let existing = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;

        let merged = patch.merge_into(&existing);
        let values = validate_review(&merged).map_err(AppError::Validation)?;

        let updated_at = Utc::now().max(existing.updated_at);
        let review = Review::from_values(
            existing.id,
            existing.item_id,
            existing.created_at,
            updated_at,
            values,
        );

        let updated = self
            .reviews
            .update_by_id(id, review)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;

        info!(id = %updated.id, "Review updated");
        self.enrich(updated).await
    }

    /// Remove a review, returning the bare stored record.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Review, AppError> {
        let id = parse_id(id, "review")?;
        let removed = self
            .reviews
            .delete_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;

        info!(id = %removed.id, "Review deleted");
        Ok(removed)
    }

    async fn enrich(&self, review: Review) -> Result<ReviewView, AppError> {
        let item = self.items.summary(review.item_id).await?;
        Ok(ReviewView { review, item })
    }

    /// Attach parent projections, looking each distinct parent up once.
    async fn enrich_all(&self, reviews: Vec<Review>) -> Result<Vec<ReviewView>, AppError> {
        let mut parents: HashMap<ObjectId, Option<ItemSummary>> = HashMap::new();
        let mut views = Vec::with_capacity(reviews.len());

        for review in reviews {
            let item = match parents.get(&review.item_id) {
                Some(cached) => cached.clone(),
                None => {
                    let summary = self.items.summary(review.item_id).await?;
                    parents.insert(review.item_id, summary.clone());
                    summary
                }
            };
            views.push(ReviewView { review, item });
        }

        Ok(views)
    }
}
