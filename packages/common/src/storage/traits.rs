use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::id::ObjectId;

use super::error::StorageError;
use super::filter::{FieldValue, Filter, SortOrder};

/// A record that can live in a [`Collection`].
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> ObjectId;

    fn created_at(&self) -> DateTime<Utc>;

    /// Value of a filterable field, `None` when the field is absent.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Normalised key that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }
}

/// Opaque document store holding one record type.
///
/// Backends guarantee per-document atomicity only.
#[async_trait]
pub trait Collection<D: Document>: Send + Sync {
    /// All documents matching `filter`, ordered by creation time.
    async fn find(&self, filter: &Filter, order: SortOrder) -> Result<Vec<D>, StorageError>;

    /// The first document matching `filter`, if any.
    async fn find_one(&self, filter: &Filter) -> Result<Option<D>, StorageError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<D>, StorageError> {
        self.find_one(&Filter::by_id(id)).await
    }

    /// Persist a new document and return it as stored.
    async fn insert(&self, doc: D) -> Result<D, StorageError>;

    /// Replace the document with `id`. Returns `None` if it does not exist.
    async fn update_by_id(&self, id: ObjectId, doc: D) -> Result<Option<D>, StorageError>;

    /// Remove the document with `id`, returning the removed snapshot.
    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<D>, StorageError>;
}
