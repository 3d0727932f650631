use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::id::ObjectId;

use super::error::StorageError;
use super::filter::{Filter, SortOrder};
use super::traits::{Collection, Document};

/// In-process collection backed by a hash map.
///
/// Unique keys reported by [`Document::unique_key`] are enforced under the
/// write lock, like a unique index would be.
pub struct MemoryCollection<D> {
    docs: RwLock<HashMap<ObjectId, D>>,
}

impl<D> MemoryCollection<D> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(HashMap::new()),
        }
    }
}

impl<D> Default for MemoryCollection<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn key_taken<D: Document>(docs: &HashMap<ObjectId, D>, doc: &D) -> Option<String> {
    let key = doc.unique_key()?;
    docs.values()
        .any(|other| other.id() != doc.id() && other.unique_key().as_deref() == Some(key.as_str()))
        .then_some(key)
}

fn sort_docs<D: Document>(docs: &mut [D], order: SortOrder) {
    docs.sort_by(|a, b| (a.created_at(), a.id()).cmp(&(b.created_at(), b.id())));
    if order == SortOrder::Desc {
        docs.reverse();
    }
}

#[async_trait]
impl<D: Document> Collection<D> for MemoryCollection<D> {
    async fn find(&self, filter: &Filter, order: SortOrder) -> Result<Vec<D>, StorageError> {
        let docs = self.docs.read().await;
        let mut matched: Vec<D> = docs.values().filter(|d| filter.matches(*d)).cloned().collect();
        sort_docs(&mut matched, order);
        Ok(matched)
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<D>, StorageError> {
        let docs = self.docs.read().await;
        let mut matched: Vec<D> = docs.values().filter(|d| filter.matches(*d)).cloned().collect();
        sort_docs(&mut matched, SortOrder::Asc);
        Ok(matched.into_iter().next())
    }

    async fn insert(&self, doc: D) -> Result<D, StorageError> {
        let mut docs = self.docs.write().await;
        if docs.contains_key(&doc.id()) {
            return Err(StorageError::Duplicate(doc.id().to_hex()));
        }
        if let Some(key) = key_taken(&docs, &doc) {
            return Err(StorageError::Duplicate(key));
        }
        docs.insert(doc.id(), doc.clone());
        Ok(doc)
    }

    async fn update_by_id(&self, id: ObjectId, doc: D) -> Result<Option<D>, StorageError> {
        let mut docs = self.docs.write().await;
        if !docs.contains_key(&id) {
            return Ok(None);
        }
        if let Some(key) = key_taken(&docs, &doc) {
            return Err(StorageError::Duplicate(key));
        }
        docs.insert(id, doc.clone());
        Ok(Some(doc))
    }

    async fn delete_by_id(&self, id: ObjectId) -> Result<Option<D>, StorageError> {
        Ok(self.docs.write().await.remove(&id))
    }
}
