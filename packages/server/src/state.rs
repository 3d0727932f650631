use crate::repository::Storage;
use crate::stores::{ItemStore, ReviewStore};

#[derive(Clone)]
pub struct AppState {
    pub items: ItemStore,
    pub reviews: ReviewStore,
}

impl AppState {
    /// Wire both stores over one storage backend. Reviews read items only
    /// through the item store.
    pub fn new(storage: Storage) -> Self {
        let items = ItemStore::new(storage.items);
        let reviews = ReviewStore::new(storage.reviews, items.clone());
        Self { items, reviews }
    }
}
