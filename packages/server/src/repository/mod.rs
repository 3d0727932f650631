//! Storage backends wired into the stores: the in-memory collections from
//! `common` or the sea-orm tables in [`sql`].

pub mod sql;

use std::sync::Arc;

use common::storage::{Collection, MemoryCollection};
use sea_orm::DatabaseConnection;

use crate::models::item::Item;
use crate::models::review::Review;

pub use sql::{SqlItems, SqlReviews};

/// One collection per record type.
#[derive(Clone)]
pub struct Storage {
    pub items: Arc<dyn Collection<Item>>,
    pub reviews: Arc<dyn Collection<Review>>,
}

impl Storage {
    pub fn in_memory() -> Self {
        Self {
            items: Arc::new(MemoryCollection::<Item>::new()),
            reviews: Arc::new(MemoryCollection::<Review>::new()),
        }
    }

    pub fn sql(db: DatabaseConnection) -> Self {
        Self {
            items: Arc::new(SqlItems::new(db.clone())),
            reviews: Arc::new(SqlReviews::new(db)),
        }
    }
}
