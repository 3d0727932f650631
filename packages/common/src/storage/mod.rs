mod error;
mod filter;
mod traits;

pub mod memory;

pub use error::StorageError;
pub use filter::{FieldValue, Filter, ID_FIELD, SortOrder};
pub use memory::MemoryCollection;
pub use traits::{Collection, Document};
