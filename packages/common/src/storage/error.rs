use thiserror::Error;

/// Errors raised by a document collection backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be reached or failed to execute the operation.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A unique key constraint rejected the write.
    #[error("duplicate unique key: {0}")]
    Duplicate(String),

    /// A stored record could not be decoded into its document type.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}
