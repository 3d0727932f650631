//! Identifier and document-storage building blocks shared by the service.

pub mod id;
pub mod storage;

pub use id::{InvalidObjectId, ObjectId};
