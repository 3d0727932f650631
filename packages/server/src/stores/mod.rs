//! The data-integrity and query layer: every rule about items and reviews
//! lives here, independent of HTTP.

pub mod item;
pub mod review;

use chrono::{Datelike, Utc};
use common::ObjectId;

use crate::error::AppError;

pub use item::ItemStore;
pub use review::ReviewStore;

/// Parse a caller-supplied identifier, rejecting malformed ones up front.
fn parse_id(raw: &str, kind: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidArgument(format!("Invalid {kind} id")))
}

fn current_year() -> i32 {
    Utc::now().year()
}
