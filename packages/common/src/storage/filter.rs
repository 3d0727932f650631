use crate::id::ObjectId;

use super::traits::Document;

/// Field name every document exposes its identifier under.
pub const ID_FIELD: &str = "id";

/// A scalar field value as seen by filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    Id(ObjectId),
}

/// Query tree evaluated by a [`Collection`](super::Collection) backend.
///
/// Field names are the snake_case names a document reports through
/// [`Document::field`]; SQL backends resolve them to columns of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Exact equality.
    Eq(&'static str, FieldValue),
    /// Text equality ignoring case.
    EqIgnoreCase(&'static str, String),
    /// Case-insensitive literal substring match. Absent fields never match.
    ContainsIgnoreCase(&'static str, String),
    /// Every clause must match. An empty list matches everything.
    And(Vec<Filter>),
    /// At least one clause must match.
    Or(Vec<Filter>),
}

/// Ordering applied to `find` results: creation time, then id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl Filter {
    pub fn by_id(id: ObjectId) -> Self {
        Filter::Eq(ID_FIELD, FieldValue::Id(id))
    }

    /// Evaluate the filter against an in-memory document.
    pub fn matches<D: Document>(&self, doc: &D) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, expected) => doc.field(field).as_ref() == Some(expected),
            Filter::EqIgnoreCase(field, expected) => match doc.field(field) {
                Some(FieldValue::Text(actual)) => actual.to_lowercase() == expected.to_lowercase(),
                _ => false,
            },
            Filter::ContainsIgnoreCase(field, needle) => match doc.field(field) {
                Some(FieldValue::Text(actual)) => {
                    actual.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Filter::And(clauses) => clauses.iter().all(|c| c.matches(doc)),
            Filter::Or(clauses) => clauses.iter().any(|c| c.matches(doc)),
        }
    }
}
