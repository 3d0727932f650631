use chrono::{DateTime, Utc};
use common::ObjectId;
use common::storage::{Document, FieldValue, ID_FIELD};
use serde::{Deserialize, Serialize};

use super::item::ItemSummary;
use super::shared::{labeled_enum, non_blank};

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;
pub const MIN_TEXT_CHARS: usize = 10;
pub const MAX_TEXT_CHARS: usize = 2000;

/// Filterable field names.
pub mod fields {
    pub const ITEM_ID: &str = "item_id";
}

labeled_enum! {
    /// How hard the reviewer found the title.
    Difficulty, "Difficulty" {
        Easy => "Easy",
        Normal => "Normal",
        Hard => "Hard",
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[schema(value_type = String)]
    pub id: ObjectId,
    #[schema(value_type = String)]
    pub item_id: ObjectId,
    #[schema(example = 5)]
    pub score: i32,
    pub text: String,
    pub hours_played: f64,
    #[schema(value_type = String, example = "Normal")]
    pub difficulty: Difficulty,
    pub would_recommend: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn from_values(
        id: ObjectId,
        item_id: ObjectId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        values: ReviewValues,
    ) -> Self {
        Self {
            id,
            item_id,
            score: values.score,
            text: values.text,
            hours_played: values.hours_played,
            difficulty: values.difficulty,
            would_recommend: values.would_recommend,
            created_at,
            updated_at,
        }
    }
}

impl Document for Review {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            ID_FIELD => Some(FieldValue::Id(self.id)),
            fields::ITEM_ID => Some(FieldValue::Id(self.item_id)),
            _ => None,
        }
    }
}

/// A review together with the projection of its parent item.
///
/// `item` is `null` once the parent has been deleted.
#[derive(Clone, Debug, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub item: Option<ItemSummary>,
}

/// Candidate field set for a review, as supplied by a caller.
#[derive(Clone, Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFields {
    #[schema(example = "65a1f0c2b3d4e5f60718293a")]
    pub item_id: Option<String>,
    #[schema(example = 5)]
    pub score: Option<i32>,
    #[schema(example = "Loved it, ten hours in.")]
    pub text: Option<String>,
    pub hours_played: Option<f64>,
    #[schema(example = "Normal")]
    pub difficulty: Option<String>,
    pub would_recommend: Option<bool>,
}

impl From<&Review> for ReviewFields {
    fn from(review: &Review) -> Self {
        Self {
            item_id: Some(review.item_id.to_hex()),
            score: Some(review.score),
            text: Some(review.text.clone()),
            hours_played: Some(review.hours_played),
            difficulty: Some(review.difficulty.as_str().into()),
            would_recommend: Some(review.would_recommend),
        }
    }
}

/// Partial update of a review. The parent item cannot be changed.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPatch {
    pub score: Option<i32>,
    pub text: Option<String>,
    pub hours_played: Option<f64>,
    pub difficulty: Option<String>,
    pub would_recommend: Option<bool>,
}

impl ReviewPatch {
    pub fn merge_into(self, existing: &Review) -> ReviewFields {
        let mut merged = ReviewFields::from(existing);
        if let Some(score) = self.score {
            merged.score = Some(score);
        }
        if let Some(text) = self.text {
            merged.text = Some(text);
        }
        if let Some(hours) = self.hours_played {
            merged.hours_played = Some(hours);
        }
        if let Some(difficulty) = self.difficulty {
            merged.difficulty = Some(difficulty);
        }
        if let Some(recommend) = self.would_recommend {
            merged.would_recommend = Some(recommend);
        }
        merged
    }
}

/// Validated review values. The parent reference is checked separately.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewValues {
    pub score: i32,
    pub text: String,
    pub hours_played: f64,
    pub difficulty: Difficulty,
    pub would_recommend: bool,
}

/// Check every review rule, collecting one message per violation.
pub fn validate_review(fields: &ReviewFields) -> Result<ReviewValues, Vec<String>> {
    let mut errors = Vec::new();

    match fields.score {
        None => errors.push("Score is required".to_string()),
        Some(s) if s < MIN_SCORE => errors.push(format!("Score must be at least {MIN_SCORE}")),
        Some(s) if s > MAX_SCORE => errors.push(format!("Score must be at most {MAX_SCORE}")),
        Some(_) => {}
    }

    match fields.text.as_deref() {
        None => errors.push("Review text is required".to_string()),
        Some(text) => {
            let len = text.chars().count();
            if len < MIN_TEXT_CHARS {
                errors.push(format!(
                    "Review text must be at least {MIN_TEXT_CHARS} characters"
                ));
            } else if len > MAX_TEXT_CHARS {
                errors.push(format!(
                    "Review text cannot exceed {MAX_TEXT_CHARS} characters"
                ));
            }
        }
    }

    let hours_played = fields.hours_played.unwrap_or(0.0);
    if !hours_played.is_finite() || hours_played < 0.0 {
        errors.push("Hours played cannot be negative".to_string());
    }

    let difficulty = match non_blank(fields.difficulty.as_deref()) {
        None => Some(Difficulty::default()),
        Some(raw) => raw.parse::<Difficulty>().map_err(|e| errors.push(e)).ok(),
    };

    match (fields.score, fields.text.clone(), difficulty) {
        (Some(score), Some(text), Some(difficulty)) if errors.is_empty() => Ok(ReviewValues {
            score,
            text,
            hours_played,
            difficulty,
            would_recommend: fields.would_recommend.unwrap_or(true),
        }),
        _ => Err(errors),
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ReviewListResponse {
    pub count: usize,
    pub data: Vec<ReviewView>,
}
