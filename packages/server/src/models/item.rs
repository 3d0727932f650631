use chrono::{DateTime, Utc};
use common::ObjectId;
use common::storage::{Document, FieldValue, Filter, ID_FIELD};
use serde::{Deserialize, Serialize};

use super::shared::{double_option, labeled_enum, non_blank};

/// Cover image stored when none is supplied.
pub const DEFAULT_COVER_IMAGE_URL: &str = "https://via.placeholder.com/300x400?text=No+Cover";
pub const MIN_RELEASE_YEAR: i32 = 1970;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

/// Filterable field names.
pub mod fields {
    pub const TITLE: &str = "title";
    pub const GENRE: &str = "genre";
    pub const PLATFORM: &str = "platform";
    pub const DEVELOPER: &str = "developer";
    pub const COMPLETED: &str = "completed";
}

labeled_enum! {
    /// Genre of a tracked title.
    Genre, "Genre" {
        Action => "Action",
        Rpg => "RPG",
        Adventure => "Adventure",
        Sports => "Sports",
        Strategy => "Strategy",
        Puzzle => "Puzzle",
        Simulation => "Simulation",
        Horror => "Horror",
        Racing => "Racing",
        Platformer => "Platformer",
        Shooter => "Shooter",
        Other => "Other",
    }
}

labeled_enum! {
    /// Platform a title is played on.
    Platform, "Platform" {
        Pc => "PC",
        PlayStation4 => "PlayStation 4",
        PlayStation5 => "PlayStation 5",
        XboxOne => "Xbox One",
        XboxSeries => "Xbox Series X/S",
        NintendoSwitch => "Nintendo Switch",
        Mobile => "Mobile",
        Other => "Other",
    }
}

/// A tracked title as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[schema(value_type = String, example = "65a1f0c2b3d4e5f60718293a")]
    pub id: ObjectId,
    #[schema(example = "Hollow Knight")]
    pub title: String,
    #[schema(value_type = String, example = "Platformer")]
    pub genre: Genre,
    #[schema(value_type = String, example = "PC")]
    pub platform: Platform,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    pub cover_image_url: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn from_values(id: ObjectId, created_at: DateTime<Utc>, values: ItemValues) -> Self {
        Self {
            id,
            title: values.title,
            genre: values.genre,
            platform: values.platform,
            release_year: values.release_year,
            developer: values.developer,
            cover_image_url: values.cover_image_url,
            description: values.description,
            completed: values.completed,
            created_at,
        }
    }
}

impl Document for Item {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            ID_FIELD => Some(FieldValue::Id(self.id)),
            fields::TITLE => Some(FieldValue::Text(self.title.clone())),
            fields::GENRE => Some(FieldValue::Text(self.genre.as_str().into())),
            fields::PLATFORM => Some(FieldValue::Text(self.platform.as_str().into())),
            fields::DEVELOPER => self.developer.clone().map(FieldValue::Text),
            fields::COMPLETED => Some(FieldValue::Bool(self.completed)),
            _ => None,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.title.to_lowercase())
    }
}

/// Candidate field set for an item, as supplied by a caller.
#[derive(Clone, Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemFields {
    #[schema(example = "Hollow Knight")]
    pub title: Option<String>,
    #[schema(example = "Platformer")]
    pub genre: Option<String>,
    #[schema(example = "PC")]
    pub platform: Option<String>,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl From<&Item> for ItemFields {
    fn from(item: &Item) -> Self {
        Self {
            title: Some(item.title.clone()),
            genre: Some(item.genre.as_str().into()),
            platform: Some(item.platform.as_str().into()),
            release_year: item.release_year,
            developer: item.developer.clone(),
            cover_image_url: Some(item.cover_image_url.clone()),
            description: item.description.clone(),
            completed: Some(item.completed),
        }
    }
}

/// Partial update of an item. Nullable fields accept `null` to clear them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub release_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub developer: Option<Option<String>>,
    pub cover_image_url: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl ItemPatch {
    /// Overlay the patch on an existing item, producing the merged candidate.
    pub fn merge_into(self, existing: &Item) -> ItemFields {
        let mut merged = ItemFields::from(existing);
        if let Some(title) = self.title {
            merged.title = Some(title);
        }
        if let Some(genre) = self.genre {
            merged.genre = Some(genre);
        }
        if let Some(platform) = self.platform {
            merged.platform = Some(platform);
        }
        if let Some(year) = self.release_year {
            merged.release_year = year;
        }
        if let Some(developer) = self.developer {
            merged.developer = developer;
        }
        if let Some(url) = self.cover_image_url {
            merged.cover_image_url = Some(url);
        }
        if let Some(description) = self.description {
            merged.description = description;
        }
        if let Some(completed) = self.completed {
            merged.completed = Some(completed);
        }
        merged
    }
}

/// Validated, normalised item values.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemValues {
    pub title: String,
    pub genre: Genre,
    pub platform: Platform,
    pub release_year: Option<i32>,
    pub developer: Option<String>,
    pub cover_image_url: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Check every item rule, collecting one message per violation.
pub fn validate_item(fields: &ItemFields, current_year: i32) -> Result<ItemValues, Vec<String>> {
    let mut errors = Vec::new();

    let title = non_blank(fields.title.as_deref()).map(str::to_string);
    if title.is_none() {
        errors.push("Title is required".to_string());
    }

    let genre = match non_blank(fields.genre.as_deref()) {
        None => {
            errors.push("Genre is required".to_string());
            None
        }
        Some(raw) => raw.parse::<Genre>().map_err(|e| errors.push(e)).ok(),
    };

    let platform = match non_blank(fields.platform.as_deref()) {
        None => {
            errors.push("Platform is required".to_string());
            None
        }
        Some(raw) => raw.parse::<Platform>().map_err(|e| errors.push(e)).ok(),
    };

    if let Some(year) = fields.release_year {
        if year < MIN_RELEASE_YEAR {
            errors.push(format!("Release year must be {MIN_RELEASE_YEAR} or later"));
        } else if year > current_year {
            errors.push("Release year cannot be in the future".to_string());
        }
    }

    if let Some(ref description) = fields.description
        && description.chars().count() > MAX_DESCRIPTION_CHARS
    {
        errors.push(format!(
            "Description cannot exceed {MAX_DESCRIPTION_CHARS} characters"
        ));
    }

    match (title, genre, platform) {
        (Some(title), Some(genre), Some(platform)) if errors.is_empty() => Ok(ItemValues {
            title,
            genre,
            platform,
            release_year: fields.release_year,
            developer: non_blank(fields.developer.as_deref()).map(str::to_string),
            cover_image_url: non_blank(fields.cover_image_url.as_deref())
                .unwrap_or(DEFAULT_COVER_IMAGE_URL)
                .to_string(),
            description: fields.description.clone(),
            completed: fields.completed.unwrap_or(false),
        }),
        _ => Err(errors),
    }
}

/// Constraints accepted by the item listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemFilters {
    pub genre: Option<String>,
    pub platform: Option<String>,
    pub completed: Option<bool>,
    pub search: Option<String>,
}

impl ItemFilters {
    /// Build the storage filter: keys AND together, `search` ORs title and developer.
    pub fn to_filter(&self) -> Filter {
        let mut clauses = Vec::new();

        if let Some(genre) = self.genre.as_deref().filter(|g| !g.is_empty()) {
            clauses.push(Filter::Eq(fields::GENRE, FieldValue::Text(genre.into())));
        }
        if let Some(platform) = self.platform.as_deref().filter(|p| !p.is_empty()) {
            clauses.push(Filter::Eq(fields::PLATFORM, FieldValue::Text(platform.into())));
        }
        if let Some(completed) = self.completed {
            clauses.push(Filter::Eq(fields::COMPLETED, FieldValue::Bool(completed)));
        }
        if let Some(term) = non_blank(self.search.as_deref()) {
            clauses.push(Filter::Or(vec![
                Filter::ContainsIgnoreCase(fields::TITLE, term.into()),
                Filter::ContainsIgnoreCase(fields::DEVELOPER, term.into()),
            ]));
        }

        Filter::And(clauses)
    }
}

/// Query string of `GET /api/items`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ItemListQuery {
    /// Exact genre label.
    pub genre: Option<String>,
    /// Exact platform label.
    pub platform: Option<String>,
    /// `true` keeps completed items; any other value keeps the rest.
    pub completed: Option<String>,
    /// Case-insensitive substring of the title or developer.
    pub search: Option<String>,
}

impl From<ItemListQuery> for ItemFilters {
    fn from(q: ItemListQuery) -> Self {
        Self {
            genre: q.genre,
            platform: q.platform,
            completed: q.completed.map(|v| v == "true"),
            search: q.search,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ItemListResponse {
    pub count: usize,
    pub data: Vec<Item>,
}

/// Read-only projection of an item attached to reviews.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    #[schema(value_type = String)]
    pub item_id: ObjectId,
    pub title: String,
    pub cover_image_url: String,
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            item_id: item.id,
            title: item.title.clone(),
            cover_image_url: item.cover_image_url.clone(),
        }
    }
}
