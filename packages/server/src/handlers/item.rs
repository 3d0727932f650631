use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::item::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/items",
    tag = "Items",
    operation_id = "listItems",
    summary = "List tracked titles",
    description = "Returns every item matching the optional filters, newest first. `genre` and `platform` match exactly; `completed` keeps completed items only when it is the literal `true`; `search` is a case-insensitive substring of the title or developer. Empty filter values are ignored.",
    params(ItemListQuery),
    responses(
        (status = 200, description = "Matching items", body = ItemListResponse),
        (status = 503, description = "Storage unavailable (UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> Result<Json<ItemListResponse>, AppError> {
    let data = state.items.list(&ItemFilters::from(query)).await?;
    Ok(Json(ItemListResponse {
        count: data.len(),
        data,
    }))
}

#[utoipa::path(
    post,
    path = "/api/items",
    tag = "Items",
    operation_id = "createItem",
    summary = "Track a new title",
    description = "Validates and stores a new item. Titles are unique ignoring case.",
    request_body = ItemFields,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Title already tracked (CONFLICT)", body = ErrorBody),
        (status = 503, description = "Storage unavailable (UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = ?payload.title))]
pub async fn create_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ItemFields>,
) -> Result<impl IntoResponse, AppError> {
    let item = state.items.create(payload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "Items",
    operation_id = "getItem",
    summary = "Get an item by ID",
    params(("id" = String, Path, description = "24-character hex item ID")),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 400, description = "Malformed ID (INVALID_ARGUMENT)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.items.get_by_id(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "Items",
    operation_id = "updateItem",
    summary = "Update an item",
    description = "Merges the supplied fields over the stored item and re-validates the result. `releaseYear`, `developer` and `description` accept `null` to clear them.",
    params(("id" = String, Path, description = "24-character hex item ID")),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Malformed ID or validation error", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Title already tracked (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ItemPatch>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.items.update(&id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "Items",
    operation_id = "deleteItem",
    summary = "Delete an item",
    description = "Removes the item and returns it. Its reviews are kept and report a null item afterwards.",
    params(("id" = String, Path, description = "24-character hex item ID")),
    responses(
        (status = 200, description = "Removed item", body = Item),
        (status = 400, description = "Malformed ID (INVALID_ARGUMENT)", body = ErrorBody),
        (status = 404, description = "Item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError> {
    Ok(Json(state.items.delete(&id).await?))
}
