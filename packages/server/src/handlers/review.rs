use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::review::*;
use crate::state::AppState;

fn listing(data: Vec<ReviewView>) -> Json<ReviewListResponse> {
    Json(ReviewListResponse {
        count: data.len(),
        data,
    })
}

#[utoipa::path(
    get,
    path = "/api/reviews",
    tag = "Reviews",
    operation_id = "listReviews",
    summary = "List all reviews",
    description = "Every review, newest first, each with a projection of its item (`null` if the item was deleted).",
    responses(
        (status = 200, description = "All reviews", body = ReviewListResponse),
        (status = 503, description = "Storage unavailable (UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_reviews(
    State(state): State<AppState>,
) -> Result<Json<ReviewListResponse>, AppError> {
    Ok(listing(state.reviews.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/reviews/item/{item_id}",
    tag = "Reviews",
    operation_id = "listReviewsByItem",
    summary = "List the reviews of one item",
    description = "Newest first. An item with no reviews, or one that does not exist, yields an empty list.",
    params(("item_id" = String, Path, description = "24-character hex item ID")),
    responses(
        (status = 200, description = "Reviews of the item", body = ReviewListResponse),
        (status = 400, description = "Malformed ID (INVALID_ARGUMENT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_reviews_by_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<Json<ReviewListResponse>, AppError> {
    Ok(listing(state.reviews.list_by_item(&item_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/reviews",
    tag = "Reviews",
    operation_id = "createReview",
    summary = "Review an item",
    description = "The referenced item must exist. `hoursPlayed` defaults to 0, `difficulty` to `Normal` and `wouldRecommend` to true.",
    request_body = ReviewFields,
    responses(
        (status = 201, description = "Review created", body = ReviewView),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Item does not exist (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(item_id = ?payload.item_id))]
pub async fn create_review(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ReviewFields>,
) -> Result<impl IntoResponse, AppError> {
    let view = state.reviews.create(payload).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

#[utoipa::path(
    get,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    operation_id = "getReview",
    summary = "Get a review by ID",
    params(("id" = String, Path, description = "24-character hex review ID")),
    responses(
        (status = 200, description = "Review with its item projection", body = ReviewView),
        (status = 400, description = "Malformed ID (INVALID_ARGUMENT)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReviewView>, AppError> {
    Ok(Json(state.reviews.get_by_id(&id).await?))
}

#[utoipa::path(
    put,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    operation_id = "updateReview",
    summary = "Update a review",
    description = "Merges the supplied fields over the stored review and re-validates the result. The reviewed item cannot be changed.",
    params(("id" = String, Path, description = "24-character hex review ID")),
    request_body = ReviewPatch,
    responses(
        (status = 200, description = "Review updated", body = ReviewView),
        (status = 400, description = "Malformed ID or validation error", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ReviewPatch>,
) -> Result<Json<ReviewView>, AppError> {
    Ok(Json(state.reviews.update(&id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Reviews",
    operation_id = "deleteReview",
    summary = "Delete a review",
    params(("id" = String, Path, description = "24-character hex review ID")),
    responses(
        (status = 200, description = "Removed review", body = Review),
        (status = 400, description = "Malformed ID (INVALID_ARGUMENT)", body = ErrorBody),
        (status = 404, description = "Review not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Review>, AppError> {
    Ok(Json(state.reviews.delete(&id).await?))
}
