use axum::Json;
use axum::http::Uri;
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct Endpoints {
    #[schema(example = "/api/items")]
    pub items: &'static str,
    #[schema(example = "/api/reviews")]
    pub reviews: &'static str,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct Welcome {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Meta",
    operation_id = "welcome",
    summary = "Service banner",
    responses((status = 200, description = "Name, version and entry points", body = Welcome)),
)]
pub async fn welcome() -> Json<Welcome> {
    Json(Welcome {
        message: "Welcome to the GameTracker API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            items: "/api/items",
            reviews: "/api/reviews",
        },
    })
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route matched");
    AppError::NotFound(format!("Route {} not found", uri.path()))
}
