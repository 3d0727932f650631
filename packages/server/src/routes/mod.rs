use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::{item, review, root};
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(root::welcome))
        .merge(item_routes())
        .merge(review_routes())
}

fn item_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(item::list_items, item::create_item))
        .routes(routes!(item::get_item, item::update_item, item::delete_item))
}

fn review_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(review::list_reviews, review::create_review))
        .routes(routes!(review::list_reviews_by_item))
        .routes(routes!(
            review::get_review,
            review::update_review,
            review::delete_review
        ))
}
