use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::{info, warn};

use crate::entity::review;

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    opt.max_connections(20)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(60))
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("gametracker_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Create the indexes the entity definitions cannot express.
///
/// The title index is the backstop for case-insensitive title uniqueness and
/// must exist, so its failure is returned. The review index only speeds up
/// per-item listings.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_item_title_lower ON item (LOWER(title))",
    )
    .await?;
    info!("Ensured index idx_item_title_lower exists");

    // SELECT * FROM review WHERE item_id = ? ORDER BY created_at DESC
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_review_item_created")
        .table(review::Entity)
        .col(review::Column::ItemId)
        .col(review::Column::CreatedAt)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_review_item_created exists"),
        Err(e) => warn!("Failed to create index idx_review_item_created: {}", e),
    }

    Ok(())
}
