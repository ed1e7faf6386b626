//! SeaORM adapter for the itinerary archive.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use time::OffsetDateTime;

use crate::entities::itineraries;
use crate::errors::domain::{DomainError, InfraErrorKind};

fn map_db_err(context: &str, e: sea_orm::DbErr) -> DomainError {
    DomainError::infra(InfraErrorKind::DbUnavailable, format!("{context}: {e}"))
}

/// Insert one itinerary row with `created_at = now (UTC)`.
pub async fn insert<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: &str,
    text: &str,
) -> Result<itineraries::Model, DomainError> {
    let row = itineraries::ActiveModel {
        id: NotSet,
        owner_id: Set(owner_id.to_string()),
        itinerary: Set(text.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };

    row.insert(conn)
        .await
        .map_err(|e| map_db_err("failed to insert itinerary", e))
}

/// Fetch up to `limit` rows for `owner_id`, most recent first.
pub async fn find_recent_by_owner<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: &str,
    limit: u64,
) -> Result<Vec<itineraries::Model>, DomainError> {
    itineraries::Entity::find()
        .filter(itineraries::Column::OwnerId.eq(owner_id))
        .order_by_desc(itineraries::Column::CreatedAt)
        .order_by_desc(itineraries::Column::Id)
        .limit(limit)
        .all(conn)
        .await
        .map_err(|e| map_db_err("failed to query itineraries", e))
}
