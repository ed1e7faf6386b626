//! Itinerary archive functions for the domain layer (generic over ConnectionTrait).
//!
//! The archive is append-only: rows are never updated or deleted here, and
//! every query path is scoped by `owner_id`.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::adapters::itineraries_sea as itineraries_adapter;
use crate::errors::domain::DomainError;

/// Itinerary domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub owner_id: String,
    pub itinerary: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Append a generated itinerary to the owner's archive.
///
/// No idempotency key: identical text appended twice yields two rows.
pub async fn append<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: &str,
    text: &str,
) -> Result<Itinerary, DomainError> {
    let row = itineraries_adapter::insert(conn, owner_id, text).await?;
    Ok(Itinerary::from(row))
}

/// The most recent `limit` itineraries for `owner_id`, strictly descending
/// by creation time. Empty when the owner has no history.
pub async fn list_recent<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: &str,
    limit: u64,
) -> Result<Vec<Itinerary>, DomainError> {
    let rows = itineraries_adapter::find_recent_by_owner(conn, owner_id, limit).await?;
    Ok(rows.into_iter().map(Itinerary::from).collect())
}

impl From<crate::entities::itineraries::Model> for Itinerary {
    fn from(model: crate::entities::itineraries::Model) -> Self {
        Self {
            owner_id: model.owner_id,
            itinerary: model.itinerary,
            created_at: model.created_at,
        }
    }
}
