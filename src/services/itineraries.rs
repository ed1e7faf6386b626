//! Itinerary generation and archiving flow.

use sea_orm::ConnectionTrait;
use tracing::{info, warn};

use crate::domain::TripRequest;
use crate::errors::domain::DomainError;
use crate::inference::InferenceClient;
use crate::repos::itineraries::{self, Itinerary};

pub const DEFAULT_HISTORY_LIMIT: u64 = 5;

const ERROR_MARKER: &str = "Inference error";

/// The fixed natural-language template submitted to the model. Interests are
/// joined with commas; their order carries no meaning.
pub fn build_prompt(req: &TripRequest) -> String {
    format!(
        "Create a detailed day-by-day travel itinerary from {} to {}\n\
         between {} and {}.\n\n\
         Interests: {}\n\
         Pace: {}\n\n\
         Provide structured itinerary output.",
        req.origin,
        req.destination,
        req.start_date,
        req.end_date,
        req.interests.join(", "),
        req.pace,
    )
}

/// Generate itinerary text for a trip brief.
///
/// A failed inference call does not fail the operation: the failure detail is
/// returned as itinerary text, prefixed with an error marker, and the caller
/// treats it like any other itinerary. Deliberate behavior, kept as specified.
pub async fn generate(client: &dyn InferenceClient, req: &TripRequest) -> String {
    let prompt = build_prompt(req);
    match client.chat(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("itinerary generation failed: {e}");
            format!("{ERROR_MARKER}: {e}")
        }
    }
}

/// Generate and archive in one step. The append happens unconditionally,
/// even when generation produced error text; only a storage failure
/// propagates.
pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    client: &dyn InferenceClient,
    owner_id: &str,
    req: &TripRequest,
) -> Result<String, DomainError> {
    let text = generate(client, req).await;
    itineraries::append(conn, owner_id, &text).await?;
    info!(owner_id, "itinerary archived");
    Ok(text)
}

/// The owner's most recent itineraries, newest first.
pub async fn history<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_id: &str,
    limit: u64,
) -> Result<Vec<Itinerary>, DomainError> {
    itineraries::list_recent(conn, owner_id, limit).await
}
