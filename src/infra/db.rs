//! Database connection and schema bootstrap.

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use tracing::info;

use crate::entities::itineraries;

/// Connect to the database at `url`.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(url).await
}

/// Create the itineraries table if it does not exist yet.
///
/// The schema is a single append-only table, so create-if-missing at startup
/// replaces a migration pipeline.
pub async fn ensure_schema(conn: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);

    let mut create_table = schema.create_table_from_entity(itineraries::Entity);
    create_table.if_not_exists();

    conn.execute(backend.build(&create_table)).await?;
    info!("itineraries table ready");
    Ok(())
}
