use sql_connection::SqlConnect;
use tracing::{info, instrument};

use events_errors::EventError;

pub const CREATE_EVENTS_SQL: &str = include_str!("../sql/001_create_events.sql");

/// Creates the `events` table and its index when missing. Safe to run on
/// every startup.
#[instrument(skip_all)]
pub async fn ensure_schema(db: &SqlConnect) -> Result<(), EventError> {
    let client = db.get_client().await?;
    client.batch_execute(CREATE_EVENTS_SQL).await?;
    info!("events schema ready");
    Ok(())
}
