use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Database error: {0}")]
    Database(#[from] sql_connection::PgError),
    #[error("Connection error: {0}")]
    Connection(#[from] sql_connection::PoolError),
    #[error("Invalid event data: {0}")]
    InvalidEvent(&'static str),
    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}

impl EventError {
    /// Malformed input as opposed to a store failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidEvent(_) | Self::InvalidTimestamp { .. })
    }
}
