use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use events_models::NewEvent;
use sql_connection::SqlConnect;

use crate::postgres::TestPostgresContainer;

/// Create a SQL connection from a test container for use with DAOs and
/// handlers
pub fn create_sql_connect(container: &TestPostgresContainer) -> SqlConnect {
    SqlConnect::new(container.pool.clone())
}

/// Serialized metadata carrying a tag identifier, as the tracker sends it
pub fn tag_metadata(tag_id: &str) -> String {
    serde_json::json!({ "tagId": tag_id }).to_string()
}

/// Fixed base instant so ordering assertions never depend on the clock
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// `base_time() + offset_secs`
pub fn time_at(offset_secs: i64) -> DateTime<Utc> {
    base_time() + Duration::seconds(offset_secs)
}

/// A new event of `event_type` tagged with `tag_id`, stamped at
/// `time_at(offset_secs)`
pub fn tagged_event(event_type: &str, tag_id: &str, offset_secs: i64) -> NewEvent {
    NewEvent::builder()
        .event_type(event_type)
        .visitor("3b241101-e2bb-4255-8caf-4136c566a962")
        .metadata(tag_metadata(tag_id))
        .timestamp(time_at(offset_secs))
        .build()
}

pub async fn count_events(container: &TestPostgresContainer) -> Result<i64> {
    let client = container.pool.get().await?;
    let row = client.query_one("SELECT COUNT(*) FROM events", &[]).await?;
    Ok(row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_metadata_shape() {
        assert_eq!(tag_metadata("ABC"), r#"{"tagId":"ABC"}"#);
    }

    #[test]
    fn test_time_at_is_monotonic() {
        assert!(time_at(1) > time_at(0));
        assert_eq!(time_at(0), base_time());
    }
}
