use chrono::{DateTime, SecondsFormat, Utc};
use events_models::Event;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire form of a stored event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    #[serde(rename = "type")]
    pub event_type: String,
    pub visitor: String,
    /// Serialized metadata document, returned verbatim
    pub metadata: String,
    /// Event time as RFC 3339 with millisecond precision, e.g.
    /// `2024-05-01T10:00:00.000Z`
    pub timestamp: String,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_type: event.event_type,
            visitor: event.visitor,
            metadata: event.metadata,
            timestamp: format_timestamp(&event.timestamp),
        }
    }
}

pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecordEventResponse {
    pub success: bool,
}

impl RecordEventResponse {
    pub fn ok() -> Self { Self { success: true } }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListEventsResponse {
    pub events: Vec<EventResponse>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_timestamp_normalized_to_millis_utc() {
        let event = Event::builder()
            .event_type("page_view")
            .visitor("0f8e4b1c-2a3d-4e5f-8a9b-0c1d2e3f4a5b")
            .metadata(r#"{"tagId":"SITE-42"}"#)
            .timestamp(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
            .build();

        let response = EventResponse::from(event);
        assert_eq!(response.timestamp, "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_event_type_serialized_as_type() {
        let response = EventResponse {
            event_type: "element_click".to_string(),
            visitor: "v".to_string(),
            metadata: "{}".to_string(),
            timestamp: "2024-05-01T10:00:00.000Z".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["type"], "element_click");
        assert!(json.get("event_type").is_none());
    }
}
