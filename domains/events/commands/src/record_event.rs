use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use events_dao::SharedEventDao;
use events_errors::EventError;
use events_models::NewEvent;
use events_responses::EventResponse;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

/// Body of `POST /events` as sent by the tag script.
///
/// Every field is optional on the wire so that missing values surface as
/// [`EventError::InvalidEvent`] rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RecordEventCommand {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub visitor: Option<String>,
    /// Pre-serialized metadata document
    #[serde(default)]
    pub metadata: Option<String>,
    /// Client event time, ISO-8601
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl RecordEventCommand {
    /// Checks required fields and parses the timestamp. A missing timestamp
    /// falls back to `received_at`.
    pub fn validate(
        self, received_at: DateTime<Utc>,
    ) -> Result<NewEvent, EventError> {
        let event_type = self
            .event_type
            .filter(|t| !t.is_empty())
            .ok_or(EventError::InvalidEvent("type is required"))?;
        let visitor = self
            .visitor
            .filter(|v| !v.is_empty())
            .ok_or(EventError::InvalidEvent("visitor is required"))?;

        let timestamp = match self.timestamp.filter(|t| !t.is_empty()) {
            Some(raw) => parse_timestamp(&raw)?,
            None => received_at,
        };

        Ok(NewEvent::builder()
            .event_type(event_type)
            .visitor(visitor)
            .metadata(self.metadata.unwrap_or_else(|| "{}".to_string()))
            .timestamp(timestamp)
            .build())
    }
}

/// Parses the ISO-8601 shapes browsers and beacon clients send: RFC 3339,
/// a basic `+hhmm` offset, a local date-time without offset (read as UTC)
/// and a bare date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, EventError> {
    let rfc3339 = match DateTime::parse_from_rfc3339(raw) {
        Ok(t) => return Ok(t.with_timezone(&Utc)),
        Err(e) => e,
    };

    if let Ok(t) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(t.with_timezone(&Utc));
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(t.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN).and_utc());
    }

    Err(EventError::InvalidTimestamp {
        value: raw.to_string(),
        reason: rfc3339.to_string(),
    })
}

#[derive(Debug)]
pub struct RecordEventResult {
    pub event: EventResponse,
}

#[derive(Clone)]
pub struct RecordEventHandler {
    event_dao: SharedEventDao,
}

impl RecordEventHandler {
    pub fn new(event_dao: SharedEventDao) -> Self { Self { event_dao } }

    /// Validates and appends one event. No dedup, no retry.
    #[instrument(skip_all)]
    pub async fn execute(
        &self, command: RecordEventCommand,
    ) -> Result<RecordEventResult, EventError> {
        let new_event = command.validate(Utc::now())?;
        debug!(
            event_type = %new_event.event_type,
            visitor = %new_event.visitor,
            "recording event"
        );

        let event = self.event_dao.create(new_event).await?;
        Ok(RecordEventResult { event })
    }
}
