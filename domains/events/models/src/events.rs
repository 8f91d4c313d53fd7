use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Upper bound on rows returned by a single read.
pub const MAX_EVENTS_PER_QUERY: i64 = 50;

/// A stored tracking event.
///
/// `metadata` is the serialized document exactly as the sender produced it;
/// the tag identifier lives inside it rather than in its own column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct Event {
    #[builder(setter(into))]
    pub event_type: String,
    #[builder(setter(into))]
    pub visitor: String,
    #[builder(setter(into))]
    pub metadata: String,
    pub timestamp: DateTime<Utc>,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

/// A validated write request. Construction goes through the record command,
/// which guarantees `event_type` and `visitor` are non-empty.
#[derive(Clone, Debug, PartialEq, Eq, TypedBuilder)]
pub struct NewEvent {
    #[builder(setter(into))]
    pub event_type: String,
    #[builder(setter(into))]
    pub visitor: String,
    #[builder(setter(into), default = String::from("{}"))]
    pub metadata: String,
    #[builder(default = Utc::now())]
    pub timestamp: DateTime<Utc>,
}

impl NewEvent {
    pub fn into_event(self, created_at: DateTime<Utc>) -> Event {
        Event {
            event_type: self.event_type,
            visitor: self.visitor,
            metadata: self.metadata,
            timestamp: self.timestamp,
            created_at,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Literal substring of the metadata text
    pub tag_id: Option<String>,
    /// Exact event type
    pub event_type: Option<String>,
    pub limit: i64,
}

impl EventFilter {
    pub fn new(tag_id: Option<String>, event_type: Option<String>) -> Self {
        Self {
            tag_id: tag_id.filter(|t| !t.is_empty()),
            event_type: event_type.filter(|t| !t.is_empty()),
            limit: MAX_EVENTS_PER_QUERY,
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        let tag_ok = self
            .tag_id
            .as_deref()
            .is_none_or(|tag| event.metadata.contains(tag));
        let type_ok = self
            .event_type
            .as_deref()
            .is_none_or(|t| event.event_type == t);
        tag_ok && type_ok
    }
}
