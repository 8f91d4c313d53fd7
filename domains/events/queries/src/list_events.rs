use events_dao::SharedEventDao;
use events_errors::EventError;
use events_models::EventFilter;
use events_responses::EventResponse;
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::IntoParams;

/// Query string of `GET /events`. Empty values are treated as absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    /// Substring matched anywhere in the stored metadata
    #[serde(rename = "tagId")]
    pub tag_id: Option<String>,
    /// Exact event type
    #[serde(rename = "eventType")]
    pub event_type: Option<String>,
}

impl From<ListEventsQuery> for EventFilter {
    fn from(query: ListEventsQuery) -> Self {
        EventFilter::new(query.tag_id, query.event_type)
    }
}

#[derive(Clone)]
pub struct ListEventsQueryHandler {
    event_dao: SharedEventDao,
}

impl ListEventsQueryHandler {
    pub fn new(event_dao: SharedEventDao) -> Self { Self { event_dao } }

    /// Up to fifty matching events, newest first.
    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: ListEventsQuery,
    ) -> Result<Vec<EventResponse>, EventError> {
        let events = self.event_dao.find_with_filters(query.into()).await?;
        info!("Found {} events", events.len());
        Ok(events)
    }
}
