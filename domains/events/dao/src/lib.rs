pub mod events;
pub mod schema;

use std::sync::Arc;

use database_traits::dao::GenericDao;
use events_errors::EventError;
use events_models::{Event, EventFilter, NewEvent};
use events_responses::EventResponse;
pub use events::EventDao;

/// Any store that can back the ingestion service.
pub type SharedEventDao = Arc<
    dyn GenericDao<
            CreateRequest = NewEvent,
            Error = EventError,
            Filter = EventFilter,
            Model = Event,
            Response = EventResponse,
        >,
>;
