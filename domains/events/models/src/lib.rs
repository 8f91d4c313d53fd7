pub mod events;

pub use events::{Event, EventFilter, MAX_EVENTS_PER_QUERY, NewEvent};
