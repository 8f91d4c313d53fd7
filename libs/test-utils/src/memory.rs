use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use database_traits::dao::GenericDao;
use events_errors::EventError;
use events_models::{Event, EventFilter, NewEvent};
use events_responses::EventResponse;

/// Process-local event store with the same ordering and filtering rules as
/// the PostgreSQL DAO. Used by HTTP and handler tests that should not need
/// Docker.
#[derive(Default)]
pub struct InMemoryEventDao {
    rows: Mutex<Vec<Event>>,
    failing: AtomicBool,
}

impl InMemoryEventDao {
    pub fn new() -> Self { Self::default() }

    /// A store whose every call fails like a dropped connection pool.
    pub fn failing() -> Self {
        let dao = Self::default();
        dao.set_failing(true);
        dao
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize { self.rows().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Snapshot of stored rows in insertion order.
    pub fn rows(&self) -> Vec<Event> {
        self.rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default()
    }

    fn check(&self) -> Result<(), EventError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EventError::Connection(
                sql_connection::PoolError::Closed,
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl GenericDao for InMemoryEventDao {
    type CreateRequest = NewEvent;
    type Error = EventError;
    type Filter = EventFilter;
    type Model = Event;
    type Response = EventResponse;

    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        self.check()?;
        let event = req.into_event(Utc::now());
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(event.clone());
        }
        Ok(event.into())
    }

    async fn find_with_filters(
        &self, filter: Self::Filter,
    ) -> Result<Vec<Self::Response>, Self::Error> {
        self.check()?;
        let rows = self.rows();

        // Newest first; rows sharing a timestamp keep reverse insertion order.
        let mut matched: Vec<(usize, Event)> = rows
            .into_iter()
            .enumerate()
            .filter(|(_, event)| filter.matches(event))
            .collect();
        matched.sort_by(|(ia, a), (ib, b)| {
            b.timestamp.cmp(&a.timestamp).then(ib.cmp(ia))
        });

        let limit = usize::try_from(filter.limit.max(0)).unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .take(limit)
            .map(|(_, event)| event.into())
            .collect())
    }
}
