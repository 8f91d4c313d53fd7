use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dao_utils::WhereClause;
use database_traits::dao::GenericDao;
use events_errors::EventError;
use events_models::{Event, EventFilter, NewEvent};
use events_responses::EventResponse;
use sql_connection::SqlConnect;
use tracing::{debug, instrument};

const INSERT_EVENT_SQL: &str = "INSERT INTO events (\"type\", visitor, \
                                metadata, \"timestamp\", created_at) VALUES \
                                ($1, $2, $3, $4, NOW()) RETURNING created_at";

const SELECT_EVENTS_SQL: &str =
    "SELECT \"type\", visitor, metadata, \"timestamp\", created_at FROM events";

#[derive(Clone)]
pub struct EventDao {
    db: SqlConnect,
}

impl EventDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    pub fn db(&self) -> &SqlConnect { &self.db }

    fn log_statement(&self, sql: &str) {
        if self.db.sql_logging() {
            debug!(sql, "executing statement");
        }
    }

    fn map_row_to_model(row: &tokio_postgres::Row) -> Event {
        Event {
            event_type: row.get(0),
            visitor: row.get(1),
            metadata: row.get(2),
            timestamp: row.get(3),
            created_at: row.get(4),
        }
    }
}

#[async_trait]
impl GenericDao for EventDao {
    type CreateRequest = NewEvent;
    type Error = EventError;
    type Filter = EventFilter;
    type Model = Event;
    type Response = EventResponse;

    #[instrument(skip_all, fields(event_type = %req.event_type))]
    async fn create(
        &self, req: Self::CreateRequest,
    ) -> Result<Self::Response, Self::Error> {
        let client = self.db.get_client().await?;
        self.log_statement(INSERT_EVENT_SQL);
        let stmt = client.prepare_cached(INSERT_EVENT_SQL).await?;
        let row = client
            .query_one(
                &stmt,
                &[
                    &req.event_type,
                    &req.visitor,
                    &req.metadata,
                    &req.timestamp,
                ],
            )
            .await?;

        let created_at: DateTime<Utc> = row.get(0);
        Ok(req.into_event(created_at).into())
    }

    #[instrument(skip_all, fields(filter.tag_id = ?filter.tag_id, filter.event_type = ?filter.event_type))]
    async fn find_with_filters(
        &self, filter: Self::Filter,
    ) -> Result<Vec<Self::Response>, Self::Error> {
        let client = self.db.get_client().await?;

        let mut clause = WhereClause::new()
            .contains_opt("metadata", filter.tag_id)
            .eq_opt("\"type\"", filter.event_type);
        let limit = clause.bind(filter.limit);

        let query = format!(
            "{SELECT_EVENTS_SQL}{} ORDER BY \"timestamp\" DESC, id DESC LIMIT {limit}",
            clause.sql()
        );

        self.log_statement(&query);
        let stmt = client.prepare(&query).await?;
        let rows = client.query(&stmt, &clause.params()).await?;
        debug!(rows = rows.len(), "events fetched");

        Ok(rows
            .iter()
            .map(Self::map_row_to_model)
            .map(Into::into)
            .collect())
    }
}
