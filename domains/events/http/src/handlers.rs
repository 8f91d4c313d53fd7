use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use common_errors::AppError;
use domain::preflight;
use events_commands::{RecordEventCommand, RecordEventHandler};
use events_dao::{EventDao, SharedEventDao};
use events_errors::EventError;
use events_queries::{ListEventsQuery, ListEventsQueryHandler};
use events_responses::{ListEventsResponse, RecordEventResponse};
use sql_connection::SqlConnect;
use tracing::{info, instrument, warn};

pub const INVALID_EVENT_DATA: &str = "Invalid event data";
pub const FAILED_TO_PROCESS_EVENT: &str = "Failed to process event";
pub const FAILED_TO_RETRIEVE_EVENTS: &str = "Failed to retrieve events";

#[derive(Clone)]
pub struct EventServices {
    pub record_event: RecordEventHandler,
    pub list_events: ListEventsQueryHandler,
}

impl EventServices {
    pub fn new(event_dao: SharedEventDao) -> Self {
        Self {
            record_event: RecordEventHandler::new(event_dao.clone()),
            list_events: ListEventsQueryHandler::new(event_dao),
        }
    }

    /// Services backed by the PostgreSQL event store.
    pub fn postgres(db: SqlConnect) -> Self {
        Self::new(Arc::new(EventDao::new(db)))
    }
}

pub struct EventHandlers;

impl EventHandlers {
    pub fn routes() -> Router<EventServices> {
        Router::new().route(
            "/events",
            get(list_events).post(record_event).options(events_preflight),
        )
    }
}

fn record_error(err: EventError) -> AppError {
    match err {
        EventError::InvalidEvent(reason) => {
            warn!(reason, "rejected event");
            AppError::bad_request(INVALID_EVENT_DATA)
        }
        err @ EventError::InvalidTimestamp { .. } => {
            warn!(%err, "rejected event");
            AppError::bad_request_with_details(
                INVALID_EVENT_DATA,
                &err.to_string(),
            )
        }
        err => AppError::internal_server_error_with_details(
            FAILED_TO_PROCESS_EVENT,
            &err.to_string(),
        ),
    }
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = RecordEventCommand,
    responses(
        (status = 200, description = "Event recorded", body = RecordEventResponse),
        (status = 400, description = "Missing type or visitor, or malformed body", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Event store failure", body = common_errors::ApiErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip_all)]
pub async fn record_event(
    State(services): State<EventServices>,
    body: Bytes,
) -> Result<Json<RecordEventResponse>, AppError> {
    // Decoded regardless of Content-Type.
    let command: RecordEventCommand =
        serde_json::from_slice(&body).map_err(|err| {
            warn!(%err, "unreadable event body");
            AppError::bad_request_with_details(
                INVALID_EVENT_DATA,
                &err.to_string(),
            )
        })?;

    info!(
        event_type = command.event_type.as_deref().unwrap_or_default(),
        visitor = command.visitor.as_deref().unwrap_or_default(),
        "Received analytics event"
    );

    services
        .record_event
        .execute(command)
        .await
        .map_err(record_error)?;
    Ok(Json(RecordEventResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "Up to 50 matching events, newest first", body = ListEventsResponse),
        (status = 500, description = "Event store failure; body still carries an empty events array", body = common_errors::ApiErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip_all)]
pub async fn list_events(
    State(services): State<EventServices>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, AppError> {
    let events = services.list_events.execute(query).await.map_err(|err| {
        AppError::internal_server_error_with_details(
            FAILED_TO_RETRIEVE_EVENTS,
            &err.to_string(),
        )
        .with_empty_events()
    })?;
    Ok(Json(ListEventsResponse { events }))
}

#[utoipa::path(
    options,
    path = "/events",
    responses(
        (status = 204, description = "Cross-origin preflight")
    ),
    tag = "events"
)]
pub async fn events_preflight() -> StatusCode {
    preflight().await
}
