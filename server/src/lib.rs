pub mod config;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use common_errors::AppError;
use domain::with_permissive_cors;
use events_http::{EventHandlers, EventServices};
use sql_connection::SqlConnect;
use tag_http::TagHandlers;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

pub const NOT_FOUND: &str = "Not found";

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        events_http::record_event,
        events_http::list_events,
        events_http::events_preflight,
        tag_http::get_tag_script,
        tag_http::tag_preflight
    ),
    components(
        schemas(
            events_commands::RecordEventCommand,
            events_responses::EventResponse,
            events_responses::RecordEventResponse,
            events_responses::ListEventsResponse,
            common_errors::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Event ingestion and retrieval"),
        (name = "tag", description = "Embeddable tracking script")
    ),
    info(
        title = "Surface Tag API",
        description = "First-party analytics tag and event ingestion",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Builds the full router. `db` only feeds the health report; the event
/// store is whatever `events` was built on.
pub fn app(events: EventServices, db: Option<SqlConnect>) -> Router {
    let health = Router::new()
        .route("/health", get(health_check))
        .with_state(db);

    let app = Router::new()
        .merge(EventHandlers::routes().with_state(events))
        .merge(TagHandlers::routes())
        .merge(health)
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .fallback(not_found);

    with_permissive_cors(app)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError { AppError::not_found(NOT_FOUND) }

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful with connection pool status", body = String)
    ),
    tag = "health"
)]
async fn health_check(State(db): State<Option<SqlConnect>>) -> impl IntoResponse {
    let health_info = match db {
        Some(db) => {
            let (available, size) = db.get_pool_status();
            format!("OK - Pool: {available}/{size} available")
        }
        None => "OK - No database pool attached".to_string(),
    };

    (StatusCode::OK, health_info)
}
