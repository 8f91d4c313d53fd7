use axum::{
    Router,
    extract::Query,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use domain::preflight;
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::IntoParams;

/// Tracking runtime served to customer pages.
pub const TAG_SCRIPT: &str = include_str!("../assets/tag.js");
pub const TAG_SCRIPT_CONTENT_TYPE: &str = "application/javascript";
pub const TAG_SCRIPT_CACHE_CONTROL: &str = "public, max-age=3600";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TagScriptQuery {
    /// Tag identifier of the embedding site. Logged only; the body never varies.
    pub id: Option<String>,
}

pub struct TagHandlers;

impl TagHandlers {
    pub fn routes<S>() -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        Router::new().route("/tag-script", get(get_tag_script).options(tag_preflight))
    }
}

#[utoipa::path(
    get,
    path = "/tag-script",
    params(TagScriptQuery),
    responses(
        (status = 200, description = "Tracking runtime source", content_type = "application/javascript", body = String)
    ),
    tag = "tag"
)]
#[instrument(skip_all)]
pub async fn get_tag_script(Query(query): Query<TagScriptQuery>) -> Response {
    debug!(tag_id = query.id.as_deref().unwrap_or_default(), "Serving tag script");

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(TAG_SCRIPT_CONTENT_TYPE),
            ),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static(TAG_SCRIPT_CACHE_CONTROL),
            ),
        ],
        TAG_SCRIPT,
    )
        .into_response()
}

#[utoipa::path(
    options,
    path = "/tag-script",
    responses(
        (status = 204, description = "Cross-origin preflight")
    ),
    tag = "tag"
)]
pub async fn tag_preflight() -> StatusCode {
    preflight().await
}
