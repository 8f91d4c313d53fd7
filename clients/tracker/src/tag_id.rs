use tracing::warn;
use url::Url;

use crate::context::PageContext;

pub const FALLBACK_TAG_ID: &str = "SURFACE-TAG-12345";
pub const FALLBACK_ORIGIN: &str = "http://localhost:8880";
pub const EVENTS_PATH: &str = "/events";

/// Substrings that identify a script element as the tag itself.
const TAG_SOURCE_MARKERS: [&str; 3] = ["tag-script", "tag.js", "api/analytics"];

fn id_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
}

fn is_tag_source(src: &str) -> bool {
    TAG_SOURCE_MARKERS.iter().any(|marker| src.contains(marker))
}

/// Resolves the tag identifier: the page's own `id` parameter, then the `id`
/// parameter of the first tag script element carrying one, then
/// [`FALLBACK_TAG_ID`].
pub fn resolve_tag_id(page: &PageContext) -> String {
    let page_url = Url::parse(&page.url).ok();

    if let Some(id) = page_url.as_ref().and_then(id_param) {
        return id;
    }

    let base = page_url.and_then(|url| Url::parse(&url.origin().ascii_serialization()).ok());

    for src in page.script_sources.iter().filter(|src| is_tag_source(src)) {
        let parsed = match &base {
            Some(base) => base.join(src),
            None => Url::parse(src),
        };
        match parsed {
            Ok(script_url) => {
                if let Some(id) = id_param(&script_url) {
                    return id;
                }
            }
            Err(err) => warn!(src = %src, error = %err, "Skipping unparseable script source"),
        }
    }

    FALLBACK_TAG_ID.to_string()
}

/// `<origin of the tag script>/events`, or the local default when the
/// script's own source is unknown or has no usable origin.
pub fn resolve_ingestion_endpoint(current_script_src: Option<&str>) -> String {
    let origin = current_script_src
        .filter(|src| !src.is_empty())
        .and_then(|src| match Url::parse(src) {
            Ok(url) => Some(url.origin()),
            Err(err) => {
                warn!(src = %src, error = %err, "Unparseable tag script source");
                None
            }
        })
        .filter(|origin| origin.is_tuple())
        .map(|origin| origin.ascii_serialization())
        .unwrap_or_else(|| FALLBACK_ORIGIN.to_string());

    format!("{origin}{EVENTS_PATH}")
}
