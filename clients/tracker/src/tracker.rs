use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::{
    context::PageContext,
    dom::{DomEvent, ElementSnapshot, FormSnapshot, InputSnapshot, non_empty},
    mask::mask_email,
    tag_id::{resolve_ingestion_endpoint, resolve_tag_id},
    transport::SharedTransport,
    visitor::VisitorId,
};

const ELEMENT_TEXT_LIMIT: usize = 50;

/// Wire body of `POST /events`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub visitor: String,
    /// Serialized JSON document, always carrying `tagId`.
    pub metadata: String,
    pub timestamp: String,
}

fn now_iso() -> String { Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true) }

/// An active tracking runtime bound to one page load.
pub struct Tracker {
    tag_id: String,
    visitor_id: VisitorId,
    endpoint: String,
    page: PageContext,
    transport: SharedTransport,
}

impl Tracker {
    /// Activates the runtime for `page` and emits `script_initialized`
    /// followed by `page_view`.
    pub fn init(page: PageContext, transport: SharedTransport) -> Self {
        let tag_id = resolve_tag_id(&page);
        let endpoint = resolve_ingestion_endpoint(page.current_script_src.as_deref());
        let tracker = Self {
            tag_id,
            visitor_id: VisitorId::generate(),
            endpoint,
            page,
            transport,
        };

        info!(
            tag_id = %tracker.tag_id,
            endpoint = %tracker.endpoint,
            "Surface tracker initialized"
        );

        tracker.track(
            "script_initialized",
            json!({ "url": tracker.page.url, "timestamp": now_iso() }),
        );
        tracker.track(
            "page_view",
            json!({
                "title": tracker.page.title,
                "url": tracker.page.url,
                "referrer": tracker.page.referrer,
            }),
        );

        tracker
    }

    pub fn tag_id(&self) -> &str { &self.tag_id }

    pub fn visitor_id(&self) -> &VisitorId { &self.visitor_id }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// Sends one event. `metadata` keys are kept, non-object values are
    /// replaced by an empty object, and `tagId` is always set to this
    /// tracker's tag.
    pub fn track(&self, event_type: &str, metadata: Value) {
        let mut fields = match metadata {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.insert("tagId".to_string(), Value::String(self.tag_id.clone()));

        let payload = EventPayload {
            event_type: event_type.to_string(),
            visitor: self.visitor_id.to_string(),
            metadata: Value::Object(fields).to_string(),
            timestamp: now_iso(),
        };

        debug!(event_type, "Dispatching event");
        self.transport.dispatch(&self.endpoint, payload);
    }

    /// Derives and sends the events a DOM interaction produces.
    pub fn observe(&self, event: &DomEvent) {
        match event {
            DomEvent::Click(element) => self.on_click(element),
            DomEvent::Submit(form) => self.on_submit(form),
            DomEvent::Change(input) => self.on_change(input),
        }
    }

    fn on_click(&self, element: &ElementSnapshot) {
        let element_type = element
            .tag_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map_or_else(|| "unknown".to_string(), str::to_lowercase);
        let element_text: String = element
            .text_content
            .as_deref()
            .unwrap_or_default()
            .chars()
            .take(ELEMENT_TEXT_LIMIT)
            .collect();

        self.track(
            "element_click",
            json!({
                "elementType": element_type,
                "elementId": non_empty(&element.id).unwrap_or_default(),
                "elementClass": non_empty(&element.class_name).unwrap_or_default(),
                "elementText": element_text,
                "url": self.page.url,
            }),
        );
    }

    fn on_submit(&self, form: &FormSnapshot) {
        let form_id = non_empty(&form.id).unwrap_or("unknown_form");

        for input in form.inputs.iter().filter(|input| input.is_filled_email()) {
            self.track(
                "email_entered",
                json!({
                    "formId": form_id,
                    "fieldId": non_empty(&input.id).unwrap_or("unknown_field"),
                    "fieldName": non_empty(&input.name).unwrap_or_default(),
                    "maskedEmail": mask_email(&input.value),
                    "url": self.page.url,
                }),
            );
        }

        self.track(
            "form_submit",
            json!({
                "formId": form_id,
                "formAction": non_empty(&form.action).unwrap_or_default(),
                "url": self.page.url,
            }),
        );
    }

    fn on_change(&self, input: &InputSnapshot) {
        if !input.is_filled_email() {
            return;
        }

        let form_id = match &input.form {
            Some(form) => non_empty(&form.id).unwrap_or("unknown_form"),
            None => "no_form",
        };

        self.track(
            "email_entered",
            json!({
                "fieldId": non_empty(&input.id).unwrap_or("unknown_field"),
                "fieldName": non_empty(&input.name).unwrap_or_default(),
                "formId": form_id,
                "maskedEmail": mask_email(&input.value),
                "url": self.page.url,
            }),
        );
    }
}
