use std::sync::Arc;

use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::{error::TrackerError, tracker::EventPayload};

/// Delivery seam. `dispatch` must return without waiting for the outcome.
pub trait Transport: Send + Sync {
    fn dispatch(&self, endpoint: &str, payload: EventPayload);
}

pub type SharedTransport = Arc<dyn Transport>;

/// Posts each event as JSON on its own Tokio task. Failures are logged and
/// dropped.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    runtime: Handle,
}

impl HttpTransport {
    /// Must be called from inside a Tokio runtime; that runtime carries the
    /// delivery tasks.
    pub fn new() -> Result<Self, TrackerError> {
        let runtime = Handle::try_current()?;
        // No cookie store is configured, so credentials are never sent.
        let client = Client::builder().build()?;
        Ok(Self { client, runtime })
    }
}

impl Transport for HttpTransport {
    fn dispatch(&self, endpoint: &str, payload: EventPayload) {
        let client = self.client.clone();
        let endpoint = endpoint.to_string();

        self.runtime.spawn(async move {
            let outcome = client
                .post(&endpoint)
                .json(&payload)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match outcome {
                Ok(response) => debug!(
                    event_type = %payload.event_type,
                    status = %response.status(),
                    "Event sent"
                ),
                Err(err) => warn!(
                    event_type = %payload.event_type,
                    endpoint = %endpoint,
                    error = %err,
                    "Failed to send event"
                ),
            }
        });
    }
}
