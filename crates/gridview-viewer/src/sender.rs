//! Outbound data delivery to the simulation server.
//!
//! Sends ride outside the scheduling loop: each payload is POSTed from a
//! detached task, several may overlap with each other and with state
//! fetches, and the acknowledgement is ignored. Failures are logged and
//! otherwise dropped -- delivery must never block or stall rendering.

use gridview_types::ViewIdentity;
use tracing::{debug, warn};

use crate::api::ApiClient;

/// Fire-and-forget sender for per-agent data (e.g. human key input).
#[derive(Debug, Clone)]
pub struct DataSender {
    api: ApiClient,
    identity: ViewIdentity,
}

impl DataSender {
    /// Create a sender scoped to one view identity.
    pub const fn new(api: ApiClient, identity: ViewIdentity) -> Self {
        Self { api, identity }
    }

    /// Queue a JSON payload for delivery to `/send_data/{agent_id}`.
    ///
    /// Returns immediately; the POST happens on a background task. Must be
    /// called from within a Tokio runtime.
    pub fn send(&self, payload: serde_json::Value) {
        let api = self.api.clone();
        let agent_id = self.identity.agent_id().to_owned();
        tokio::spawn(async move {
            match api.send_data(&agent_id, &payload).await {
                Ok(()) => debug!(agent_id = agent_id, "data delivered"),
                Err(e) => warn!(
                    agent_id = agent_id,
                    error = %e,
                    "failed to deliver data"
                ),
            }
        });
    }
}
