//! HTTP access to the simulation server API.
//!
//! Three endpoints, all JSON over `reqwest`:
//!
//! - `GET /get_info` -- session handshake
//! - `GET /get_latest_state/['{agent_id}']` -- newest snapshot batch
//! - `POST /send_data/{agent_id}` -- per-agent data delivery
//!
//! The client does not retry here; recovery policy belongs to the
//! scheduling loop, which decides how long to wait before asking again.

use gridview_types::{AgentSnapshot, SessionInfo, StateBatch};

use crate::error::ViewerError;

/// Client for the simulation server's HTTP API.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a server base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Fetch session metadata from `/get_info`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Http`] on transport failure or a non-2xx
    /// status, [`ViewerError::Malformed`] when the body is not a
    /// [`SessionInfo`].
    pub async fn session_info(&self) -> Result<SessionInfo, ViewerError> {
        let url = format!("{}/get_info", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ViewerError::Http(format!("get_info request failed: {e}")))?;

        let response = check_status(response, "get_info").await?;

        response
            .json()
            .await
            .map_err(|e| ViewerError::Malformed(format!("get_info response parse failed: {e}")))
    }

    /// Fetch the newest world-state snapshot for an agent.
    ///
    /// The server answers with an ordered batch of tick records; only the
    /// last record's entry for `agent_id` is returned, even when the batch
    /// holds several ticks.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Http`] on transport failure or a non-2xx
    /// status, [`ViewerError::Malformed`] when the batch shape is wrong or
    /// the newest record has no entry for `agent_id`.
    pub async fn latest_state(&self, agent_id: &str) -> Result<AgentSnapshot, ViewerError> {
        // The server addresses snapshots by a bracketed id list; this
        // client always asks for exactly one id.
        let url = format!("{}/get_latest_state/['{agent_id}']", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ViewerError::Http(format!("get_latest_state request failed: {e}")))?;

        let response = check_status(response, "get_latest_state").await?;

        let batch: StateBatch = response.json().await.map_err(|e| {
            ViewerError::Malformed(format!("get_latest_state response parse failed: {e}"))
        })?;

        extract_latest_snapshot(batch, agent_id)
    }

    /// POST an arbitrary JSON payload to the per-agent data endpoint.
    ///
    /// The acknowledgement body is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Http`] on transport failure or a non-2xx
    /// status.
    pub async fn send_data(
        &self,
        agent_id: &str,
        payload: &serde_json::Value,
    ) -> Result<(), ViewerError> {
        let url = format!("{}/send_data/{agent_id}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| ViewerError::Http(format!("send_data request failed: {e}")))?;

        check_status(response, "send_data").await?;
        Ok(())
    }
}

/// Surface a non-2xx response as an error carrying the server-provided body.
async fn check_status(
    response: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, ViewerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "unable to read error body".to_owned());
    Err(ViewerError::Http(format!(
        "{endpoint} returned {status}: {error_body}"
    )))
}

/// Pull the requested agent's snapshot out of the newest record in a batch.
fn extract_latest_snapshot(
    batch: StateBatch,
    agent_id: &str,
) -> Result<AgentSnapshot, ViewerError> {
    let mut newest = batch
        .into_iter()
        .next_back()
        .ok_or_else(|| ViewerError::Malformed("state batch is empty".to_owned()))?;

    newest.remove(agent_id).ok_or_else(|| {
        ViewerError::Malformed(format!("newest record has no entry for agent {agent_id}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_from_json(json: serde_json::Value) -> StateBatch {
        serde_json::from_value(json).unwrap_or_default()
    }

    #[test]
    fn extract_uses_last_record() {
        let batch = batch_from_json(serde_json::json!([
            {"god": {"state": {"obj": "old"}, "tick": 3}},
            {"god": {"state": {"obj": "mid"}, "tick": 4}},
            {"god": {"state": {"obj": "new"}, "tick": 5}}
        ]));
        let snapshot = extract_latest_snapshot(batch, "god");
        assert!(snapshot.is_ok());
        let snapshot = snapshot.unwrap_or(AgentSnapshot {
            state: gridview_types::WorldState::new(),
            tick: 0,
        });
        assert_eq!(snapshot.tick, 5);
        assert_eq!(
            snapshot.state.get("obj").and_then(serde_json::Value::as_str),
            Some("new")
        );
    }

    #[test]
    fn extract_missing_agent_key_is_malformed() {
        let batch = batch_from_json(serde_json::json!([
            {"god": {"state": {}, "tick": 1}}
        ]));
        let result = extract_latest_snapshot(batch, "agent_0123");
        assert!(matches!(result, Err(ViewerError::Malformed(_))));
    }

    #[test]
    fn extract_empty_batch_is_malformed() {
        let result = extract_latest_snapshot(StateBatch::new(), "god");
        assert!(matches!(result, Err(ViewerError::Malformed(_))));
    }

    #[test]
    fn extract_ignores_other_agents_in_record() {
        let batch = batch_from_json(serde_json::json!([
            {
                "god": {"state": {"scope": "everything"}, "tick": 9},
                "agent_1": {"state": {"scope": "partial"}, "tick": 9}
            }
        ]));
        let snapshot = extract_latest_snapshot(batch, "agent_1");
        assert_eq!(
            snapshot
                .ok()
                .and_then(|s| s.state.get("scope").cloned()),
            Some(serde_json::json!("partial"))
        );
    }

    #[test]
    fn base_url_trailing_slash_normalized() {
        let api = ApiClient::new("http://127.0.0.1:3001/");
        assert_eq!(api.base_url, "http://127.0.0.1:3001");
    }
}
