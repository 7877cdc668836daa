//! World-state snapshot shapes served by `GET /get_latest_state`.
//!
//! The server answers with an ordered sequence of tick records, oldest
//! first. Each record maps agent ids to the snapshot that agent perceives
//! for that tick. The client only ever applies the newest record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Opaque world state consumed by rendering.
///
/// The viewer never inspects individual keys; the state is replaced
/// wholesale on every accepted server response, never merged.
pub type WorldState = serde_json::Map<String, serde_json::Value>;

/// One agent's entry in a tick record: the world as that agent perceives
/// it at the given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    /// The perceived world state.
    pub state: WorldState,
    /// The simulation tick this snapshot was taken at.
    pub tick: u64,
}

/// An ordered batch of tick records, oldest first.
pub type StateBatch = Vec<BTreeMap<String, AgentSnapshot>>;
