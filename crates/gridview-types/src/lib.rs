//! Shared type definitions for the gridview visualization client.
//!
//! This crate is the single source of truth for the payload shapes exchanged
//! with the simulation server: the session handshake served by `/get_info`,
//! the world-state snapshot batches served by `/get_latest_state`, and the
//! view identity that scopes every request to one perspective.
//!
//! # Modules
//!
//! - [`session`] -- session handshake payload and the validated schedule
//!   parameters derived from it
//! - [`state`] -- opaque world state and tick-keyed snapshot batches
//! - [`identity`] -- the viewer's role/id, derived from the view path

pub mod identity;
pub mod session;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use identity::{ViewIdentity, ViewPathError};
pub use session::{SessionConfig, SessionError, SessionInfo};
pub use state::{AgentSnapshot, StateBatch, WorldState};
