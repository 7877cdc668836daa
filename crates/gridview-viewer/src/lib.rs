//! Polling visualization client for a grid-world simulation server.
//!
//! The viewer solves exactly one coordination problem: render continuously,
//! fetch occasionally, never fetch twice at once. A one-time handshake
//! fetches the session parameters (tick duration, starting tick, grid
//! dimensions), then a frame-paced loop redraws on every iteration and
//! issues a state fetch only when a full simulation tick of wall-clock time
//! has elapsed since the previous fetch was issued.
//!
//! # Architecture
//!
//! ```text
//! Initializer --> Scheduler --(update gate)--> State Fetch --> Renderer
//!                     ^                                           |
//!                     +----------- next frame <-------------------+
//! ```
//!
//! A failed fetch pauses the loop for a fixed delay before the next frame,
//! trading a short rendering freeze for protection against tight retry
//! storms when the server is unreachable. Outbound data sends (human key
//! input) ride outside the loop entirely.

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod scheduler;
pub mod sender;
