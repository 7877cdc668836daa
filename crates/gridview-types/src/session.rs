//! Session handshake payload and the schedule parameters derived from it.
//!
//! The simulation server describes itself once, via `GET /get_info`. The
//! raw wire shape is [`SessionInfo`]; the client converts it into a
//! [`SessionConfig`] whose tick duration is guaranteed usable for timer
//! arithmetic.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Raw session metadata exactly as served by `GET /get_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Seconds of wall-clock time per simulation tick.
    pub tick_duration: f64,
    /// The tick the simulation had reached when the info was served.
    pub tick: u64,
    /// World grid dimensions as `[width, height]`.
    pub grid_size: [u32; 2],
}

/// Validated session parameters that drive the update schedule.
///
/// Built once from the [`SessionInfo`] handshake and immutable afterwards,
/// except for [`current_tick`](Self::current_tick) which is overwritten on
/// every accepted state update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Wall-clock time per simulation tick. Always positive and finite.
    pub tick_duration: Duration,
    /// The most recently rendered simulation tick.
    pub current_tick: u64,
    /// World grid dimensions as `[width, height]`.
    pub grid_size: [u32; 2],
    /// Ticks per second, derived as `floor(1 / tick_duration)`.
    ///
    /// Zero when a tick takes longer than one second.
    pub ticks_per_second: u32,
}

/// Error for session metadata that cannot drive a schedule.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The served `tick_duration` is zero, negative, or not finite.
    #[error("tick_duration must be a positive finite number of seconds, got {0}")]
    InvalidTickDuration(f64),
}

impl TryFrom<SessionInfo> for SessionConfig {
    type Error = SessionError;

    fn try_from(info: SessionInfo) -> Result<Self, Self::Error> {
        let tick_duration = Duration::try_from_secs_f64(info.tick_duration)
            .ok()
            .filter(|d| !d.is_zero())
            .ok_or(SessionError::InvalidTickDuration(info.tick_duration))?;

        // Sub-1Hz tick rates floor to 0 ticks per second; the field is
        // informational and the scheduler works from tick_duration alone.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let ticks_per_second = (1.0 / info.tick_duration).floor() as u32;

        Ok(Self {
            tick_duration,
            current_tick: info.tick,
            grid_size: info.grid_size,
            ticks_per_second,
        })
    }
}
