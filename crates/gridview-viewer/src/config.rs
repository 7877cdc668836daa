//! Viewer configuration loaded from environment variables.
//!
//! The original deployment serves one locally hosted simulation, so every
//! value has a fixed default. The environment can override each one at
//! startup; nothing is reconfigurable at runtime.

use std::time::Duration;

use crate::error::ViewerError;

/// Complete viewer configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Simulation server base URL (e.g. `http://127.0.0.1:3001`).
    pub api_url: String,
    /// View path naming the rendered perspective
    /// (`/god`, `/agent/{id}`, `/human-agent/{id}`).
    pub view_path: String,
    /// Best-effort redraw rate in frames per second.
    pub frame_rate: u32,
    /// Fixed delay before retrying after a failed handshake or state fetch.
    pub retry_delay: Duration,
}

impl ViewerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `SIM_API_URL` -- simulation server base URL (default `http://127.0.0.1:3001`)
    /// - `VIEW_PATH` -- view path (default `/god`)
    /// - `FRAME_RATE` -- redraw rate in frames per second (default 60)
    /// - `RETRY_DELAY_MS` -- failure retry delay in milliseconds (default 500)
    pub fn from_env() -> Result<Self, ViewerError> {
        let api_url =
            std::env::var("SIM_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3001".to_owned());

        let view_path = std::env::var("VIEW_PATH").unwrap_or_else(|_| "/god".to_owned());

        let frame_rate: u32 = std::env::var("FRAME_RATE")
            .unwrap_or_else(|_| "60".to_owned())
            .parse()
            .map_err(|e| ViewerError::Config(format!("invalid FRAME_RATE: {e}")))?;
        if frame_rate == 0 {
            return Err(ViewerError::Config(
                "FRAME_RATE must be at least 1".to_owned(),
            ));
        }

        let retry_delay_ms: u64 = std::env::var("RETRY_DELAY_MS")
            .unwrap_or_else(|_| "500".to_owned())
            .parse()
            .map_err(|e| ViewerError::Config(format!("invalid RETRY_DELAY_MS: {e}")))?;

        Ok(Self {
            api_url,
            view_path,
            frame_rate,
            retry_delay: Duration::from_millis(retry_delay_ms),
        })
    }

    /// The frame interval corresponding to [`frame_rate`](Self::frame_rate).
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewer_config_defaults() {
        // Verify default values used in from_env fallbacks
        let frame_default: u32 = "60".parse().unwrap_or(0);
        assert_eq!(frame_default, 60);

        let retry_default: u64 = "500".parse().unwrap_or(0);
        assert_eq!(retry_default, 500);
    }

    #[test]
    fn frame_interval_from_rate() {
        let config = ViewerConfig {
            api_url: "http://127.0.0.1:3001".to_owned(),
            view_path: "/god".to_owned(),
            frame_rate: 60,
            retry_delay: Duration::from_millis(500),
        };
        let interval = config.frame_interval();
        assert!(interval > Duration::from_millis(16));
        assert!(interval < Duration::from_millis(17));
    }

    #[test]
    fn one_fps_interval_is_one_second() {
        let config = ViewerConfig {
            api_url: String::new(),
            view_path: String::new(),
            frame_rate: 1,
            retry_delay: Duration::ZERO,
        };
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
    }
}
