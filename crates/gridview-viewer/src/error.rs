//! Error types for the viewer.
//!
//! Uses `thiserror` for typed errors that surface through the whole client:
//! configuration, HTTP transport, and response-shape validation. The
//! scheduling loop treats transport and shape failures identically -- both
//! feed the same fixed-delay retry -- so the variants exist for diagnostics,
//! not for divergent handling.

/// Errors that can occur during viewer operation.
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// Transport failure or non-2xx response from the simulation server.
    ///
    /// For non-2xx answers the server-provided error body is captured in
    /// the message so the retry log shows what the server reported.
    #[error("server error: {0}")]
    Http(String),

    /// The response arrived but does not have the expected shape
    /// (missing agent key, wrong batch structure, unusable tick duration).
    #[error("malformed response: {0}")]
    Malformed(String),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
