use thiserror::Error;

/// Top-level error type for the `sprinkler-api` crate.
///
/// Transport and protocol failures are kept apart: a device that answered
/// with a non-`"ok"` status is a [`Error::Protocol`], anything that kept the
/// answer from arriving is a [`Error::Transport`]. Nothing here is retried.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout,
    /// truncated body).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The target host could not be turned into a request URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Device protocol ─────────────────────────────────────────────
    /// The device answered, but its `status` field was not `"ok"`.
    /// Carries the raw response body verbatim.
    #[error("status: {body}")]
    Protocol { body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` for network-level failures (the request or its body
    /// never made it across).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidUrl(_))
    }

    /// Returns `true` when the device reported a non-`"ok"` status.
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Protocol { .. })
    }

    /// Returns `true` if the transport gave up waiting on the device.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// The raw response body attached to this error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Protocol { body } | Self::Deserialization { body, .. } => Some(body),
            _ => None,
        }
    }
}
