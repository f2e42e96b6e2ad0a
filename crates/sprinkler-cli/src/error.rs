//! CLI error types with miette diagnostics.
//!
//! Maps `sprinkler_api::Error` and `ConfigError` into user-facing errors
//! with actionable help text and distinct exit codes.

use miette::Diagnostic;
use thiserror::Error;

use sprinkler_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const PROTOCOL: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Arguments ────────────────────────────────────────────────────
    /// Malformed command line. clap renders these itself.
    #[error("{0}")]
    #[diagnostic(code(sprinkler::argument))]
    Argument(#[from] clap::Error),

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the sprinkler controller")]
    #[diagnostic(
        code(sprinkler::connection_failed),
        help(
            "Check that the controller is powered and on the network.\n\
             mDNS names (*.local) resolve slowly; try its IP address with --host."
        )
    )]
    ConnectionFailed {
        #[source]
        source: sprinkler_api::Error,
    },

    #[error("Request to the sprinkler controller timed out")]
    #[diagnostic(
        code(sprinkler::timeout),
        help("Increase the timeout with --timeout, or use 0 to wait indefinitely.")
    )]
    Timeout {
        #[source]
        source: sprinkler_api::Error,
    },

    // ── Device protocol ──────────────────────────────────────────────
    #[error("Controller reported a failure -- status: {body}")]
    #[diagnostic(code(sprinkler::protocol))]
    Protocol { body: String },

    #[error("Unexpected response from controller: {message}")]
    #[diagnostic(code(sprinkler::unexpected_response), help("Response body: {body}"))]
    UnexpectedResponse { message: String, body: String },

    #[error(transparent)]
    #[diagnostic(code(sprinkler::api))]
    Api(sprinkler_api::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(sprinkler::config),
        help("Inspect the configuration with: sprinkler config show")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Controller returned invalid JSON: {0}")]
    #[diagnostic(code(sprinkler::json))]
    Json(#[from] serde_json::Error),

    #[error("failed to render configuration: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Argument(_) => exit_code::USAGE,
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Protocol { .. } | Self::UnexpectedResponse { .. } => exit_code::PROTOCOL,
            _ => exit_code::GENERAL,
        }
    }
}

// ── sprinkler_api::Error → CliError mapping ──────────────────────────

impl From<sprinkler_api::Error> for CliError {
    fn from(err: sprinkler_api::Error) -> Self {
        match err {
            e if e.is_timeout() => CliError::Timeout { source: e },
            e @ sprinkler_api::Error::Transport(_) => CliError::ConnectionFailed { source: e },
            sprinkler_api::Error::Protocol { body } => CliError::Protocol { body },
            sprinkler_api::Error::Deserialization { message, body } => {
                CliError::UnexpectedResponse { message, body }
            }
            other => CliError::Api(other),
        }
    }
}
