//! Common error types used across the workspace.
//!
//! Each layer converts its own failures into [`PlugHubError`] through the
//! typed variants below. Gateway errors keep the library error as
//! their source and include its text in their `Display` output, so the HTTP
//! layer can report it verbatim.

use std::time::Duration;

use crate::power::PowerState;

/// Boxed error coming out of a device-control library.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum PlugHubError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Input that was rejected before any device was contacted.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported state '{0}', use 'on' or 'off'")]
    UnsupportedState(String),

    #[error("no device host given and DEVICE_HOST is not configured")]
    MissingHost,

    #[error("no {0} given and none is configured")]
    MissingCredential(&'static str),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("malformed query string: {0}")]
    MalformedQuery(String),
}

/// A failure reported by the device gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to connect to {host}: {source}")]
    Connect { host: String, source: BoxError },

    #[error("failed to refresh the state of {host}: {source}")]
    Update { host: String, source: BoxError },

    #[error("failed to turn {state} {host}: {source}")]
    Command {
        host: String,
        state: PowerState,
        source: BoxError,
    },

    #[error("device scan failed: {source}")]
    Scan { source: BoxError },

    #[error("{host} reported an unreadable device info: {source}")]
    Decode {
        host: String,
        source: serde_json::Error,
    },

    #[error("{host} did not answer within {}s", .timeout.as_secs())]
    Timeout { host: String, timeout: Duration },

    #[error("{host} has no reported state yet")]
    NotUpdated { host: String },
}

impl GatewayError {
    pub fn connect(host: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Connect {
            host: host.into(),
            source: source.into(),
        }
    }

    pub fn update(host: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Update {
            host: host.into(),
            source: source.into(),
        }
    }

    pub fn command(
        host: impl Into<String>,
        state: PowerState,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Command {
            host: host.into(),
            state,
            source: source.into(),
        }
    }

    pub fn scan(source: impl Into<BoxError>) -> Self {
        Self::Scan {
            source: source.into(),
        }
    }

    /// Host the failure relates to, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        match self {
            Self::Connect { host, .. }
            | Self::Update { host, .. }
            | Self::Command { host, .. }
            | Self::Decode { host, .. }
            | Self::Timeout { host, .. }
            | Self::NotUpdated { host } => Some(host),
            Self::Scan { .. } => None,
        }
    }
}
