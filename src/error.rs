//! Error types for the catalog and player clients

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by the catalog API client
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Missing credentials or an unusable server address
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection, DNS or body transfer failure
    #[error("{endpoint}: request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The request deadline elapsed before the server answered
    #[error("{endpoint}: request timed out")]
    Timeout { endpoint: &'static str },

    #[error("{endpoint}: unexpected response status {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    /// The server answered with a failure envelope
    #[error("{endpoint}: {message} (code {code})")]
    Api {
        endpoint: &'static str,
        code: i64,
        message: String,
    },

    #[error("{endpoint}: failed to decode response: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn from_reqwest(endpoint: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { endpoint }
        } else {
            Self::Transport { endpoint, source }
        }
    }

    /// The endpoint the failing request targeted, if any
    pub fn endpoint(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) => None,
            Self::Transport { endpoint, .. }
            | Self::Timeout { endpoint }
            | Self::Status { endpoint, .. }
            | Self::Api { endpoint, .. }
            | Self::Decode { endpoint, .. } => Some(*endpoint),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Errors raised while materializing the catalog
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to retrieve artists: {0}")]
    Artists(#[source] CatalogError),

    #[error("failed to retrieve albums for artist {artist}: {source}")]
    Artist {
        artist: String,
        #[source]
        source: CatalogError,
    },

    #[error("catalog load did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

/// Errors raised by the player control-plane client
#[derive(Error, Debug)]
pub enum PlayerError {
    /// Nothing is listening on the socket (player not running)
    #[error("failed to connect to player socket {}: {source}", path.display())]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("player socket I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Short, malformed or wrongly-shaped reply
    #[error("get_property {property}: failed to decode reply: {reason}")]
    Decode { property: String, reason: String },

    /// The player answered but reported an error
    #[error("get_property {property}: {message}")]
    Protocol { property: String, message: String },
}

impl PlayerError {
    /// True when the socket could not be reached or the exchange broke off
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connect { .. } | Self::Io(_))
    }

    /// True when the player answered with something unusable
    pub fn is_protocol(&self) -> bool {
        matches!(self, Self::Decode { .. } | Self::Protocol { .. })
    }
}
