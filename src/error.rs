//! Error types for the Rancher resource model

use crate::resource::Action;
use thiserror::Error;

/// Errors that can occur while hydrating resources or invoking actions
#[derive(Error, Debug)]
pub enum Error {
    /// The action is not in the resource's current action map.
    /// Raised locally; no request is sent.
    #[error("impossible to {action} the {kind} \"{id}\" (current state \"{state}\")")]
    InvalidAction {
        kind: &'static str,
        id: String,
        action: Action,
        state: String,
    },

    /// Failure reported by the transport, passed through unchanged
    #[error(transparent)]
    Transport(anyhow::Error),

    /// The document's `type` discriminator names no known resource kind
    #[error("unknown resource kind: {0}")]
    UnknownKind(String),

    /// A typed hydrate was given a document of another kind
    #[error("expected a {expected} document, got {found}")]
    KindMismatch {
        expected: &'static str,
        found: String,
    },

    /// A field every resource document carries is absent
    #[error("resource document is missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but has the wrong shape
    #[error("invalid resource document: {0}")]
    Hydration(#[from] serde_json::Error),

    /// No API endpoint has been configured
    #[error("no Rancher API URL configured (set RANCHER_URL or the config file)")]
    MissingUrl,

    /// The configured API endpoint is not a valid URL
    #[error("invalid Rancher API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl Error {
    /// The transport error, if this error came from the transport
    pub fn as_transport(&self) -> Option<&anyhow::Error> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this error was raised locally before any request was sent
    pub fn is_invalid_action(&self) -> bool {
        matches!(self, Error::InvalidAction { .. })
    }
}

/// Result type for resource operations
pub type Result<T> = std::result::Result<T, Error>;
