use std::fmt;

use pokedex_core::{DetailViewModel, ListMsg};

/// Identifies one detail screen's pipeline inside an [`crate::EngineHandle`].
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A detail pipeline published a new snapshot.
    DetailChanged {
        request_id: RequestId,
        view: DetailViewModel,
    },
    /// A list page request settled; apply the message to the list state.
    ListSettled(ListMsg),
}

/// A single failed attempt at the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self.kind {
            TransportFailureKind::HttpStatus(code) => code == 429 || (500..600).contains(&code),
            TransportFailureKind::Timeout | TransportFailureKind::Network => true,
            TransportFailureKind::TooLarge { .. } => false,
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailureKind {
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            TransportFailureKind::Timeout => write!(f, "timeout"),
            TransportFailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            TransportFailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("invalid resource locator: {0}")]
    InvalidLocator(String),
    #[error("request failed: {0}")]
    RequestFailed(TransportError),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("no network connection")]
    NoConnection,
    #[error("unknown error: {0}")]
    Unknown(String),
}

impl ClientError {
    /// One human-readable sentence per failure kind. `subject` names what was being loaded.
    pub fn user_message(&self, subject: &str) -> String {
        match self {
            ClientError::InvalidLocator(_) => format!("Invalid URL. Could not fetch {subject}."),
            ClientError::RequestFailed(cause) => {
                format!("Request failed while fetching {subject}: {}.", cause.kind)
            }
            ClientError::Decode(_) => format!("Failed to decode {subject}."),
            ClientError::NoConnection => {
                format!("No internet connection. Unable to fetch {subject}.")
            }
            ClientError::Unknown(_) => {
                format!("An unknown error occurred while fetching {subject}.")
            }
        }
    }
}
