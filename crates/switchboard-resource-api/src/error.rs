use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::types::ResourceHandle;

pub const STATUS_NOT_FOUND: u16 = 404;

/// Failure of a single remote round trip, as reported by a proxy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status of the response, `None` when no response was received
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl RemoteError {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(Some(STATUS_NOT_FOUND), message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(STATUS_NOT_FOUND)
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Step of a multi-step create/update that failed after the parent was committed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrchestrationPhase {
    ChildCreate,
    ChildLookup,
    ChildPatch,
    UploadTarget { kind: String },
    UploadTransfer { kind: String },
}

impl fmt::Display for OrchestrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChildCreate => write!(f, "child create"),
            Self::ChildLookup => write!(f, "child lookup"),
            Self::ChildPatch => write!(f, "child patch"),
            Self::UploadTarget { kind } => write!(f, "{kind} upload target request"),
            Self::UploadTransfer { kind } => write!(f, "{kind} file transfer"),
        }
    }
}

/// Details of a parent that is persisted but incomplete
#[derive(Debug)]
pub struct PartialFailure {
    pub parent: ResourceHandle,
    /// Natural key of the child that failed
    pub child: String,
    pub phase: OrchestrationPhase,
    /// Natural keys of children whose whole sequence completed before the failure
    pub completed: Vec<String>,
    pub source: ResourceError,
}

impl fmt::Display for PartialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' persisted but incomplete: {} failed for child '{}': {}",
            self.parent.id, self.parent.name, self.phase, self.child, self.source
        )
    }
}

/// Reconciliation error taxonomy
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Shape mismatch at '{path}': expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Not found yet: {0}")]
    TransientNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Remote call failed: {0}")]
    PermanentRemote(#[from] RemoteError),

    #[error("{0}")]
    PartialOrchestration(Box<PartialFailure>),

    #[error("Timed out after {waited:?} waiting for {waiting_for}")]
    TimeoutExceeded {
        waiting_for: String,
        waited: Duration,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Attachment error: {0}")]
    Attachment(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    pub fn shape(path: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::ShapeMismatch {
            path: path.into(),
            expected,
            found,
        }
    }

    pub fn partial(failure: PartialFailure) -> Self {
        Self::PartialOrchestration(Box::new(failure))
    }

    /// Only a not-found inside the propagation window is worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientNotFound(_))
    }

    pub fn partial_failure(&self) -> Option<&PartialFailure> {
        match self {
            Self::PartialOrchestration(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::PermanentRemote(err) => err.status,
            _ => None,
        }
    }
}

pub type ResourceResult<T> = Result<T, ResourceError>;

impl From<serde_json::Error> for ResourceError {
    fn from(err: serde_json::Error) -> Self {
        ResourceError::Internal(format!("Serialization error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_includes_status() {
        let err = RemoteError::new(Some(409), "conflict on version");
        assert_eq!(err.to_string(), "conflict on version (status 409)");
        assert_eq!(RemoteError::transport("reset").to_string(), "reset");
    }

    #[test]
    fn test_only_transient_not_found_is_retryable() {
        assert!(ResourceError::TransientNotFound("x".into()).is_retryable());
        assert!(!ResourceError::NotFound("x".into()).is_retryable());
        assert!(!ResourceError::from(RemoteError::not_found("x")).is_retryable());
    }

    #[test]
    fn test_partial_failure_message_names_child_and_phase() {
        let err = ResourceError::partial(PartialFailure {
            parent: ResourceHandle::new("g-1", "greeting"),
            child: "en-us".to_string(),
            phase: OrchestrationPhase::UploadTransfer {
                kind: "voice".to_string(),
            },
            completed: vec![],
            source: ResourceError::Attachment("disk full".to_string()),
        });

        let message = err.to_string();
        assert!(message.contains("g-1"));
        assert!(message.contains("voice file transfer"));
        assert!(message.contains("en-us"));
        assert_eq!(err.partial_failure().map(|f| f.child.as_str()), Some("en-us"));
    }
}
