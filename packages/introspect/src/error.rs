use crate::kind::Kind;
use thiserror::Error;

/// Errors that can occur while loading a snapshot or generating declarations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntrospectError {
    #[error("Invalid snapshot JSON: {0}")]
    Json(String),

    #[error("Unknown snapshot kind '{0}'")]
    UnknownKind(String),

    #[error("Reference to undefined label '{0}'")]
    UnknownReference(String),

    #[error("Label '{0}' is defined more than once")]
    DuplicateLabel(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Root value must be a plain object, found {0}")]
    RootNotObject(Kind),
}

impl IntrospectError {
    pub fn invalid_snapshot(message: impl Into<String>) -> Self {
        Self::InvalidSnapshot(message.into())
    }
}

impl From<serde_json::Error> for IntrospectError {
    fn from(err: serde_json::Error) -> Self {
        IntrospectError::Json(err.to_string())
    }
}

pub type IntrospectResult<T> = Result<T, IntrospectError>;
