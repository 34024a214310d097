//! Error types.
//!
//! Content and typesetting errors are shown on the card and never leave the
//! render queue. Hook errors fail the action they belong to.

use thiserror::Error;

/// The card content could not be placed into the target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ContentError {
    pub message: String,
    /// Where the failure happened (a trace or position), may be empty.
    pub detail: String,
}

impl ContentError {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

/// The typesetting engine failed to start or to typeset the card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TypesetError {
    pub message: String,
    pub detail: String,
}

impl TypesetError {
    pub fn new(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: detail.into(),
        }
    }
}

/// A pre- or post-reveal hook failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Outcome of a failed render action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("pre-reveal hook failed: {0}")]
    PreReveal(#[source] HookError),
    #[error("post-reveal hook failed: {0}")]
    PostReveal(#[source] HookError),
    /// A hook, the target or the typesetter panicked. Carries the panic
    /// message when it was a string.
    #[error("render action panicked: {0}")]
    Panicked(String),
    #[error("render queue stopped before the action completed")]
    QueueClosed,
}

/// A host bridge message could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("empty bridge command")]
    Empty,
    #[error("invalid ease in bridge command: {0:?}")]
    InvalidEase(String),
}
