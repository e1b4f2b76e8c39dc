//! Session error types
//!
//! Errors raised by actions applied to a session store.

use thiserror::Error;

use super::types::ChallengeId;

/// Errors that can occur while acting on a session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A mutating action was attempted with nobody logged in
    #[error("Login required")]
    AuthRequired,

    /// The challenge id is not in this session's catalog
    #[error("Challenge not found: {0}")]
    ChallengeNotFound(ChallengeId),

    /// Unrecognised difficulty level
    #[error("Invalid difficulty: {0}. Use beginner, intermediate, or advanced")]
    InvalidDifficulty(String),

    /// Unrecognised navigation tab
    #[error("Invalid tab: {0}. Use catalog, my-participation, or suggest")]
    InvalidTab(String),
}

/// Result type alias for session operations
pub type SessionResult<T> = Result<T, SessionError>;
