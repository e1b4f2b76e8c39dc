//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use crate::domain::{Challenge, ChallengeId, Outcome, Participation, SessionSnapshot};
use crate::view::CommentLine;

// ============================================
// SESSION DTOs
// ============================================

/// Response to session creation
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub state: SessionSnapshot,
}

/// Login request; the password is accepted but never checked
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// Result of any session action
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Message to show the user
    pub notice: String,
    /// Whether the action modified the session
    pub changed: bool,
    /// Session state after the action
    pub state: SessionSnapshot,
}

impl ActionResponse {
    pub fn new(outcome: Outcome, state: SessionSnapshot) -> Self {
        Self {
            notice: outcome.notice,
            changed: outcome.changed,
            state,
        }
    }
}

// ============================================
// CHALLENGE DTOs
// ============================================

/// Catalog filter parameters
#[derive(Debug, Default, Deserialize)]
pub struct ChallengeListParams {
    /// all, beginner, intermediate, advanced
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Filtered catalog
#[derive(Debug, Serialize)]
pub struct ChallengeListResponse {
    pub filter: String,
    pub challenges: Vec<Challenge>,
    pub total: usize,
}

/// Challenge suggestion request
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// beginner, intermediate, advanced
    pub difficulty: String,
    pub duration: String,
}

// ============================================
// COMMENT DTOs
// ============================================

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub challenge_id: ChallengeId,
    pub comments: Vec<CommentLine>,
    pub total: usize,
}

// ============================================
// PARTICIPATION DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct ParticipationListResponse {
    pub participations: Vec<Participation>,
    pub total_points: u64,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Number of live sessions
    pub sessions: usize,
    /// Session capacity
    pub max_sessions: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}
