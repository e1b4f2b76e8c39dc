//! Core data types for the challenge board
//!
//! This module defines the records a session works with:
//! - `Challenge`: A catalog entry users can join
//! - `Participation`: A joined challenge with the points it awards
//! - `Comment`: A note left on a challenge
//! - `User`: The identity attached to a session after login
//! - `Difficulty` and `DifficultyFilter`: Classification and catalog filtering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::SessionError;

/// Identifier of a challenge within a session's catalog
pub type ChallengeId = u32;

/// Display format for comment timestamps
pub const COMMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Display format for participation dates
pub const PARTICIPATION_DATE_FORMAT: &str = "%Y-%m-%d";

/// How demanding a challenge is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Get all difficulties in ascending order
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ]
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(SessionError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Catalog filter level: everything, or one difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Check whether a challenge of the given difficulty passes this filter
    pub fn matches(&self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(level) => *level == difficulty,
        }
    }
}

impl std::fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyFilter::All => write!(f, "all"),
            DifficultyFilter::Only(level) => write!(f, "{}", level),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(DifficultyFilter::All);
        }
        trimmed.parse().map(DifficultyFilter::Only)
    }
}

/// A catalog entry describing a learning task
///
/// Challenges are never mutated or removed once they are in a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Challenge {
    /// Unique identifier within the catalog
    pub id: ChallengeId,
    /// Short title shown on the card
    pub title: String,
    /// What the participant is asked to build
    pub description: String,
    /// How demanding the challenge is
    pub difficulty: Difficulty,
    /// Grouping used by the participation breakdown
    pub category: String,
    /// Expected time to complete (e.g. "2 weeks")
    pub duration: String,
    /// Points awarded on joining
    pub points: u32,
}

impl Challenge {
    /// Create a challenge with required fields
    pub fn new(
        id: ChallengeId,
        title: impl Into<String>,
        difficulty: Difficulty,
        points: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            difficulty,
            category: String::new(),
            duration: String::new(),
            points,
        }
    }

    /// Builder method: set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder method: set category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method: set duration
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = duration.into();
        self
    }
}

/// A joined challenge, copied from the catalog at join time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Participation {
    pub challenge_id: ChallengeId,
    pub title: String,
    pub category: String,
    pub points: u32,
    pub participation_date: DateTime<Utc>,
}

impl Participation {
    /// Record a participation in `challenge` at the given instant
    pub fn from_challenge(challenge: &Challenge, at: DateTime<Utc>) -> Self {
        Self {
            challenge_id: challenge.id,
            title: challenge.title.clone(),
            category: challenge.category.clone(),
            points: challenge.points,
            participation_date: at,
        }
    }

    /// Join date as shown in the participation list
    pub fn formatted_date(&self) -> String {
        self.participation_date
            .format(PARTICIPATION_DATE_FORMAT)
            .to_string()
    }
}

/// A comment left on a challenge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Name of the user who wrote it
    pub author: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

impl Comment {
    /// Create a comment stamped with the current time
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            date: Utc::now(),
        }
    }

    /// Timestamp as shown under the comment ("YYYY-MM-DD HH:MM")
    pub fn formatted_date(&self) -> String {
        self.date.format(COMMENT_DATE_FORMAT).to_string()
    }
}

/// The identity attached to a session by login
///
/// No credentials are checked. Accumulated points live on the session,
/// so `points` is the balance the user started with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub points: i64,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: 0,
        }
    }
}
