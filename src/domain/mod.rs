//! Challenge Board Domain
//!
//! This module provides the per-session challenge model:
//!
//! - **types**: Core records (Challenge, Participation, Comment, User)
//! - **catalog**: Seeded challenge list, difficulty filter, suggestions
//! - **session**: The session store and its participation/comment rules
//! - **command**: Actions applied to a session, returning user notices
//! - **report**: Category breakdown of participations
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust
//! use websim_challenge::domain::{Command, SessionStore};
//!
//! let mut store = SessionStore::new();
//! store.apply(Command::Login { name: "alice".into(), password: String::new() }).unwrap();
//! store.apply(Command::Join { challenge_id: 1 }).unwrap();
//!
//! assert_eq!(store.total_points(), 100);
//! ```

pub mod catalog;
pub mod command;
pub mod error;
pub mod report;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use catalog::{
    filter_by_difficulty, Catalog, SUGGESTED_CATEGORY, SUGGESTION_DURATIONS, SUGGESTION_POINTS,
};
pub use command::{Command, Outcome};
pub use error::{SessionError, SessionResult};
pub use report::{category_counts, CategoryBreakdown, CategorySlice};
pub use session::{SessionSnapshot, SessionStore, SuggestionDraft};
pub use types::{
    Challenge, ChallengeId, Comment, Difficulty, DifficultyFilter, Participation, User,
};
