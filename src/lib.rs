//! # Websim Challenge
//!
//! A session-scoped challenge board: browse web development challenges,
//! join or cancel them, leave comments, see a category breakdown of what
//! you joined, and suggest new challenges.
//!
//! ## Features
//!
//! - **Per-session state**: Every client session owns its own store; nothing is persisted
//! - **Explicit commands**: Actions return a notice and a fresh snapshot
//! - **Idle expiry**: Sessions are discarded after a configurable idle period
//! - **View models**: Catalog, participation and suggestion tabs rendered as data
//!
//! ## Modules
//!
//! - [`domain`]: Challenges, participations, comments and the session store
//! - [`sessions`]: Session registry and lifecycle
//! - [`view`]: Navigation tabs and their view models
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use websim_challenge::domain::{DifficultyFilter, SessionStore};
//! use websim_challenge::view::{render, Tab};
//!
//! let mut store = SessionStore::new();
//! store.login("alice", "");
//! store.join(1).unwrap();
//! store.add_comment(1, "nice!").unwrap();
//!
//! let view = render(&store, Tab::MyParticipation, DifficultyFilter::All).unwrap();
//! println!("{}", serde_json::to_string_pretty(&view).unwrap());
//! ```

pub mod api;
pub mod config;
pub mod domain;
pub mod sessions;
pub mod view;

// Re-export top-level types for convenience
pub use domain::{
    CategoryBreakdown, Challenge, ChallengeId, Command, Comment, Difficulty, DifficultyFilter,
    Outcome, Participation, SessionError, SessionResult, SessionSnapshot, SessionStore, User,
};

pub use sessions::{RegistryError, SessionId, SessionRegistry};

pub use view::{Tab, View};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, LoadedConfig, LoggingConfig, SessionsConfig};
