//! Session Registry
//!
//! Owns one [`SessionStore`] per session id. Each store sits behind its own
//! mutex so actions on a session are serialized while separate sessions run
//! independently. Sessions end by explicit teardown or by the idle sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::interval;
use uuid::Uuid;

use crate::config::SessionsConfig;
use crate::domain::SessionStore;

/// Unique identifier for a session
pub type SessionId = String;

/// Shared handle to one session's store
pub type SessionHandle = Arc<Mutex<SessionStore>>;

struct SessionEntry {
    store: SessionHandle,
    created_at: Instant,
    last_activity: Instant,
}

/// Registry of live sessions
pub struct SessionRegistry {
    /// Live sessions: SessionId → SessionEntry
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry>>>,
    /// Configuration
    config: SessionsConfig,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new(config: SessionsConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn config(&self) -> &SessionsConfig {
        &self.config
    }

    /// Create a session with a freshly seeded store
    ///
    /// Returns the session id, or an error if the session limit has been
    /// reached.
    pub async fn create(&self) -> Result<(SessionId, SessionHandle), RegistryError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            tracing::warn!(limit = self.config.max_sessions, "Session limit reached");
            return Err(RegistryError::TooManySessions);
        }

        let id = Uuid::new_v4().to_string();
        let store = Arc::new(Mutex::new(SessionStore::new()));
        let now = Instant::now();

        sessions.insert(
            id.clone(),
            SessionEntry {
                store: Arc::clone(&store),
                created_at: now,
                last_activity: now,
            },
        );

        tracing::info!(session_id = %id, live_sessions = sessions.len(), "Session created");
        Ok((id, store))
    }

    /// Look up a session and mark it active
    pub async fn get(&self, id: &str) -> Result<SessionHandle, RegistryError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| RegistryError::SessionNotFound(id.to_string()))?;

        entry.last_activity = Instant::now();
        Ok(Arc::clone(&entry.store))
    }

    /// Run `f` against a session's store while holding its lock
    pub async fn with_session<F, R>(&self, id: &str, f: F) -> Result<R, RegistryError>
    where
        F: FnOnce(&mut SessionStore) -> R,
    {
        let handle = self.get(id).await?;
        let mut store = handle.lock().await;
        Ok(f(&mut store))
    }

    /// Tear down a session
    pub async fn remove(&self, id: &str) -> Result<(), RegistryError> {
        let removed = self.sessions.write().await.remove(id);

        match removed {
            Some(entry) => {
                tracing::info!(
                    session_id = %id,
                    age_secs = entry.created_at.elapsed().as_secs(),
                    "Session ended"
                );
                Ok(())
            }
            None => Err(RegistryError::SessionNotFound(id.to_string())),
        }
    }

    /// Drop sessions idle longer than the configured timeout as of `now`
    ///
    /// Returns the number of sessions removed.
    pub async fn expire_idle(&self, now: Instant) -> usize {
        let timeout = self.config.idle_timeout();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, entry| {
            let idle = now.saturating_duration_since(entry.last_activity);
            let keep = idle <= timeout;
            if !keep {
                tracing::debug!(session_id = %id, idle_secs = idle.as_secs(), "Session expired");
            }
            keep
        });

        before - sessions.len()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Start the background idle sweep
    pub fn start_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(self);
        let sweep_interval = registry.config.sweep_interval();

        tokio::spawn(async move {
            let mut ticker = interval(sweep_interval);

            loop {
                ticker.tick().await;

                let expired = registry.expire_idle(Instant::now()).await;
                if expired > 0 {
                    let live_sessions = registry.session_count().await;
                    tracing::info!(expired, live_sessions, "Expired idle sessions");
                }
            }
        })
    }
}

/// Errors from the session registry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Too many live sessions")]
    TooManySessions,
}
