//! Session commands
//!
//! Every user action is a [`Command`] applied to a [`SessionStore`]. Applying
//! a command returns an [`Outcome`] carrying the notice to show the user and
//! whether state changed, so callers can decide when to re-render.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::SessionResult;
use super::session::{SessionStore, SuggestionDraft};
use super::types::{ChallengeId, Difficulty};

/// An action a user can take on their session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    Login {
        name: String,
        #[serde(default)]
        password: String,
    },
    Logout,
    Join {
        challenge_id: ChallengeId,
    },
    Cancel {
        challenge_id: ChallengeId,
    },
    Comment {
        challenge_id: ChallengeId,
        text: String,
    },
    Suggest {
        title: String,
        #[serde(default)]
        description: String,
        difficulty: Difficulty,
        duration: String,
    },
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Message shown to the user
    pub notice: String,
    /// Whether the session state was modified
    pub changed: bool,
}

impl Outcome {
    fn changed(notice: impl Into<String>) -> Self {
        Self {
            notice: notice.into(),
            changed: true,
        }
    }

    fn unchanged(notice: impl Into<String>) -> Self {
        Self {
            notice: notice.into(),
            changed: false,
        }
    }
}

impl Command {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Join { .. } => "join",
            Command::Cancel { .. } => "cancel",
            Command::Comment { .. } => "comment",
            Command::Suggest { .. } => "suggest",
        }
    }
}

impl SessionStore {
    /// Apply a command using the thread-local random source
    pub fn apply(&mut self, command: Command) -> SessionResult<Outcome> {
        self.apply_with_rng(command, &mut rand::rng())
    }

    /// Apply a command with a caller-supplied random source
    pub fn apply_with_rng<R: Rng>(
        &mut self,
        command: Command,
        rng: &mut R,
    ) -> SessionResult<Outcome> {
        match command {
            Command::Login { name, password } => {
                let user = self.login(name, &password);
                Ok(Outcome::changed(format!("Welcome, {}!", user.name)))
            }
            Command::Logout => match self.logout() {
                Some(user) => Ok(Outcome::changed(format!("Goodbye, {}!", user.name))),
                None => Ok(Outcome::unchanged("Nobody is logged in.")),
            },
            Command::Join { challenge_id } => {
                if self.join(challenge_id)? {
                    let title = self
                        .catalog()
                        .get(challenge_id)
                        .map(|c| c.title.clone())
                        .unwrap_or_default();
                    Ok(Outcome::changed(format!("You joined {}!", title)))
                } else {
                    Ok(Outcome::unchanged("You already joined this challenge."))
                }
            }
            Command::Cancel { challenge_id } => match self.cancel(challenge_id) {
                Some(_) => Ok(Outcome::changed("Participation cancelled.")),
                None => Ok(Outcome::unchanged("You have not joined this challenge.")),
            },
            Command::Comment { challenge_id, text } => {
                self.add_comment(challenge_id, text)?;
                Ok(Outcome::changed("Comment posted."))
            }
            Command::Suggest {
                title,
                description,
                difficulty,
                duration,
            } => {
                let draft = SuggestionDraft {
                    title,
                    description,
                    difficulty,
                    duration,
                };
                self.suggest_with_rng(draft, rng)?;
                Ok(Outcome::changed("New challenge suggested!"))
            }
        }
    }
}
