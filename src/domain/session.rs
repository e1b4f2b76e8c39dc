//! Session store
//!
//! All state owned by one session: the logged-in user, the catalog, the
//! participation list, accumulated points, and comments per challenge.
//!
//! # Invariants
//!
//! - At most one participation per challenge id
//! - `total_points` equals the sum of points of live participations
//! - Comment sequences are append-only, in insertion order
//!
//! Logging out clears only the user; participations, points and comments
//! stay with the session.

use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use super::catalog::Catalog;
use super::error::{SessionError, SessionResult};
use super::report::CategoryBreakdown;
use super::types::{Challenge, ChallengeId, Comment, Difficulty, Participation, User};

/// Fields of a challenge suggestion
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionDraft {
    pub title: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub duration: String,
}

/// Per-session state
#[derive(Debug, Clone)]
pub struct SessionStore {
    user: Option<User>,
    catalog: Catalog,
    participations: Vec<Participation>,
    total_points: u64,
    comments: HashMap<ChallengeId, Vec<Comment>>,
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub total_points: u64,
    pub challenges: Vec<Challenge>,
    pub participations: Vec<Participation>,
    /// Number of comments per challenge that has any
    pub comment_counts: BTreeMap<ChallengeId, usize>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a session with the seed catalog and nobody logged in
    pub fn new() -> Self {
        Self {
            user: None,
            catalog: Catalog::seeded(),
            participations: Vec::new(),
            total_points: 0,
            comments: HashMap::new(),
        }
    }

    // ============================================
    // IDENTITY
    // ============================================

    /// Attach a user to the session
    ///
    /// No credential check is performed; `password` is ignored.
    pub fn login(&mut self, name: impl Into<String>, _password: &str) -> &User {
        let user = User::new(name);
        tracing::info!(user = %user.name, "User logged in");
        self.user.insert(user)
    }

    /// Detach the user, keeping participations and points
    pub fn logout(&mut self) -> Option<User> {
        let user = self.user.take();
        if let Some(u) = &user {
            tracing::info!(user = %u.name, "User logged out");
        }
        user
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    fn require_user(&self) -> SessionResult<&User> {
        self.user.as_ref().ok_or(SessionError::AuthRequired)
    }

    // ============================================
    // PARTICIPATION
    // ============================================

    /// Join a challenge
    ///
    /// Returns `Ok(true)` when a participation was created and `Ok(false)`
    /// when the challenge was already joined.
    pub fn join(&mut self, challenge_id: ChallengeId) -> SessionResult<bool> {
        self.require_user()?;

        let challenge = self
            .catalog
            .get(challenge_id)
            .ok_or(SessionError::ChallengeNotFound(challenge_id))?;

        if self.is_joined(challenge_id) {
            return Ok(false);
        }

        let participation = Participation::from_challenge(challenge, Utc::now());
        self.total_points += u64::from(participation.points);
        self.participations.push(participation);

        tracing::info!(
            challenge_id,
            total_points = self.total_points,
            "Joined challenge"
        );
        Ok(true)
    }

    /// Cancel a participation, returning it if one existed
    pub fn cancel(&mut self, challenge_id: ChallengeId) -> Option<Participation> {
        let index = self
            .participations
            .iter()
            .position(|p| p.challenge_id == challenge_id)?;

        let removed = self.participations.remove(index);
        self.total_points -= u64::from(removed.points);

        tracing::info!(
            challenge_id,
            total_points = self.total_points,
            "Cancelled participation"
        );
        Some(removed)
    }

    pub fn is_joined(&self, challenge_id: ChallengeId) -> bool {
        self.participations
            .iter()
            .any(|p| p.challenge_id == challenge_id)
    }

    /// Participations in join order
    pub fn participations(&self) -> &[Participation] {
        &self.participations
    }

    pub fn total_points(&self) -> u64 {
        self.total_points
    }

    /// Participation counts per category
    pub fn category_breakdown(&self) -> CategoryBreakdown {
        CategoryBreakdown::from_participations(&self.participations)
    }

    // ============================================
    // COMMENTS
    // ============================================

    /// Append a comment by the current user
    ///
    /// Text is stored as given, including empty text.
    pub fn add_comment(
        &mut self,
        challenge_id: ChallengeId,
        text: impl Into<String>,
    ) -> SessionResult<&Comment> {
        let author = self.require_user()?.name.clone();

        let thread = self.comments.entry(challenge_id).or_default();
        thread.push(Comment::new(author, text));

        tracing::debug!(challenge_id, comments = thread.len(), "Comment added");
        Ok(&thread[thread.len() - 1])
    }

    /// Comments on a challenge in insertion order
    pub fn comments(&self, challenge_id: ChallengeId) -> &[Comment] {
        self.comments
            .get(&challenge_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // ============================================
    // CATALOG
    // ============================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Add a suggested challenge to this session's catalog
    pub fn suggest(&mut self, draft: SuggestionDraft) -> SessionResult<&Challenge> {
        self.suggest_with_rng(draft, &mut rand::rng())
    }

    /// [`SessionStore::suggest`] with a caller-supplied random source
    pub fn suggest_with_rng<R: Rng>(
        &mut self,
        draft: SuggestionDraft,
        rng: &mut R,
    ) -> SessionResult<&Challenge> {
        self.require_user()?;

        let challenge = self.catalog.add_suggestion(
            draft.title,
            draft.description,
            draft.difficulty,
            draft.duration,
            rng,
        );

        tracing::info!(
            challenge_id = challenge.id,
            points = challenge.points,
            "Challenge suggested"
        );
        Ok(challenge)
    }

    // ============================================
    // SNAPSHOT
    // ============================================

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            total_points: self.total_points,
            challenges: self.catalog.all().to_vec(),
            participations: self.participations.clone(),
            comment_counts: self
                .comments
                .iter()
                .filter(|(_, thread)| !thread.is_empty())
                .map(|(id, thread)| (*id, thread.len()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::SUGGESTION_POINTS;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn logged_in(name: &str) -> SessionStore {
        let mut store = SessionStore::new();
        store.login(name, "secret");
        store
    }

    fn participation_ids(store: &SessionStore) -> Vec<ChallengeId> {
        store.participations().iter().map(|p| p.challenge_id).collect()
    }

    fn points_sum(store: &SessionStore) -> u64 {
        store
            .participations()
            .iter()
            .map(|p| u64::from(p.points))
            .sum()
    }

    fn draft(title: &str) -> SuggestionDraft {
        SuggestionDraft {
            title: title.to_string(),
            description: "Y".to_string(),
            difficulty: Difficulty::Beginner,
            duration: "1week".to_string(),
        }
    }

    #[test]
    fn test_login_creates_user_with_zero_points() {
        let mut store = SessionStore::new();
        let user = store.login("alice", "");
        assert_eq!(user.name, "alice");
        assert_eq!(user.points, 0);
        assert!(store.is_logged_in());
    }

    #[test]
    fn test_join_and_cancel_scenario() {
        let mut store = logged_in("alice");

        assert_eq!(store.join(1), Ok(true));
        assert_eq!(store.total_points(), 100);
        assert_eq!(participation_ids(&store), vec![1]);

        assert_eq!(store.join(2), Ok(true));
        assert_eq!(store.total_points(), 300);

        let removed = store.cancel(1).unwrap();
        assert_eq!(removed.challenge_id, 1);
        assert_eq!(store.total_points(), 200);
        assert_eq!(participation_ids(&store), vec![2]);
    }

    #[test]
    fn test_join_twice_is_noop() {
        let mut store = logged_in("alice");
        store.join(3).unwrap();

        assert_eq!(store.join(3), Ok(false));
        assert_eq!(store.total_points(), 300);
        assert_eq!(store.participations().len(), 1);
    }

    #[test]
    fn test_join_unknown_challenge() {
        let mut store = logged_in("alice");
        assert_eq!(store.join(99), Err(SessionError::ChallengeNotFound(99)));
        assert!(store.participations().is_empty());
    }

    #[test]
    fn test_cancel_without_participation_is_noop() {
        let mut store = logged_in("alice");
        store.join(2).unwrap();

        assert!(store.cancel(1).is_none());
        assert_eq!(store.total_points(), 200);
    }

    #[test]
    fn test_join_then_cancel_restores_state() {
        let mut store = logged_in("alice");
        store.join(2).unwrap();
        let before_points = store.total_points();
        let before_ids = participation_ids(&store);

        store.join(3).unwrap();
        store.cancel(3);

        assert_eq!(store.total_points(), before_points);
        assert_eq!(participation_ids(&store), before_ids);
    }

    #[test]
    fn test_points_invariant_over_sequence() {
        let mut store = logged_in("alice");
        let ops: [(bool, ChallengeId); 10] = [
            (true, 1),
            (true, 2),
            (true, 2),
            (false, 1),
            (true, 3),
            (false, 3),
            (false, 3),
            (true, 1),
            (false, 2),
            (true, 3),
        ];

        for (join, id) in ops {
            if join {
                store.join(id).unwrap();
            } else {
                store.cancel(id);
            }
            assert_eq!(store.total_points(), points_sum(&store));
        }

        assert_eq!(participation_ids(&store), vec![1, 3]);
    }

    #[test]
    fn test_logged_out_mutations_rejected() {
        let mut store = SessionStore::new();
        let before = store.snapshot();

        assert_eq!(store.join(1), Err(SessionError::AuthRequired));
        assert_eq!(
            store.add_comment(1, "hi").unwrap_err(),
            SessionError::AuthRequired
        );
        assert_eq!(
            store.suggest(draft("X")).unwrap_err(),
            SessionError::AuthRequired
        );

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_logout_keeps_participations() {
        let mut store = logged_in("alice");
        store.join(1).unwrap();

        let user = store.logout().unwrap();
        assert_eq!(user.name, "alice");
        assert!(!store.is_logged_in());
        assert_eq!(store.total_points(), 100);
        assert_eq!(participation_ids(&store), vec![1]);

        // Cancel does not require a user
        assert!(store.cancel(1).is_some());
        assert_eq!(store.total_points(), 0);
    }

    #[test]
    fn test_comment_scenario() {
        let mut store = logged_in("alice");
        store.add_comment(2, "nice!").unwrap();

        let comments = store.comments(2);
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "alice");
        assert_eq!(comments[0].text, "nice!");
        assert!(comments[0].date <= Utc::now());
    }

    #[test]
    fn test_comments_keep_insertion_order() {
        let mut store = logged_in("alice");
        store.add_comment(1, "first").unwrap();
        store.login("bob", "");
        store.add_comment(1, "second").unwrap();
        store.add_comment(1, "").unwrap();

        let texts: Vec<_> = store.comments(1).iter().map(|c| c.text.as_str()).collect();
        let authors: Vec<_> = store.comments(1).iter().map(|c| c.author.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", ""]);
        assert_eq!(authors, vec!["alice", "bob", "bob"]);
        assert!(store.comments(2).is_empty());
    }

    #[test]
    fn test_suggest_appends_to_catalog() {
        let mut store = logged_in("alice");
        let mut rng = StdRng::seed_from_u64(3);
        let max_before = store.catalog().all().iter().map(|c| c.id).max().unwrap();

        let challenge = store.suggest_with_rng(draft("X"), &mut rng).unwrap().clone();

        assert_eq!(challenge.id, max_before + 1);
        assert_eq!(challenge.title, "X");
        assert_eq!(challenge.difficulty, Difficulty::Beginner);
        assert!(SUGGESTION_POINTS.contains(&challenge.points));
        assert_eq!(store.catalog().len(), 4);
    }

    #[test]
    fn test_suggested_challenge_can_be_joined() {
        let mut store = logged_in("alice");
        let id = store.suggest(draft("Portfolio")).unwrap().id;

        assert_eq!(store.join(id), Ok(true));
        assert_eq!(store.category_breakdown().count_for("recommended"), 1);
    }

    #[test]
    fn test_snapshot_comment_counts() {
        let mut store = logged_in("alice");
        store.add_comment(2, "a").unwrap();
        store.add_comment(2, "b").unwrap();
        store.add_comment(3, "c").unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.comment_counts.get(&2), Some(&2));
        assert_eq!(snapshot.comment_counts.get(&3), Some(&1));
        assert_eq!(snapshot.comment_counts.get(&1), None);
        assert_eq!(snapshot.challenges.len(), 3);
    }
}
