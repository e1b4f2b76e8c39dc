//! View Router
//!
//! Maps a navigation tab to the view model a client draws for it. Views are
//! plain data: cards, lists and chart slices, with timestamps already
//! formatted for display.

use serde::Serialize;
use std::str::FromStr;

use crate::domain::{
    CategoryBreakdown, Challenge, Comment, Difficulty, DifficultyFilter, Participation,
    SessionError, SessionResult, SessionStore, SUGGESTED_CATEGORY, SUGGESTION_DURATIONS,
};

/// Navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Catalog,
    MyParticipation,
    Suggest,
}

impl FromStr for Tab {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "catalog" | "challenges" => Ok(Tab::Catalog),
            "my-participation" | "mine" => Ok(Tab::MyParticipation),
            "suggest" => Ok(Tab::Suggest),
            _ => Err(SessionError::InvalidTab(s.to_string())),
        }
    }
}

/// Rendered view for one tab
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", rename_all = "kebab-case")]
pub enum View {
    Catalog(CatalogView),
    MyParticipation(ParticipationView),
    Suggest(SuggestView),
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub filter: String,
    pub cards: Vec<ChallengeCard>,
}

/// A challenge as shown in the catalog
#[derive(Debug, Clone, Serialize)]
pub struct ChallengeCard {
    #[serde(flatten)]
    pub challenge: Challenge,
    /// Selects the cancel button instead of the join button
    pub joined: bool,
    pub comments: Vec<CommentLine>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentLine {
    pub author: String,
    pub text: String,
    pub date: String,
}

impl From<&Comment> for CommentLine {
    fn from(comment: &Comment) -> Self {
        Self {
            author: comment.author.clone(),
            text: comment.text.clone(),
            date: comment.formatted_date(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipationView {
    pub total_points: u64,
    pub breakdown: CategoryBreakdown,
    pub entries: Vec<ParticipationLine>,
    /// Nothing joined yet
    pub empty: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParticipationLine {
    pub challenge_id: u32,
    pub title: String,
    pub category: String,
    pub points: u32,
    pub joined_on: String,
}

impl From<&Participation> for ParticipationLine {
    fn from(p: &Participation) -> Self {
        Self {
            challenge_id: p.challenge_id,
            title: p.title.clone(),
            category: p.category.clone(),
            points: p.points,
            joined_on: p.formatted_date(),
        }
    }
}

/// Options offered by the suggestion form
#[derive(Debug, Clone, Serialize)]
pub struct SuggestView {
    pub difficulties: Vec<Difficulty>,
    pub durations: Vec<String>,
    pub category: String,
}

/// Render the view for `tab`
///
/// `filter` only applies to the catalog tab. The participation and
/// suggestion tabs require a logged-in user.
pub fn render(store: &SessionStore, tab: Tab, filter: DifficultyFilter) -> SessionResult<View> {
    match tab {
        Tab::Catalog => Ok(View::Catalog(catalog_view(store, filter))),
        Tab::MyParticipation => {
            if !store.is_logged_in() {
                return Err(SessionError::AuthRequired);
            }
            Ok(View::MyParticipation(participation_view(store)))
        }
        Tab::Suggest => {
            if !store.is_logged_in() {
                return Err(SessionError::AuthRequired);
            }
            Ok(View::Suggest(suggest_view()))
        }
    }
}

pub fn catalog_view(store: &SessionStore, filter: DifficultyFilter) -> CatalogView {
    let cards = store
        .catalog()
        .filter(filter)
        .into_iter()
        .map(|challenge| ChallengeCard {
            joined: store.is_joined(challenge.id),
            comments: store
                .comments(challenge.id)
                .iter()
                .map(CommentLine::from)
                .collect(),
            challenge: challenge.clone(),
        })
        .collect();

    CatalogView {
        filter: filter.to_string(),
        cards,
    }
}

pub fn participation_view(store: &SessionStore) -> ParticipationView {
    let entries: Vec<ParticipationLine> = store
        .participations()
        .iter()
        .map(ParticipationLine::from)
        .collect();

    ParticipationView {
        total_points: store.total_points(),
        breakdown: store.category_breakdown(),
        empty: entries.is_empty(),
        entries,
    }
}

fn suggest_view() -> SuggestView {
    SuggestView {
        difficulties: Difficulty::all().to_vec(),
        durations: SUGGESTION_DURATIONS.iter().map(|d| d.to_string()).collect(),
        category: SUGGESTED_CATEGORY.to_string(),
    }
}
