//! Challenge catalog
//!
//! Holds the challenges a session can see, in insertion order. A fresh
//! catalog is seeded with three entries; suggestions append to it.

use rand::Rng;
use serde::Serialize;

use super::types::{Challenge, ChallengeId, Difficulty, DifficultyFilter};

/// Category assigned to every suggested challenge
pub const SUGGESTED_CATEGORY: &str = "recommended";

/// Point values a suggested challenge can be awarded
pub const SUGGESTION_POINTS: [u32; 3] = [100, 200, 300];

/// Durations offered by the suggestion form
pub const SUGGESTION_DURATIONS: [&str; 4] = ["1 week", "2 weeks", "3 weeks", "4 weeks"];

/// Ordered list of challenges
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    challenges: Vec<Challenge>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the three seed challenges
    pub fn seeded() -> Self {
        Self {
            challenges: seed_challenges(),
        }
    }

    pub fn all(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn len(&self) -> usize {
        self.challenges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }

    /// Look up a challenge by id
    pub fn get(&self, id: ChallengeId) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Id the next appended challenge will receive (highest id + 1)
    pub fn next_id(&self) -> ChallengeId {
        self.challenges.iter().map(|c| c.id).max().unwrap_or(0) + 1
    }

    /// Challenges passing `filter`, in catalog order
    pub fn filter(&self, filter: DifficultyFilter) -> Vec<&Challenge> {
        filter_by_difficulty(&self.challenges, filter)
    }

    /// Append a suggested challenge and return it
    ///
    /// The id is [`Catalog::next_id`], the category is fixed, and the
    /// points are drawn uniformly from [`SUGGESTION_POINTS`].
    pub fn add_suggestion<R: Rng>(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        difficulty: Difficulty,
        duration: impl Into<String>,
        rng: &mut R,
    ) -> &Challenge {
        let points = SUGGESTION_POINTS[rng.random_range(0..SUGGESTION_POINTS.len())];
        let challenge = Challenge::new(self.next_id(), title, difficulty, points)
            .description(description)
            .category(SUGGESTED_CATEGORY)
            .duration(duration);

        let index = self.challenges.len();
        self.challenges.push(challenge);
        &self.challenges[index]
    }
}

/// Order-preserving subsequence of `challenges` matching `level`
pub fn filter_by_difficulty(challenges: &[Challenge], level: DifficultyFilter) -> Vec<&Challenge> {
    challenges
        .iter()
        .filter(|c| level.matches(c.difficulty))
        .collect()
}

fn seed_challenges() -> Vec<Challenge> {
    vec![
        Challenge::new(1, "Build your first web page", Difficulty::Beginner, 100)
            .description("Use HTML and CSS to build a simple personal web page.")
            .category("Web Basics")
            .duration("1 week"),
        Challenge::new(2, "Build a to-do list", Difficulty::Intermediate, 200)
            .description("Use JavaScript to build an app that manages a list of tasks.")
            .category("JavaScript")
            .duration("2 weeks"),
        Challenge::new(3, "Build a weather app", Difficulty::Advanced, 300)
            .description("Use a public API to show live weather information.")
            .category("API Integration")
            .duration("3 weeks"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_seeded_catalog() {
        let catalog = Catalog::seeded();
        let ids: Vec<_> = catalog.all().iter().map(|c| c.id).collect();
        let points: Vec<_> = catalog.all().iter().map(|c| c.points).collect();

        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(points, vec![100, 200, 300]);
        assert_eq!(catalog.next_id(), 4);
    }

    #[test]
    fn test_filter_all_returns_everything() {
        let catalog = Catalog::seeded();
        let filtered = catalog.filter(DifficultyFilter::All);

        assert_eq!(filtered.len(), catalog.len());
        for (a, b) in filtered.iter().zip(catalog.all()) {
            assert_eq!(*a, b);
        }
    }

    #[test]
    fn test_filter_by_level() {
        let mut catalog = Catalog::seeded();
        let mut rng = StdRng::seed_from_u64(1);
        catalog.add_suggestion("Portfolio", "", Difficulty::Beginner, "1 week", &mut rng);

        for level in Difficulty::all() {
            let filtered = catalog.filter(DifficultyFilter::Only(*level));
            assert!(filtered.iter().all(|c| c.difficulty == *level));
        }

        let beginner: Vec<_> = catalog
            .filter(DifficultyFilter::Only(Difficulty::Beginner))
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(beginner, vec![1, 4]);
    }

    #[test]
    fn test_filter_empty_input() {
        assert!(filter_by_difficulty(&[], DifficultyFilter::All).is_empty());
    }

    #[test]
    fn test_add_suggestion() {
        let mut catalog = Catalog::seeded();
        let mut rng = StdRng::seed_from_u64(42);
        let challenge = catalog
            .add_suggestion("X", "Y", Difficulty::Beginner, "1week", &mut rng)
            .clone();

        assert_eq!(challenge.id, 4);
        assert_eq!(challenge.category, SUGGESTED_CATEGORY);
        assert_eq!(challenge.duration, "1week");
        assert!(SUGGESTION_POINTS.contains(&challenge.points));
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(4), Some(&challenge));
    }

    #[test]
    fn test_suggestion_points_stay_in_range() {
        let mut catalog = Catalog::new();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            catalog.add_suggestion("t", "d", Difficulty::Advanced, "2 weeks", &mut rng);
        }
        assert!(catalog
            .all()
            .iter()
            .all(|c| SUGGESTION_POINTS.contains(&c.points)));
        assert_eq!(catalog.all().last().map(|c| c.id), Some(50));
    }
}
