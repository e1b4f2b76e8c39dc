//! Participation report
//!
//! Groups a session's participations by category. The result is the data a
//! pie chart is drawn from; drawing it is left to the client.

use serde::Serialize;

use super::types::Participation;

/// One slice of the category breakdown
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub count: usize,
    /// Fraction of all participations, in 0.0..=1.0
    pub share: f64,
}

/// Category → count mapping in first-seen order
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CategoryBreakdown {
    pub slices: Vec<CategorySlice>,
    pub total: usize,
}

impl CategoryBreakdown {
    pub fn from_participations(participations: &[Participation]) -> Self {
        let total = participations.len();
        let slices = category_counts(participations)
            .into_iter()
            .map(|(category, count)| CategorySlice {
                share: count as f64 / total as f64,
                category,
                count,
            })
            .collect();

        Self { slices, total }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count for one category, zero when absent
    pub fn count_for(&self, category: &str) -> usize {
        self.slices
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}

/// Count participations per category, keeping first-seen order
pub fn category_counts(participations: &[Participation]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();

    for p in participations {
        match counts.iter_mut().find(|(category, _)| *category == p.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((p.category.clone(), 1)),
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Challenge, Difficulty};
    use chrono::Utc;

    fn participation(id: u32, category: &str) -> Participation {
        let challenge = Challenge::new(id, format!("c{}", id), Difficulty::Beginner, 100)
            .category(category);
        Participation::from_challenge(&challenge, Utc::now())
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown = CategoryBreakdown::from_participations(&[]);
        assert!(breakdown.is_empty());
        assert!(breakdown.slices.is_empty());
    }

    #[test]
    fn test_counts_in_first_seen_order() {
        let participations = vec![
            participation(1, "JavaScript"),
            participation(2, "Web Basics"),
            participation(3, "JavaScript"),
        ];

        let counts = category_counts(&participations);
        assert_eq!(
            counts,
            vec![("JavaScript".to_string(), 2), ("Web Basics".to_string(), 1)]
        );
    }

    #[test]
    fn test_shares() {
        let participations = vec![
            participation(1, "recommended"),
            participation(2, "recommended"),
            participation(3, "recommended"),
            participation(4, "API Integration"),
        ];

        let breakdown = CategoryBreakdown::from_participations(&participations);
        assert_eq!(breakdown.total, 4);
        assert_eq!(breakdown.count_for("recommended"), 3);
        assert_eq!(breakdown.count_for("missing"), 0);
        assert!((breakdown.slices[0].share - 0.75).abs() < f64::EPSILON);
        assert!((breakdown.slices[1].share - 0.25).abs() < f64::EPSILON);
    }
}
