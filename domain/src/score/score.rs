//! Score value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Add;

/// Number of given and of correct answers
///
/// Scores are ordered by [`Score::ratio`], then by the number of answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    answers: u32,
    correct: u32,
}

impl Score {
    pub fn new(answers: u32, correct: u32) -> Result<Self, DomainError> {
        if correct > answers {
            return Err(DomainError::InvalidScore(format!(
                "{} correct answers out of {}",
                correct, answers
            )));
        }
        Ok(Self { answers, correct })
    }

    pub fn answers(&self) -> u32 {
        self.answers
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn is_empty(&self) -> bool {
        self.answers == 0
    }

    /// Percentage of correct answers, rounded to two decimals
    pub fn ratio(&self) -> f64 {
        if self.answers == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.correct) / f64::from(self.answers) * 100.0;
        (ratio * 100.0).round() / 100.0
    }

    /// Add `answers` answers of which `correct` were correct
    pub fn record(&mut self, answers: u32, correct: u32) -> Result<(), DomainError> {
        *self = *self + Score::new(answers, correct)?;
        Ok(())
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, other: Score) -> Score {
        Score {
            answers: self.answers.saturating_add(other.answers),
            correct: self.correct.saturating_add(other.correct),
        }
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Score>>(iter: I) -> Self {
        iter.fold(Score::default(), Add::add)
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ratio()
            .total_cmp(&other.ratio())
            .then(self.answers.cmp(&other.answers))
            .then(self.correct.cmp(&other.correct))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_more_correct_than_answers() {
        assert!(matches!(Score::new(1, 2), Err(DomainError::InvalidScore(_))));
        let mut score = Score::new(1, 1).unwrap();
        assert!(score.record(0, 1).is_err());
        assert_eq!(score, Score::new(1, 1).unwrap());
    }

    #[test]
    fn test_ratio() {
        assert_eq!(Score::default().ratio(), 0.0);
        assert_eq!(Score::new(3, 1).unwrap().ratio(), 33.33);
        assert_eq!(Score::new(3, 2).unwrap().ratio(), 66.67);
        assert_eq!(Score::new(4, 4).unwrap().ratio(), 100.0);
    }

    #[test]
    fn test_ordering() {
        let half = Score::new(2, 1).unwrap();
        let more_half = Score::new(10, 5).unwrap();
        let full = Score::new(1, 1).unwrap();
        assert!(half < more_half);
        assert!(more_half < full);
        let mut scores = vec![full, half, more_half];
        scores.sort();
        assert_eq!(scores, vec![half, more_half, full]);
    }

    #[test]
    fn test_sum() {
        let total: Score = [Score::new(2, 1).unwrap(), Score::new(3, 3).unwrap()]
            .into_iter()
            .sum();
        assert_eq!(total, Score::new(5, 4).unwrap());
    }
}
