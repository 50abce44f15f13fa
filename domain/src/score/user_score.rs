//! Per-player score history

use super::score::Score;
use crate::core::error::DomainError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Time span a leaderboard covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorePeriod {
    Today,
    /// Since Monday
    Week,
    Month,
    Year,
    #[default]
    Overall,
}

impl ScorePeriod {
    pub const ALL: [ScorePeriod; 5] = [
        ScorePeriod::Today,
        ScorePeriod::Week,
        ScorePeriod::Month,
        ScorePeriod::Year,
        ScorePeriod::Overall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScorePeriod::Today => "today",
            ScorePeriod::Week => "week",
            ScorePeriod::Month => "month",
            ScorePeriod::Year => "year",
            ScorePeriod::Overall => "overall",
        }
    }

    /// First day counted for this period, `None` for no limit
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            ScorePeriod::Today => Some(today),
            ScorePeriod::Week => today.checked_sub_days(Days::new(u64::from(
                today.weekday().num_days_from_monday(),
            ))),
            ScorePeriod::Month => today.with_day(1),
            ScorePeriod::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            ScorePeriod::Overall => None,
        }
    }
}

impl fmt::Display for ScorePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScorePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" | "day" | "heute" => Ok(ScorePeriod::Today),
            "week" | "woche" => Ok(ScorePeriod::Week),
            "month" | "monat" => Ok(ScorePeriod::Month),
            "year" | "jahr" => Ok(ScorePeriod::Year),
            "overall" | "all" | "gesamt" => Ok(ScorePeriod::Overall),
            other => Err(format!(
                "unknown period '{}', expected one of today, week, month, year, overall",
                other
            )),
        }
    }
}

/// Scores of one player, per day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserScore {
    days: BTreeMap<NaiveDate, Score>,
}

impl UserScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_to_score(
        &mut self,
        answers: u32,
        correct: u32,
        date: NaiveDate,
    ) -> Result<(), DomainError> {
        let added = Score::new(answers, correct)?;
        let score = self.days.entry(date).or_default();
        *score = *score + added;
        Ok(())
    }

    pub fn score_on(&self, date: NaiveDate) -> Score {
        self.days.get(&date).copied().unwrap_or_default()
    }

    /// Cumulative score over `period`, as seen on `today`
    pub fn score(&self, period: ScorePeriod, today: NaiveDate) -> Score {
        match period.start(today) {
            Some(start) => self.days.range(start..).map(|(_, score)| *score).sum(),
            None => self.days.values().copied().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_start() {
        // A Thursday
        let today = date(2020, 10, 8);
        assert_eq!(ScorePeriod::Today.start(today), Some(today));
        assert_eq!(ScorePeriod::Week.start(today), Some(date(2020, 10, 5)));
        assert_eq!(ScorePeriod::Month.start(today), Some(date(2020, 10, 1)));
        assert_eq!(ScorePeriod::Year.start(today), Some(date(2020, 1, 1)));
        assert_eq!(ScorePeriod::Overall.start(today), None);
    }

    #[test]
    fn test_parse_period() {
        assert_eq!("Woche".parse::<ScorePeriod>().unwrap(), ScorePeriod::Week);
        assert_eq!("overall".parse::<ScorePeriod>().unwrap(), ScorePeriod::Overall);
        assert!("decade".parse::<ScorePeriod>().is_err());
    }

    #[test]
    fn test_cumulative_scores() {
        let today = date(2020, 10, 8);
        let mut score = UserScore::new();
        score.add_to_score(2, 1, today).unwrap();
        score.add_to_score(1, 1, today).unwrap();
        score.add_to_score(4, 2, date(2020, 10, 5)).unwrap();
        score.add_to_score(3, 3, date(2020, 9, 30)).unwrap();
        score.add_to_score(5, 0, date(2019, 12, 31)).unwrap();

        assert_eq!(score.score_on(today), Score::new(3, 2).unwrap());
        assert_eq!(score.score(ScorePeriod::Today, today), Score::new(3, 2).unwrap());
        assert_eq!(score.score(ScorePeriod::Week, today), Score::new(7, 4).unwrap());
        assert_eq!(score.score(ScorePeriod::Month, today), Score::new(7, 4).unwrap());
        assert_eq!(score.score(ScorePeriod::Year, today), Score::new(10, 7).unwrap());
        assert_eq!(score.score(ScorePeriod::Overall, today), Score::new(15, 7).unwrap());
    }

    #[test]
    fn test_add_invalid_score() {
        let mut score = UserScore::new();
        assert!(score.add_to_score(1, 2, date(2020, 1, 1)).is_err());
        assert_eq!(score, UserScore::new());
    }
}
