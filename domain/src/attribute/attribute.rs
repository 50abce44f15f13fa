//! Attribute value object
//!
//! The closed set of member properties the quiz can ask about. Each variant
//! knows how to pull its values out of a [`Member`] and which indexing
//! strategy its manager uses.

use super::strategy::IndexingStrategy;
use super::value::AttributeValue;
use crate::core::error::DomainError;
use crate::member::Member;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// An indexable property of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    FirstName,
    LastName,
    Nickname,
    FullName,
    Age,
    Birthday,
    Instruments,
    Address,
    PhotoFileId,
    Joined,
    Functions,
}

impl Attribute {
    pub const ALL: [Attribute; 11] = [
        Attribute::FirstName,
        Attribute::LastName,
        Attribute::Nickname,
        Attribute::FullName,
        Attribute::Age,
        Attribute::Birthday,
        Attribute::Instruments,
        Attribute::Address,
        Attribute::PhotoFileId,
        Attribute::Joined,
        Attribute::Functions,
    ];

    /// Position in [`Attribute::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::FirstName => "first_name",
            Attribute::LastName => "last_name",
            Attribute::Nickname => "nickname",
            Attribute::FullName => "full_name",
            Attribute::Age => "age",
            Attribute::Birthday => "birthday",
            Attribute::Instruments => "instruments",
            Attribute::Address => "address",
            Attribute::PhotoFileId => "photo_file_id",
            Attribute::Joined => "joined",
            Attribute::Functions => "functions",
        }
    }

    /// Human readable (German) label, as shown to players
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::FirstName => "Vorname",
            Attribute::LastName => "Nachname",
            Attribute::Nickname => "Spitzname",
            Attribute::FullName => "Name",
            Attribute::Age => "Alter",
            Attribute::Birthday => "Geburtstag",
            Attribute::Instruments => "Instrument",
            Attribute::Address => "Adresse",
            Attribute::PhotoFileId => "Foto",
            Attribute::Joined => "Beitrittsjahr",
            Attribute::Functions => "Ämter",
        }
    }

    pub fn strategy(&self) -> IndexingStrategy {
        match self {
            Attribute::FirstName | Attribute::FullName => IndexingStrategy::by_gender(),
            Attribute::Age => IndexingStrategy::daily(),
            _ => IndexingStrategy::flat(),
        }
    }

    /// Whether a question about `question` may be asked given a hint of this attribute
    ///
    /// Never the attribute itself. The full name contains first name, last
    /// name and nickname, so those never pair with it in either direction.
    pub fn can_pair_with(&self, question: Attribute) -> bool {
        if *self == question {
            return false;
        }
        let contains = |whole: Attribute, part: Attribute| {
            whole == Attribute::FullName
                && matches!(
                    part,
                    Attribute::FirstName | Attribute::LastName | Attribute::Nickname
                )
        };
        !contains(*self, question) && !contains(question, *self)
    }

    /// All attributes that may serve as question for this one as hint
    pub fn questionable(&self) -> Vec<Attribute> {
        Self::ALL
            .iter()
            .copied()
            .filter(|other| self.can_pair_with(*other))
            .collect()
    }

    /// Whether free-text answers are accepted for this attribute
    pub fn allows_free_text(&self) -> bool {
        !matches!(self, Attribute::PhotoFileId)
    }

    /// Extract the member's values for this attribute
    ///
    /// An empty vector means the member has no value. List-valued attributes
    /// yield each distinct element once. `today` is only consulted for
    /// [`Attribute::Age`].
    pub fn values_of(&self, member: &Member, today: NaiveDate) -> Vec<AttributeValue> {
        let text = |value: &Option<String>| -> Vec<AttributeValue> {
            value
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| AttributeValue::Text(v.clone()))
                .into_iter()
                .collect()
        };
        match self {
            Attribute::FirstName => text(&member.first_name),
            Attribute::LastName => text(&member.last_name),
            Attribute::Nickname => text(&member.nickname),
            Attribute::FullName => text(&member.full_name()),
            Attribute::Address => text(&member.address),
            Attribute::PhotoFileId => text(&member.photo_file_id),
            Attribute::Birthday => text(&member.birthday()),
            Attribute::Age => member
                .age_on(today)
                .map(|age| AttributeValue::Number(i64::from(age)))
                .into_iter()
                .collect(),
            Attribute::Joined => member
                .joined
                .map(|year| AttributeValue::Number(i64::from(year)))
                .into_iter()
                .collect(),
            Attribute::Instruments => member
                .instruments
                .iter()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(AttributeValue::Instrument)
                .collect(),
            Attribute::Functions => member
                .functions
                .iter()
                .filter(|f| !f.trim().is_empty())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(AttributeValue::Text)
                .collect(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == needle || a.label().to_lowercase() == needle)
            .ok_or_else(|| DomainError::UnknownAttribute(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Instrument;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("last_name".parse::<Attribute>().unwrap(), Attribute::LastName);
        assert_eq!("Photo-File-Id".parse::<Attribute>().unwrap(), Attribute::PhotoFileId);
        assert_eq!("Alter".parse::<Attribute>().unwrap(), Attribute::Age);
        assert_eq!(Attribute::FullName.to_string(), "full_name");
        assert!(matches!(
            "shoe_size".parse::<Attribute>(),
            Err(DomainError::UnknownAttribute(_))
        ));
    }

    #[test]
    fn test_index_matches_all() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
        }
    }

    #[test]
    fn test_pairing_rules() {
        assert!(!Attribute::Age.can_pair_with(Attribute::Age));
        assert!(!Attribute::FullName.can_pair_with(Attribute::FirstName));
        assert!(!Attribute::Nickname.can_pair_with(Attribute::FullName));
        assert!(Attribute::FullName.can_pair_with(Attribute::Instruments));
        assert!(Attribute::FirstName.can_pair_with(Attribute::LastName));

        let questionable = Attribute::FullName.questionable();
        assert_eq!(questionable.len(), Attribute::ALL.len() - 4);
        assert!(!questionable.contains(&Attribute::LastName));
    }

    #[test]
    fn test_strategies() {
        assert_eq!(Attribute::FirstName.strategy(), IndexingStrategy::by_gender());
        assert_eq!(Attribute::Age.strategy(), IndexingStrategy::daily());
        assert_eq!(Attribute::Address.strategy(), IndexingStrategy::flat());
    }

    #[test]
    fn test_values_of_scalar_and_missing() {
        let member = Member::new(1).with_last_name("Smith").with_first_name("  ");
        assert_eq!(
            Attribute::LastName.values_of(&member, today()),
            vec![AttributeValue::from("Smith")]
        );
        assert!(Attribute::FirstName.values_of(&member, today()).is_empty());
        assert!(Attribute::Age.values_of(&member, today()).is_empty());
    }

    #[test]
    fn test_values_of_list_deduplicates() {
        let member = Member::new(1)
            .with_instruments([Instrument::Tuba, Instrument::Trumpet, Instrument::Tuba])
            .with_functions(["Kassenwart", "Kassenwart"]);
        assert_eq!(Attribute::Instruments.values_of(&member, today()).len(), 2);
        assert_eq!(Attribute::Functions.values_of(&member, today()).len(), 1);
    }

    #[test]
    fn test_values_of_age_uses_today() {
        let member =
            Member::new(1).with_date_of_birth(NaiveDate::from_ymd_opt(1996, 5, 2).unwrap());
        assert_eq!(
            Attribute::Age.values_of(&member, today()),
            vec![AttributeValue::Number(23)]
        );
        let tomorrow = today().succ_opt().unwrap();
        assert_eq!(
            Attribute::Age.values_of(&member, tomorrow),
            vec![AttributeValue::Number(24)]
        );
    }
}
