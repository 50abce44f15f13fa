//! Member entity

use super::gender::Gender;
use super::instrument::Instrument;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable identifier of a member (the chat user id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(i64);

impl MemberId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MemberId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A member of the orchestra (Entity)
///
/// Identity is the [`MemberId`]: two records with the same id are equal no
/// matter how their attributes differ. Indexes keep their own copies of a
/// member, so changing a `Member` value has no effect on any index until it
/// is re-submitted through `update_member`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub phone_number: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub instruments: Vec<Instrument>,
    pub address: Option<String>,
    pub photo_file_id: Option<String>,
    /// Year the member joined the orchestra
    pub joined: Option<i32>,
    /// Free-text roles, e.g. "Kassenwart"
    pub functions: Vec<String>,
    pub allow_contact_sharing: bool,
}

impl Member {
    pub fn new(id: impl Into<MemberId>) -> Self {
        Self {
            id: id.into(),
            phone_number: None,
            first_name: None,
            last_name: None,
            nickname: None,
            gender: None,
            date_of_birth: None,
            instruments: Vec::new(),
            address: None,
            photo_file_id: None,
            joined: None,
            functions: Vec::new(),
            allow_contact_sharing: false,
        }
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn with_instruments(mut self, instruments: impl IntoIterator<Item = Instrument>) -> Self {
        self.instruments = instruments.into_iter().collect();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_photo_file_id(mut self, photo_file_id: impl Into<String>) -> Self {
        self.photo_file_id = Some(photo_file_id.into());
        self
    }

    pub fn with_joined(mut self, year: i32) -> Self {
        self.joined = Some(year);
        self
    }

    pub fn with_functions<S: Into<String>>(mut self, functions: impl IntoIterator<Item = S>) -> Self {
        self.functions = functions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_contact_sharing(mut self, allow: bool) -> Self {
        self.allow_contact_sharing = allow;
        self
    }

    /// First name, quoted nickname and last name
    ///
    /// Only the nickname (unquoted) if neither first nor last name is known;
    /// `None` if there is no name at all.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name, &self.nickname) {
            (None, None, None) => None,
            (None, None, Some(nickname)) => Some(nickname.clone()),
            (first, last, nickname) => {
                let nickname = nickname.as_ref().map(|n| format!("\"{}\"", n));
                let parts: Vec<&str> = [first.as_deref(), nickname.as_deref(), last.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                Some(parts.join(" "))
            }
        }
    }

    /// Completed years of life on `today`
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        let born = self.date_of_birth?;
        let had_birthday = (today.month(), today.day()) >= (born.month(), born.day());
        let years = today.year() - born.year() - if had_birthday { 0 } else { 1 };
        u32::try_from(years).ok()
    }

    /// Birthday as `DD.MM.`
    pub fn birthday(&self) -> Option<String> {
        self.date_of_birth
            .map(|d| format!("{:02}.{:02}.", d.day(), d.month()))
    }

    /// Comma separated instrument names, `None` if the member plays nothing
    pub fn instruments_str(&self) -> Option<String> {
        if self.instruments.is_empty() {
            return None;
        }
        Some(
            self.instruments
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_equality_by_id() {
        let a = Member::new(1).with_first_name("A");
        let b = Member::new(1).with_first_name("B");
        assert_eq!(a, b);
        assert_ne!(a, Member::new(2));
    }

    #[test]
    fn test_full_name() {
        assert_eq!(Member::new(1).full_name(), None);
        assert_eq!(
            Member::new(1).with_nickname("Jimbo").full_name().as_deref(),
            Some("Jimbo")
        );
        assert_eq!(
            Member::new(1)
                .with_first_name("first_name")
                .with_nickname("nickname")
                .with_last_name("last_name")
                .full_name()
                .as_deref(),
            Some("first_name \"nickname\" last_name")
        );
        assert_eq!(
            Member::new(1).with_last_name("Silver").full_name().as_deref(),
            Some("Silver")
        );
    }

    #[test]
    fn test_age_on() {
        let member = Member::new(1).with_date_of_birth(date(1996, 10, 8));
        assert_eq!(member.age_on(date(2020, 9, 5)), Some(23));
        assert_eq!(member.age_on(date(2020, 10, 8)), Some(24));
        assert_eq!(Member::new(2).age_on(date(2020, 1, 1)), None);
    }

    #[test]
    fn test_birthday() {
        let member = Member::new(1).with_date_of_birth(date(1999, 12, 31));
        assert_eq!(member.birthday().as_deref(), Some("31.12."));
        let member = Member::new(1).with_date_of_birth(date(2000, 3, 4));
        assert_eq!(member.birthday().as_deref(), Some("04.03."));
    }

    #[test]
    fn test_instruments_str() {
        assert_eq!(Member::new(1).instruments_str(), None);
        let member = Member::new(1).with_instruments([Instrument::Tuba, Instrument::Trumpet]);
        assert_eq!(member.instruments_str().as_deref(), Some("Tuba, Trompete"));
    }
}
