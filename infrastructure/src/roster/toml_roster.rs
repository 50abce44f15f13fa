//! TOML roster file reader
//!
//! The roster is a list of `[[members]]` tables:
//!
//! ```toml
//! [[members]]
//! id = 123456
//! first_name = "Anna"
//! last_name = "Schmidt"
//! gender = "f"
//! date_of_birth = "1996-05-02"
//! instruments = ["trp", "Flügelhorn"]
//! joined = 2012
//! functions = ["Kassenwart"]
//! ```

use akanamen_application::ports::roster_source::{RosterError, RosterSource};
use akanamen_domain::{Gender, Instrument, Member};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading a roster file
#[derive(Error, Debug)]
pub enum RosterFileError {
    #[error("Could not read roster file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse roster file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid record for member {member}: {message}")]
    InvalidMember { member: i64, message: String },
}

impl From<RosterFileError> for RosterError {
    fn from(e: RosterFileError) -> Self {
        match e {
            RosterFileError::Io { .. } => RosterError::Unavailable(e.to_string()),
            RosterFileError::Parse(_) => RosterError::Malformed(e.to_string()),
            RosterFileError::InvalidMember { member, message } => {
                RosterError::InvalidMember { member, message }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    members: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RosterEntry {
    id: i64,
    phone_number: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    nickname: Option<String>,
    gender: Option<String>,
    date_of_birth: Option<String>,
    #[serde(default)]
    instruments: Vec<String>,
    address: Option<String>,
    photo_file_id: Option<String>,
    joined: Option<i32>,
    #[serde(default)]
    functions: Vec<String>,
    #[serde(default)]
    allow_contact_sharing: bool,
}

impl RosterEntry {
    fn into_member(self) -> Result<Member, RosterFileError> {
        let invalid = |message: String| RosterFileError::InvalidMember {
            member: self.id,
            message,
        };

        let gender = self
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()
            .map_err(|e| invalid(e.to_string()))?;
        let date_of_birth = self
            .date_of_birth
            .as_deref()
            .map(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d"))
            .transpose()
            .map_err(|e| invalid(format!("date_of_birth: {}", e)))?;
        let instruments = self
            .instruments
            .iter()
            .map(|name| name.parse::<Instrument>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Member {
            id: self.id.into(),
            phone_number: self.phone_number,
            first_name: self.first_name,
            last_name: self.last_name,
            nickname: self.nickname,
            gender,
            date_of_birth,
            instruments,
            address: self.address,
            photo_file_id: self.photo_file_id,
            joined: self.joined,
            functions: self.functions,
            allow_contact_sharing: self.allow_contact_sharing,
        })
    }
}

/// Parse roster file contents
pub fn parse_roster(text: &str) -> Result<Vec<Member>, RosterFileError> {
    let file: RosterFile = toml::from_str(text)?;
    file.members
        .into_iter()
        .map(RosterEntry::into_member)
        .collect()
}

/// [`RosterSource`] reading a TOML roster file
pub struct TomlRosterSource {
    path: PathBuf,
}

impl TomlRosterSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the roster file
    pub async fn read(&self) -> Result<Vec<Member>, RosterFileError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| RosterFileError::Io {
                path: self.path.clone(),
                source,
            })?;
        let members = parse_roster(&text)?;
        debug!(
            path = %self.path.display(),
            members = members.len(),
            "Read roster file"
        );
        Ok(members)
    }
}

#[async_trait]
impl RosterSource for TomlRosterSource {
    async fn load(&self) -> Result<Vec<Member>, RosterError> {
        Ok(self.read().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use akanamen_domain::MemberId;
    use std::io::Write;

    const ROSTER: &str = r#"
[[members]]
id = 1
first_name = "Anna"
last_name = "Schmidt"
nickname = "Nanni"
gender = "w"
date_of_birth = "1996-05-02"
instruments = ["trp", "Flügelhorn"]
address = "Universitätsplatz 2, 38106 Braunschweig"
photo_file_id = "photo-1"
joined = 2012
functions = ["Kassenwart"]
allow_contact_sharing = true

[[members]]
id = 2
last_name = "Jones"
"#;

    #[test]
    fn test_parse_roster() {
        let members = parse_roster(ROSTER).unwrap();
        assert_eq!(members.len(), 2);

        let anna = &members[0];
        assert_eq!(anna.id, MemberId::new(1));
        assert_eq!(anna.gender, Some(Gender::Female));
        assert_eq!(anna.date_of_birth, NaiveDate::from_ymd_opt(1996, 5, 2));
        assert_eq!(
            anna.instruments,
            vec![Instrument::Trumpet, Instrument::Flugelhorn]
        );
        assert_eq!(anna.joined, Some(2012));
        assert!(anna.allow_contact_sharing);
        assert_eq!(
            anna.full_name().as_deref(),
            Some("Anna \"Nanni\" Schmidt")
        );

        let jones = &members[1];
        assert!(jones.first_name.is_none());
        assert!(jones.instruments.is_empty());
        assert!(!jones.allow_contact_sharing);
    }

    #[test]
    fn test_empty_roster() {
        assert!(parse_roster("").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_instrument_names_member() {
        let text = "[[members]]\nid = 7\ninstruments = [\"kazoo\"]\n";
        let err = parse_roster(text).unwrap_err();
        assert!(matches!(err, RosterFileError::InvalidMember { member: 7, .. }));
        assert!(err.to_string().contains("kazoo"));
    }

    #[test]
    fn test_bad_gender_and_date() {
        let gender = parse_roster("[[members]]\nid = 3\ngender = \"x\"\n").unwrap_err();
        assert!(matches!(gender, RosterFileError::InvalidMember { member: 3, .. }));

        let date = parse_roster("[[members]]\nid = 4\ndate_of_birth = \"02.05.1996\"\n")
            .unwrap_err();
        assert!(matches!(date, RosterFileError::InvalidMember { member: 4, .. }));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_roster("[[members]]\nid = \"one\"\n"),
            Err(RosterFileError::Parse(_))
        ));
        assert!(matches!(
            parse_roster("[[members]]\nid = 1\nshoe_size = 44\n"),
            Err(RosterFileError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ROSTER.as_bytes()).unwrap();

        let source = TomlRosterSource::new(file.path());
        let members = source.load().await.unwrap();
        assert_eq!(members.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = TomlRosterSource::new(dir.path().join("missing.toml"));
        assert!(matches!(
            source.load().await,
            Err(RosterError::Unavailable(_))
        ));
    }
}
