//! Question entity
//!
//! A drawn question together with the knowledge needed to phrase it and to
//! judge the player's answer.

use super::draft::{QuestionDraft, Solution};
use crate::attribute::{Attribute, AttributeValue};
use crate::core::string::{normalize, similarity, token_set_similarity};
use crate::member::Member;
use serde::{Deserialize, Serialize};

/// Minimal similarity for a free-text answer to count as correct
pub const ACCEPTANCE_THRESHOLD: f64 = 0.85;

/// Labels of the four options when the options are photos
pub const PHOTO_OPTIONS: [&str; 4] = ["Oben links", "Oben rechts", "Unten links", "Unten rechts"];

/// A player's reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    /// Zero-based option index
    Choice(usize),
    Text(String),
}

/// A question ready to be asked
#[derive(Debug, Clone)]
pub struct Question {
    draft: QuestionDraft,
}

impl Question {
    pub fn new(draft: QuestionDraft) -> Self {
        Self { draft }
    }

    pub fn member(&self) -> &Member {
        &self.draft.member
    }

    pub fn hint_attribute(&self) -> Attribute {
        self.draft.hint_attribute
    }

    pub fn attribute(&self) -> Attribute {
        self.draft.question_attribute
    }

    pub fn hint(&self) -> &AttributeValue {
        &self.draft.hint
    }

    pub fn is_multiple_choice(&self) -> bool {
        self.draft.is_multiple_choice()
    }

    pub fn draft(&self) -> &QuestionDraft {
        &self.draft
    }

    /// The options of a multiple choice question
    pub fn options(&self) -> Option<&[AttributeValue; 4]> {
        match &self.draft.solution {
            Solution::MultipleChoice { options, .. } => Some(options),
            Solution::FreeText { .. } => None,
        }
    }

    /// The correct option, or all accepted values joined by commas
    pub fn correct_answer(&self) -> String {
        match &self.draft.solution {
            Solution::MultipleChoice {
                options,
                correct_index,
            } => options
                .get(*correct_index)
                .map(ToString::to_string)
                .unwrap_or_default(),
            Solution::FreeText { answers } => answers
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// The text shown to the player
    pub fn text(&self) -> String {
        let hint = self.hint_phrase();
        let free_text = !self.is_multiple_choice();
        match self.attribute() {
            Attribute::FirstName => format!("Wie lautet der Vorname von {}?", hint),
            Attribute::LastName => format!("Wie lautet der Nachname von {}?", hint),
            Attribute::Nickname => format!("Wie lautet der Spitzname von {}?", hint),
            Attribute::FullName => format!("Wie lautet der volle Name von {}?", hint),
            Attribute::Address => format!("Wo wohnt {}?", hint),
            Attribute::Age => format!("Wie alt ist {}?", hint),
            Attribute::Birthday if free_text => format!(
                "An welchem Tag hat {} Geburtstag? Bitte gib das Datum im Format \"TT.MM.\" ein.",
                hint
            ),
            Attribute::Birthday => format!("An welchem Tag hat {} Geburtstag?", hint),
            Attribute::Instruments if free_text => {
                format!("Welches Instrument spielt {} (ggf. unter anderem)?", hint)
            }
            Attribute::Instruments => format!(
                "Welches dieser Instrumente spielt {} (ggf. unter anderem)?",
                hint
            ),
            Attribute::PhotoFileId => format!("Welches Bild zeigt {}?", hint),
            Attribute::Joined => format!("In welchem Jahr ist {} eingetreten?", hint),
            Attribute::Functions => format!("Welches Amt hat {} (ggf. unter anderem)?", hint),
        }
    }

    fn hint_phrase(&self) -> String {
        match self.hint_attribute() {
            Attribute::FirstName
            | Attribute::LastName
            | Attribute::Nickname
            | Attribute::FullName => self.draft.hint.to_string(),
            Attribute::PhotoFileId => "das Mitglied auf diesem Foto".to_string(),
            other => format!(
                "das Mitglied mit {} \"{}\"",
                other.label(),
                self.draft.hint
            ),
        }
    }

    /// Whether `answer` is correct
    ///
    /// A choice given for a free-text question (or text for a multiple choice
    /// question) is wrong.
    pub fn check(&self, answer: &Answer) -> bool {
        match (&self.draft.solution, answer) {
            (Solution::MultipleChoice { correct_index, .. }, Answer::Choice(choice)) => {
                choice == correct_index
            }
            (Solution::FreeText { answers }, Answer::Text(text)) => {
                check_free_text(self.attribute(), answers, text.trim())
            }
            _ => false,
        }
    }
}

fn check_free_text(attribute: Attribute, expected: &[AttributeValue], answer: &str) -> bool {
    if answer.is_empty() || expected.is_empty() {
        return false;
    }
    let expected_text = || expected.iter().map(ToString::to_string);
    match attribute {
        Attribute::FirstName | Attribute::LastName | Attribute::Nickname | Attribute::Functions => {
            expected_text().any(|value| similarity(&value, answer) >= ACCEPTANCE_THRESHOLD)
        }
        Attribute::FullName => expected_text().any(|value| {
            let value = value.replace('"', "");
            let score = (strsim::normalized_levenshtein(&normalize(&value), &normalize(answer))
                + token_set_similarity(&value, answer))
                / 2.0;
            score >= ACCEPTANCE_THRESHOLD
        }),
        Attribute::Instruments => {
            let all = expected_text().collect::<Vec<_>>().join(", ");
            std::iter::once(all)
                .chain(expected_text())
                .any(|value| similarity(&value, answer) >= ACCEPTANCE_THRESHOLD)
        }
        Attribute::Address => expected_text().any(|value| {
            similarity(&value, answer).max(token_set_similarity(&value, answer))
                >= ACCEPTANCE_THRESHOLD
        }),
        Attribute::Age | Attribute::Joined => expected_text().any(|value| value == answer),
        Attribute::Birthday => {
            let strip = |s: &str| {
                s.chars()
                    .filter(|c| !matches!(c, '0' | '.' | ',' | ';' | ' '))
                    .collect::<String>()
            };
            expected_text().any(|value| strip(&value) == strip(answer))
        }
        Attribute::PhotoFileId => false,
    }
}
