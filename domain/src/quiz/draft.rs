//! Raw question material drawn from the indexes

use crate::attribute::{Attribute, AttributeValue};
use crate::member::Member;
use serde::Serialize;

/// What the player has to find
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Solution {
    /// Four options, exactly one of which describes the member
    MultipleChoice {
        options: [AttributeValue; 4],
        correct_index: usize,
    },
    /// Every value the member holds for the question attribute is accepted
    FreeText { answers: Vec<AttributeValue> },
}

/// A question as drawn by
/// [`AttributeManager::build_question_with`](crate::index::AttributeManager::build_question_with)
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDraft {
    pub member: Member,
    pub hint_attribute: Attribute,
    pub question_attribute: Attribute,
    /// The value revealed to the player
    pub hint: AttributeValue,
    pub solution: Solution,
}

impl QuestionDraft {
    pub fn is_multiple_choice(&self) -> bool {
        matches!(self.solution, Solution::MultipleChoice { .. })
    }
}
