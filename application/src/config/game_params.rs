//! Game parameters: quiz session control.
//!
//! [`GameParams`] groups the static parameters of a
//! [`Questioner`](crate::use_cases::questioner::Questioner) session. They come
//! from the `[game]` config section and the `play` command line.

use akanamen_domain::Attribute;
use serde::{Deserialize, Serialize};

/// Quiz session parameters.
///
/// Empty attribute lists mean "every attribute".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameParams {
    /// Number of questions in one game.
    pub questions: usize,
    /// Ask with four options instead of free text.
    pub multiple_choice: bool,
    /// Attributes that may be revealed as hint.
    pub hints: Vec<Attribute>,
    /// Attributes that may be asked for.
    pub questions_attributes: Vec<Attribute>,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            questions: 10,
            multiple_choice: true,
            hints: Vec::new(),
            questions_attributes: Vec::new(),
        }
    }
}

impl GameParams {
    // ==================== Builder Methods ====================

    pub fn with_questions(mut self, questions: usize) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_multiple_choice(mut self, multiple_choice: bool) -> Self {
        self.multiple_choice = multiple_choice;
        self
    }

    pub fn with_hints(mut self, hints: impl IntoIterator<Item = Attribute>) -> Self {
        self.hints = hints.into_iter().collect();
        self
    }

    pub fn with_questions_attributes(
        mut self,
        attributes: impl IntoIterator<Item = Attribute>,
    ) -> Self {
        self.questions_attributes = attributes.into_iter().collect();
        self
    }

    // ==================== Derived ====================

    /// Hint attributes, with the empty list expanded to all
    pub fn hint_attributes(&self) -> Vec<Attribute> {
        expand(&self.hints)
    }

    /// Question attributes, with the empty list expanded to all
    pub fn question_attributes(&self) -> Vec<Attribute> {
        expand(&self.questions_attributes)
    }

    /// Whether hints and questions are restricted to one and the same attribute
    pub fn is_self_referential(&self) -> bool {
        matches!(
            (self.hints.as_slice(), self.questions_attributes.as_slice()),
            ([hint], [question]) if hint == question
        )
    }

    /// Every configured (hint, question) pair that may ever be asked
    pub fn pairs(&self) -> Vec<(Attribute, Attribute)> {
        let questions = self.question_attributes();
        self.hint_attributes()
            .into_iter()
            .flat_map(|hint| {
                questions
                    .iter()
                    .copied()
                    .filter(move |question| hint.can_pair_with(*question))
                    .map(move |question| (hint, question))
            })
            .collect()
    }
}

fn expand(attributes: &[Attribute]) -> Vec<Attribute> {
    if attributes.is_empty() {
        Attribute::ALL.to_vec()
    } else {
        let mut attributes = attributes.to_vec();
        attributes.sort();
        attributes.dedup();
        attributes
    }
}
