//! Game configuration from TOML (`[game]` section)

use akanamen_application::GameParams;
use akanamen_domain::{Attribute, ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Raw game configuration from TOML
///
/// Attribute lists stay strings here so unknown names can be reported
/// instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGameConfig {
    /// Number of questions per game
    pub questions: usize,
    /// Ask with four options instead of free text
    pub multiple_choice: bool,
    /// Attributes revealed as hints (empty = all)
    pub hints: Vec<String>,
    /// Attributes asked for (empty = all)
    pub questions_attributes: Vec<String>,
}

impl Default for FileGameConfig {
    fn default() -> Self {
        let params = GameParams::default();
        Self {
            questions: params.questions,
            multiple_choice: params.multiple_choice,
            hints: Vec::new(),
            questions_attributes: Vec::new(),
        }
    }
}

impl FileGameConfig {
    /// Build the game parameters, collecting issues on the way
    ///
    /// Unknown attribute names are dropped with a warning.
    pub fn to_game_params(&self) -> (GameParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        if self.questions == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::InvalidValue {
                    field: "game.questions".to_string(),
                    value: "0".to_string(),
                },
                message: "game.questions: a game needs at least one question".to_string(),
            });
        }

        let (hints, hint_issues) = parse_attributes("game.hints", &self.hints);
        let (questions, question_issues) =
            parse_attributes("game.questions_attributes", &self.questions_attributes);
        issues.extend(hint_issues);
        issues.extend(question_issues);

        let params = GameParams::default()
            .with_questions(self.questions)
            .with_multiple_choice(self.multiple_choice)
            .with_hints(hints)
            .with_questions_attributes(questions);

        if params.is_self_referential() {
            let attribute = params.hints[0].to_string();
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::SameHintAndQuestion {
                    attribute: attribute.clone(),
                },
                message: format!(
                    "game: '{}' is the only hint and the only question attribute",
                    attribute
                ),
            });
        }

        (params, issues)
    }
}

fn parse_attributes(field: &str, names: &[String]) -> (Vec<Attribute>, Vec<ConfigIssue>) {
    let mut attributes = Vec::new();
    let mut issues = Vec::new();
    for name in names {
        match name.parse::<Attribute>() {
            Ok(attribute) => attributes.push(attribute),
            Err(_) => issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::InvalidEnumValue {
                    field: field.to_string(),
                    value: name.clone(),
                    valid_values: Attribute::ALL.iter().map(|a| a.to_string()).collect(),
                },
                message: format!("{}: unknown attribute '{}', ignoring it", field, name),
            }),
        }
    }
    (attributes, issues)
}
