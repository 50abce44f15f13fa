//! Console output formatter for quiz games and the member directory

use akanamen_application::{AnswerOutcome, QuestionerError};
use akanamen_domain::{Attribute, Orchestra, PHOTO_OPTIONS, Question, Score, ScorePeriod};
use colored::Colorize;

/// Letters used to pick multiple choice options
pub const OPTION_KEYS: [char; 4] = ['a', 'b', 'c', 'd'];

/// Formats quiz output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a question with its options
    pub fn format_question(question: &Question, number: usize, total: usize) -> String {
        let mut output = format!(
            "{} {}\n",
            format!("[{}/{}]", number, total).cyan().bold(),
            question.text().bold()
        );

        if question.hint_attribute() == Attribute::PhotoFileId {
            output.push_str(&format!(
                "  {} {}\n",
                "Foto:".dimmed(),
                question.hint()
            ));
        }

        match question.options() {
            Some(options) => {
                for (i, option) in options.iter().enumerate() {
                    let label = if question.attribute() == Attribute::PhotoFileId {
                        format!("{} ({})", PHOTO_OPTIONS[i], option)
                    } else {
                        option.to_string()
                    };
                    output.push_str(&format!("  {}) {}\n", OPTION_KEYS[i].to_string().yellow(), label));
                }
            }
            None => output.push_str(&format!("  {}\n", "(Antwort eintippen)".dimmed())),
        }
        output
    }

    /// Format the verdict on an answer
    pub fn format_outcome(outcome: &AnswerOutcome) -> String {
        if outcome.correct {
            format!("{} {}", "Richtig!".green().bold(), outcome.correct_answer)
        } else {
            format!(
                "{} Richtig wäre gewesen: {}",
                "Leider falsch.".red().bold(),
                outcome.correct_answer
            )
        }
    }

    /// Format the result of a finished game
    pub fn format_game_summary(score: Score) -> String {
        format!(
            "\n{}\n{} von {} Fragen richtig ({:.2} %)\n",
            Self::header("Spiel beendet"),
            score.correct(),
            score.answers(),
            score.ratio()
        )
    }

    /// Format a leaderboard rendered by [`Orchestra::score_text`]
    pub fn format_scores(title: &str, board: &str) -> String {
        format!("\n{}\n{}\n", Self::section_header(title), board)
    }

    /// German name of a leaderboard period
    pub fn period_label(period: ScorePeriod) -> &'static str {
        match period {
            ScorePeriod::Today => "heute",
            ScorePeriod::Week => "diese Woche",
            ScorePeriod::Month => "dieser Monat",
            ScorePeriod::Year => "dieses Jahr",
            ScorePeriod::Overall => "gesamt",
        }
    }

    /// Player-facing message for a failed game step
    pub fn format_error(error: &QuestionerError) -> String {
        let message = match error {
            QuestionerError::NoQuestions => "Ein Spiel braucht mindestens eine Frage.".to_string(),
            QuestionerError::UnknownPlayer(id) => format!("Spieler {} ist kein Mitglied.", id),
            QuestionerError::SelfReferential(attribute) => format!(
                "Hinweise und Fragen sind beide auf {} beschränkt.",
                attribute.label()
            ),
            QuestionerError::NothingQuestionable => {
                "Zurzeit kann keine Frage gestellt werden.".to_string()
            }
            QuestionerError::Finished => "Das Spiel ist schon vorbei.".to_string(),
            QuestionerError::QuestionPending => {
                "Die aktuelle Frage ist noch nicht beantwortet.".to_string()
            }
            QuestionerError::NoPendingQuestion => "Es gibt keine offene Frage.".to_string(),
            QuestionerError::Domain(e) => format!("Interner Fehler ({})", e),
        };
        format!("{} {}", "Fehler:".red().bold(), message)
    }

    /// Format the currently questionable (hint, question) pairs
    pub fn format_pairs(pairs: &[(Attribute, Attribute)], multiple_choice: bool) -> String {
        let mode = if multiple_choice {
            "Auswahl"
        } else {
            "Freitext"
        };
        let mut output = Self::section_header(&format!("Mögliche Fragen ({})", mode));
        if pairs.is_empty() {
            output.push_str(&format!("{}\n", "  keine".dimmed()));
            return output;
        }
        for (hint, question) in pairs {
            output.push_str(&format!(
                "  {:<14} {} {}\n",
                hint.as_str().yellow(),
                "→".dimmed(),
                question.as_str()
            ));
        }
        output.push_str(&format!("\n{} Kombinationen\n", pairs.len()));
        output
    }

    /// Format every registered member with the values the quiz knows about
    pub fn format_members(orchestra: &Orchestra) -> String {
        let members = orchestra.members();
        let mut output = Self::section_header(&format!("Mitglieder ({})", members.len()));
        let today = orchestra.today();

        for member in &members {
            let name = member.full_name().unwrap_or_else(|| "Anonym".to_string());
            let gender = member.gender.map(|g| g.to_string()).unwrap_or_default();
            output.push_str(&format!(
                "\n{} {} {}\n",
                format!("#{}", member.id).dimmed(),
                name.bold(),
                gender
            ));
            for attribute in Attribute::ALL {
                if matches!(
                    attribute,
                    Attribute::FirstName | Attribute::LastName | Attribute::Nickname | Attribute::FullName
                ) {
                    continue;
                }
                let values = attribute.values_of(member, today);
                if values.is_empty() {
                    continue;
                }
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                output.push_str(&format!(
                    "  {:<14} {}\n",
                    format!("{}:", attribute.label()).cyan(),
                    values.join(", ")
                ));
            }
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(40);
        format!("{}\n{:^40}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use akanamen_domain::{AttributeValue, FixedClock, Member, QuestionDraft, Solution};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn plain() {
        colored::control::set_override(false);
    }

    fn question(attribute: Attribute, options: [&str; 4]) -> Question {
        Question::new(QuestionDraft {
            member: Member::new(1).with_first_name("Anna"),
            hint_attribute: Attribute::FirstName,
            question_attribute: attribute,
            hint: AttributeValue::from("Anna"),
            solution: Solution::MultipleChoice {
                options: options.map(AttributeValue::from),
                correct_index: 0,
            },
        })
    }

    #[test]
    fn test_format_question_lists_options() {
        plain();
        let text = ConsoleFormatter::format_question(
            &question(Attribute::LastName, ["Smith", "Jones", "Brown", "Green"]),
            2,
            10,
        );
        assert!(text.starts_with("[2/10] Wie lautet der Nachname von Anna?"));
        assert!(text.contains("  a) Smith\n"));
        assert!(text.contains("  d) Green\n"));
    }

    #[test]
    fn test_format_photo_options() {
        plain();
        let text = ConsoleFormatter::format_question(
            &question(Attribute::PhotoFileId, ["p1", "p2", "p3", "p4"]),
            1,
            1,
        );
        assert!(text.contains("a) Oben links (p1)"));
    }

    #[test]
    fn test_format_outcome() {
        plain();
        let right = AnswerOutcome {
            correct: true,
            correct_answer: "Tuba".to_string(),
            finished: false,
        };
        assert_eq!(ConsoleFormatter::format_outcome(&right), "Richtig! Tuba");
        let wrong = AnswerOutcome {
            correct: false,
            ..right
        };
        assert!(ConsoleFormatter::format_outcome(&wrong).contains("Richtig wäre gewesen: Tuba"));
    }

    #[test]
    fn test_format_pairs() {
        plain();
        let text = ConsoleFormatter::format_pairs(
            &[(Attribute::LastName, Attribute::Instruments)],
            true,
        );
        assert!(text.contains("Auswahl"));
        assert!(text.contains("last_name"));
        assert!(text.contains("1 Kombinationen"));
        let empty = ConsoleFormatter::format_pairs(&[], false);
        assert!(empty.contains("Freitext"));
        assert!(empty.contains("keine"));
    }

    #[test]
    fn test_format_members() {
        plain();
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let orchestra = Orchestra::with_clock(Arc::new(FixedClock::new(today)));
        orchestra
            .register_member(
                &Member::new(7)
                    .with_first_name("Anna")
                    .with_last_name("Smith")
                    .with_joined(2012),
            )
            .unwrap();

        let text = ConsoleFormatter::format_members(&orchestra);
        assert!(text.contains("Mitglieder (1)"));
        assert!(text.contains("#7 Anna Smith"));
        assert!(text.contains("Beitrittsjahr:"));
        assert!(text.contains("2012"));
        assert!(!text.contains("Adresse"));
    }

    #[test]
    fn test_format_error_is_german() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_error(&QuestionerError::NothingQuestionable),
            "Fehler: Zurzeit kann keine Frage gestellt werden."
        );
        let text = ConsoleFormatter::format_error(&QuestionerError::SelfReferential(
            Attribute::LastName,
        ));
        assert!(text.contains(Attribute::LastName.label()));
        assert!(text.contains("beschränkt"));
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(ConsoleFormatter::period_label(ScorePeriod::Overall), "gesamt");
        assert_eq!(ConsoleFormatter::period_label(ScorePeriod::Week), "diese Woche");
    }
}
