//! REPL (Read-Eval-Print Loop) for an interactive quiz game

use crate::output::console::{ConsoleFormatter, OPTION_KEYS};
use akanamen_application::Questioner;
use akanamen_domain::{Answer, Orchestra, ScorePeriod};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;
use tracing::debug;

const HISTORY_SIZE: usize = 500;
const BOARD_LENGTH: usize = 10;

/// One line of player input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    Quit,
    Help,
    Scores(ScorePeriod),
    Answer(Answer),
    /// Not understood, with a message for the player
    Invalid(String),
}

/// Interpret a line typed during a game
///
/// Multiple choice answers are `a`-`d` or `1`-`4`.
pub fn parse_input(line: &str, multiple_choice: bool) -> QuizInput {
    let line = line.trim();
    if let Some(command) = line.strip_prefix('/') {
        let mut parts = command.split_whitespace();
        return match parts.next() {
            Some("quit" | "exit" | "q") => QuizInput::Quit,
            Some("help" | "h" | "?") => QuizInput::Help,
            Some("scores" | "score") => match parts.next().map(str::parse::<ScorePeriod>) {
                None => QuizInput::Scores(ScorePeriod::default()),
                Some(Ok(period)) => QuizInput::Scores(period),
                Some(Err(_)) => QuizInput::Invalid(
                    "Unbekannter Zeitraum. Erlaubt: heute, woche, monat, jahr, gesamt".to_string(),
                ),
            },
            _ => QuizInput::Invalid(format!("Unbekannter Befehl: {}", line)),
        };
    }

    if !multiple_choice {
        return if line.is_empty() {
            QuizInput::Invalid("Bitte eine Antwort eingeben.".to_string())
        } else {
            QuizInput::Answer(Answer::Text(line.to_string()))
        };
    }

    let key = line.to_lowercase();
    let mut chars = key.chars();
    let choice = match (chars.next(), chars.next()) {
        (Some(c), None) => OPTION_KEYS
            .iter()
            .position(|k| *k == c)
            .or_else(|| c.to_digit(10).and_then(|d| (1..=4).contains(&d).then(|| d as usize - 1))),
        _ => None,
    };
    match choice {
        Some(index) => QuizInput::Answer(Answer::Choice(index)),
        None => QuizInput::Invalid("Bitte a, b, c oder d eingeben.".to_string()),
    }
}

/// Interactive quiz REPL
pub struct QuizRepl {
    questioner: Questioner,
    orchestra: Arc<Orchestra>,
    rng: ChaCha8Rng,
}

impl QuizRepl {
    /// Create a new QuizRepl; a seed makes the game reproducible
    pub fn new(questioner: Questioner, orchestra: Arc<Orchestra>, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        debug!(seed, "Seeding quiz");
        Self {
            questioner,
            orchestra,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Run the interactive REPL until the game ends or the player quits
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();

        let history_path = dirs::data_dir().map(|p| p.join("akanamen").join("history.txt"));
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            if let Ok(history) = FileBackedHistory::with_file(HISTORY_SIZE, path.clone()) {
                editor = editor.with_history(Box::new(history));
            }
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("antwort".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        while !self.questioner.is_finished() {
            if self.questioner.current_question().is_none() && !self.ask_next() {
                break;
            }
            let multiple_choice = self
                .questioner
                .current_question()
                .is_some_and(|q| q.is_multiple_choice());

            match editor.read_line(&prompt)? {
                Signal::Success(line) => match parse_input(&line, multiple_choice) {
                    QuizInput::Quit => {
                        println!("Tschüss!");
                        break;
                    }
                    QuizInput::Help => Self::print_help(),
                    QuizInput::Scores(period) => self.print_scores(period),
                    QuizInput::Invalid(message) => println!("{}", message),
                    QuizInput::Answer(answer) => match self.questioner.answer(&answer) {
                        Ok(outcome) => println!("{}\n", ConsoleFormatter::format_outcome(&outcome)),
                        Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e)),
                    },
                },
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Tschüss!");
                    break;
                }
            }
        }

        if self.questioner.asked() > 0 {
            println!("{}", ConsoleFormatter::format_game_summary(self.questioner.score()));
            self.print_scores(ScorePeriod::Overall);
        }
        Ok(())
    }

    /// Draw and print the next question. Returns false if none could be drawn.
    fn ask_next(&mut self) -> bool {
        let number = self.questioner.asked() + 1;
        let total = self.questioner.params().questions;
        match self.questioner.next_question(&mut self.rng) {
            Ok(question) => {
                println!("{}", ConsoleFormatter::format_question(question, number, total));
                true
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e));
                false
            }
        }
    }

    fn print_welcome(&self) {
        let player = self.questioner.player();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│               AkaNamen - Quiz               │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!(
            "Spieler: {}",
            player
                .full_name()
                .unwrap_or_else(|| player.id.to_string())
        );
        println!("Fragen:  {}", self.questioner.params().questions);
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Befehle:");
        println!("  /scores [heute|woche|monat|jahr|gesamt] - Bestenliste anzeigen");
        println!("  /help, /h, /?                           - Diese Hilfe anzeigen");
        println!("  /quit, /exit, /q                        - Spiel beenden");
        println!();
    }

    fn print_scores(&self, period: ScorePeriod) {
        let board =
            self.orchestra
                .score_text(period, self.orchestra.today(), Some(BOARD_LENGTH), false);
        println!(
            "{}",
            ConsoleFormatter::format_scores(&format!("Bestenliste ({})", ConsoleFormatter::period_label(period)), &board)
        );
    }
}
