//! Questioner use case
//!
//! Runs one quiz game for one player against the [`Orchestra`].

use crate::config::GameParams;
use crate::ports::game_logger::{GameEvent, GameLogger, NoGameLogger};
use akanamen_domain::{
    Answer, Attribute, DomainError, Member, MemberId, Orchestra, Question, Score,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during a quiz game
#[derive(Error, Debug)]
pub enum QuestionerError {
    #[error("A game needs at least one question")]
    NoQuestions,

    #[error("Player {0} is not a registered member")]
    UnknownPlayer(MemberId),

    #[error("Hints and questions are both restricted to {0}")]
    SelfReferential(Attribute),

    #[error("None of the configured attribute pairs can currently produce a question")]
    NothingQuestionable,

    #[error("The game is already finished")]
    Finished,

    #[error("The current question has not been answered yet")]
    QuestionPending,

    #[error("There is no question to answer")]
    NoPendingQuestion,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of answering the current question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The correct answer as shown to the player
    pub correct_answer: String,
    /// Whether that was the last question of the game
    pub finished: bool,
}

/// A quiz game session
pub struct Questioner {
    orchestra: Arc<Orchestra>,
    player: Member,
    params: GameParams,
    pairs: Vec<(Attribute, Attribute)>,
    logger: Arc<dyn GameLogger>,
    current: Option<Question>,
    asked: usize,
    score: Score,
    /// Members answered correctly so far, per question attribute
    used: BTreeMap<Attribute, BTreeSet<MemberId>>,
}

impl Questioner {
    /// Start a game for `player`
    ///
    /// Fails if nothing could be asked right now. The player is never asked
    /// about themselves.
    pub fn new(
        orchestra: Arc<Orchestra>,
        player: MemberId,
        params: GameParams,
    ) -> Result<Self, QuestionerError> {
        if params.questions == 0 {
            return Err(QuestionerError::NoQuestions);
        }
        if params.is_self_referential() {
            return Err(QuestionerError::SelfReferential(params.hints[0]));
        }
        let player = orchestra
            .member(player)
            .ok_or(QuestionerError::UnknownPlayer(player))?;

        let questioner = Self {
            pairs: params.pairs(),
            orchestra,
            player,
            params,
            logger: Arc::new(NoGameLogger),
            current: None,
            asked: 0,
            score: Score::default(),
            used: BTreeMap::new(),
        };
        if questioner.available_pairs().is_empty() {
            return Err(QuestionerError::NothingQuestionable);
        }
        info!(
            player = %questioner.player.id,
            questions = questioner.params.questions,
            pairs = questioner.pairs.len(),
            "Starting game"
        );
        Ok(questioner)
    }

    pub fn with_logger(mut self, logger: Arc<dyn GameLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn player(&self) -> &Member {
        &self.player
    }

    pub fn params(&self) -> &GameParams {
        &self.params
    }

    /// Score of this game so far
    pub fn score(&self) -> Score {
        self.score
    }

    /// Number of answered questions
    pub fn asked(&self) -> usize {
        self.asked
    }

    pub fn is_finished(&self) -> bool {
        self.asked >= self.params.questions
    }

    /// The question waiting for an answer, if any
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    /// Configured pairs the orchestra can serve right now
    ///
    /// Members already answered correctly for a question attribute are not
    /// asked about again for it.
    pub fn available_pairs(&self) -> Vec<(Attribute, Attribute)> {
        self.pairs
            .iter()
            .copied()
            .filter(|(hint, question)| {
                self.orchestra.manager(*hint).is_hintable_with(
                    self.orchestra.manager(*question),
                    self.multiple_choice_for(*question),
                    &self.exclude_for(*question),
                )
            })
            .collect()
    }

    /// Members not to ask about for `question`: the player and everyone already answered correctly
    fn exclude_for(&self, question: Attribute) -> Vec<MemberId> {
        std::iter::once(self.player.id)
            .chain(self.used.get(&question).into_iter().flatten().copied())
            .collect()
    }

    fn multiple_choice_for(&self, question: Attribute) -> bool {
        self.params.multiple_choice || !question.allows_free_text()
    }

    /// Draw the next question
    ///
    /// Pairs are re-evaluated every turn since the member population may have
    /// changed since the last one.
    pub fn next_question<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<&Question, QuestionerError> {
        if self.is_finished() {
            return Err(QuestionerError::Finished);
        }
        if self.current.is_some() {
            return Err(QuestionerError::QuestionPending);
        }

        let mut pairs = self.available_pairs();
        if pairs.is_empty() && !self.used.is_empty() {
            debug!(player = %self.player.id, "Every member was asked, starting over");
            self.used.clear();
            pairs = self.available_pairs();
        }
        pairs.shuffle(rng);
        for (hint, question) in pairs {
            let result = self.orchestra.manager(hint).build_question_with(
                self.orchestra.manager(question),
                self.multiple_choice_for(question),
                &self.exclude_for(question),
                rng,
            );
            let draft = match result {
                Ok(draft) => draft,
                Err(e) if e.is_transient() => {
                    debug!(%hint, %question, error = %e, "Pair no longer questionable");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            self.logger.log(GameEvent::new(
                "question_asked",
                json!({
                    "player": self.player.id,
                    "number": self.asked + 1,
                    "hint_attribute": hint,
                    "question_attribute": question,
                    "member": draft.member.id,
                    "hint": draft.hint,
                    "solution": draft.solution,
                }),
            ));
            let question: &Question = self.current.insert(Question::new(draft));
            return Ok(question);
        }
        Err(QuestionerError::NothingQuestionable)
    }

    /// Answer the current question
    pub fn answer(&mut self, answer: &Answer) -> Result<AnswerOutcome, QuestionerError> {
        let question = self
            .current
            .take()
            .ok_or(QuestionerError::NoPendingQuestion)?;
        let correct = question.check(answer);

        self.score.record(1, u32::from(correct))?;
        if correct {
            self.used
                .entry(question.attribute())
                .or_default()
                .insert(question.member().id);
        }
        self.orchestra
            .record_answer(self.player.id, correct, self.orchestra.today())?;
        self.asked += 1;

        self.logger.log(GameEvent::new(
            "answer_given",
            json!({
                "player": self.player.id,
                "number": self.asked,
                "answer": match answer {
                    Answer::Choice(index) => json!(index),
                    Answer::Text(text) => json!(text),
                },
                "correct": correct,
            }),
        ));

        let finished = self.is_finished();
        if finished {
            info!(
                player = %self.player.id,
                correct = self.score.correct(),
                answers = self.score.answers(),
                "Game finished"
            );
            self.logger.log(GameEvent::new(
                "game_finished",
                json!({
                    "player": self.player.id,
                    "answers": self.score.answers(),
                    "correct": self.score.correct(),
                    "ratio": self.score.ratio(),
                }),
            ));
        }

        Ok(AnswerOutcome {
            correct,
            correct_answer: question.correct_answer(),
            finished,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use akanamen_domain::{FixedClock, Gender, Instrument, Solution};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingLogger(Mutex<Vec<&'static str>>);

    impl GameLogger for RecordingLogger {
        fn log(&self, event: GameEvent) {
            self.0.lock().unwrap().push(event.event_type);
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 3, 14).unwrap()
    }

    fn orchestra(size: i64) -> Arc<Orchestra> {
        let orchestra = Orchestra::with_clock(Arc::new(FixedClock::new(today())));
        for i in 1..=size {
            let member = Member::new(i)
                .with_first_name(format!("First{}", i))
                .with_last_name(format!("Last{}", i))
                .with_gender(if i % 2 == 0 { Gender::Female } else { Gender::Male })
                .with_instruments([Instrument::ALL[i as usize]])
                .with_photo_file_id(format!("photo{}", i))
                .with_joined(1990 + i as i32);
            orchestra.register_member(&member).unwrap();
        }
        Arc::new(orchestra)
    }

    fn correct_answer(question: &Question) -> Answer {
        match &question.draft().solution {
            Solution::MultipleChoice { correct_index, .. } => Answer::Choice(*correct_index),
            Solution::FreeText { answers } => Answer::Text(answers[0].to_string()),
        }
    }

    #[test]
    fn test_rejects_zero_questions() {
        let result = Questioner::new(
            orchestra(6),
            MemberId::new(1),
            GameParams::default().with_questions(0),
        );
        assert!(matches!(result, Err(QuestionerError::NoQuestions)));
    }

    #[test]
    fn test_rejects_unknown_player() {
        let result = Questioner::new(orchestra(6), MemberId::new(42), GameParams::default());
        assert!(matches!(
            result,
            Err(QuestionerError::UnknownPlayer(id)) if id == MemberId::new(42)
        ));
    }

    #[test]
    fn test_rejects_same_hint_and_question() {
        let params = GameParams::default()
            .with_hints([Attribute::LastName])
            .with_questions_attributes([Attribute::LastName]);
        let result = Questioner::new(orchestra(6), MemberId::new(1), params);
        assert!(matches!(
            result,
            Err(QuestionerError::SelfReferential(Attribute::LastName))
        ));
    }

    #[test]
    fn test_rejects_when_nothing_is_questionable() {
        let result = Questioner::new(orchestra(3), MemberId::new(1), GameParams::default());
        assert!(matches!(result, Err(QuestionerError::NothingQuestionable)));
    }

    #[test]
    fn test_available_pairs_follow_configuration() {
        let params = GameParams::default()
            .with_hints([Attribute::LastName])
            .with_questions_attributes([Attribute::Instruments, Attribute::Age]);
        let questioner = Questioner::new(orchestra(6), MemberId::new(1), params).unwrap();
        assert_eq!(
            questioner.available_pairs(),
            vec![(Attribute::LastName, Attribute::Instruments)]
        );
    }

    #[test]
    fn test_full_game() {
        let orchestra = orchestra(6);
        let logger = Arc::new(RecordingLogger::default());
        let mut questioner = Questioner::new(
            orchestra.clone(),
            MemberId::new(1),
            GameParams::default().with_questions(3),
        )
        .unwrap()
        .with_logger(logger.clone());
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for round in 1..=3 {
            let question = questioner.next_question(&mut rng).unwrap();
            assert_ne!(question.member().id, MemberId::new(1));
            assert!(question.is_multiple_choice());
            let answer = correct_answer(question);

            assert!(matches!(
                questioner.next_question(&mut rng),
                Err(QuestionerError::QuestionPending)
            ));
            let outcome = questioner.answer(&answer).unwrap();
            assert!(outcome.correct);
            assert_eq!(outcome.finished, round == 3);
        }

        assert!(questioner.is_finished());
        assert!(matches!(
            questioner.next_question(&mut rng),
            Err(QuestionerError::Finished)
        ));
        assert!(matches!(
            questioner.answer(&Answer::Choice(0)),
            Err(QuestionerError::NoPendingQuestion)
        ));
        assert_eq!(questioner.score(), Score::new(3, 3).unwrap());
        assert_eq!(
            orchestra.user_score(MemberId::new(1)).unwrap().score_on(today()),
            Score::new(3, 3).unwrap()
        );

        let events = logger.0.lock().unwrap().clone();
        assert_eq!(events.iter().filter(|e| **e == "question_asked").count(), 3);
        assert_eq!(events.iter().filter(|e| **e == "answer_given").count(), 3);
        assert_eq!(events.last(), Some(&"game_finished"));
    }

    #[test]
    fn test_wrong_answers_count() {
        let mut questioner = Questioner::new(
            orchestra(6),
            MemberId::new(2),
            GameParams::default().with_questions(2),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..2 {
            let question = questioner.next_question(&mut rng).unwrap();
            let Answer::Choice(correct) = correct_answer(question) else {
                panic!("expected multiple choice");
            };
            let outcome = questioner.answer(&Answer::Choice((correct + 1) % 4)).unwrap();
            assert!(!outcome.correct);
            assert!(!outcome.correct_answer.is_empty());
        }
        assert_eq!(questioner.score(), Score::new(2, 0).unwrap());
    }

    #[test]
    fn test_free_text_photo_stays_multiple_choice() {
        let params = GameParams::default()
            .with_multiple_choice(false)
            .with_hints([Attribute::LastName])
            .with_questions_attributes([Attribute::PhotoFileId]);
        let mut questioner = Questioner::new(orchestra(6), MemberId::new(1), params).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let question = questioner.next_question(&mut rng).unwrap();
        assert_eq!(question.attribute(), Attribute::PhotoFileId);
        assert!(question.is_multiple_choice());
    }

    #[test]
    fn test_free_text_game() {
        let params = GameParams::default()
            .with_multiple_choice(false)
            .with_hints([Attribute::LastName])
            .with_questions_attributes([Attribute::Joined]);
        let mut questioner = Questioner::new(orchestra(6), MemberId::new(1), params).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let question = questioner.next_question(&mut rng).unwrap();
        assert!(!question.is_multiple_choice());
        let answer = correct_answer(question);
        assert!(questioner.answer(&answer).unwrap().correct);
    }

    fn instruments_game(questions: usize) -> Questioner {
        let params = GameParams::default()
            .with_questions(questions)
            .with_hints([Attribute::LastName])
            .with_questions_attributes([Attribute::Instruments]);
        Questioner::new(orchestra(6), MemberId::new(1), params).unwrap()
    }

    #[test]
    fn test_correctly_answered_members_are_not_asked_again() {
        for seed in 0..30 {
            let mut questioner = instruments_game(4);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut asked = Vec::new();
            for _ in 0..4 {
                let question = questioner.next_question(&mut rng).unwrap();
                asked.push(question.member().id);
                let answer = correct_answer(question);
                assert!(questioner.answer(&answer).unwrap().correct);
            }
            let distinct: BTreeSet<_> = asked.iter().copied().collect();
            assert_eq!(distinct.len(), asked.len(), "seed {}: {:?}", seed, asked);
        }
    }

    #[test]
    fn test_wrong_answers_do_not_mark_members() {
        let mut questioner = instruments_game(2);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let question = questioner.next_question(&mut rng).unwrap();
        let Answer::Choice(correct) = correct_answer(question) else {
            panic!("expected multiple choice");
        };
        questioner.answer(&Answer::Choice((correct + 1) % 4)).unwrap();
        assert!(questioner.used.is_empty());
    }

    #[test]
    fn test_used_members_are_cleared_when_exhausted() {
        let mut questioner = instruments_game(6);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut asked = BTreeSet::new();
        for _ in 0..5 {
            let question = questioner.next_question(&mut rng).unwrap();
            asked.insert(question.member().id);
            let answer = correct_answer(question);
            questioner.answer(&answer).unwrap();
        }
        assert_eq!(asked.len(), 5);
        assert!(questioner.available_pairs().is_empty());

        let question = questioner.next_question(&mut rng).unwrap();
        assert!(asked.contains(&question.member().id));
        assert!(questioner.used.is_empty());
    }

    #[test]
    fn test_population_change_between_turns() {
        let orchestra = orchestra(6);
        let params = GameParams::default()
            .with_hints([Attribute::LastName])
            .with_questions_attributes([Attribute::Instruments]);
        let mut questioner =
            Questioner::new(orchestra.clone(), MemberId::new(1), params).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let question = questioner.next_question(&mut rng).unwrap();
        let answer = correct_answer(question);
        questioner.answer(&answer).unwrap();

        for i in 2..=5 {
            orchestra
                .kick_member(&orchestra.member(MemberId::new(i)).unwrap())
                .unwrap();
        }
        assert!(matches!(
            questioner.next_question(&mut rng),
            Err(QuestionerError::NothingQuestionable)
        ));
    }
}
