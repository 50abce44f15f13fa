//! Quiz questions
//!
//! [`draft::QuestionDraft`] is what the indexes produce; [`question::Question`]
//! phrases it and judges answers.

pub mod draft;
pub mod question;

pub use draft::{QuestionDraft, Solution};
pub use question::{ACCEPTANCE_THRESHOLD, Answer, PHOTO_OPTIONS, Question};
