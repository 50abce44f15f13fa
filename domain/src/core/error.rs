//! Domain error types

use crate::attribute::Attribute;
use crate::member::MemberId;
use thiserror::Error;

/// Broad classes of [`DomainError`]
///
/// Callers use this to decide how to react: usage errors are bugs in the
/// calling code, state errors mean "not enough data right now, pick another
/// pair", registration errors concern the member registry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    State,
    Registration,
    Value,
}

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{question} is not a valid question for {hint}")]
    NotQuestionable { hint: Attribute, question: Attribute },

    #[error("Given member has no attribute {0}")]
    MissingAttribute(Attribute),

    #[error("{hint} currently not hintable for {question}")]
    NotHintable { hint: Attribute, question: Attribute },

    #[error("Given member is not hintable for attribute {attribute}! Only {available} distinct values")]
    InsufficientDistractors { attribute: Attribute, available: usize },

    #[error("Member {0} is already registered.")]
    AlreadyRegistered(MemberId),

    #[error("Member {0} is not registered.")]
    NotRegistered(MemberId),

    #[error("Invalid score: {0}")]
    InvalidScore(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Unknown instrument description: {0}")]
    UnknownInstrument(String),

    #[error("Unknown gender: {0}")]
    UnknownGender(String),
}

impl DomainError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotQuestionable { .. } | DomainError::MissingAttribute(_) => {
                ErrorKind::Usage
            }
            DomainError::NotHintable { .. } | DomainError::InsufficientDistractors { .. } => {
                ErrorKind::State
            }
            DomainError::AlreadyRegistered(_) | DomainError::NotRegistered(_) => {
                ErrorKind::Registration
            }
            DomainError::InvalidScore(_)
            | DomainError::UnknownAttribute(_)
            | DomainError::UnknownInstrument(_)
            | DomainError::UnknownGender(_) => ErrorKind::Value,
        }
    }

    /// Check if this error only reflects the current index state
    ///
    /// Transient errors go away once the population changes; the caller
    /// should re-evaluate the questionable pairs instead of retrying.
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::State
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_questionable_display() {
        let error = DomainError::NotQuestionable {
            hint: Attribute::LastName,
            question: Attribute::Age,
        };
        assert_eq!(error.to_string(), "age is not a valid question for last_name");
    }

    #[test]
    fn test_not_hintable_display() {
        let error = DomainError::NotHintable {
            hint: Attribute::LastName,
            question: Attribute::FirstName,
        };
        assert_eq!(
            error.to_string(),
            "last_name currently not hintable for first_name"
        );
    }

    #[test]
    fn test_is_transient_check() {
        assert!(
            DomainError::NotHintable {
                hint: Attribute::Age,
                question: Attribute::Address,
            }
            .is_transient()
        );
        assert!(
            DomainError::InsufficientDistractors {
                attribute: Attribute::Age,
                available: 2,
            }
            .is_transient()
        );
        assert!(!DomainError::MissingAttribute(Attribute::Age).is_transient());
        assert!(!DomainError::AlreadyRegistered(MemberId::new(1)).is_transient());
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            DomainError::MissingAttribute(Attribute::Nickname).kind(),
            ErrorKind::Usage
        );
        assert_eq!(
            DomainError::NotRegistered(MemberId::new(3)).kind(),
            ErrorKind::Registration
        );
        assert_eq!(
            DomainError::UnknownGender("x".to_string()).kind(),
            ErrorKind::Value
        );
    }
}
