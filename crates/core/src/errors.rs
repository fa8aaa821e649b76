use thiserror::Error;

use crate::domain::question::QuestionId;
use crate::validation::ValidationError;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("question {id:?} is locked and cannot be edited")]
    QuestionLocked { id: QuestionId },
    #[error("question {id:?} is deleted and cannot be edited")]
    QuestionDeleted { id: QuestionId },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
